//! Growth metrics.
//!
//! - per-industry growth calculator (`growth`)
//! - per-selection report with skipped industries and leader (`summary`)

pub mod growth;
pub mod summary;

pub use growth::*;
pub use summary::*;
