//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - filtered-row CSV and growth-report JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
