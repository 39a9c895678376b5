//! Reporting utilities: formatted terminal output for the dashboard.
//!
//! We keep formatting code in one place so:
//! - the metrics code stays free of rounding and layout decisions
//! - output changes are localized (the golden tests live next to them)

pub mod format;

pub use format::*;
