//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded dataset rows (`SalaryRecord`) and their container (`Dataset`)
//! - user selections (`Selection`, `ChartKind`)
//! - calculator outputs (`GrowthMetrics`, `InflationPoint`, etc.)

pub mod types;

pub use types::*;
