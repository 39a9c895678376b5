//! `salary-dash` library crate.
//!
//! The binary (`salary`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the CLI and the TUI share one render pass over the same data
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod filter;
pub mod io;
pub mod metrics;
pub mod plot;
pub mod report;
pub mod tui;
