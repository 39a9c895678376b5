//! Command-line parsing for the salary dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the filtering/metrics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ChartKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "salary", version, about = "Salary vs inflation dashboard by industry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (the default when no subcommand is given).
    Tui(DashboardArgs),
    /// Print metric cards, growth summary, conclusions, and the selected chart.
    Report(DashboardArgs),
    /// Print the filtered rows as a table.
    Table(DashboardArgs),
    /// Print only the ASCII chart.
    Plot(DashboardArgs),
    /// Write filtered rows (CSV) and/or the growth report (JSON).
    Export(ExportArgs),
}

/// Data source and filters shared by every command.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// Dataset CSV (falls back to $SALARY_DATA, then data/salary_analysis_data.csv).
    #[arg(short = 'f', long = "data", value_name = "CSV")]
    pub data: Option<PathBuf>,

    /// Industry to include (repeatable; default: all).
    #[arg(short = 'i', long = "industry", value_name = "NAME")]
    pub industries: Vec<String>,

    /// First year of the period (default: earliest in the data).
    #[arg(long = "from", value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last year of the period (default: latest in the data).
    #[arg(long = "to", value_name = "YEAR")]
    pub to: Option<i32>,

    /// Chart to show.
    #[arg(short = 'c', long, value_enum, default_value_t = ChartKind::Nominal)]
    pub chart: ChartKind,

    /// Also show the raw rows of the selection.
    #[arg(long)]
    pub table: bool,

    /// Disable the terminal plot in `report`.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for `export`.
#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dashboard: DashboardArgs,

    /// Write the filtered rows to this CSV file.
    #[arg(long, value_name = "CSV", required_unless_present = "report")]
    pub rows: Option<PathBuf>,

    /// Write the growth report to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub report: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn dashboard_flags_parse() {
        let cli = Cli::try_parse_from([
            "salary", "report", "-i", "IT", "--industry", "Mining", "--from", "2010", "--to",
            "2015", "-c", "growth", "--table", "--no-plot",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else {
            panic!("expected report");
        };
        assert_eq!(args.industries, vec!["IT", "Mining"]);
        assert_eq!((args.from, args.to), (Some(2010), Some(2015)));
        assert_eq!(args.chart, ChartKind::Growth);
        assert!(args.table && args.no_plot);
        assert_eq!(args.data, None);
    }

    #[test]
    fn export_needs_a_target() {
        assert!(Cli::try_parse_from(["salary", "export"]).is_err());
        let cli = Cli::try_parse_from(["salary", "export", "--report", "out.json", "-f", "x.csv"])
            .unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.report, Some(PathBuf::from("out.json")));
        assert_eq!(args.rows, None);
        assert_eq!(args.dashboard.data, Some(PathBuf::from("x.csv")));
    }
}
