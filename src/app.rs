//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads the dataset and resolves the selection
//! - prints reports/tables/plots or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::app::pipeline::{DashboardView, build_view};
use crate::cli::{Command, DashboardArgs, ExportArgs};
use crate::config::{DashboardConfig, resolve_data_path};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_dataset};

pub mod pipeline;

/// Entry point for the `salary` binary.
pub fn run() -> Result<(), AppError> {
    // We want `salary` and `salary --from 2010` to behave like `salary tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    // Log lines would scribble over the alternate screen, so the TUI stays
    // quiet unless RUST_LOG asks otherwise.
    let default_level = match cli.command {
        Command::Tui(_) => "off",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Tui(args) => crate::tui::run(config_from_args(&args)),
        Command::Report(args) => handle_report(&config_from_args(&args)),
        Command::Table(args) => handle_table(&config_from_args(&args)),
        Command::Plot(args) => handle_plot(&config_from_args(&args)),
        Command::Export(args) => handle_export(&args),
    }
}

/// Load the dataset and run one render pass for the configured filters.
fn load_view(config: &DashboardConfig) -> Result<(IngestedData, DashboardView), AppError> {
    let ingest = load_dataset(&config.data_path)?;
    let selection = config.selection_for(&ingest.dataset)?;
    let view = build_view(&ingest.dataset, &selection);
    Ok((ingest, view))
}

fn handle_report(config: &DashboardConfig) -> Result<(), AppError> {
    let (ingest, view) = load_view(config)?;

    println!("{}", crate::report::format_load_summary(&ingest));
    println!("{}", crate::report::format_dashboard(&view));

    if config.plot && view.warning.is_none() {
        let plot =
            crate::plot::render_chart(&view, config.chart, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if config.show_table && view.warning.is_none() {
        println!("{}", crate::report::format_table(&view.rows));
    }

    print!("{}", crate::report::format_about());

    Ok(())
}

fn handle_table(config: &DashboardConfig) -> Result<(), AppError> {
    let (_, view) = load_view(config)?;
    match &view.warning {
        Some(warning) => println!("Warning: {warning}"),
        None => print!("{}", crate::report::format_table(&view.rows)),
    }
    Ok(())
}

fn handle_plot(config: &DashboardConfig) -> Result<(), AppError> {
    let (_, view) = load_view(config)?;
    let plot =
        crate::plot::render_chart(&view, config.chart, config.plot_width, config.plot_height);
    print!("{plot}");
    Ok(())
}

fn handle_export(args: &ExportArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.dashboard);
    let (_, view) = load_view(&config)?;

    if let Some(warning) = &view.warning {
        log::warn!("{warning}");
    }
    if let Some(path) = &args.rows {
        crate::io::export::write_rows_csv(path, &view.rows)?;
        println!("Wrote {} rows to {}", view.rows.len(), path.display());
    }
    if let Some(path) = &args.report {
        crate::io::export::write_report_json(path, &view)?;
        println!("Wrote growth report to {}", path.display());
    }

    Ok(())
}

pub fn config_from_args(args: &DashboardArgs) -> DashboardConfig {
    DashboardConfig {
        data_path: resolve_data_path(args.data.clone()),
        industries: args.industries.clone(),
        start_year: args.from,
        end_year: args.to,
        chart: args.chart,
        show_table: args.table,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
    }
}

/// Rewrite argv so `salary` defaults to `salary tui`.
///
/// Rules:
/// - `salary`                          -> `salary tui`
/// - `salary --from 2010 ...`          -> `salary tui --from 2010 ...`
/// - `salary --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "table" | "plot" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_and_flags_go_to_tui() {
        assert_eq!(rewrite_args(args(&["salary"])), args(&["salary", "tui"]));
        assert_eq!(
            rewrite_args(args(&["salary", "--from", "2010"])),
            args(&["salary", "tui", "--from", "2010"])
        );
    }

    #[test]
    fn subcommands_and_help_are_left_alone() {
        for argv in [
            args(&["salary", "report", "-i", "IT"]),
            args(&["salary", "export", "--rows", "x.csv"]),
            args(&["salary", "--help"]),
            args(&["salary", "-V"]),
            args(&["salary", "bogus"]),
        ] {
            assert_eq!(rewrite_args(argv.clone()), argv);
        }
    }

    #[test]
    fn flags_map_onto_config() {
        let cli = crate::cli::Cli::try_parse_from(rewrite_args(args(&[
            "salary", "-f", "wages.csv", "-i", "IT", "--to", "2015", "-c", "inflation", "--no-plot",
        ])))
        .unwrap();
        let Command::Tui(dashboard) = cli.command else {
            panic!("expected tui");
        };
        let config = config_from_args(&dashboard);

        assert_eq!(config.data_path, PathBuf::from("wages.csv"));
        assert_eq!(config.industries, vec!["IT"]);
        assert_eq!((config.start_year, config.end_year), (None, Some(2015)));
        assert_eq!(config.chart, crate::domain::ChartKind::Inflation);
        assert!(!config.plot);
        assert!(!config.show_table);
    }

    #[test]
    fn missing_data_file_is_an_input_error() {
        let config = DashboardConfig {
            data_path: PathBuf::from("definitely/not/here.csv"),
            ..DashboardConfig::default()
        };
        let err = handle_report(&config).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
        assert!(err.message().contains("definitely/not/here.csv"));
    }
}
