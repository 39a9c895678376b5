//! Exports: filtered rows to CSV, growth report to JSON.
//!
//! Both are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::DashboardView;
use crate::domain::{GrowthMetrics, SalaryRecord, Selection};
use crate::error::AppError;
use crate::filter::InflationSummary;
use crate::metrics::SkippedRecord;

/// Column order of exported rows; matches the `SalaryRecord` field order.
pub const ROW_HEADERS: [&str; 6] = [
    "industry",
    "year",
    "nominal_salary",
    "real_salary",
    "inflation_pct",
    "cumulative_inflation",
];

/// Serialized growth report (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct ReportFile {
    pub tool: String,
    pub selection: Selection,
    pub period_years: i64,
    pub entries: Vec<GrowthMetrics>,
    pub skipped: Vec<SkippedRecord>,
    pub inflation: Option<InflationSummary>,
    pub real_growth_leader: Option<String>,
    pub warning: Option<String>,
}

impl ReportFile {
    pub fn from_view(view: &DashboardView) -> Self {
        Self {
            tool: "salary".to_string(),
            selection: view.selection.clone(),
            period_years: view.period_years(),
            entries: view.growth.entries.clone(),
            skipped: view.growth.skipped.iter().map(SkippedRecord::from).collect(),
            inflation: view.inflation_summary,
            real_growth_leader: view.leader().map(|m| m.industry.clone()),
            warning: view.warning.clone(),
        }
    }
}

/// Write filtered rows to a CSV file (canonical English headers).
pub fn write_rows_csv(path: &Path, rows: &[SalaryRecord]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_rows(file, rows)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write filtered rows as CSV to any writer.
pub fn write_rows<W: Write>(writer: W, rows: &[SalaryRecord]) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    // `serialize` only emits headers along with the first record.
    if rows.is_empty() {
        out.write_record(ROW_HEADERS)
            .map_err(|e| AppError::runtime(format!("Failed to write export CSV header: {e}")))?;
    }
    for r in rows {
        out.serialize(r)
            .map_err(|e| AppError::runtime(format!("Failed to write export CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::runtime(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the growth report of `view` to a JSON file.
pub fn write_report_json(path: &Path, view: &DashboardView) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::input(format!("Failed to create report JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, &ReportFile::from_view(view))
        .map_err(|e| AppError::runtime(format!("Failed to write report JSON: {e}")))?;

    log::info!("wrote growth report to {}", path.display());
    Ok(())
}
