//! Shared "render pass" logic used by both CLI and TUI front-ends.
//!
//! Every selection change runs the whole pass again over the immutable dataset:
//! selection -> filtered rows -> growth report -> inflation series/summary
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{Dataset, GrowthMetrics, InflationPoint, SalaryRecord, Selection};
use crate::filter::{InflationSummary, filter_records, inflation_by_year, summarize_inflation};
use crate::metrics::{GrowthReport, growth_report};

/// Shown when a selection matches no rows.
pub const NO_DATA_WARNING: &str = "No data found for the selected filters. Try changing them.";

/// Everything a front-end needs to draw one state of the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub selection: Selection,
    pub rows: Vec<SalaryRecord>,
    pub growth: GrowthReport,
    pub inflation: Vec<InflationPoint>,
    pub inflation_summary: Option<InflationSummary>,
    /// Set when nothing was computed.
    pub warning: Option<String>,
}

impl DashboardView {
    fn empty(selection: &Selection) -> Self {
        Self {
            selection: selection.clone(),
            rows: Vec::new(),
            growth: GrowthReport::default(),
            inflation: Vec::new(),
            inflation_summary: None,
            warning: Some(NO_DATA_WARNING.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn period_years(&self) -> i64 {
        self.selection.period_years()
    }

    pub fn leader(&self) -> Option<&GrowthMetrics> {
        self.growth.real_growth_leader(self.selection.industries.len())
    }
}

/// Run one full render pass for `selection`.
pub fn build_view(dataset: &Dataset, selection: &Selection) -> DashboardView {
    if selection.is_empty() {
        log::debug!("empty selection: {selection:?}");
        return DashboardView::empty(selection);
    }

    let rows = filter_records(&dataset.records, selection);
    if rows.is_empty() {
        log::debug!("selection matched no rows: {selection:?}");
        return DashboardView::empty(selection);
    }

    // Metrics look up endpoints in the full dataset, not just the filtered rows.
    let growth = growth_report(&dataset.records, selection);
    let inflation = inflation_by_year(&rows);
    let inflation_summary = summarize_inflation(&inflation);

    log::debug!(
        "view: {} rows, {} computed, {} skipped",
        rows.len(),
        growth.entries.len(),
        growth.skipped.len()
    );

    DashboardView {
        selection: selection.clone(),
        rows,
        growth,
        inflation,
        inflation_summary,
        warning: None,
    }
}
