//! Growth metrics for every industry in a selection.

use serde::Serialize;

use crate::domain::{GrowthMetrics, SalaryRecord, Selection};
use crate::metrics::growth::{MetricsError, compute_growth};

/// An industry that was selected but has no computable metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedIndustry {
    pub industry: String,
    pub reason: MetricsError,
}

/// Per-industry growth for a selection, in selection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GrowthReport {
    pub entries: Vec<GrowthMetrics>,
    pub skipped: Vec<SkippedIndustry>,
}

impl GrowthReport {
    /// Industry with the highest real growth ratio.
    ///
    /// Only meaningful when comparing several industries, so `None` unless the
    /// selection had more than one. Ties keep the earlier industry.
    pub fn real_growth_leader(&self, selected: usize) -> Option<&GrowthMetrics> {
        if selected <= 1 {
            return None;
        }
        let mut best: Option<&GrowthMetrics> = None;
        for m in &self.entries {
            if best.is_none_or(|b| m.real_growth > b.real_growth) {
                best = Some(m);
            }
        }
        best
    }
}

/// Run the growth calculator for each selected industry.
pub fn growth_report(records: &[SalaryRecord], selection: &Selection) -> GrowthReport {
    let mut report = GrowthReport::default();
    for industry in &selection.industries {
        match compute_growth(records, industry, selection.start_year, selection.end_year) {
            Ok(m) => report.entries.push(m),
            Err(reason) => {
                log::debug!("skipping {industry}: {reason}");
                report.skipped.push(SkippedIndustry {
                    industry: industry.clone(),
                    reason,
                });
            }
        }
    }
    report
}

/// Serializable form of a skipped industry (reason rendered as text).
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub industry: String,
    pub reason: String,
}

impl From<&SkippedIndustry> for SkippedRecord {
    fn from(value: &SkippedIndustry) -> Self {
        Self {
            industry: value.industry.clone(),
            reason: value.reason.to_string(),
        }
    }
}
