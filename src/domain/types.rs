//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in memory for the lifetime of the process (the dataset is read-only)
//! - exported to CSV/JSON
//! - rendered by both the CLI and the TUI front-ends

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Annual inflation above this level is highlighted in the inflation chart.
pub const HIGH_INFLATION_THRESHOLD_PCT: f64 = 10.0;

/// One row of the dataset: a single (industry, year) observation.
///
/// Salaries are strictly positive for every record that survives ingest.
/// `real_salary` is expressed in base-year prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub industry: String,
    pub year: i32,
    pub nominal_salary: f64,
    pub real_salary: f64,
    /// Annual inflation, in percent.
    pub inflation_pct: f64,
    /// Multiplicative price-level change since the base year (>= 1).
    pub cumulative_inflation: f64,
}

/// The immutable, loaded dataset.
///
/// Built once at startup; every render pass reads from it and nothing writes
/// to it afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<SalaryRecord>,
    /// Distinct industries in first-seen order.
    pub industries: Vec<String>,
    pub year_min: i32,
    pub year_max: i32,
}

impl Dataset {
    /// Build a dataset from already-validated records.
    ///
    /// Returns `None` when there are no records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Option<Self> {
        let year_min = records.iter().map(|r| r.year).min()?;
        let year_max = records.iter().map(|r| r.year).max()?;

        let mut industries: Vec<String> = Vec::new();
        for r in &records {
            if !industries.iter().any(|i| i == &r.industry) {
                industries.push(r.industry.clone());
            }
        }

        Some(Self {
            records,
            industries,
            year_min,
            year_max,
        })
    }

    /// Every industry over the full year range.
    pub fn full_selection(&self) -> Selection {
        Selection {
            industries: self.industries.clone(),
            start_year: self.year_min,
            end_year: self.year_max,
        }
    }

    /// Runs of years missing inside each industry's `[first, last]` span.
    ///
    /// Gaps are not fatal; they only make some endpoint lookups fail.
    pub fn year_gaps(&self) -> Vec<YearGap> {
        let mut out = Vec::new();
        for industry in &self.industries {
            let mut years: Vec<i32> = self
                .records
                .iter()
                .filter(|r| &r.industry == industry)
                .map(|r| r.year)
                .collect();
            years.sort_unstable();
            years.dedup();

            // Sorted and deduped, so `w[0] < w[1]` and neither bound overflows.
            out.extend(years.windows(2).filter(|w| w[1] - 1 > w[0]).map(|w| YearGap {
                industry: industry.clone(),
                first_missing: w[0] + 1,
                last_missing: w[1] - 1,
            }));
        }
        out
    }
}

/// A run of consecutive years with no row for one industry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearGap {
    pub industry: String,
    pub first_missing: i32,
    pub last_missing: i32,
}

impl YearGap {
    pub fn missing_years(&self) -> i64 {
        i64::from(self.last_missing) - i64::from(self.first_missing) + 1
    }
}

impl std::fmt::Display for YearGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.first_missing == self.last_missing {
            write!(f, "{}", self.first_missing)
        } else {
            write!(f, "{}-{}", self.first_missing, self.last_missing)
        }
    }
}

/// What the user currently has selected: an industry subset and a year window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected industries, in display order.
    pub industries: Vec<String>,
    pub start_year: i32,
    pub end_year: i32,
}

impl Selection {
    /// True when nothing can match: no industries, or an inverted year window.
    pub fn is_empty(&self) -> bool {
        self.industries.is_empty() || self.start_year > self.end_year
    }

    /// Length of the analysed period in years (`end - start`).
    pub fn period_years(&self) -> i64 {
        i64::from(self.end_year) - i64::from(self.start_year)
    }

    pub fn matches(&self, record: &SalaryRecord) -> bool {
        record.year >= self.start_year
            && record.year <= self.end_year
            && self.industries.iter().any(|i| i == &record.industry)
    }
}

/// Which chart to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Nominal salary per industry over time.
    Nominal,
    /// Real (base-year prices) salary per industry over time.
    Real,
    /// Nominal vs real growth ratio per industry.
    Growth,
    /// Annual and cumulative inflation.
    Inflation,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Nominal,
        ChartKind::Real,
        ChartKind::Growth,
        ChartKind::Inflation,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ChartKind::Nominal => "Nominal salaries",
            ChartKind::Real => "Real salaries",
            ChartKind::Growth => "Growth comparison",
            ChartKind::Inflation => "Inflation",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ChartKind::Nominal => ChartKind::Real,
            ChartKind::Real => ChartKind::Growth,
            ChartKind::Growth => ChartKind::Inflation,
            ChartKind::Inflation => ChartKind::Nominal,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ChartKind::Nominal => ChartKind::Inflation,
            ChartKind::Real => ChartKind::Nominal,
            ChartKind::Growth => ChartKind::Real,
            ChartKind::Inflation => ChartKind::Growth,
        }
    }
}

/// Growth metrics for one industry over a `[start_year, end_year]` window.
///
/// Values are raw `f64`; rounding happens at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub industry: String,
    pub start_year: i32,
    pub end_year: i32,
    pub start_salary: f64,
    pub end_salary: f64,
    pub start_real_salary: f64,
    pub end_real_salary: f64,
    /// `end_salary / start_salary`.
    pub nominal_growth: f64,
    /// `end_real_salary / start_real_salary`.
    pub real_growth: f64,
    /// Compound annual nominal growth, in percent.
    pub avg_nominal_growth_pct: f64,
    /// Compound annual real growth, in percent.
    pub avg_real_growth_pct: f64,
}

impl GrowthMetrics {
    pub fn years(&self) -> i64 {
        i64::from(self.end_year) - i64::from(self.start_year)
    }

    /// Total nominal increase over the period, in percent.
    pub fn nominal_increase_pct(&self) -> f64 {
        (self.nominal_growth - 1.0) * 100.0
    }
}

/// Inflation for a single calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationPoint {
    pub year: i32,
    pub inflation_pct: f64,
    pub cumulative_inflation: f64,
}

impl InflationPoint {
    pub fn is_high(&self) -> bool {
        self.inflation_pct > HIGH_INFLATION_THRESHOLD_PCT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(industry: &str, year: i32) -> SalaryRecord {
        SalaryRecord {
            industry: industry.to_string(),
            year,
            nominal_salary: 1000.0,
            real_salary: 1000.0,
            inflation_pct: 5.0,
            cumulative_inflation: 1.0,
        }
    }

    #[test]
    fn dataset_keeps_first_seen_industry_order() {
        let ds = Dataset::from_records(vec![
            rec("Mining", 2001),
            rec("IT", 2000),
            rec("Mining", 2000),
            rec("Finance", 2003),
        ])
        .unwrap();

        assert_eq!(ds.industries, vec!["Mining", "IT", "Finance"]);
        assert_eq!(ds.year_min, 2000);
        assert_eq!(ds.year_max, 2003);
    }

    #[test]
    fn dataset_from_empty_records_is_none() {
        assert!(Dataset::from_records(Vec::new()).is_none());
    }

    #[test]
    fn year_gaps_reports_missing_years() {
        let ds = Dataset::from_records(vec![
            rec("IT", 2000),
            rec("IT", 2003),
            rec("Mining", 2000),
            rec("Mining", 2001),
        ])
        .unwrap();

        let gaps = ds.year_gaps();
        assert_eq!(
            gaps,
            vec![YearGap {
                industry: "IT".to_string(),
                first_missing: 2001,
                last_missing: 2002,
            }]
        );
        assert_eq!(gaps[0].missing_years(), 2);
        assert_eq!(gaps[0].to_string(), "2001-2002");
    }

    #[test]
    fn year_gaps_stay_small_for_extreme_spans() {
        let ds = Dataset::from_records(vec![
            rec("IT", i32::MIN),
            rec("IT", 2000),
            rec("IT", 2001),
            rec("IT", i32::MAX),
        ])
        .unwrap();

        let gaps = ds.year_gaps();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].first_missing, i32::MIN + 1);
        assert_eq!(gaps[0].last_missing, 1999);
        assert_eq!(gaps[1].missing_years(), i64::from(i32::MAX) - 2002 + 1);
    }

    #[test]
    fn selection_emptiness() {
        let mut sel = Selection {
            industries: vec!["IT".to_string()],
            start_year: 2010,
            end_year: 2010,
        };
        assert!(!sel.is_empty());
        assert_eq!(sel.period_years(), 0);

        sel.start_year = 2011;
        assert!(sel.is_empty());
        assert_eq!(sel.period_years(), -1);

        sel.start_year = i32::MIN;
        sel.end_year = i32::MAX;
        assert_eq!(sel.period_years(), i64::from(u32::MAX));

        sel.start_year = 2000;
        sel.industries.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn chart_kind_cycles() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.next().prev(), kind);
        }
        assert_eq!(ChartKind::Inflation.next(), ChartKind::Nominal);
    }
}
