//! Nominal and real salary growth for one industry between two years.

use thiserror::Error;

use crate::domain::{GrowthMetrics, SalaryRecord};

/// Why growth metrics could not be computed for a selection.
///
/// Every variant means "not computable": callers skip the industry in metric
/// displays rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    #[error("no data for {industry} in {year}")]
    MissingRecord { industry: String, year: i32 },

    #[error("period {year}-{year} is empty, annual rate undefined")]
    EmptyRange { year: i32 },

    #[error("start year {start} is after end year {end}")]
    InvertedRange { start: i32, end: i32 },

    #[error("growth for {industry} is not a finite number")]
    NonFinite { industry: String },
}

/// Compute growth ratios and compound annual rates for `industry`.
///
/// Requires a record at exactly `start_year` and exactly `end_year`, with
/// `start_year < end_year`. If several records share an (industry, year), the
/// first one is used.
pub fn compute_growth(
    records: &[SalaryRecord],
    industry: &str,
    start_year: i32,
    end_year: i32,
) -> Result<GrowthMetrics, MetricsError> {
    if start_year > end_year {
        return Err(MetricsError::InvertedRange {
            start: start_year,
            end: end_year,
        });
    }

    let start = find_record(records, industry, start_year)?;
    let end = find_record(records, industry, end_year)?;

    // Widened so extreme year pairs cannot overflow.
    let years = i64::from(end_year) - i64::from(start_year);
    if years == 0 {
        return Err(MetricsError::EmptyRange { year: start_year });
    }

    let nominal_growth = end.nominal_salary / start.nominal_salary;
    let real_growth = end.real_salary / start.real_salary;
    let avg_nominal_growth_pct = annualized_pct(nominal_growth, years);
    let avg_real_growth_pct = annualized_pct(real_growth, years);

    let all_finite = [nominal_growth, real_growth, avg_nominal_growth_pct, avg_real_growth_pct]
        .iter()
        .all(|v| v.is_finite());
    if !all_finite {
        return Err(MetricsError::NonFinite {
            industry: industry.to_string(),
        });
    }

    Ok(GrowthMetrics {
        industry: industry.to_string(),
        start_year,
        end_year,
        start_salary: start.nominal_salary,
        end_salary: end.nominal_salary,
        start_real_salary: start.real_salary,
        end_real_salary: end.real_salary,
        nominal_growth,
        real_growth,
        avg_nominal_growth_pct,
        avg_real_growth_pct,
    })
}

/// Constant per-year rate (in percent) that compounds to `ratio` over `years`.
pub fn annualized_pct(ratio: f64, years: i64) -> f64 {
    (ratio.powf(1.0 / years as f64) - 1.0) * 100.0
}

fn find_record<'a>(
    records: &'a [SalaryRecord],
    industry: &str,
    year: i32,
) -> Result<&'a SalaryRecord, MetricsError> {
    records
        .iter()
        .find(|r| r.year == year && r.industry == industry)
        .ok_or_else(|| MetricsError::MissingRecord {
            industry: industry.to_string(),
            year,
        })
}
