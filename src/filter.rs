//! Selection filtering and per-year inflation series.

use serde::Serialize;

use crate::domain::{InflationPoint, SalaryRecord, Selection};

/// Rows matching both the industry subset and the inclusive year window.
///
/// Order and column values are preserved.
pub fn filter_records(records: &[SalaryRecord], selection: &Selection) -> Vec<SalaryRecord> {
    if selection.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect()
}

/// Rows of one industry, sorted by year.
pub fn industry_series<'a>(records: &'a [SalaryRecord], industry: &str) -> Vec<&'a SalaryRecord> {
    let mut rows: Vec<&SalaryRecord> = records.iter().filter(|r| r.industry == industry).collect();
    rows.sort_by_key(|r| r.year);
    rows
}

/// One inflation point per distinct year, sorted by year.
///
/// Inflation is economy-wide, so each industry repeats it; the first row seen
/// for a year is used.
pub fn inflation_by_year(records: &[SalaryRecord]) -> Vec<InflationPoint> {
    let mut out: Vec<InflationPoint> = Vec::new();
    for r in records {
        if out.iter().any(|p| p.year == r.year) {
            continue;
        }
        out.push(InflationPoint {
            year: r.year,
            inflation_pct: r.inflation_pct,
            cumulative_inflation: r.cumulative_inflation,
        });
    }
    out.sort_by_key(|p| p.year);
    out
}

/// Headline inflation numbers for the selected period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InflationSummary {
    pub avg_inflation_pct: f64,
    pub max_inflation_pct: f64,
    pub max_inflation_year: i32,
    pub years: usize,
}

/// Average and peak inflation over a per-year series.
///
/// Ties for the peak keep the earliest year.
pub fn summarize_inflation(points: &[InflationPoint]) -> Option<InflationSummary> {
    let first = points.first()?;

    let mut max = *first;
    let mut sum = 0.0;
    for p in points {
        sum += p.inflation_pct;
        if p.inflation_pct > max.inflation_pct {
            max = *p;
        }
    }

    Some(InflationSummary {
        avg_inflation_pct: sum / points.len() as f64,
        max_inflation_pct: max.inflation_pct,
        max_inflation_year: max.year,
        years: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(industry: &str, year: i32, inflation: f64) -> SalaryRecord {
        SalaryRecord {
            industry: industry.to_string(),
            year,
            nominal_salary: 1000.0 + year as f64,
            real_salary: 900.0 + year as f64,
            inflation_pct: inflation,
            cumulative_inflation: 1.0 + (year - 2000) as f64 * 0.1,
        }
    }

    fn dataset() -> Vec<SalaryRecord> {
        let mut out = Vec::new();
        for industry in ["IT", "Mining", "Finance"] {
            for year in 2005..=2020 {
                out.push(rec(industry, year, (year - 2000) as f64));
            }
        }
        out
    }

    #[test]
    fn filter_matches_industries_and_years() {
        let records = dataset();
        let sel = Selection {
            industries: vec!["IT".to_string(), "Finance".to_string()],
            start_year: 2010,
            end_year: 2015,
        };

        let rows = filter_records(&records, &sel);
        assert_eq!(rows.len(), 12);
        for r in &rows {
            assert!(r.industry == "IT" || r.industry == "Finance");
            assert!((2010..=2015).contains(&r.year));
            let original = records
                .iter()
                .find(|o| o.industry == r.industry && o.year == r.year)
                .unwrap();
            assert_eq!(r, original);
        }
        assert_eq!(rows[0].industry, "IT");
        assert_eq!(rows[0].year, 2010);
    }

    #[test]
    fn empty_selection_yields_no_rows() {
        let records = dataset();
        let sel = Selection {
            industries: Vec::new(),
            start_year: 2010,
            end_year: 2015,
        };
        assert!(filter_records(&records, &sel).is_empty());

        let sel = Selection {
            industries: vec!["IT".to_string()],
            start_year: 2016,
            end_year: 2015,
        };
        assert!(filter_records(&records, &sel).is_empty());
    }

    #[test]
    fn inflation_is_deduplicated_by_year() {
        let records = vec![
            rec("IT", 2002, 15.0),
            rec("IT", 2001, 18.0),
            rec("Mining", 2001, 99.0),
            rec("Mining", 2002, 99.0),
        ];

        let points = inflation_by_year(&records);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].year, 2001);
        assert_eq!(points[0].inflation_pct, 18.0);
        assert_eq!(points[1].inflation_pct, 15.0);
    }

    #[test]
    fn summary_average_and_peak() {
        let points = inflation_by_year(&[
            rec("IT", 2000, 20.0),
            rec("IT", 2001, 10.0),
            rec("IT", 2002, 20.0),
            rec("IT", 2003, 6.0),
        ]);

        let s = summarize_inflation(&points).unwrap();
        assert!((s.avg_inflation_pct - 14.0).abs() < 1e-12);
        assert_eq!(s.max_inflation_pct, 20.0);
        assert_eq!(s.max_inflation_year, 2000);
        assert_eq!(s.years, 4);

        assert!(summarize_inflation(&[]).is_none());
    }

    #[test]
    fn industry_series_is_year_sorted() {
        let records = vec![rec("IT", 2003, 1.0), rec("Mining", 2001, 1.0), rec("IT", 2001, 1.0)];
        let years: Vec<i32> = industry_series(&records, "IT").iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2001, 2003]);
    }
}
