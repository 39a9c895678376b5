//! Chart data preparation and ASCII rendering.
//!
//! Series are built once from a `DashboardView` and then drawn either as text
//! (`ascii`) or by the TUI's Plotters widget.

pub mod ascii;

pub use ascii::*;

use crate::app::pipeline::DashboardView;
use crate::filter::industry_series;

/// A named `(x, y)` line series. `x` is the calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Which salary column to chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryMeasure {
    Nominal,
    Real,
}

/// One salary line per selected industry, in selection order.
///
/// Industries without rows in the filtered set are left out.
pub fn salary_series(view: &DashboardView, measure: SalaryMeasure) -> Vec<Series> {
    view.selection
        .industries
        .iter()
        .filter_map(|industry| {
            let rows = industry_series(&view.rows, industry);
            if rows.is_empty() {
                return None;
            }
            let points = rows
                .iter()
                .map(|r| {
                    let y = match measure {
                        SalaryMeasure::Nominal => r.nominal_salary,
                        SalaryMeasure::Real => r.real_salary,
                    };
                    (r.year as f64, y)
                })
                .collect();
            Some(Series {
                label: industry.clone(),
                points,
            })
        })
        .collect()
}

/// Cumulative inflation factor over the selected years.
pub fn cumulative_inflation_series(view: &DashboardView) -> Series {
    Series {
        label: "Cumulative inflation".to_string(),
        points: view
            .inflation
            .iter()
            .map(|p| (p.year as f64, p.cumulative_inflation))
            .collect(),
    }
}

/// `(min, max)` over every x in `series`.
pub fn x_bounds(series: &[Series]) -> Option<(f64, f64)> {
    bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.0)))
}

/// `(min, max)` over every y in `series`.
pub fn y_bounds(series: &[Series]) -> Option<(f64, f64)> {
    bounds(series.iter().flat_map(|s| s.points.iter().map(|p| p.1)))
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Widen a degenerate range and add `frac` padding on both sides.
pub fn padded_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    if max <= min {
        let pad = (min.abs() * 0.1).max(1.0);
        return (min - pad, max + pad);
    }
    let pad = ((max - min) * frac).max(1e-12);
    (min - pad, max + pad)
}
