//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal or a CI log
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - line charts: one marker per series (`*`, `o`, `+`, ...) joined by `.`
//! - growth bars: `#` nominal, `=` real
//! - inflation bars: `#`, or `!` for years above the high-inflation threshold

use crate::app::pipeline::DashboardView;
use crate::domain::{ChartKind, GrowthMetrics, HIGH_INFLATION_THRESHOLD_PCT, InflationPoint};
use crate::plot::{
    SalaryMeasure, Series, cumulative_inflation_series, padded_range, salary_series, x_bounds,
    y_bounds,
};
use crate::report::format::truncate;

/// Markers assigned to series in order (wrapping around).
pub const SERIES_MARKERS: [char; 8] = ['*', 'o', '+', 'x', '#', '@', '%', '&'];

/// Render the chart of the given kind for a view.
pub fn render_chart(view: &DashboardView, kind: ChartKind, width: usize, height: usize) -> String {
    if let Some(warning) = &view.warning {
        return format!("Warning: {warning}\n");
    }

    match kind {
        ChartKind::Nominal => render_lines(
            "Nominal salaries",
            &salary_series(view, SalaryMeasure::Nominal),
            width,
            height,
        ),
        ChartKind::Real => render_lines(
            "Real salaries (base-year prices)",
            &salary_series(view, SalaryMeasure::Real),
            width,
            height,
        ),
        ChartKind::Growth => render_growth_bars(
            &view.growth.entries,
            view.selection.start_year,
            view.selection.end_year,
            width,
        ),
        ChartKind::Inflation => {
            let mut out = render_inflation_bars(&view.inflation, width);
            out.push('\n');
            out.push_str(&render_lines(
                "Cumulative inflation factor",
                &[cumulative_inflation_series(view)],
                width,
                height,
            ));
            out
        }
    }
}

/// Multi-series line chart over years.
pub fn render_lines(title: &str, series: &[Series], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x0, x1)) = x_bounds(series) else {
        return format!("{title}: no data\n");
    };
    let (x_min, x_max) = if x1 > x0 { (x0, x1) } else { (x0 - 0.5, x1 + 0.5) };
    let (y0, y1) = y_bounds(series).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = padded_range(y0, y1, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Connectors first so markers can overlay them.
    for s in series {
        let mut prev = None;
        for &(x, y) in &s.points {
            let cell = (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height));
            if let Some((px, py)) = prev {
                draw_line(&mut grid, px, py, cell.0, cell.1, '.');
            }
            prev = Some(cell);
        }
    }

    for (idx, s) in series.iter().enumerate() {
        let marker = SERIES_MARKERS[idx % SERIES_MARKERS.len()];
        for &(x, y) in &s.points {
            let cx = map_x(x, x_min, x_max, width);
            let cy = map_y(y, y_min, y_max, height);
            grid[cy][cx] = marker;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{title} | years=[{x0:.0}, {x1:.0}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(idx, s)| format!("{} {}", SERIES_MARKERS[idx % SERIES_MARKERS.len()], s.label))
        .collect();
    out.push_str(&format!("  {}\n", legend.join("  ")));

    out
}

/// Grouped horizontal bars: nominal vs real growth ratio per industry.
pub fn render_growth_bars(
    entries: &[GrowthMetrics],
    start_year: i32,
    end_year: i32,
    width: usize,
) -> String {
    let mut out = format!("Growth comparison ({start_year}-{end_year}), times\n");
    if entries.is_empty() {
        out.push_str("  no industries with computable growth\n");
        return out;
    }

    let label_width = entries
        .iter()
        .map(|m| m.industry.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(8, 24);
    let bar_width = width.saturating_sub(label_width + 18).max(10);
    let max_value = entries
        .iter()
        .flat_map(|m| [m.nominal_growth, m.real_growth])
        .fold(0.0_f64, f64::max);

    for m in entries {
        out.push_str(&format!(
            "{:<label_width$} nominal |{} {:.1}x\n",
            truncate(&m.industry, label_width),
            bar(m.nominal_growth, max_value, bar_width, '#'),
            m.nominal_growth
        ));
        out.push_str(&format!(
            "{:<label_width$} real    |{} {:.1}x\n",
            "",
            bar(m.real_growth, max_value, bar_width, '='),
            m.real_growth
        ));
    }
    out.push_str("  # nominal  = real\n");
    out
}

/// Horizontal bars of annual inflation with the high-inflation threshold marked.
pub fn render_inflation_bars(points: &[InflationPoint], width: usize) -> String {
    let mut out = format!(
        "Annual inflation, % (! = above {HIGH_INFLATION_THRESHOLD_PCT:.0}%)\n"
    );
    if points.is_empty() {
        out.push_str("  no data\n");
        return out;
    }

    let bar_width = width.saturating_sub(16).max(10);
    let max_value = points
        .iter()
        .map(|p| p.inflation_pct)
        .fold(HIGH_INFLATION_THRESHOLD_PCT, f64::max);
    let threshold_col = scaled_len(HIGH_INFLATION_THRESHOLD_PCT, max_value, bar_width);

    for p in points {
        let fill = if p.is_high() { '!' } else { '#' };
        let mut cells: Vec<char> = bar(p.inflation_pct, max_value, bar_width, fill)
            .chars()
            .collect();
        cells.resize(bar_width, ' ');
        // Threshold guide, only where the bar does not reach it.
        if threshold_col > 0 && cells[threshold_col - 1] == ' ' {
            cells[threshold_col - 1] = ':';
        }
        let body: String = cells.into_iter().collect();
        out.push_str(&format!("{} |{} {:.1}%\n", p.year, body.trim_end(), p.inflation_pct));
    }
    out
}

fn bar(value: f64, max_value: f64, width: usize, fill: char) -> String {
    std::iter::repeat_n(fill, scaled_len(value, max_value, width)).collect()
}

fn scaled_len(value: f64, max_value: f64, width: usize) -> usize {
    if !(value.is_finite() && max_value.is_finite()) || value <= 0.0 || max_value <= 0.0 {
        return 0;
    }
    ((value / max_value) * width as f64).round().clamp(0.0, width as f64) as usize
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(industry: &str, nominal: f64, real: f64) -> GrowthMetrics {
        GrowthMetrics {
            industry: industry.to_string(),
            start_year: 2000,
            end_year: 2020,
            start_salary: 1.0,
            end_salary: nominal,
            start_real_salary: 1.0,
            end_real_salary: real,
            nominal_growth: nominal,
            real_growth: real,
            avg_nominal_growth_pct: 0.0,
            avg_real_growth_pct: 0.0,
        }
    }

    #[test]
    fn line_chart_golden_snapshot_small() {
        let series = vec![Series {
            label: "IT".to_string(),
            points: vec![(2000.0, 100.0), (2001.0, 200.0)],
        }];

        let txt = render_lines("Nominal salaries", &series, 10, 5);
        let expected = concat!(
            "Nominal salaries | years=[2000, 2001] | y=[95.00, 205.00]\n",
            "        .*\n",
            "      ..  \n",
            "    ..    \n",
            "  ..      \n",
            "*.        \n",
            "  * IT\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn line_chart_uses_distinct_markers() {
        let series = vec![
            Series {
                label: "IT".to_string(),
                points: vec![(2000.0, 1.0), (2010.0, 2.0)],
            },
            Series {
                label: "Mining".to_string(),
                points: vec![(2000.0, 3.0), (2010.0, 4.0)],
            },
        ];
        let txt = render_lines("t", &series, 20, 8);
        assert!(txt.contains('*'));
        assert!(txt.contains('o'));
        assert!(txt.ends_with("  * IT  o Mining\n"));
    }

    #[test]
    fn single_year_chart_does_not_panic() {
        let series = vec![Series {
            label: "IT".to_string(),
            points: vec![(2005.0, 42.0)],
        }];
        let txt = render_lines("t", &series, 10, 5);
        assert!(txt.starts_with("t | years=[2005, 2005] | y=[37.80, 46.20]\n"));
        assert_eq!(txt.matches('*').count(), 2);
    }

    #[test]
    fn growth_bars_scale_to_largest_ratio() {
        let txt = render_growth_bars(&[metrics("IT", 8.0, 4.0)], 2000, 2020, 38);
        let expected = concat!(
            "Growth comparison (2000-2020), times\n",
            "IT       nominal |############ 8.0x\n",
            "         real    |====== 4.0x\n",
            "  # nominal  = real\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn inflation_bars_flag_high_years() {
        let points = vec![
            InflationPoint {
                year: 2000,
                inflation_pct: 20.0,
                cumulative_inflation: 1.0,
            },
            InflationPoint {
                year: 2001,
                inflation_pct: 5.0,
                cumulative_inflation: 1.05,
            },
        ];
        let txt = render_inflation_bars(&points, 36);
        let expected = concat!(
            "Annual inflation, % (! = above 10%)\n",
            "2000 |!!!!!!!!!!!!!!!!!!!! 20.0%\n",
            "2001 |#####    : 5.0%\n",
        );
        assert_eq!(txt, expected);
    }
}
