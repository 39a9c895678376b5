//! Plotters-powered dashboard chart widget for Ratatui.
//!
//! One widget covers every chart kind: salary lines, growth bars, and
//! inflation bars. All series and bounds are computed outside the render call.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{HIGH_INFLATION_THRESHOLD_PCT, InflationPoint};
use crate::plot::Series;

/// Series colors, in legend order. Chosen for contrast on dark terminals.
pub const PALETTE: [(u8, u8, u8); 8] = [
    (0, 255, 255),
    (255, 165, 0),
    (0, 255, 0),
    (255, 0, 255),
    (255, 255, 0),
    (100, 149, 237),
    (255, 99, 71),
    (200, 200, 200),
];

const NOMINAL_BAR: RGBColor = RGBColor(70, 130, 180);
const REAL_BAR: RGBColor = RGBColor(255, 140, 0);
const INFLATION_BAR: RGBColor = RGBColor(255, 0, 0);
const HIGH_INFLATION_BAR: RGBColor = RGBColor(139, 0, 0);
const THRESHOLD_LINE: RGBColor = RGBColor(200, 200, 200);

/// Ratatui color of the `idx`-th series.
pub fn series_color(idx: usize) -> Color {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    Color::Rgb(r, g, b)
}

fn plot_color(idx: usize) -> RGBColor {
    let (r, g, b) = PALETTE[idx % PALETTE.len()];
    RGBColor(r, g, b)
}

/// One industry's pair of growth bars.
#[derive(Debug, Clone)]
pub struct GrowthBar {
    pub label: String,
    pub nominal: f64,
    pub real: f64,
}

/// What to draw inside the axes.
pub enum ChartBody<'a> {
    /// One line per series.
    Lines(&'a [Series]),
    /// Grouped nominal/real bars at x = 1, 2, ...
    Bars(&'a [GrowthBar]),
    /// Annual inflation bars with the high-inflation threshold line.
    Inflation(&'a [InflationPoint]),
}

/// A lightweight, render-only chart description.
pub struct DashboardChart<'a> {
    pub body: ChartBody<'a>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for DashboardChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a tiny chart; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        let finite = x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite();
        if !finite || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            let bar_labels: Vec<String> = match &self.body {
                ChartBody::Bars(bars) => bars.iter().map(|b| b.label.clone()).collect(),
                _ => Vec::new(),
            };
            let x_ticks = if bar_labels.is_empty() { 6 } else { bar_labels.len() };

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(x_ticks)
                .y_labels(5)
                .x_label_formatter(&|v| {
                    if bar_labels.is_empty() {
                        (self.fmt_x)(*v)
                    } else {
                        bar_label(&bar_labels, *v)
                    }
                })
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            match &self.body {
                ChartBody::Lines(series) => {
                    for (idx, s) in series.iter().enumerate() {
                        let color = plot_color(idx);
                        chart.draw_series(LineSeries::new(s.points.iter().copied(), &color))?;
                        // A colored `Pixel` marks each observed year.
                        chart.draw_series(s.points.iter().map(|&p| Pixel::new(p, color)))?;
                    }
                }
                ChartBody::Bars(bars) => {
                    for (idx, b) in bars.iter().enumerate() {
                        let x = idx as f64 + 1.0;
                        chart.draw_series(std::iter::once(Rectangle::new(
                            [(x - 0.35, 0.0), (x, b.nominal)],
                            NOMINAL_BAR.filled(),
                        )))?;
                        chart.draw_series(std::iter::once(Rectangle::new(
                            [(x, 0.0), (x + 0.35, b.real)],
                            REAL_BAR.filled(),
                        )))?;
                    }
                }
                ChartBody::Inflation(points) => {
                    chart.draw_series(points.iter().map(|p| {
                        let x = p.year as f64;
                        let color = if p.is_high() { HIGH_INFLATION_BAR } else { INFLATION_BAR };
                        Rectangle::new(
                            [(x - 0.35, 0.0), (x + 0.35, p.inflation_pct)],
                            color.filled(),
                        )
                    }))?;
                    chart.draw_series(LineSeries::new(
                        [(x0, HIGH_INFLATION_THRESHOLD_PCT), (x1, HIGH_INFLATION_THRESHOLD_PCT)],
                        &THRESHOLD_LINE,
                    ))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Industry name for an integer bar position; empty between bars.
fn bar_label(labels: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 0.05 || idx < 1.0 {
        return String::new();
    }
    labels
        .get(idx as usize - 1)
        .map(|l| l.chars().take(10).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_labels_only_at_integer_positions() {
        let labels = vec!["IT".to_string(), "Manufacturing".to_string()];
        assert_eq!(bar_label(&labels, 1.0), "IT");
        assert_eq!(bar_label(&labels, 2.01), "Manufactur");
        assert_eq!(bar_label(&labels, 1.5), "");
        assert_eq!(bar_label(&labels, 0.0), "");
        assert_eq!(bar_label(&labels, 3.0), "");
    }

    #[test]
    fn palette_colors_agree() {
        assert_eq!(series_color(0), Color::Rgb(0, 255, 255));
        assert_eq!(series_color(PALETTE.len() + 1), series_color(1));
    }
}
