//! Ratatui-based terminal UI.
//!
//! The TUI provides a sidebar for choosing industries, the year range, and the
//! chart type, then renders metric cards, conclusions, the chart, and
//! (optionally) the raw rows of the current selection.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use crate::app::pipeline::{DashboardView, build_view};
use crate::config::DashboardConfig;
use crate::domain::{ChartKind, Dataset, HIGH_INFLATION_THRESHOLD_PCT, Selection};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_dataset};
use crate::plot::{
    SalaryMeasure, Series, cumulative_inflation_series, padded_range, salary_series, x_bounds,
    y_bounds,
};
use crate::report::format::{ABOUT_LINES, format_conclusions, format_skipped, format_thousands};

mod plotters_chart;

use plotters_chart::{ChartBody, DashboardChart, GrowthBar, series_color};

/// Start the TUI.
///
/// The dataset is loaded before the terminal is taken over; a failed load
/// leaves the UI in a "no data" state with the error in the status line.
pub fn run(config: DashboardConfig) -> Result<(), AppError> {
    let loaded = load_dataset(&config.data_path);
    let mut app = App::new(config, loaded);

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Industries,
    Period,
    Chart,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Industries => Focus::Period,
            Focus::Period => Focus::Chart,
            Focus::Chart => Focus::Industries,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Industries => Focus::Chart,
            Focus::Period => Focus::Industries,
            Focus::Chart => Focus::Period,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YearField {
    Start,
    End,
}

struct App {
    config: DashboardConfig,
    data: Option<IngestedData>,
    selection: Selection,
    chart: ChartKind,
    show_table: bool,
    focus: Focus,
    cursor: usize,
    year_field: YearField,
    table_offset: usize,
    status: String,
    view: Option<DashboardView>,
}

impl App {
    fn new(config: DashboardConfig, loaded: Result<IngestedData, AppError>) -> Self {
        let mut app = Self {
            chart: config.chart,
            show_table: config.show_table,
            config,
            data: None,
            selection: Selection {
                industries: Vec::new(),
                start_year: 0,
                end_year: 0,
            },
            focus: Focus::Industries,
            cursor: 0,
            year_field: YearField::Start,
            table_offset: 0,
            status: String::new(),
            view: None,
        };
        app.apply_load(loaded);
        app
    }

    fn dataset(&self) -> Option<&Dataset> {
        self.data.as_ref().map(|d| &d.dataset)
    }

    fn apply_load(&mut self, loaded: Result<IngestedData, AppError>) {
        match loaded {
            Ok(data) => {
                let skipped = data.rows_read - data.rows_used;
                self.status = format!("Loaded {} rows ({skipped} skipped).", data.rows_used);
                self.selection = if self.data.is_some() {
                    // Reload: keep what the user picked.
                    carry_selection(&self.selection, &data.dataset)
                } else {
                    match self.config.selection_for(&data.dataset) {
                        Ok(sel) => sel,
                        Err(err) => {
                            self.status = format!("{}; showing all industries.", err.message());
                            data.dataset.full_selection()
                        }
                    }
                };
                self.cursor = self.cursor.min(data.dataset.industries.len().saturating_sub(1));
                self.data = Some(data);
                self.recompute();
            }
            Err(err) => {
                log::warn!("dataset load failed: {err}");
                self.status = err.message().to_string();
                self.data = None;
                self.view = None;
            }
        }
    }

    fn reload(&mut self) {
        let loaded = load_dataset(&self.config.data_path);
        self.apply_load(loaded);
    }

    /// Full render pass for the current selection.
    fn recompute(&mut self) {
        self.table_offset = 0;
        self.view = self.dataset().map(|ds| build_view(ds, &self.selection));
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Char('c') => self.set_chart(self.chart.next()),
            KeyCode::Char('t') => {
                self.show_table = !self.show_table;
                let state = if self.show_table { "shown" } else { "hidden" };
                self.status = format!("Raw table {state}.");
            }
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('a') => self.toggle_all(),
            KeyCode::PageDown => self.scroll_table(10),
            KeyCode::PageUp => self.scroll_table(-10),
            KeyCode::Up => match self.focus {
                Focus::Industries => self.cursor = self.cursor.saturating_sub(1),
                Focus::Period => self.year_field = YearField::Start,
                Focus::Chart => self.set_chart(self.chart.prev()),
            },
            KeyCode::Down => match self.focus {
                Focus::Industries => {
                    let n = self.dataset().map_or(0, |ds| ds.industries.len());
                    if self.cursor + 1 < n {
                        self.cursor += 1;
                    }
                }
                Focus::Period => self.year_field = YearField::End,
                Focus::Chart => self.set_chart(self.chart.next()),
            },
            KeyCode::Left => match self.focus {
                Focus::Period => self.adjust_year(-1),
                Focus::Chart => self.set_chart(self.chart.prev()),
                Focus::Industries => {}
            },
            KeyCode::Right => match self.focus {
                Focus::Period => self.adjust_year(1),
                Focus::Chart => self.set_chart(self.chart.next()),
                Focus::Industries => {}
            },
            KeyCode::Char(' ') | KeyCode::Enter => {
                if self.focus == Focus::Industries {
                    self.toggle_industry();
                }
            }
            _ => {}
        }
        false
    }

    fn set_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
        self.status = format!("chart: {}", chart.display_name());
    }

    fn toggle_industry(&mut self) {
        let Some(ds) = self.dataset() else {
            return;
        };
        let Some(name) = ds.industries.get(self.cursor).cloned() else {
            return;
        };

        let mut chosen = self.selection.industries.clone();
        if let Some(pos) = chosen.iter().position(|i| *i == name) {
            chosen.remove(pos);
        } else {
            chosen.push(name);
        }
        // Keep dataset order so colors and cards stay stable.
        let industries = ds
            .industries
            .iter()
            .filter(|i| chosen.contains(i))
            .cloned()
            .collect();
        self.selection.industries = industries;
        self.recompute();
    }

    fn toggle_all(&mut self) {
        let Some(ds) = self.dataset() else {
            return;
        };
        let industries = if self.selection.industries.len() == ds.industries.len() {
            Vec::new()
        } else {
            ds.industries.clone()
        };
        self.selection.industries = industries;
        self.recompute();
    }

    fn adjust_year(&mut self, delta: i32) {
        let Some((lo, hi)) = self.dataset().map(|ds| (ds.year_min, ds.year_max)) else {
            return;
        };
        let year = match self.year_field {
            YearField::Start => &mut self.selection.start_year,
            YearField::End => &mut self.selection.end_year,
        };
        *year = year.saturating_add(delta).clamp(lo, hi);
        self.status = format!("period: {}-{}", self.selection.start_year, self.selection.end_year);
        self.recompute();
    }

    fn scroll_table(&mut self, delta: isize) {
        let rows = self.view.as_ref().map_or(0, |v| v.rows.len());
        let next = self.table_offset.saturating_add_signed(delta);
        self.table_offset = next.min(rows.saturating_sub(1));
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let details = match self.dataset() {
            Some(ds) => format!(
                " | {} | {} industries | {}-{}",
                self.config.data_path.display(),
                ds.industries.len(),
                ds.year_min,
                ds.year_max
            ),
            None => format!(" | {} | no data", self.config.data_path.display()),
        };
        let line = Line::from(vec![
            Span::styled("salary", Style::default().fg(Color::Cyan)),
            Span::raw(": wages and inflation by industry"),
            Span::styled(details, Style::default().fg(Color::Gray)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(0)])
            .split(area);

        self.draw_sidebar(frame, chunks[0]);
        self.draw_main(frame, chunks[1]);
    }

    fn focus_block(&self, title: &'static str, focus: Focus) -> Block<'static> {
        let style = if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default().title(title).borders(Borders::ALL).border_style(style)
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),
                Constraint::Length(4),
                Constraint::Length(6),
                Constraint::Length(ABOUT_LINES.len() as u16 + 2),
            ])
            .split(area);

        let industries = self.dataset().map(|ds| ds.industries.as_slice()).unwrap_or(&[]);
        let items: Vec<ListItem> = industries
            .iter()
            .map(|name| {
                let pos = self.selection.industries.iter().position(|i| i == name);
                let mark = if pos.is_some() { "[x]" } else { "[ ]" };
                let style = pos.map_or(Style::default().fg(Color::Gray), |idx| {
                    Style::default().fg(series_color(idx))
                });
                ListItem::new(Line::from(Span::styled(format!("{mark} {name}"), style)))
            })
            .collect();
        let list = List::new(items)
            .block(self.focus_block("Industries", Focus::Industries))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        if !industries.is_empty() {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let field_style = |field: YearField| {
            if self.focus == Focus::Period && self.year_field == field {
                Style::default().fg(Color::Black).bg(Color::White)
            } else {
                Style::default()
            }
        };
        let period = Paragraph::new(Text::from(vec![
            Line::from(vec![
                Span::raw("From: "),
                Span::styled(self.selection.start_year.to_string(), field_style(YearField::Start)),
            ]),
            Line::from(vec![
                Span::raw("To:   "),
                Span::styled(self.selection.end_year.to_string(), field_style(YearField::End)),
            ]),
        ]))
        .block(self.focus_block("Period", Focus::Period));
        frame.render_widget(period, chunks[1]);

        let items: Vec<ListItem> = ChartKind::ALL
            .iter()
            .map(|k| ListItem::new(k.display_name()))
            .collect();
        let list = List::new(items)
            .block(self.focus_block("Chart", Focus::Chart))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");
        let mut state = ListState::default();
        state.select(ChartKind::ALL.iter().position(|k| *k == self.chart));
        frame.render_stateful_widget(list, chunks[2], &mut state);

        let about: Vec<Line> = ABOUT_LINES.iter().map(|l| Line::from(*l)).collect();
        let about = Paragraph::new(about)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("About").borders(Borders::ALL));
        frame.render_widget(about, chunks[3]);
    }

    fn draw_main(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(view) = &self.view else {
            let text = format!("No data loaded.\n\n{}\n\nPress r to retry.", self.status);
            let msg = Paragraph::new(text)
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: false })
                .block(Block::default().title("Dashboard").borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        if let Some(warning) = &view.warning {
            let msg = Paragraph::new(warning.as_str())
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: false })
                .block(Block::default().title("Dashboard").borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        }

        let metric_lines = view.growth.entries.len().max(view.growth.skipped.len() + 6);
        let metrics_height = (metric_lines as u16 + 3)
            .min(area.height / 3)
            .max(8);
        let mut constraints = vec![Constraint::Length(metrics_height), Constraint::Min(10)];
        if self.show_table {
            constraints.push(Constraint::Percentage(35));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        self.draw_metrics(frame, chunks[0], view);
        self.draw_chart(frame, chunks[1], view);
        if self.show_table {
            self.draw_table(frame, chunks[2], view);
        }
    }

    fn draw_metrics(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let header = Row::new(vec![
            Cell::from("Industry"),
            Cell::from(format!("Salary {}", view.selection.end_year)),
            Cell::from("Nominal"),
            Cell::from("Real"),
            Cell::from("Real %/yr"),
        ])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = view
            .growth
            .entries
            .iter()
            .map(|m| {
                let color = view
                    .selection
                    .industries
                    .iter()
                    .position(|i| *i == m.industry)
                    .map_or(Color::White, series_color);
                Row::new(vec![
                    Cell::from(m.industry.clone()).style(Style::default().fg(color)),
                    Cell::from(format!("{} ₽", format_thousands(m.end_salary))),
                    Cell::from(format!("{:+.0}%", m.nominal_increase_pct())),
                    Cell::from(format!("{:.1}x", m.real_growth)),
                    Cell::from(format!("{:.1}%", m.avg_real_growth_pct)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(12),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Key metrics").borders(Borders::ALL));
        frame.render_widget(table, chunks[0]);

        let mut text = format_conclusions(view);
        if !view.growth.skipped.is_empty() {
            text.push_str(&format_skipped(view));
        }
        let p = Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Summary").borders(Borders::ALL));
        frame.render_widget(p, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
        let block = Block::default().title(self.chart.display_name()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        match self.chart {
            ChartKind::Nominal => {
                let series = salary_series(view, SalaryMeasure::Nominal);
                draw_lines(frame, inner, &series, "salary, ₽", fmt_thousands);
            }
            ChartKind::Real => {
                let series = salary_series(view, SalaryMeasure::Real);
                draw_lines(frame, inner, &series, "real salary, ₽", fmt_thousands);
            }
            ChartKind::Growth => draw_growth(frame, inner, view),
            ChartKind::Inflation => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(inner);
                draw_inflation(frame, chunks[0], view);
                draw_lines(
                    frame,
                    chunks[1],
                    &[cumulative_inflation_series(view)],
                    "cumulative",
                    fmt_factor,
                );
            }
        }
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
        let header = Row::new(vec![
            "Industry",
            "Year",
            "Salary",
            "Real salary",
            "Inflation",
            "Cumulative",
        ])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
        let visible = area.height.saturating_sub(3) as usize;
        let rows: Vec<Row> = view
            .rows
            .iter()
            .skip(self.table_offset)
            .take(visible)
            .map(|r| {
                Row::new(vec![
                    r.industry.clone(),
                    r.year.to_string(),
                    format_thousands(r.nominal_salary),
                    format_thousands(r.real_salary),
                    format!("{:.1}", r.inflation_pct),
                    format!("{:.2}", r.cumulative_inflation),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(10),
        ];
        let title = format!(
            "Data ({}-{} of {})",
            (self.table_offset + 1).min(view.rows.len()),
            (self.table_offset + visible).min(view.rows.len()),
            view.rows.len()
        );
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Tab focus  ↑/↓ move  ←/→ adjust  Space toggle  \
                    a all  c chart  t table  r reload  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Line chart with a one-line colored legend on top.
fn draw_lines(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    series: &[Series],
    y_label: &str,
    fmt_y: fn(f64) -> String,
) {
    let (Some((x0, x1)), Some((y0, y1))) = (x_bounds(series), y_bounds(series)) else {
        frame.render_widget(notice("No data to chart."), area);
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let legend: Vec<Span> = series
        .iter()
        .enumerate()
        .flat_map(|(idx, s)| {
            [
                Span::styled("━━ ", Style::default().fg(series_color(idx))),
                Span::raw(format!("{}  ", s.label)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(legend)), chunks[0]);

    let (x0, x1) = if x1 > x0 { (x0, x1) } else { (x0 - 0.5, x1 + 0.5) };
    let (y0, y1) = padded_range(y0, y1, 0.05);
    let widget = DashboardChart {
        body: ChartBody::Lines(series),
        x_bounds: [x0, x1],
        y_bounds: [y0, y1],
        x_label: "year",
        y_label,
        fmt_x: fmt_year,
        fmt_y,
    };
    frame.render_widget(widget, chunks[1]);
}

fn draw_growth(frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let bars = growth_bars(view);
    if bars.is_empty() {
        frame.render_widget(notice("No industries with computable growth."), area);
        return;
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let legend = Line::from(vec![
        Span::styled("██ ", Style::default().fg(Color::Rgb(70, 130, 180))),
        Span::raw("nominal  "),
        Span::styled("██ ", Style::default().fg(Color::Rgb(255, 140, 0))),
        Span::raw("real"),
    ]);
    frame.render_widget(Paragraph::new(legend), chunks[0]);

    let max = bars.iter().flat_map(|b| [b.nominal, b.real]).fold(1.0_f64, f64::max);
    let widget = DashboardChart {
        body: ChartBody::Bars(&bars),
        x_bounds: [0.4, bars.len() as f64 + 0.6],
        y_bounds: [0.0, max * 1.1],
        x_label: "",
        y_label: "times",
        fmt_x: fmt_year,
        fmt_y: fmt_ratio,
    };
    frame.render_widget(widget, chunks[1]);
}

fn growth_bars(view: &DashboardView) -> Vec<GrowthBar> {
    view.growth
        .entries
        .iter()
        .map(|m| GrowthBar {
            label: m.industry.clone(),
            nominal: m.nominal_growth,
            real: m.real_growth,
        })
        .collect()
}

fn notice(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(text).style(Style::default().fg(Color::Yellow))
}

fn draw_inflation(frame: &mut ratatui::Frame<'_>, area: Rect, view: &DashboardView) {
    let (Some(first), Some(last)) = (view.inflation.first(), view.inflation.last()) else {
        frame.render_widget(notice("No inflation data."), area);
        return;
    };
    let y_min = view
        .inflation
        .iter()
        .map(|p| p.inflation_pct)
        .fold(0.0_f64, f64::min);
    let y_max = view
        .inflation
        .iter()
        .map(|p| p.inflation_pct)
        .fold(HIGH_INFLATION_THRESHOLD_PCT, f64::max);

    let widget = DashboardChart {
        body: ChartBody::Inflation(&view.inflation),
        x_bounds: [first.year as f64 - 0.6, last.year as f64 + 0.6],
        y_bounds: [y_min * 1.1, y_max * 1.1],
        x_label: "year",
        y_label: "inflation, %",
        fmt_x: fmt_year,
        fmt_y: fmt_pct,
    };
    frame.render_widget(widget, area);
}

fn fmt_year(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_thousands(v: f64) -> String {
    format_thousands(v)
}

fn fmt_ratio(v: f64) -> String {
    format!("{v:.1}x")
}

fn fmt_pct(v: f64) -> String {
    format!("{v:.0}%")
}

fn fmt_factor(v: f64) -> String {
    format!("{v:.2}")
}

/// Fit a previous selection onto a freshly loaded dataset.
///
/// Industries that disappeared are dropped and the window is clamped to the
/// new year range. Falls back to everything if none of the industries survive.
fn carry_selection(previous: &Selection, dataset: &Dataset) -> Selection {
    let industries: Vec<String> = dataset
        .industries
        .iter()
        .filter(|i| previous.industries.contains(i))
        .cloned()
        .collect();
    if industries.is_empty() && !previous.industries.is_empty() {
        return dataset.full_selection();
    }
    Selection {
        industries,
        start_year: previous.start_year.clamp(dataset.year_min, dataset.year_max),
        end_year: previous.end_year.clamp(dataset.year_min, dataset.year_max),
    }
}
