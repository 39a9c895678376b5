//! Formatted terminal output: metric cards, growth summary, conclusions, tables.
//!
//! Rounding happens only here; the metrics layer keeps raw `f64` values.

use crate::app::pipeline::DashboardView;
use crate::domain::{GrowthMetrics, SalaryRecord};
use crate::io::ingest::IngestedData;

/// Currency suffix used by the salary figures.
pub const CURRENCY: &str = "₽";

/// Where the numbers come from and how they are derived.
pub const ABOUT_LINES: [&str; 4] = [
    "Wages: Rosstat, by industry",
    "Inflation: Bank of Russia",
    "Real wages: 2000 prices",
    "Annual rates: compound",
];

/// Data sources and methodology, one line each.
pub fn format_about() -> String {
    let mut out = String::from("About\n");
    for line in ABOUT_LINES {
        out.push_str(&format!("  {line}\n"));
    }
    out
}

/// Format the full dashboard (everything except charts and the raw table).
pub fn format_dashboard(view: &DashboardView) -> String {
    if let Some(warning) = &view.warning {
        return format!("Warning: {warning}\n");
    }

    let mut out = String::new();
    out.push_str(&format_metric_cards(view));
    out.push('\n');
    out.push_str(&format_growth_summary(view));
    out.push('\n');
    out.push_str(&format_conclusions(view));
    if !view.growth.skipped.is_empty() {
        out.push('\n');
        out.push_str(&format_skipped(view));
    }
    out
}

/// One-paragraph summary of what was loaded.
pub fn format_load_summary(ingest: &IngestedData) -> String {
    let ds = &ingest.dataset;
    let mut out = format!(
        "Data: {} rows ({} skipped) | {} industries | years {}-{}\n",
        ingest.rows_used,
        ingest.rows_read - ingest.rows_used,
        ds.industries.len(),
        ds.year_min,
        ds.year_max
    );
    for err in &ingest.row_errors {
        out.push_str(&format!("  line {}: {}\n", err.line, err.message));
    }
    out
}

/// Per-industry headline cards: latest salary and real growth.
pub fn format_metric_cards(view: &DashboardView) -> String {
    let mut out = format!(
        "Key metrics ({}-{})\n",
        view.selection.start_year, view.selection.end_year
    );
    for m in &view.growth.entries {
        out.push_str(&format_card(m));
    }
    out
}

fn format_card(m: &GrowthMetrics) -> String {
    format!(
        "{}\n  Salary {}: {} {CURRENCY} ({:+.0}% over period)\n  \
         Real growth: {:.1}x ({:.1}% per year)\n",
        m.industry,
        m.end_year,
        format_thousands(m.end_salary),
        m.nominal_increase_pct(),
        m.real_growth,
        m.avg_real_growth_pct,
    )
}

/// Nominal and real growth per industry (`8.0x (11.0% per year)`).
pub fn format_growth_summary(view: &DashboardView) -> String {
    let mut out = String::from("Nominal growth\n");
    for m in &view.growth.entries {
        out.push_str(&format!(
            "  {}: {:.1}x ({:.1}% per year)\n",
            m.industry, m.nominal_growth, m.avg_nominal_growth_pct
        ));
    }
    out.push_str("Real growth\n");
    for m in &view.growth.entries {
        out.push_str(&format!(
            "  {}: {:.1}x ({:.1}% per year)\n",
            m.industry, m.real_growth, m.avg_real_growth_pct
        ));
    }
    out
}

/// Inflation headline, analysed period, and real-growth leader.
pub fn format_conclusions(view: &DashboardView) -> String {
    let mut out = String::from("Conclusions\n");
    if let Some(s) = &view.inflation_summary {
        out.push_str(&format!(
            "  - Average inflation over the selected period: {:.1}%\n",
            s.avg_inflation_pct
        ));
        out.push_str(&format!(
            "  - Peak inflation: {:.1}% in {}\n",
            s.max_inflation_pct, s.max_inflation_year
        ));
    }
    out.push_str(&format!(
        "  - Period analysed: {}-{} ({} years)\n",
        view.selection.start_year,
        view.selection.end_year,
        view.period_years()
    ));
    if let Some(leader) = view.leader() {
        out.push_str(&format!(
            "  - Real salary growth leader: {} ({:.1}x)\n",
            leader.industry, leader.real_growth
        ));
    }
    out
}

/// Selected industries whose metrics could not be computed, with the reason.
pub fn format_skipped(view: &DashboardView) -> String {
    let mut out = String::from("Metrics unavailable\n");
    for s in &view.growth.skipped {
        out.push_str(&format!("  - {}: {}\n", s.industry, s.reason));
    }
    out
}

/// Detailed table of filtered rows with display rounding applied.
pub fn format_table(rows: &[SalaryRecord]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.industry.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(8, 32);

    let mut out = String::new();
    out.push_str(
        format!(
            "{:<name_width$} {:>6} {:>12} {:>12} {:>10} {:>10}",
            "industry", "year", "salary", "real_salary", "inflation", "cumulative"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<name_width$} {:-<6} {:-<12} {:-<12} {:-<10} {:-<10}",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:<name_width$} {:>6} {:>12} {:>12} {:>10.1} {:>10.2}",
                truncate(&r.industry, name_width),
                r.year,
                format_thousands(r.nominal_salary),
                format_thousands(r.real_salary),
                r.inflation_pct,
                r.cumulative_inflation,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Round to an integer and group thousands with commas (`80000.4` -> `80,000`).
pub fn format_thousands(v: f64) -> String {
    let n = v.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::build_view;
    use crate::domain::{Dataset, Selection};

    fn rec(industry: &str, year: i32, nominal: f64, real: f64, inflation: f64) -> SalaryRecord {
        SalaryRecord {
            industry: industry.to_string(),
            year,
            nominal_salary: nominal,
            real_salary: real,
            inflation_pct: inflation,
            cumulative_inflation: 1.0,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("IT", 2000, 10_000.0, 10_000.0, 20.2),
            rec("IT", 2020, 80_000.0, 40_000.0, 3.4),
            rec("Mining", 2000, 12_000.0, 12_000.0, 20.2),
            rec("Mining", 2020, 60_000.0, 30_000.0, 3.4),
            rec("Retail", 2020, 40_000.0, 20_000.0, 3.4),
        ])
        .unwrap()
    }

    #[test]
    fn about_names_sources_and_base_year() {
        let about = format_about();
        assert!(about.starts_with("About\n"));
        assert!(about.contains("Rosstat"));
        assert!(about.contains("Bank of Russia"));
        assert!(about.contains("2000 prices"));
        assert_eq!(about.lines().count(), ABOUT_LINES.len() + 1);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(80_000.0), "80,000");
        assert_eq!(format_thousands(1_234_567.6), "1,234,568");
        assert_eq!(format_thousands(-4500.0), "-4,500");
    }

    #[test]
    fn card_shows_salary_and_real_growth() {
        let ds = dataset();
        let view = build_view(&ds, &ds.full_selection());
        let cards = format_metric_cards(&view);

        assert!(cards.starts_with("Key metrics (2000-2020)\n"));
        assert!(cards.contains("IT\n  Salary 2020: 80,000 ₽ (+700% over period)\n"));
        assert!(cards.contains("  Real growth: 4.0x (7.2% per year)\n"));
        assert!(!cards.contains("Retail"));
    }

    #[test]
    fn summary_and_conclusions() {
        let ds = dataset();
        let view = build_view(&ds, &ds.full_selection());

        let summary = format_growth_summary(&view);
        assert!(summary.contains("  IT: 8.0x (11.0% per year)\n"));
        assert!(summary.contains("  IT: 4.0x (7.2% per year)\n"));

        let conclusions = format_conclusions(&view);
        assert!(conclusions.contains("Average inflation over the selected period: 11.8%"));
        assert!(conclusions.contains("Peak inflation: 20.2% in 2000"));
        assert!(conclusions.contains("Period analysed: 2000-2020 (20 years)"));
        assert!(conclusions.contains("Real salary growth leader: IT (4.0x)"));
    }

    #[test]
    fn dashboard_lists_skipped_industries() {
        let ds = dataset();
        let text = format_dashboard(&build_view(&ds, &ds.full_selection()));
        assert!(text.contains("Metrics unavailable\n  - Retail: no data for Retail in 2000\n"));
    }

    #[test]
    fn dashboard_warns_on_empty_selection() {
        let ds = dataset();
        let sel = Selection {
            industries: Vec::new(),
            start_year: 2000,
            end_year: 2020,
        };
        let text = format_dashboard(&build_view(&ds, &sel));
        assert!(text.starts_with("Warning: No data found"));
    }

    #[test]
    fn table_rounds_for_display() {
        let rows = vec![SalaryRecord {
            industry: "IT".to_string(),
            year: 2001,
            nominal_salary: 12_345.6,
            real_salary: 9_876.4,
            inflation_pct: 18.57,
            cumulative_inflation: 1.1858,
        }];
        let table = format_table(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "industry   year       salary  real_salary  inflation cumulative"
        );
        assert_eq!(
            lines[2],
            "IT         2001       12,346        9,876       18.6       1.19"
        );
    }
}
