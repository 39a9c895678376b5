//! CSV ingest and validation.
//!
//! This module turns the salary CSV into a clean, immutable `Dataset`.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (file order is preserved)
//! - **Separation of concerns**: no metrics logic here

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Dataset, SalaryRecord};
use crate::error::AppError;

/// Accepted calendar years; anything else is treated as a typo.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2100;

/// A required input column and the header spellings accepted for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Industry,
    Year,
    NominalSalary,
    RealSalary,
    InflationPct,
    CumulativeInflation,
}

impl Column {
    const ALL: [Column; 6] = [
        Column::Industry,
        Column::Year,
        Column::NominalSalary,
        Column::RealSalary,
        Column::InflationPct,
        Column::CumulativeInflation,
    ];

    fn canonical(self) -> &'static str {
        match self {
            Column::Industry => "industry",
            Column::Year => "year",
            Column::NominalSalary => "nominal_salary",
            Column::RealSalary => "real_salary",
            Column::InflationPct => "inflation_pct",
            Column::CumulativeInflation => "cumulative_inflation",
        }
    }

    /// Accepted (normalized) header names, canonical first.
    ///
    /// The Russian names are the headers of the published dataset.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Industry => &["industry", "sector", "отрасль"],
            Column::Year => &["year", "год"],
            Column::NominalSalary => &["nominal_salary", "salary", "зарплата"],
            Column::RealSalary => &["real_salary", "реальная_зарплата"],
            Column::InflationPct => &["inflation_pct", "inflation", "инфляция"],
            Column::CumulativeInflation => &["cumulative_inflation", "кумулятивная_инфляция"],
        }
    }
}

/// Resolved column positions.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    industry: usize,
    year: usize,
    nominal_salary: usize,
    real_salary: usize,
    inflation_pct: usize,
    cumulative_inflation: usize,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub industry: Option<String>,
    pub message: String,
}

/// Ingest output: the dataset + row errors and counts.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: Dataset,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load the dataset from a CSV file.
pub fn load_dataset(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Data file not found or unreadable '{}': {e}",
            path.display()
        ))
    })?;

    log::info!("loading dataset from {}", path.display());
    read_dataset(file)
}

/// Load the dataset from any CSV reader.
pub fn read_dataset<R: Read>(input: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let index = resolve_columns(&build_header_map(&headers))?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut seen: HashSet<(String, i32)> = HashSet::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based after it.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    industry: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &index) {
            Ok(row) => {
                if !seen.insert((row.industry.clone(), row.year)) {
                    row_errors.push(RowError {
                        line,
                        industry: Some(row.industry.clone()),
                        message: format!("Duplicate row for year {}; keeping the first.", row.year),
                    });
                    continue;
                }
                records.push(row);
            }
            Err(message) => row_errors.push(RowError {
                line,
                industry: get_cell(&record, index.industry).map(str::to_string),
                message,
            }),
        }
    }

    for err in &row_errors {
        log::warn!(
            "line {}{}: {}",
            err.line,
            err.industry
                .as_deref()
                .map(|i| format!(" ({i})"))
                .unwrap_or_default(),
            err.message
        );
    }

    let rows_used = records.len();
    let dataset = Dataset::from_records(records)
        .ok_or_else(|| AppError::no_data("No valid rows found in the data file."))?;

    for gap in dataset.year_gaps() {
        log::warn!(
            "industry '{}' has no rows for {gap} ({} years)",
            gap.industry,
            gap.missing_years()
        );
    }

    log::info!(
        "dataset loaded: {rows_used}/{rows_read} rows, {} industries, years {}-{}",
        dataset.industries.len(),
        dataset.year_min,
        dataset.year_max
    );

    Ok(IngestedData {
        dataset,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}').trim();
    name.to_lowercase().replace(' ', "_")
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<ColumnIndex, AppError> {
    let find = |col: Column| col.aliases().iter().find_map(|a| header_map.get(*a).copied());

    let missing: Vec<String> = Column::ALL
        .iter()
        .filter(|c| find(**c).is_none())
        .map(|c| format!("`{}`", c.canonical()))
        .collect();

    if !missing.is_empty() {
        return Err(AppError::input(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let get = |col: Column| find(col).unwrap_or_default();
    Ok(ColumnIndex {
        industry: get(Column::Industry),
        year: get(Column::Year),
        nominal_salary: get(Column::NominalSalary),
        real_salary: get(Column::RealSalary),
        inflation_pct: get(Column::InflationPct),
        cumulative_inflation: get(Column::CumulativeInflation),
    })
}

fn parse_row(record: &StringRecord, index: &ColumnIndex) -> Result<SalaryRecord, String> {
    let industry = get_cell(record, index.industry)
        .ok_or_else(|| "Missing required value: `industry`".to_string())?
        .to_string();

    let year = parse_year(get_required(record, index.year, "year")?)?;

    let number = |col: usize, name: &str| parse_f64(get_required(record, col, name)?, name);
    let nominal_salary = number(index.nominal_salary, "nominal_salary")?;
    let real_salary = number(index.real_salary, "real_salary")?;
    let inflation_pct = number(index.inflation_pct, "inflation_pct")?;
    let cumulative_inflation = number(index.cumulative_inflation, "cumulative_inflation")?;

    if nominal_salary <= 0.0 {
        return Err(format!("Invalid `nominal_salary` {nominal_salary} (must be > 0)."));
    }
    if real_salary <= 0.0 {
        return Err(format!("Invalid `real_salary` {real_salary} (must be > 0)."));
    }
    // The factor is measured from the base year, so it never drops below 1.
    if cumulative_inflation < 1.0 {
        return Err(format!(
            "Invalid `cumulative_inflation` {cumulative_inflation} (must be >= 1)."
        ));
    }

    Ok(SalaryRecord {
        industry,
        year,
        nominal_salary,
        real_salary,
        inflation_pct,
        cumulative_inflation,
    })
}

fn get_cell(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    get_cell(record, idx).ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year = match s.parse::<i32>() {
        Ok(y) => y,
        // Dataframe exports sometimes write integer columns as `2000.0`.
        Err(_) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i32::MAX as f64 => v as i32,
            _ => return Err(format!("Invalid `year` '{s}'.")),
        },
    };
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(format!(
            "Implausible `year` {year} (expected {MIN_YEAR}-{MAX_YEAR})."
        ));
    }
    Ok(year)
}

fn parse_f64(s: &str, name: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{name}` '{s}' (expected a number)."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite `{name}` value."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "industry,year,nominal_salary,real_salary,inflation_pct,cumulative_inflation\n";

    #[test]
    fn reads_canonical_headers() {
        let csv = format!(
            "{HEADER}IT,2000,10000,10000,20.2,1.0\nIT,2001,12000,10500,18.6,1.19\n"
        );
        let data = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(data.rows_read, 2);
        assert_eq!(data.rows_used, 2);
        assert!(data.row_errors.is_empty());
        assert_eq!(data.dataset.industries, vec!["IT"]);
        assert_eq!(data.dataset.records[1].real_salary, 10500.0);
        assert_eq!(data.dataset.records[1].cumulative_inflation, 1.19);
    }

    #[test]
    fn accepts_russian_headers_with_bom() {
        let csv = "\u{feff}Отрасль,Год,Зарплата,Реальная_зарплата,Инфляция,Кумулятивная_инфляция\n\
                   Финансы,2000,4000,4000,20.2,1.0\n";
        let data = read_dataset(csv.as_bytes()).unwrap();

        let r = &data.dataset.records[0];
        assert_eq!(r.industry, "Финансы");
        assert_eq!(r.year, 2000);
        assert_eq!(r.nominal_salary, 4000.0);
    }

    #[test]
    fn missing_columns_are_named() {
        let csv = "industry,year,nominal_salary\nIT,2000,1\n";
        let err = read_dataset(csv.as_bytes()).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("`real_salary`"));
        assert!(err.message().contains("`inflation_pct`"));
        assert!(err.message().contains("`cumulative_inflation`"));
        assert!(!err.message().contains("`year`"));
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = format!(
            "{HEADER}IT,2000,10000,10000,20.2,1.0\n\
             IT,2001,-5,10500,18.6,1.19\n\
             IT,20x2,1,1,1,1\n\
             IT,2000,99,99,1,1\n\
             Mining,2000,8000,8000,20.2,1.0\n"
        );
        let data = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(data.rows_read, 5);
        assert_eq!(data.rows_used, 2);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(data.row_errors[0].message.contains("nominal_salary"));
        assert!(data.row_errors[2].message.contains("Duplicate"));
        // First occurrence of a duplicate wins.
        assert_eq!(data.dataset.records[0].nominal_salary, 10000.0);
    }

    #[test]
    fn cumulative_factor_below_one_is_rejected() {
        let csv = format!(
            "{HEADER}IT,2000,10000,10000,20.2,1.0\n\
             IT,2001,12000,10500,18.6,0.95\n\
             IT,2002,15000,10600,15.1,0\n"
        );
        let data = read_dataset(csv.as_bytes()).unwrap();

        assert_eq!(data.rows_used, 1);
        assert_eq!(data.row_errors.len(), 2);
        assert!(data.row_errors[0].message.contains("`cumulative_inflation` 0.95"));
        assert_eq!(data.row_errors[1].line, 4);
    }

    #[test]
    fn year_accepts_float_formatting() {
        assert_eq!(parse_year("2005.0"), Ok(2005));
        assert!(parse_year("2005.5").is_err());
    }

    #[test]
    fn implausible_years_are_row_errors() {
        assert!(parse_year("50002000").unwrap_err().contains("Implausible"));
        assert!(parse_year("-2147483648").is_err());
        assert!(parse_year("2147483647").is_err());
        assert_eq!(parse_year("1900"), Ok(1900));
        assert_eq!(parse_year("2100"), Ok(2100));

        let csv = format!(
            "{HEADER}IT,2000,10000,10000,20.2,1.0\n\
             IT,50002000,12000,10500,18.6,1.19\n\
             IT,-2147483648,1,1,1,1\n"
        );
        let data = read_dataset(csv.as_bytes()).unwrap();
        assert_eq!(data.rows_used, 1);
        assert_eq!(data.row_errors.len(), 2);
        assert!(data.dataset.year_gaps().is_empty());
        assert_eq!((data.dataset.year_min, data.dataset.year_max), (2000, 2000));
    }

    #[test]
    fn no_valid_rows_is_no_data_error() {
        let csv = format!("{HEADER}IT,2000,0,0,1,1\n");
        let err = read_dataset(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = load_dataset(Path::new("definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("definitely/not/here.csv"));
    }
}
