//! Run configuration.
//!
//! Values come from CLI flags; the data path can also be supplied through the
//! `SALARY_DATA` environment variable (a `.env` file is honored).

use std::path::PathBuf;

use crate::domain::{ChartKind, Dataset, Selection};
use crate::error::AppError;

/// Location of the dataset when nothing else is configured.
pub const DEFAULT_DATA_PATH: &str = "data/salary_analysis_data.csv";

/// Environment variable overriding the dataset location.
pub const DATA_PATH_ENV: &str = "SALARY_DATA";

/// A full run's configuration as understood by the front-ends.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Requested industries; empty means "all".
    pub industries: Vec<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub chart: ChartKind,
    pub show_table: bool,
    /// Print the ASCII chart in `report`.
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            industries: Vec::new(),
            start_year: None,
            end_year: None,
            chart: ChartKind::Nominal,
            show_table: false,
            plot: true,
            plot_width: 100,
            plot_height: 25,
        }
    }
}

impl DashboardConfig {
    /// Resolve the requested filters against the loaded dataset.
    ///
    /// Years outside the dataset are clamped to its range. Unknown industries
    /// are an input error.
    pub fn selection_for(&self, dataset: &Dataset) -> Result<Selection, AppError> {
        let industries = if self.industries.is_empty() {
            dataset.industries.clone()
        } else {
            let mut out = Vec::with_capacity(self.industries.len());
            for requested in &self.industries {
                let Some(found) = dataset
                    .industries
                    .iter()
                    .find(|i| i.to_lowercase() == requested.trim().to_lowercase())
                else {
                    return Err(AppError::input(format!(
                        "Unknown industry '{requested}'. Available: {}",
                        dataset.industries.join(", ")
                    )));
                };
                if !out.contains(found) {
                    out.push(found.clone());
                }
            }
            out
        };

        let start_year = clamp_year(self.start_year.unwrap_or(dataset.year_min), dataset);
        let end_year = clamp_year(self.end_year.unwrap_or(dataset.year_max), dataset);

        Ok(Selection {
            industries,
            start_year,
            end_year,
        })
    }
}

fn clamp_year(year: i32, dataset: &Dataset) -> i32 {
    let clamped = year.clamp(dataset.year_min, dataset.year_max);
    if clamped != year {
        log::warn!(
            "year {year} is outside the dataset range {}-{}; using {clamped}",
            dataset.year_min,
            dataset.year_max
        );
    }
    clamped
}

/// Pick the dataset path: explicit flag, then `SALARY_DATA`, then the default.
pub fn resolve_data_path(flag: Option<PathBuf>) -> PathBuf {
    dotenvy::dotenv().ok();
    choose_data_path(flag, std::env::var(DATA_PATH_ENV).ok())
}

fn choose_data_path(flag: Option<PathBuf>, env_value: Option<String>) -> PathBuf {
    flag.or_else(|| {
        env_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}
