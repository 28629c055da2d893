use crate::config::WeatherColumns;
use crate::error::{ProcessingError, Result};
use crate::models::{DepartmentCode, WeatherObservation};
use crate::readers::source::{open_source, parse_optional_f64, resolve_columns};
use crate::utils::parse_observation_date;
use std::path::Path;
use tracing::{debug, warn};

/// Observations read from the raw weather history
#[derive(Debug, Default)]
pub struct WeatherHistory {
    pub observations: Vec<WeatherObservation>,
    /// Rows without a department code; they cannot be grouped
    pub skipped_rows: usize,
    /// Rows with an empty date cell; they belong to no calendar day
    pub undated_rows: usize,
}

/// Reads the raw daily weather history and renames it to canonical fields
pub struct WeatherReader {
    columns: WeatherColumns,
    delimiter: u8,
}

impl WeatherReader {
    pub fn new() -> Self {
        Self {
            columns: WeatherColumns::default(),
            delimiter: b',',
        }
    }

    pub fn with_columns(mut self, columns: WeatherColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn read_history(&self, path: &Path) -> Result<WeatherHistory> {
        let mut reader = open_source(path, self.delimiter)?;
        let headers = reader.headers()?.clone();
        let [date, dep_code, min_temp] = resolve_columns(&headers, self.columns.names(), path)?;

        let mut history = WeatherHistory::default();

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let field = |idx: usize| row.get(idx).unwrap_or_default();

            if field(dep_code).is_empty() {
                history.skipped_rows += 1;
                continue;
            }
            if field(date).is_empty() {
                history.undated_rows += 1;
                continue;
            }

            let observed_on = parse_observation_date(field(date)).map_err(|_| {
                ProcessingError::InvalidFormat(format!(
                    "{} line {}: invalid date '{}'",
                    path.display(),
                    line,
                    field(date)
                ))
            })?;
            let temperature = parse_optional_f64(field(min_temp), &self.columns.min_temp, line)?;

            history.observations.push(WeatherObservation::new(
                DepartmentCode::new(field(dep_code)),
                observed_on,
                temperature,
            ));
        }

        if history.skipped_rows > 0 {
            warn!(
                "Skipped {} weather rows without a department code",
                history.skipped_rows
            );
        }
        if history.undated_rows > 0 {
            warn!("Skipped {} weather rows without a date", history.undated_rows);
        }
        debug!(
            "Read {} observations from {}",
            history.observations.len(),
            path.display()
        );

        Ok(history)
    }
}

impl Default for WeatherReader {
    fn default() -> Self {
        Self::new()
    }
}
