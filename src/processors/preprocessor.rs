use crate::config::FrostConfig;
use crate::error::Result;
use crate::processors::FrostAggregator;
use crate::readers::{CityReader, WeatherReader};
use crate::utils::progress::ProgressReporter;
use crate::writers::TableWriter;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct PreprocessReport {
    pub cities_written: usize,
    pub cities_skipped: usize,
    pub observations_read: usize,
    pub skipped_rows: usize,
    pub undated_rows: usize,
    pub excluded_after_cutoff: usize,
    pub cutoff_year: i32,
    pub departments: usize,
    pub climate_days_written: usize,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
    pub city_table: PathBuf,
    pub climate_table: PathBuf,
}

impl PreprocessReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Preprocessing Summary\n");
        summary.push_str("=====================\n");
        summary.push_str(&format!("Cities written: {}\n", self.cities_written));
        if self.cities_skipped > 0 {
            summary.push_str(&format!(
                "Cities skipped (no code, no coordinates or invalid): {}\n",
                self.cities_skipped
            ));
        }
        summary.push_str(&format!("Observations read: {}\n", self.observations_read));
        if self.skipped_rows > 0 {
            summary.push_str(&format!(
                "Rows without department code: {}\n",
                self.skipped_rows
            ));
        }
        if self.undated_rows > 0 {
            summary.push_str(&format!("Rows without a date: {}\n", self.undated_rows));
        }
        summary.push_str(&format!(
            "Excluded (year >= {}): {}\n",
            self.cutoff_year, self.excluded_after_cutoff
        ));
        if let Some((first, last)) = self.date_span {
            summary.push_str(&format!("Historical span: {} to {}\n", first, last));
        }
        summary.push_str(&format!("Departments: {}\n", self.departments));
        summary.push_str(&format!(
            "Climate days written: {}\n",
            self.climate_days_written
        ));
        summary.push_str(&format!("City table: {}\n", self.city_table.display()));
        summary.push_str(&format!("Climate table: {}", self.climate_table.display()));

        summary
    }
}

/// Offline stage: raw city and weather files in, derived tables out
pub struct Preprocessor {
    config: FrostConfig,
}

impl Preprocessor {
    pub fn new(config: FrostConfig) -> Self {
        Self { config }
    }

    /// Both inputs are fully read and aggregated before anything is written
    pub fn run(&self, progress: Option<&ProgressReporter>) -> Result<PreprocessReport> {
        let paths = &self.config.paths;
        let delimiter = self.config.preprocess.delimiter_byte()?;

        if let Some(p) = progress {
            p.set_message("Processing cities...");
        }
        let city_source = paths.city_source_path();
        info!("Reading cities from {}", city_source.display());
        let city_list = CityReader::new()
            .with_columns(self.config.city_columns.clone())
            .with_delimiter(delimiter)
            .read_cities(&city_source)?;

        if let Some(p) = progress {
            p.set_message("Processing weather history...");
        }
        let weather_source = paths.weather_source_path();
        info!("Reading weather history from {}", weather_source.display());
        let history = WeatherReader::new()
            .with_columns(self.config.weather_columns.clone())
            .with_delimiter(delimiter)
            .read_history(&weather_source)?;

        if let Some(p) = progress {
            p.set_message("Aggregating frost statistics...");
        }
        let aggregator = FrostAggregator::with_cutoff_year(self.config.preprocess.cutoff_year);
        let aggregation = aggregator.aggregate(&history.observations)?;
        info!(
            departments = aggregation.departments,
            days = aggregation.days.len(),
            excluded = aggregation.excluded_after_cutoff,
            "Aggregated weather history"
        );

        if let Some(p) = progress {
            p.set_message("Writing derived tables...");
        }
        let writer = TableWriter::new();
        let city_table = paths.city_table_path();
        let climate_table = paths.climate_table_path();
        let cities_written = writer.write_cities(&city_list.cities, &city_table)?;
        let climate_days_written = writer.write_climate(&aggregation.days, &climate_table)?;

        Ok(PreprocessReport {
            cities_written,
            cities_skipped: city_list.skipped_rows(),
            observations_read: history.observations.len(),
            skipped_rows: history.skipped_rows,
            undated_rows: history.undated_rows,
            excluded_after_cutoff: aggregation.excluded_after_cutoff,
            cutoff_year: aggregator.cutoff_year(),
            departments: aggregation.departments,
            climate_days_written,
            date_span: aggregation.date_span,
            city_table,
            climate_table,
        })
    }
}
