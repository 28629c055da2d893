use crate::error::{ProcessingError, Result};
use crate::models::{CityRecord, ClimateDay};
use serde::Serialize;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;
use validator::Validate;

/// Writes derived tables as CSV, replacing any previous file atomically
pub struct TableWriter;

impl TableWriter {
    pub fn new() -> Self {
        Self
    }

    /// Every record is validated first so the presenter can always load the
    /// table back; nothing is written if one fails.
    pub fn write_cities(&self, cities: &[CityRecord], path: &Path) -> Result<usize> {
        for city in cities {
            city.validate()?;
        }
        self.write_table(&CityRecord::COLUMNS, cities, path)
    }

    pub fn write_climate(&self, days: &[ClimateDay], path: &Path) -> Result<usize> {
        self.write_table(&ClimateDay::COLUMNS, days, path)
    }

    /// Rows go to a temporary file next to `path` which is renamed into place
    /// once complete, so readers never observe a partial table.
    fn write_table<T: Serialize>(&self, columns: &[&str], rows: &[T], path: &Path) -> Result<usize> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let staging = NamedTempFile::new_in(parent)?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(staging.as_file());

            // Header written explicitly so an empty table still carries it
            writer.write_record(columns)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        staging
            .persist(path)
            .map_err(|e| ProcessingError::Io(e.error))?;

        debug!("Wrote {} rows to {}", rows.len(), path.display());
        Ok(rows.len())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}
