use crate::error::{ProcessingError, Result};
use crate::models::{CityRecord, ClimateDay};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;
use validator::Validate;

/// Loads the derived tables written by the preprocessor
pub struct TableReader;

impl TableReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_city_table(&self, path: &Path) -> Result<Vec<CityRecord>> {
        self.read_table(path)
    }

    pub fn read_climate_table(&self, path: &Path) -> Result<Vec<ClimateDay>> {
        self.read_table(path)
    }

    fn read_table<T: DeserializeOwned + Validate>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Err(ProcessingError::missing_table(path));
        }

        let mut reader = csv::Reader::from_path(path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            let row: T = row?;
            row.validate()?;
            rows.push(row);
        }

        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_climate_table() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "dep_code,month,day,is_frost,min_temp,plot_date")?;
        writeln!(temp_file, "01,1,15,0.5,-0.25,2020-01-15")?;
        writeln!(temp_file, "01,2,29,0.0,,2020-02-29")?;

        let days = TableReader::new().read_climate_table(temp_file.path())?;

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].dep_code.as_str(), "01");
        assert_eq!(days[0].is_frost, 0.5);
        assert_eq!(days[0].min_temp, Some(-0.25));
        assert_eq!(days[1].min_temp, None);
        assert_eq!(days[1].plot_date, NaiveDate::from_ymd_opt(2020, 2, 29).unwrap());

        Ok(())
    }

    #[test]
    fn test_unpadded_code_is_normalised_on_load() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "city_name,dep_code,dep_nom,lat,lon")?;
        writeln!(temp_file, "Bourg-en-Bresse,1,Ain,46.2,5.22")?;

        let cities = TableReader::new().read_city_table(temp_file.path())?;
        assert_eq!(cities[0].dep_code.as_str(), "01");

        Ok(())
    }

    #[test]
    fn test_out_of_range_probability_is_rejected() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "dep_code,month,day,is_frost,min_temp,plot_date")?;
        writeln!(temp_file, "01,1,15,1.5,-0.25,2020-01-15")?;

        let err = TableReader::new()
            .read_climate_table(temp_file.path())
            .unwrap_err();
        assert!(matches!(err, ProcessingError::Validation(_)));

        Ok(())
    }

    #[test]
    fn test_missing_table_asks_for_preprocessing() {
        let err = TableReader::new()
            .read_city_table(Path::new("nowhere/cities_db.csv"))
            .unwrap_err();

        assert!(err.is_missing_input());
        assert!(err.to_string().contains("preprocess"));
    }
}
