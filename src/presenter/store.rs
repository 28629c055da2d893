use crate::config::PathsConfig;
use crate::error::Result;
use crate::models::{CityRecord, ClimateDay};
use crate::readers::TableReader;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::info;

/// Derived tables held for the length of a presenter session.
///
/// Queries only borrow from the store. Regenerated files are picked up by an
/// explicit [`DataStore::reload`], never implicitly.
#[derive(Debug)]
pub struct DataStore {
    city_table: PathBuf,
    climate_table: PathBuf,
    cities: Vec<CityRecord>,
    climate: Vec<ClimateDay>,
    loaded_at: DateTime<Local>,
}

impl DataStore {
    pub fn load(paths: &PathsConfig) -> Result<Self> {
        let mut store = Self {
            city_table: paths.city_table_path(),
            climate_table: paths.climate_table_path(),
            cities: Vec::new(),
            climate: Vec::new(),
            loaded_at: Local::now(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Build a store from tables already in memory
    pub fn from_tables(cities: Vec<CityRecord>, climate: Vec<ClimateDay>) -> Self {
        Self {
            city_table: PathBuf::new(),
            climate_table: PathBuf::new(),
            cities,
            climate,
            loaded_at: Local::now(),
        }
    }

    /// Re-read both tables; on error the previously loaded data is kept
    pub fn reload(&mut self) -> Result<()> {
        let reader = TableReader::new();
        let cities = reader.read_city_table(&self.city_table)?;
        let climate = reader.read_climate_table(&self.climate_table)?;

        info!(
            cities = cities.len(),
            climate_days = climate.len(),
            "Loaded derived tables"
        );

        self.cities = cities;
        self.climate = climate;
        self.loaded_at = Local::now();
        Ok(())
    }

    pub fn cities(&self) -> &[CityRecord] {
        &self.cities
    }

    pub fn climate(&self) -> &[ClimateDay] {
        &self.climate
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }

    /// Exact name match; with duplicate names the first row wins
    pub fn city(&self, name: &str) -> Option<&CityRecord> {
        self.cities.iter().find(|c| c.city_name == name)
    }

    /// Sorted, de-duplicated names for the city selector
    pub fn city_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cities.iter().map(|c| c.city_name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// The configured default if it exists, otherwise the first name in order
    pub fn default_city<'a>(&'a self, preferred: &str) -> Option<&'a str> {
        match self.city(preferred) {
            Some(city) => Some(city.city_name.as_str()),
            None => self.city_names().first().copied(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DepartmentCode;
    use crate::writers::TableWriter;
    use tempfile::TempDir;

    fn city(name: &str, dep: &str, lat: f64) -> CityRecord {
        CityRecord::new(name.to_string(), DepartmentCode::new(dep), "Dep".to_string(), lat, 2.0)
    }

    #[test]
    fn test_city_lookup_first_match_wins() {
        let store = DataStore::from_tables(
            vec![city("Sainte-Marie", "15", 45.0), city("Sainte-Marie", "25", 47.0)],
            Vec::new(),
        );

        assert_eq!(store.city("Sainte-Marie").unwrap().dep_code.as_str(), "15");
        assert!(store.city("sainte-marie").is_none());
    }

    #[test]
    fn test_city_names_sorted_and_unique() {
        let store = DataStore::from_tables(
            vec![city("Paris", "75", 48.8), city("Ajaccio", "2A", 41.9), city("Paris", "75", 48.8)],
            Vec::new(),
        );

        assert_eq!(store.city_names(), vec!["Ajaccio", "Paris"]);
        assert_eq!(store.default_city("Paris"), Some("Paris"));
        assert_eq!(store.default_city("Ambérieu-en-Bugey"), Some("Ajaccio"));
    }

    #[test]
    fn test_reload_picks_up_regenerated_tables() -> Result<()> {
        let dir = TempDir::new()?;
        let paths = PathsConfig {
            data_dir: dir.path().to_path_buf(),
            ..PathsConfig::default()
        };
        let writer = TableWriter::new();
        writer.write_cities(&[city("Paris", "75", 48.8)], &paths.city_table_path())?;
        writer.write_climate(&[], &paths.climate_table_path())?;

        let mut store = DataStore::load(&paths)?;
        assert_eq!(store.cities().len(), 1);

        writer.write_cities(
            &[city("Paris", "75", 48.8), city("Lyon", "69", 45.7)],
            &paths.city_table_path(),
        )?;
        assert_eq!(store.cities().len(), 1);

        store.reload()?;
        assert_eq!(store.cities().len(), 2);
        Ok(())
    }

    #[test]
    fn test_load_without_tables() {
        let dir = TempDir::new().unwrap();
        let paths = PathsConfig {
            data_dir: dir.path().to_path_buf(),
            ..PathsConfig::default()
        };

        let err = DataStore::load(&paths).unwrap_err();
        assert!(err.is_missing_input());
    }
}
