use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use crate::utils::MonthDay;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for both pipeline stages, layered from built-in defaults and an
/// optional TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrostConfig {
    pub paths: PathsConfig,
    pub preprocess: PreprocessConfig,
    pub city_columns: CityColumns,
    pub weather_columns: WeatherColumns,
    pub presenter: PresenterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    pub city_source: PathBuf,
    pub weather_source: PathBuf,
    pub city_table: PathBuf,
    pub climate_table: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            city_source: PathBuf::from(CITY_SOURCE_FILE),
            weather_source: PathBuf::from(WEATHER_SOURCE_FILE),
            city_table: PathBuf::from(CITY_TABLE_FILE),
            climate_table: PathBuf::from(CLIMATE_TABLE_FILE),
        }
    }
}

impl PathsConfig {
    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    pub fn city_source_path(&self) -> PathBuf {
        self.resolve(&self.city_source)
    }

    pub fn weather_source_path(&self) -> PathBuf {
        self.resolve(&self.weather_source)
    }

    pub fn city_table_path(&self) -> PathBuf {
        self.resolve(&self.city_table)
    }

    pub fn climate_table_path(&self) -> PathBuf {
        self.resolve(&self.climate_table)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub cutoff_year: i32,
    pub delimiter: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            delimiter: ",".to_string(),
        }
    }
}

impl PreprocessConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(ProcessingError::InvalidConfig(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CityColumns {
    pub name: String,
    pub dep_code: String,
    pub dep_name: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for CityColumns {
    fn default() -> Self {
        Self {
            name: CITY_NAME_COLUMN.to_string(),
            dep_code: CITY_DEP_CODE_COLUMN.to_string(),
            dep_name: CITY_DEP_NAME_COLUMN.to_string(),
            latitude: CITY_LAT_COLUMN.to_string(),
            longitude: CITY_LON_COLUMN.to_string(),
        }
    }
}

impl CityColumns {
    /// Source column names in canonical order
    pub fn names(&self) -> [&str; 5] {
        [
            &self.name,
            &self.dep_code,
            &self.dep_name,
            &self.latitude,
            &self.longitude,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherColumns {
    pub date: String,
    pub dep_code: String,
    pub min_temp: String,
}

impl Default for WeatherColumns {
    fn default() -> Self {
        Self {
            date: WEATHER_DATE_COLUMN.to_string(),
            dep_code: WEATHER_DEP_CODE_COLUMN.to_string(),
            min_temp: WEATHER_MIN_TEMP_COLUMN.to_string(),
        }
    }
}

impl WeatherColumns {
    pub fn names(&self) -> [&str; 3] {
        [&self.date, &self.dep_code, &self.min_temp]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    pub default_city: String,
    pub default_start: String,
    pub default_end: String,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            default_start: DEFAULT_PERIOD_START.to_string(),
            default_end: DEFAULT_PERIOD_END.to_string(),
        }
    }
}

impl PresenterConfig {
    pub fn default_period(&self) -> Result<(MonthDay, MonthDay)> {
        Ok((self.default_start.parse()?, self.default_end.parse()?))
    }
}

impl FrostConfig {
    /// Load settings from `path`; a missing optional file falls back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        builder = match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                builder.add_source(::config::File::from(path))
            }
            None => builder.add_source(
                ::config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
            ),
        };

        let config: FrostConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.paths.data_dir = data_dir;
        self
    }

    pub fn with_cutoff_year(mut self, cutoff_year: i32) -> Self {
        self.preprocess.cutoff_year = cutoff_year;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.preprocess.delimiter_byte()?;

        let columns = self
            .city_columns
            .names()
            .into_iter()
            .chain(self.weather_columns.names());
        for column in columns {
            if column.trim().is_empty() {
                return Err(ProcessingError::InvalidConfig(
                    "source column names must not be empty".to_string(),
                ));
            }
        }

        self.presenter.default_period()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = FrostConfig::default();

        assert_eq!(config.preprocess.cutoff_year, 2025);
        assert_eq!(config.paths.city_table_path(), Path::new("data/cities_db.csv"));
        assert_eq!(
            config.paths.climate_table_path(),
            Path::new("data/frost_climate_db.csv")
        );
        assert_eq!(config.weather_columns.min_temp, "TMin (°C)");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "[paths]")?;
        writeln!(file, "data_dir = \"/srv/frost\"")?;
        writeln!(file, "[preprocess]")?;
        writeln!(file, "cutoff_year = 2024")?;
        writeln!(file, "delimiter = \";\"")?;
        writeln!(file, "[weather_columns]")?;
        writeln!(file, "min_temp = \"tmin\"")?;

        let config = FrostConfig::load(Some(file.path()))?;

        assert_eq!(config.preprocess.cutoff_year, 2024);
        assert_eq!(config.preprocess.delimiter_byte()?, b';');
        assert_eq!(config.weather_columns.min_temp, "tmin");
        assert_eq!(config.weather_columns.date, "Date");
        assert_eq!(
            config.paths.weather_source_path(),
            Path::new("/srv/frost/df0.csv")
        );
        Ok(())
    }

    #[test]
    fn test_invalid_delimiter() {
        let mut config = FrostConfig::default();
        config.preprocess.delimiter = "::".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = FrostConfig::default()
            .with_data_dir(PathBuf::from("elsewhere"))
            .with_cutoff_year(2023);

        assert_eq!(config.preprocess.cutoff_year, 2023);
        assert_eq!(config.paths.city_source_path(), Path::new("elsewhere/df4.csv"));
    }
}
