use crate::config::CityColumns;
use crate::error::Result;
use crate::models::{CityRecord, DepartmentCode};
use crate::readers::source::{open_source, parse_optional_f64, resolve_columns};
use std::path::Path;
use tracing::{debug, warn};
use validator::Validate;

/// Cities read from the raw reference table
#[derive(Debug, Default)]
pub struct CityList {
    pub cities: Vec<CityRecord>,
    /// Rows without a department code; they cannot be joined to weather data
    pub missing_code: usize,
    /// Rows with an empty latitude or longitude cell
    pub missing_coordinates: usize,
    /// Rows failing record validation (empty name, coordinates out of range)
    pub invalid: usize,
}

impl CityList {
    pub fn skipped_rows(&self) -> usize {
        self.missing_code + self.missing_coordinates + self.invalid
    }
}

/// Reads the city reference table, keeping only the columns the presenter needs
pub struct CityReader {
    columns: CityColumns,
    delimiter: u8,
}

impl CityReader {
    pub fn new() -> Self {
        Self {
            columns: CityColumns::default(),
            delimiter: b',',
        }
    }

    pub fn with_columns(mut self, columns: CityColumns) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read and normalise every usable city row, in file order.
    ///
    /// Rows missing a code or coordinates, or failing validation, are skipped
    /// and counted; non-numeric coordinates are still an error.
    pub fn read_cities(&self, path: &Path) -> Result<CityList> {
        let mut reader = open_source(path, self.delimiter)?;
        let headers = reader.headers()?.clone();
        let [name, dep_code, dep_name, lat, lon] =
            resolve_columns(&headers, self.columns.names(), path)?;

        let mut list = CityList::default();

        for row in reader.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or_default();
            let field = |idx: usize| row.get(idx).unwrap_or_default();

            if field(dep_code).is_empty() {
                list.missing_code += 1;
                continue;
            }

            let lat_value = parse_optional_f64(field(lat), &self.columns.latitude, line)?;
            let lon_value = parse_optional_f64(field(lon), &self.columns.longitude, line)?;
            let (Some(lat_value), Some(lon_value)) = (lat_value, lon_value) else {
                debug!("Line {}: city '{}' has no coordinates", line, field(name));
                list.missing_coordinates += 1;
                continue;
            };

            let city = CityRecord::new(
                field(name).to_string(),
                DepartmentCode::new(field(dep_code)),
                field(dep_name).to_string(),
                lat_value,
                lon_value,
            );
            if let Err(e) = city.validate() {
                warn!("Line {}: skipping city '{}': {}", line, city.city_name, e);
                list.invalid += 1;
                continue;
            }

            list.cities.push(city);
        }

        if list.missing_code > 0 {
            warn!("Skipped {} cities without a department code", list.missing_code);
        }
        if list.missing_coordinates > 0 {
            warn!("Skipped {} cities without coordinates", list.missing_coordinates);
        }
        debug!("Read {} cities from {}", list.cities.len(), path.display());

        Ok(list)
    }
}

impl Default for CityReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_cities_selects_and_pads() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "code_insee,nom_standard,dep_code,dep_nom,population,latitude_centre,longitude_centre"
        )?;
        writeln!(temp_file, "01004,Ambérieu-en-Bugey,1,Ain,14514,45.9607,5.3733")?;
        writeln!(temp_file, "75056,Paris,75,Paris,2133111,48.8566,2.3522")?;
        writeln!(temp_file, "2A004,Ajaccio,2A,Corse-du-Sud,71361,41.9267,8.7369")?;

        let cities = CityReader::new().read_cities(temp_file.path())?.cities;

        assert_eq!(cities.len(), 3);
        assert_eq!(cities[0].city_name, "Ambérieu-en-Bugey");
        assert_eq!(cities[0].dep_code.as_str(), "01");
        assert_eq!(cities[0].dep_nom, "Ain");
        assert!((cities[0].lat - 45.9607).abs() < 1e-9);
        assert_eq!(cities[1].dep_code.as_str(), "75");
        assert_eq!(cities[2].dep_code.as_str(), "2A");

        Ok(())
    }

    #[test]
    fn test_missing_column() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "nom_standard,dep_code,dep_nom")?;
        writeln!(temp_file, "Paris,75,Paris")?;

        let err = CityReader::new().read_cities(temp_file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { .. }));

        Ok(())
    }

    #[test]
    fn test_non_numeric_latitude() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "nom_standard,dep_code,dep_nom,latitude_centre,longitude_centre"
        )?;
        writeln!(temp_file, "Paris,75,Paris,north,2.35")?;

        let err = CityReader::new().read_cities(temp_file.path()).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidFormat(_)));

        Ok(())
    }

    #[test]
    fn test_incomplete_and_invalid_rows_are_skipped() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            "nom_standard,dep_code,dep_nom,latitude_centre,longitude_centre"
        )?;
        writeln!(temp_file, "Belley,1,Ain,45.76,5.69")?;
        writeln!(temp_file, "NoCoord,1,Ain,,")?;
        writeln!(temp_file, "Bad,1,Ain,95.0,5.0")?;
        writeln!(temp_file, ",1,Ain,45.0,5.0")?;
        writeln!(temp_file, "Nowhere,,Inconnu,45.0,5.0")?;
        writeln!(temp_file, "Bourg-en-Bresse,1,Ain,46.2,5.22")?;

        let list = CityReader::new().read_cities(temp_file.path())?;

        let names: Vec<_> = list.cities.iter().map(|c| c.city_name.as_str()).collect();
        assert_eq!(names, vec!["Belley", "Bourg-en-Bresse"]);
        assert_eq!(list.missing_coordinates, 1);
        assert_eq!(list.invalid, 2);
        assert_eq!(list.missing_code, 1);
        assert_eq!(list.skipped_rows(), 4);
        assert!(list.cities.iter().all(|c| c.validate().is_ok()));

        Ok(())
    }
}
