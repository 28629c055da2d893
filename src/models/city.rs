use crate::models::DepartmentCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the city table: a commune and the department it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CityRecord {
    #[validate(length(min = 1))]
    pub city_name: String,

    pub dep_code: DepartmentCode,

    pub dep_nom: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl CityRecord {
    pub const COLUMNS: [&'static str; 5] = ["city_name", "dep_code", "dep_nom", "lat", "lon"];

    pub fn new(
        city_name: String,
        dep_code: DepartmentCode,
        dep_nom: String,
        lat: f64,
        lon: f64,
    ) -> Self {
        Self {
            city_name,
            dep_code,
            dep_nom,
            lat,
            lon,
        }
    }
}
