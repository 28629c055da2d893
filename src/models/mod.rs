pub mod city;
pub mod climate_day;
pub mod department;
pub mod observation;

pub use city::CityRecord;
pub use climate_day::ClimateDay;
pub use department::{pad_department_code, DepartmentCode};
pub use observation::WeatherObservation;
