pub mod city_reader;
pub mod source;
pub mod table_reader;
pub mod weather_reader;

pub use city_reader::{CityList, CityReader};
pub use table_reader::TableReader;
pub use weather_reader::{WeatherHistory, WeatherReader};
