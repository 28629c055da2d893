/// Leap year onto which every (month, day) is projected, so Feb 29 has a slot
pub const REFERENCE_YEAR: i32 = 2020;

/// First year treated as incomplete/forecast data
pub const DEFAULT_CUTOFF_YEAR: i32 = 2025;

/// Minimum temperature strictly below this counts as a frost day (°C)
pub const FROST_THRESHOLD_C: f64 = 0.0;

/// Department codes are left-padded with '0' to this width
pub const DEP_CODE_WIDTH: usize = 2;
pub const DEP_CODE_FILL: char = '0';

/// File names
pub const CITY_SOURCE_FILE: &str = "df4.csv";
pub const WEATHER_SOURCE_FILE: &str = "df0.csv";
pub const CITY_TABLE_FILE: &str = "cities_db.csv";
pub const CLIMATE_TABLE_FILE: &str = "frost_climate_db.csv";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CONFIG_FILE: &str = "frost.toml";

/// City reference source columns
pub const CITY_NAME_COLUMN: &str = "nom_standard";
pub const CITY_DEP_CODE_COLUMN: &str = "dep_code";
pub const CITY_DEP_NAME_COLUMN: &str = "dep_nom";
pub const CITY_LAT_COLUMN: &str = "latitude_centre";
pub const CITY_LON_COLUMN: &str = "longitude_centre";

/// Weather history source columns
pub const WEATHER_DATE_COLUMN: &str = "Date";
pub const WEATHER_DEP_CODE_COLUMN: &str = "Code INSEE département";
pub const WEATHER_MIN_TEMP_COLUMN: &str = "TMin (°C)";

/// Presenter defaults
pub const DEFAULT_CITY: &str = "Ambérieu-en-Bugey";
pub const DEFAULT_PERIOD_START: &str = "01-01";
pub const DEFAULT_PERIOD_END: &str = "04-30";
pub const MAP_ZOOM: u8 = 8;
