pub mod calendar;
pub mod constants;
pub mod progress;

pub use calendar::{parse_observation_date, MonthDay};
pub use constants::*;
pub use progress::ProgressReporter;
