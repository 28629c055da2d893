pub mod period_analyzer;

pub use period_analyzer::{DayRange, PeriodAnalyzer, PeriodStatistics};
