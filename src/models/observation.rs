use crate::models::DepartmentCode;
use crate::utils::constants::FROST_THRESHOLD_C;
use crate::utils::MonthDay;
use chrono::{Datelike, NaiveDate};

/// Daily minimum temperature for one department
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherObservation {
    pub dep_code: DepartmentCode,
    pub date: NaiveDate,
    pub min_temp: Option<f64>,
}

impl WeatherObservation {
    pub fn new(dep_code: DepartmentCode, date: NaiveDate, min_temp: Option<f64>) -> Self {
        Self {
            dep_code,
            date,
            min_temp,
        }
    }

    /// A missing temperature never counts as frost
    pub fn is_frost(&self) -> bool {
        self.min_temp.is_some_and(|t| t < FROST_THRESHOLD_C)
    }

    /// Observations from the cutoff year onwards are forecast or incomplete
    pub fn is_historical(&self, cutoff_year: i32) -> bool {
        self.date.year() < cutoff_year
    }

    pub fn month_day(&self) -> MonthDay {
        MonthDay::from_date(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(date: (i32, u32, u32), min_temp: Option<f64>) -> WeatherObservation {
        WeatherObservation::new(
            DepartmentCode::new("1"),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            min_temp,
        )
    }

    #[test]
    fn test_frost_indicator() {
        assert!(observation((2019, 1, 15), Some(-2.0)).is_frost());
        assert!(observation((2019, 1, 15), Some(-0.1)).is_frost());
        assert!(!observation((2019, 1, 15), Some(0.0)).is_frost());
        assert!(!observation((2019, 1, 15), Some(3.5)).is_frost());
        assert!(!observation((2019, 1, 15), None).is_frost());
    }

    #[test]
    fn test_cutoff() {
        assert!(observation((2024, 12, 31), Some(1.0)).is_historical(2025));
        assert!(!observation((2025, 1, 1), Some(1.0)).is_historical(2025));
        assert!(!observation((2026, 6, 1), Some(1.0)).is_historical(2025));
    }

    #[test]
    fn test_month_day() {
        let obs = observation((2019, 1, 15), Some(-2.0));
        assert_eq!(obs.dep_code.as_str(), "01");
        assert_eq!(obs.month_day(), MonthDay { month: 1, day: 15 });
    }
}
