use crate::error::Result;
use crate::models::DepartmentCode;
use crate::utils::calendar::reference_date;
use crate::utils::MonthDay;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Typical-year statistics for one department on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClimateDay {
    pub dep_code: DepartmentCode,

    #[validate(range(min = 1, max = 12))]
    pub month: u32,

    #[validate(range(min = 1, max = 31))]
    pub day: u32,

    /// Frost probability: share of historical years with frost on this day
    #[validate(range(min = 0.0, max = 1.0))]
    pub is_frost: f64,

    /// Average minimum temperature, absent when no year had a reading
    pub min_temp: Option<f64>,

    pub plot_date: NaiveDate,
}

impl ClimateDay {
    pub const COLUMNS: [&'static str; 6] =
        ["dep_code", "month", "day", "is_frost", "min_temp", "plot_date"];

    pub fn new(
        dep_code: DepartmentCode,
        month: u32,
        day: u32,
        is_frost: f64,
        min_temp: Option<f64>,
    ) -> Result<Self> {
        let plot_date = reference_date(month, day)?;
        let record = Self {
            dep_code,
            month,
            day,
            is_frost,
            min_temp,
            plot_date,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.month,
            day: self.day,
        }
    }

    pub fn frost_percentage(&self) -> f64 {
        self.is_frost * 100.0
    }
}
