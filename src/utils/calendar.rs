use crate::error::{ProcessingError, Result};
use crate::utils::constants::REFERENCE_YEAR;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day with the year discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Result<Self> {
        let month_day = Self { month, day };
        month_day.to_reference_date()?;
        Ok(month_day)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    /// Project onto the leap reference year
    pub fn to_reference_date(&self) -> Result<NaiveDate> {
        reference_date(self.month, self.day)
    }

    /// Short label such as "01 Jan"
    pub fn label(&self) -> String {
        match self.to_reference_date() {
            Ok(date) => date.format("%d %b").to_string(),
            Err(_) => format!("{:02}-{:02}", self.month, self.day),
        }
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Accepts `MM-DD` or a full `YYYY-MM-DD` date whose year is ignored
impl FromStr for MonthDay {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }

        let invalid = || {
            ProcessingError::InvalidFormat(format!(
                "Invalid day '{}', expected MM-DD or YYYY-MM-DD",
                s
            ))
        };

        let (month, day) = s.split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;

        Self::new(month, day).map_err(|_| invalid())
    }
}

/// Map a (month, day) pair onto the reference year
pub fn reference_date(month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).ok_or_else(|| {
        ProcessingError::InvalidFormat(format!(
            "No such day in reference year {}: month={}, day={}",
            REFERENCE_YEAR, month, day
        ))
    })
}

/// Parse a raw observation date, tolerating the layouts found in open-data exports
pub fn parse_observation_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();

    for format in ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Ok(date);
        }
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(datetime.date());
        }
    }

    // Timestamps with fractional seconds or offsets: the date prefix is enough
    if raw.len() > 10 && matches!(raw.as_bytes()[10], b'T' | b' ') {
        if let Some(prefix) = raw.get(..10) {
            return Ok(NaiveDate::parse_from_str(prefix, "%Y-%m-%d")?);
        }
    }

    Err(ProcessingError::InvalidFormat(format!(
        "Invalid date format: '{}'",
        raw
    )))
}
