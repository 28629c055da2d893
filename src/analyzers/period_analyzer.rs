use crate::error::Result;
use crate::models::{ClimateDay, DepartmentCode};
use crate::utils::MonthDay;
use chrono::NaiveDate;
use serde::Serialize;

/// A day/month window projected onto the reference year.
///
/// When the end precedes the start the window spans New Year, and a day is
/// selected if it falls on either side of the boundary. Both ends are
/// inclusive in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRange {
    Within { start: NaiveDate, end: NaiveDate },
    Wrapping { start: NaiveDate, end: NaiveDate },
}

impl DayRange {
    pub fn new(start: MonthDay, end: MonthDay) -> Result<Self> {
        let start = start.to_reference_date()?;
        let end = end.to_reference_date()?;

        Ok(if start <= end {
            DayRange::Within { start, end }
        } else {
            DayRange::Wrapping { start, end }
        })
    }

    pub fn contains(&self, plot_date: NaiveDate) -> bool {
        match *self {
            DayRange::Within { start, end } => plot_date >= start && plot_date <= end,
            DayRange::Wrapping { start, end } => plot_date >= start || plot_date <= end,
        }
    }

    pub fn wraps(&self) -> bool {
        matches!(self, DayRange::Wrapping { .. })
    }
}

/// Aggregates over the selected days
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodStatistics {
    pub days: usize,
    /// Sum of daily probabilities: the expected number of frost days
    pub expected_frost_days: f64,
    /// Mean of the daily averages; `None` when no selected day has one
    pub avg_min_temp: Option<f64>,
}

pub struct PeriodAnalyzer;

impl PeriodAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Rows of one department, ordered by plot date
    pub fn department_days<'a>(
        &self,
        climate: &'a [ClimateDay],
        dep_code: &DepartmentCode,
    ) -> Vec<&'a ClimateDay> {
        let mut days: Vec<&ClimateDay> = climate
            .iter()
            .filter(|d| &d.dep_code == dep_code)
            .collect();
        days.sort_by_key(|d| d.plot_date);
        days
    }

    pub fn select<'a>(&self, days: &[&'a ClimateDay], range: &DayRange) -> Vec<&'a ClimateDay> {
        days.iter()
            .copied()
            .filter(|d| range.contains(d.plot_date))
            .collect()
    }

    /// An empty selection yields zero expected frost days and no average
    pub fn summarize(&self, days: &[&ClimateDay]) -> PeriodStatistics {
        let expected_frost_days = days.iter().map(|d| d.is_frost).sum::<f64>();

        let temps: Vec<f64> = days.iter().filter_map(|d| d.min_temp).collect();
        let avg_min_temp = if temps.is_empty() {
            None
        } else {
            Some(temps.iter().sum::<f64>() / temps.len() as f64)
        };

        PeriodStatistics {
            days: days.len(),
            expected_frost_days,
            avg_min_temp,
        }
    }
}

impl Default for PeriodAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
