use crate::error::Result;
use crate::models::{ClimateDay, DepartmentCode, WeatherObservation};
use crate::utils::constants::DEFAULT_CUTOFF_YEAR;
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Running totals for one (department, month, day) group
#[derive(Debug, Default, Clone)]
struct DayAccumulator {
    observations: usize,
    frost_days: usize,
    temp_sum: f64,
    temp_count: usize,
}

impl DayAccumulator {
    fn add(&mut self, observation: &WeatherObservation) {
        self.observations += 1;
        if observation.is_frost() {
            self.frost_days += 1;
        }
        if let Some(t) = observation.min_temp {
            self.temp_sum += t;
            self.temp_count += 1;
        }
    }

    fn frost_probability(&self) -> f64 {
        self.frost_days as f64 / self.observations as f64
    }

    fn mean_min_temp(&self) -> Option<f64> {
        (self.temp_count > 0).then(|| self.temp_sum / self.temp_count as f64)
    }
}

/// Result of folding the weather history into a typical year
#[derive(Debug, Clone)]
pub struct FrostAggregation {
    /// Ordered by department code, month, day
    pub days: Vec<ClimateDay>,
    pub observations_used: usize,
    pub excluded_after_cutoff: usize,
    pub departments: usize,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
}

/// Turns dated observations into per-calendar-day frost statistics
pub struct FrostAggregator {
    cutoff_year: i32,
}

impl FrostAggregator {
    pub fn new() -> Self {
        Self {
            cutoff_year: DEFAULT_CUTOFF_YEAR,
        }
    }

    pub fn with_cutoff_year(cutoff_year: i32) -> Self {
        Self { cutoff_year }
    }

    pub fn cutoff_year(&self) -> i32 {
        self.cutoff_year
    }

    pub fn aggregate(&self, observations: &[WeatherObservation]) -> Result<FrostAggregation> {
        let mut groups: BTreeMap<(DepartmentCode, u32, u32), DayAccumulator> = BTreeMap::new();
        let mut departments = BTreeSet::new();
        let mut excluded_after_cutoff = 0;
        let mut date_span: Option<(NaiveDate, NaiveDate)> = None;

        for observation in observations {
            if !observation.is_historical(self.cutoff_year) {
                excluded_after_cutoff += 1;
                continue;
            }

            date_span = Some(match date_span {
                Some((first, last)) => (first.min(observation.date), last.max(observation.date)),
                None => (observation.date, observation.date),
            });

            let month_day = observation.month_day();
            departments.insert(observation.dep_code.clone());
            groups
                .entry((observation.dep_code.clone(), month_day.month, month_day.day))
                .or_default()
                .add(observation);
        }

        let mut days = Vec::with_capacity(groups.len());
        for ((dep_code, month, day), acc) in groups {
            days.push(ClimateDay::new(
                dep_code,
                month,
                day,
                acc.frost_probability(),
                acc.mean_min_temp(),
            )?);
        }

        Ok(FrostAggregation {
            days,
            observations_used: observations.len() - excluded_after_cutoff,
            excluded_after_cutoff,
            departments: departments.len(),
            date_span,
        })
    }
}

impl Default for FrostAggregator {
    fn default() -> Self {
        Self::new()
    }
}
