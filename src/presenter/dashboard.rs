use crate::analyzers::{DayRange, PeriodAnalyzer, PeriodStatistics};
use crate::error::{ProcessingError, Result};
use crate::models::{CityRecord, ClimateDay};
use crate::presenter::DataStore;
use crate::utils::constants::MAP_ZOOM;
use crate::utils::MonthDay;
use chrono::NaiveDate;
use serde::Serialize;

pub const FROST_NOTE: &str = "Data based on Météo-France departmental averages. \
'Probability' represents the frequency of frost observed on this specific day over the past years.";

/// A city plus a day/month window, as picked in the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrostQuery {
    pub city: String,
    pub start: MonthDay,
    pub end: MonthDay,
}

impl FrostQuery {
    pub fn new(city: impl Into<String>, start: MonthDay, end: MonthDay) -> Self {
        Self {
            city: city.into(),
            start,
            end,
        }
    }

    /// "01 Jan - 30 Apr"
    pub fn period_label(&self) -> String {
        format!("{} - {}", self.start.label(), self.end.label())
    }
}

/// One x position of the dual-axis chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub plot_date: NaiveDate,
    /// Primary axis, 0-100
    pub frost_pct: f64,
    /// Secondary axis, °C
    pub min_temp: Option<f64>,
}

impl From<&ClimateDay> for ChartPoint {
    fn from(day: &ClimateDay) -> Self {
        Self {
            plot_date: day.plot_date,
            frost_pct: day.frost_percentage(),
            min_temp: day.min_temp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
}

/// Everything the dashboard shows for one query
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub city: CityRecord,
    pub start: MonthDay,
    pub end: MonthDay,
    pub period_label: String,
    pub wraps_year_end: bool,
    pub statistics: PeriodStatistics,
    pub chart: Vec<ChartPoint>,
    pub location: MapPoint,
}

impl DashboardView {
    /// Resolve the city, select its days in the window and summarise them.
    ///
    /// A city missing from the city table is an error; a city whose
    /// department has no climate rows gives an empty view.
    pub fn build(store: &DataStore, query: &FrostQuery) -> Result<Self> {
        let city = store
            .city(&query.city)
            .ok_or_else(|| ProcessingError::CityNotFound {
                name: query.city.clone(),
            })?;

        let analyzer = PeriodAnalyzer::new();
        let range = DayRange::new(query.start, query.end)?;
        let department_days = analyzer.department_days(store.climate(), &city.dep_code);
        let period_days = analyzer.select(&department_days, &range);
        let statistics = analyzer.summarize(&period_days);

        Ok(Self {
            city: city.clone(),
            start: query.start,
            end: query.end,
            period_label: query.period_label(),
            wraps_year_end: range.wraps(),
            statistics,
            chart: period_days.into_iter().map(ChartPoint::from).collect(),
            location: MapPoint {
                lat: city.lat,
                lon: city.lon,
                zoom: MAP_ZOOM,
            },
        })
    }

    pub fn frost_days_kpi(&self) -> String {
        format!("{:.1} days", self.statistics.expected_frost_days)
    }

    pub fn min_temp_kpi(&self) -> String {
        match self.statistics.avg_min_temp {
            Some(t) => format!("{:.1} °C", t),
            None => "N/A".to_string(),
        }
    }

    pub fn latitude_kpi(&self) -> String {
        format!("{:.2}", self.city.lat)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Terminal rendering: header, KPIs, chart table, location and note
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("Frost Risk: {}\n", self.city.city_name));
        out.push_str(&format!(
            "Department: {} ({}) | Analysis Period: {}\n\n",
            self.city.dep_nom, self.city.dep_code, self.period_label
        ));
        out.push_str(&format!("  Avg Frost Days : {}\n", self.frost_days_kpi()));
        out.push_str(&format!("  Avg Min Temp   : {}\n", self.min_temp_kpi()));
        out.push_str(&format!("  Latitude       : {}\n\n", self.latitude_kpi()));

        out.push_str("Temperature & Frost Evolution\n");
        if self.chart.is_empty() {
            out.push_str(&format!(
                "  (no climate data for department {})\n",
                self.city.dep_code
            ));
        } else {
            out.push_str(&format!("  {:<8} {:>10} {:>10}  \n", "Date", "Frost %", "Min °C"));
            for point in &self.chart {
                let temp = point
                    .min_temp
                    .map(|t| format!("{:.1}", t))
                    .unwrap_or_else(|| "-".to_string());
                out.push_str(&format!(
                    "  {:<8} {:>10.1} {:>10}  {}\n",
                    point.plot_date.format("%d %b").to_string(),
                    point.frost_pct,
                    temp,
                    frost_bar(point.frost_pct)
                ));
            }
        }
        out.push('\n');

        out.push_str(&format!(
            "Location: {:.4}, {:.4} (zoom {})\n",
            self.location.lat, self.location.lon, self.location.zoom
        ));
        out.push_str(FROST_NOTE);

        out
    }
}

/// Horizontal bar, one block per 5 %
fn frost_bar(percentage: f64) -> String {
    let blocks = (percentage.clamp(0.0, 100.0) / 5.0).round() as usize;
    "#".repeat(blocks)
}
