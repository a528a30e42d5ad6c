//! View selection and the view model handed to the renderer

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::Classification;
use crate::error::SkycastError;

/// The three selectable time-horizon views; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum ViewKind {
    /// Current conditions plus the next 24 hours
    #[default]
    Today,
    /// Tomorrow's hourly forecast
    Tomorrow,
    /// 7-day overview
    Week,
}

impl ViewKind {
    /// Tab label as shown to the user
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Today => "Today",
            ViewKind::Tomorrow => "Tomorrow",
            ViewKind::Week => "7-Day",
        }
    }
}

impl FromStr for ViewKind {
    type Err = SkycastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(ViewKind::Today),
            "tomorrow" => Ok(ViewKind::Tomorrow),
            "week" | "7-day" | "7day" => Ok(ViewKind::Week),
            other => Err(SkycastError::validation(format!(
                "Unknown view '{other}'. Expected today, tomorrow, or week."
            ))),
        }
    }
}

/// A numeric index (UV, AQI) paired with its derived classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexReading {
    /// Raw index value
    pub value: f64,
    /// Label and severity tier derived from the value
    pub classification: Classification,
}

/// Current-conditions block shown at the top of the today view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSummary {
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Apparent temperature in Celsius
    pub apparent_temperature_c: f64,
    /// Weather description for the current WMO code
    pub description: &'static str,
    /// UV index line; omitted when the API reported no value
    pub uv: Option<IndexReading>,
    /// Air quality line; omitted when the secondary fetch had no data
    pub air_quality: Option<IndexReading>,
}

/// One hourly row of a view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRow {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Weather description for this hour's WMO code
    pub description: &'static str,
}

/// One daily row of the week view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    /// Calendar date
    pub date: NaiveDate,
    /// Daily maximum in Celsius
    pub temp_max_c: f64,
    /// Daily minimum in Celsius
    pub temp_min_c: f64,
    /// Weather description for this day's WMO code
    pub description: &'static str,
}

/// A single renderable row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForecastRow {
    Hourly(HourlyRow),
    Daily(DailyRow),
}

/// The exact ordered content of one view, with no knowledge of presentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Which view this model was built for
    pub kind: ViewKind,
    /// Heading: the location name, or the day title for the tomorrow view
    pub title: String,
    /// Current conditions; only present on the today view
    pub current: Option<CurrentSummary>,
    /// Ordered rows to render
    pub rows: Vec<ForecastRow>,
}

/// Convert a 24-hour clock value to a 12-hour label like "2 PM"
#[must_use]
pub fn format_hour_12(hour: u32) -> String {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h} {meridiem}")
}

/// Short date label like "Sat, Jun 1"
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

impl fmt::Display for HourlyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {}°C — {}",
            format_hour_12(self.hour),
            self.temperature_c.round(),
            self.description
        )
    }
}

impl fmt::Display for DailyRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} — {}°/{}°C — {}",
            format_short_date(self.date),
            self.temp_max_c.round(),
            self.temp_min_c.round(),
            self.description
        )
    }
}

impl fmt::Display for ForecastRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastRow::Hourly(row) => row.fmt(f),
            ForecastRow::Daily(row) => row.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_labels() {
        assert_eq!(format_hour_12(0), "12 AM");
        assert_eq!(format_hour_12(1), "1 AM");
        assert_eq!(format_hour_12(11), "11 AM");
        assert_eq!(format_hour_12(12), "12 PM");
        assert_eq!(format_hour_12(14), "2 PM");
        assert_eq!(format_hour_12(23), "11 PM");
    }

    #[test]
    fn test_short_date_label() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_short_date(date), "Sat, Jun 1");
    }

    #[test]
    fn test_daily_row_display_rounds_temperatures() {
        let row = DailyRow {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            temp_max_c: 24.6,
            temp_min_c: 15.2,
            description: "Clear sky",
        };
        assert_eq!(row.to_string(), "Sat, Jun 1 — 25°/15°C — Clear sky");
    }

    #[test]
    fn test_view_kind_from_str() {
        assert_eq!("today".parse::<ViewKind>().unwrap(), ViewKind::Today);
        assert_eq!("Tomorrow".parse::<ViewKind>().unwrap(), ViewKind::Tomorrow);
        assert_eq!("7-day".parse::<ViewKind>().unwrap(), ViewKind::Week);
        assert!("yesterday".parse::<ViewKind>().is_err());
    }
}
