//! Normalized forecast snapshot, the immutable result of one fetch cycle

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::GeoLocation;

/// Current conditions at fetch time
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Apparent ("feels like") temperature in Celsius
    pub apparent_temperature_c: f64,
    /// WMO weather code
    pub weather_code: u32,
    /// UV index, when the API reports one
    pub uv_index: Option<f64>,
}

/// One hourly forecast entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HourlyEntry {
    /// Local timestamp for this entry
    pub timestamp: NaiveDateTime,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// WMO weather code
    pub weather_code: u32,
}

/// One daily forecast entry
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyEntry {
    /// Local calendar date
    pub date: NaiveDate,
    /// Daily maximum temperature in Celsius
    pub temp_max_c: f64,
    /// Daily minimum temperature in Celsius
    pub temp_min_c: f64,
    /// WMO weather code
    pub weather_code: u32,
}

/// Air quality readings from the secondary fetch
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct AirQuality {
    /// US AQI value; `None` when the air-quality request failed or had no data
    pub us_aqi: Option<f64>,
}

/// The normalized result of one successful forecast fetch.
///
/// Constructed only after the primary weather fetch succeeds, so `hourly` and
/// `daily` are always populated. A snapshot is replaced wholesale by the next
/// fetch and never mutated in place.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastSnapshot {
    /// Location this forecast was fetched for
    pub location: GeoLocation,
    /// Current conditions
    pub current: CurrentConditions,
    /// Hourly series, ascending; index 0 is the start of the API window
    /// (midnight local time), not "now"
    pub hourly: Vec<HourlyEntry>,
    /// Daily series; index 0 is today, at most 7 entries
    pub daily: Vec<DailyEntry>,
    /// Best-effort air quality; absence never invalidates the snapshot
    pub air_quality: AirQuality,
}
