//! Normalization of raw API payloads into a `ForecastSnapshot`
//!
//! The snapshot is the only form the rest of the engine ever sees; raw
//! payloads are consumed here and not retained.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::api::{AirQualityResponse, DailyPayload, ForecastResponse, HourlyPayload};
use crate::error::SkycastError;
use crate::models::{
    AirQuality, CurrentConditions, DailyEntry, ForecastSnapshot, GeoLocation, HourlyEntry,
};
use crate::Result;

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const DAILY_TIME_FORMAT: &str = "%Y-%m-%d";

/// Build a snapshot from the raw payloads of one fetch cycle.
///
/// Fails with `WeatherUnavailable` when the forecast body lacks any of the
/// `current`/`hourly`/`daily` blocks or their arrays are ragged. A missing or
/// failed air-quality payload is non-fatal and collapses to `us_aqi = None`.
pub fn build_snapshot(
    location: GeoLocation,
    weather: ForecastResponse,
    air: Option<AirQualityResponse>,
) -> Result<ForecastSnapshot> {
    let current = weather
        .current
        .ok_or_else(|| SkycastError::weather_unavailable("response is missing current block"))?;
    let hourly = weather
        .hourly
        .ok_or_else(|| SkycastError::weather_unavailable("response is missing hourly block"))?;
    let daily = weather
        .daily
        .ok_or_else(|| SkycastError::weather_unavailable("response is missing daily block"))?;

    let hourly = normalize_hourly(&hourly)?;
    let mut daily = normalize_daily(&daily)?;
    daily.truncate(7);

    let us_aqi = air
        .and_then(|payload| payload.current)
        .and_then(|current| current.us_aqi);
    if us_aqi.is_none() {
        debug!("No air quality reading for {}", location.name);
    }

    Ok(ForecastSnapshot {
        location,
        current: CurrentConditions {
            temperature_c: current.temperature,
            apparent_temperature_c: current.apparent_temperature,
            weather_code: current.weather_code,
            uv_index: current.uv_index,
        },
        hourly,
        daily,
        air_quality: AirQuality { us_aqi },
    })
}

fn normalize_hourly(payload: &HourlyPayload) -> Result<Vec<HourlyEntry>> {
    let len = payload.time.len();
    if payload.temperature.len() != len || payload.weather_code.len() != len {
        return Err(SkycastError::weather_unavailable(
            "hourly arrays have mismatched lengths",
        ));
    }

    payload
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let timestamp = NaiveDateTime::parse_from_str(time, HOURLY_TIME_FORMAT)
                .map_err(|e| {
                    SkycastError::weather_unavailable(format!(
                        "invalid hourly timestamp '{time}': {e}"
                    ))
                })?;
            Ok(HourlyEntry {
                timestamp,
                temperature_c: payload.temperature[i],
                weather_code: payload.weather_code[i],
            })
        })
        .collect()
}

fn normalize_daily(payload: &DailyPayload) -> Result<Vec<DailyEntry>> {
    let len = payload.time.len();
    if payload.temperature_max.len() != len
        || payload.temperature_min.len() != len
        || payload.weather_code.len() != len
    {
        return Err(SkycastError::weather_unavailable(
            "daily arrays have mismatched lengths",
        ));
    }

    payload
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| {
            let date = NaiveDate::parse_from_str(time, DAILY_TIME_FORMAT).map_err(|e| {
                SkycastError::weather_unavailable(format!("invalid daily date '{time}': {e}"))
            })?;
            Ok(DailyEntry {
                date,
                temp_max_c: payload.temperature_max[i],
                temp_min_c: payload.temperature_min[i],
                weather_code: payload.weather_code[i],
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn sample_location() -> GeoLocation {
        GeoLocation::with_country("Berlin".to_string(), "Germany".to_string(), 52.52, 13.405)
    }

    fn sample_forecast() -> ForecastResponse {
        serde_json::from_str(
            r#"{
                "current": {
                    "temperature_2m": 18.4,
                    "apparent_temperature": 17.1,
                    "weather_code": 2,
                    "uv_index": 4.5
                },
                "hourly": {
                    "time": ["2024-06-01T00:00", "2024-06-01T01:00", "2024-06-01T02:00"],
                    "temperature_2m": [14.2, 13.8, 13.5],
                    "weather_code": [1, 2, 3]
                },
                "daily": {
                    "time": ["2024-06-01", "2024-06-02"],
                    "temperature_2m_max": [25.0, 18.0],
                    "temperature_2m_min": [15.0, 10.0],
                    "weather_code": [0, 61]
                }
            }"#,
        )
        .unwrap()
    }

    fn sample_air() -> AirQualityResponse {
        serde_json::from_str(r#"{"current":{"us_aqi":42.0}}"#).unwrap()
    }

    #[test]
    fn test_build_snapshot_happy_path() {
        let snapshot =
            build_snapshot(sample_location(), sample_forecast(), Some(sample_air())).unwrap();

        assert_eq!(snapshot.current.temperature_c, 18.4);
        assert_eq!(snapshot.current.uv_index, Some(4.5));
        assert_eq!(snapshot.hourly.len(), 3);
        assert_eq!(snapshot.hourly[0].timestamp.hour(), 0);
        assert_eq!(snapshot.hourly[2].temperature_c, 13.5);
        assert_eq!(snapshot.daily.len(), 2);
        assert_eq!(snapshot.daily[1].weather_code, 61);
        assert_eq!(snapshot.air_quality.us_aqi, Some(42.0));
    }

    #[test]
    fn test_missing_hourly_block_is_unavailable() {
        let mut forecast = sample_forecast();
        forecast.hourly = None;

        let err = build_snapshot(sample_location(), forecast, None).unwrap_err();
        assert!(matches!(err, SkycastError::WeatherUnavailable { .. }));
    }

    #[test]
    fn test_missing_current_block_is_unavailable() {
        let mut forecast = sample_forecast();
        forecast.current = None;

        let err = build_snapshot(sample_location(), forecast, None).unwrap_err();
        assert!(matches!(err, SkycastError::WeatherUnavailable { .. }));
    }

    #[test]
    fn test_ragged_hourly_arrays_are_unavailable() {
        let mut forecast = sample_forecast();
        forecast.hourly.as_mut().unwrap().temperature.pop();

        let err = build_snapshot(sample_location(), forecast, None).unwrap_err();
        assert!(matches!(err, SkycastError::WeatherUnavailable { .. }));
    }

    #[test]
    fn test_bad_hourly_timestamp_is_unavailable() {
        let mut forecast = sample_forecast();
        forecast.hourly.as_mut().unwrap().time[1] = "not-a-time".to_string();

        let err = build_snapshot(sample_location(), forecast, None).unwrap_err();
        assert!(matches!(err, SkycastError::WeatherUnavailable { .. }));
    }

    #[test]
    fn test_missing_air_quality_is_non_fatal() {
        let snapshot = build_snapshot(sample_location(), sample_forecast(), None).unwrap();
        assert_eq!(snapshot.air_quality.us_aqi, None);
        assert_eq!(snapshot.hourly.len(), 3);
    }

    #[test]
    fn test_air_quality_with_null_reading_is_non_fatal() {
        let air: AirQualityResponse = serde_json::from_str(r#"{"current":{"us_aqi":null}}"#).unwrap();
        let snapshot = build_snapshot(sample_location(), sample_forecast(), Some(air)).unwrap();
        assert_eq!(snapshot.air_quality.us_aqi, None);
    }

    #[test]
    fn test_missing_uv_index_is_independent_of_air_quality() {
        let forecast: ForecastResponse = serde_json::from_str(
            r#"{
                "current": {
                    "temperature_2m": 10.0,
                    "apparent_temperature": 9.0,
                    "weather_code": 3
                },
                "hourly": {
                    "time": ["2024-06-01T00:00"],
                    "temperature_2m": [10.0],
                    "weather_code": [3]
                },
                "daily": {
                    "time": ["2024-06-01"],
                    "temperature_2m_max": [12.0],
                    "temperature_2m_min": [8.0],
                    "weather_code": [3]
                }
            }"#,
        )
        .unwrap();

        let snapshot = build_snapshot(sample_location(), forecast, Some(sample_air())).unwrap();
        assert_eq!(snapshot.current.uv_index, None);
        assert_eq!(snapshot.air_quality.us_aqi, Some(42.0));
    }

    #[test]
    fn test_daily_series_is_capped_at_seven_entries() {
        let times: Vec<String> = (1..=9).map(|d| format!("2024-06-{d:02}")).collect();
        let forecast = ForecastResponse {
            current: sample_forecast().current,
            hourly: sample_forecast().hourly,
            daily: Some(DailyPayload {
                time: times,
                temperature_max: vec![20.0; 9],
                temperature_min: vec![10.0; 9],
                weather_code: vec![0; 9],
            }),
        };

        let snapshot = build_snapshot(sample_location(), forecast, None).unwrap();
        assert_eq!(snapshot.daily.len(), 7);
    }
}
