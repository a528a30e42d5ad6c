//! Windowing: selecting the rows of a snapshot for a requested view
//!
//! Pure and deterministic. The wall-clock hour is passed in by the caller so
//! that for a fixed snapshot and hour the output is identical on every call.

use chrono::Timelike;

use crate::classify::{aqi_classification, uv_classification, weather_description};
use crate::error::SkycastError;
use crate::models::view::format_short_date;
use crate::models::{
    CurrentSummary, DailyRow, ForecastRow, ForecastSnapshot, HourlyEntry, HourlyRow, IndexReading,
    ViewKind, ViewModel,
};
use crate::Result;

/// Maximum number of hourly rows shown in the today view
const TODAY_HOURS: usize = 24;

/// Hourly series offsets covering tomorrow, assuming the series starts at
/// midnight today
const TOMORROW_RANGE: std::ops::Range<usize> = 24..48;

/// Build the view model for `view` from an immutable snapshot.
///
/// `current_hour` is the wall-clock hour (0-23) at render time; only the
/// today view uses it.
pub fn build_view(
    snapshot: &ForecastSnapshot,
    view: ViewKind,
    current_hour: u32,
) -> Result<ViewModel> {
    match view {
        ViewKind::Today => Ok(today_view(snapshot, current_hour)),
        ViewKind::Tomorrow => tomorrow_view(snapshot),
        ViewKind::Week => Ok(week_view(snapshot)),
    }
}

fn hourly_row(entry: &HourlyEntry) -> ForecastRow {
    ForecastRow::Hourly(HourlyRow {
        hour: entry.timestamp.hour(),
        temperature_c: entry.temperature_c,
        description: weather_description(entry.weather_code),
    })
}

fn today_view(snapshot: &ForecastSnapshot, current_hour: u32) -> ViewModel {
    let current = &snapshot.current;
    let summary = CurrentSummary {
        temperature_c: current.temperature_c,
        apparent_temperature_c: current.apparent_temperature_c,
        description: weather_description(current.weather_code),
        uv: current.uv_index.map(|value| IndexReading {
            value,
            classification: uv_classification(Some(value)),
        }),
        air_quality: snapshot.air_quality.us_aqi.map(|value| IndexReading {
            value,
            classification: aqi_classification(Some(value)),
        }),
    };

    let start = snapshot
        .hourly
        .iter()
        .position(|entry| entry.timestamp.hour() == current_hour)
        .unwrap_or(0);

    let rows = snapshot.hourly[start..]
        .iter()
        .take(TODAY_HOURS)
        .map(hourly_row)
        .collect();

    ViewModel {
        kind: ViewKind::Today,
        title: snapshot.location.display_name(),
        current: Some(summary),
        rows,
    }
}

fn tomorrow_view(snapshot: &ForecastSnapshot) -> Result<ViewModel> {
    let tomorrow = snapshot.daily.get(1).ok_or_else(|| {
        SkycastError::insufficient_data("forecast has no daily entry for tomorrow")
    })?;

    let start = TOMORROW_RANGE.start.min(snapshot.hourly.len());
    let end = TOMORROW_RANGE.end.min(snapshot.hourly.len());
    let rows = snapshot.hourly[start..end].iter().map(hourly_row).collect();

    Ok(ViewModel {
        kind: ViewKind::Tomorrow,
        title: format!("{} Forecast", format_short_date(tomorrow.date)),
        current: None,
        rows,
    })
}

fn week_view(snapshot: &ForecastSnapshot) -> ViewModel {
    let rows = snapshot
        .daily
        .iter()
        .map(|entry| {
            ForecastRow::Daily(DailyRow {
                date: entry.date,
                temp_max_c: entry.temp_max_c,
                temp_min_c: entry.temp_min_c,
                description: weather_description(entry.weather_code),
            })
        })
        .collect();

    ViewModel {
        kind: ViewKind::Week,
        title: snapshot.location.display_name(),
        current: None,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirQuality, CurrentConditions, DailyEntry, GeoLocation, HourlyEntry};
    use chrono::{Duration, NaiveDate};

    /// Snapshot with `hours` hourly entries starting at midnight 2024-06-01
    /// and `days` daily entries starting the same day.
    fn snapshot(hours: i64, days: u32) -> ForecastSnapshot {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let hourly = (0..hours)
            .map(|i| HourlyEntry {
                timestamp: start + Duration::hours(i),
                temperature_c: 10.0 + i as f64 * 0.1,
                weather_code: 2,
            })
            .collect();

        let daily = (0..days)
            .map(|i| DailyEntry {
                date: NaiveDate::from_ymd_opt(2024, 6, 1 + i).unwrap(),
                temp_max_c: 25.0 - f64::from(i),
                temp_min_c: 15.0 - f64::from(i),
                weather_code: if i == 1 { 61 } else { 0 },
            })
            .collect();

        ForecastSnapshot {
            location: GeoLocation::with_country(
                "Berlin".to_string(),
                "Germany".to_string(),
                52.52,
                13.405,
            ),
            current: CurrentConditions {
                temperature_c: 18.4,
                apparent_temperature_c: 17.1,
                weather_code: 2,
                uv_index: Some(4.5),
            },
            hourly,
            daily,
            air_quality: AirQuality { us_aqi: Some(42.0) },
        }
    }

    #[test]
    fn test_today_caps_rows_at_24() {
        let view = build_view(&snapshot(168, 7), ViewKind::Today, 0).unwrap();
        assert_eq!(view.rows.len(), 24);
    }

    #[test]
    fn test_today_starts_at_matching_hour() {
        let view = build_view(&snapshot(168, 7), ViewKind::Today, 14).unwrap();
        match &view.rows[0] {
            ForecastRow::Hourly(row) => assert_eq!(row.hour, 14),
            other => panic!("expected hourly row, got {other:?}"),
        }
        assert_eq!(view.rows.len(), 24);
    }

    #[test]
    fn test_today_truncates_at_series_end() {
        // 30 hours of data, starting at hour 20: only 10 rows remain
        let view = build_view(&snapshot(30, 7), ViewKind::Today, 20).unwrap();
        assert_eq!(view.rows.len(), 10);
    }

    #[test]
    fn test_today_falls_back_to_series_start_when_hour_missing() {
        let view = build_view(&snapshot(3, 7), ViewKind::Today, 14).unwrap();
        match &view.rows[0] {
            ForecastRow::Hourly(row) => assert_eq!(row.hour, 0),
            other => panic!("expected hourly row, got {other:?}"),
        }
    }

    #[test]
    fn test_today_includes_current_summary() {
        let view = build_view(&snapshot(48, 7), ViewKind::Today, 0).unwrap();
        let current = view.current.expect("today view carries current summary");
        assert_eq!(current.description, "Partly cloudy");
        assert_eq!(current.uv.unwrap().classification.label, "Moderate");
        assert_eq!(current.air_quality.unwrap().classification.label, "Good");
    }

    #[test]
    fn test_today_omits_absent_readings() {
        let mut snap = snapshot(48, 7);
        snap.current.uv_index = None;
        snap.air_quality = AirQuality { us_aqi: None };

        let view = build_view(&snap, ViewKind::Today, 0).unwrap();
        let current = view.current.unwrap();
        assert!(current.uv.is_none());
        assert!(current.air_quality.is_none());
    }

    #[test]
    fn test_tomorrow_uses_fixed_series_offsets() {
        let view = build_view(&snapshot(168, 7), ViewKind::Tomorrow, 9).unwrap();
        assert_eq!(view.rows.len(), 24);
        match (&view.rows[0], view.rows.last().unwrap()) {
            (ForecastRow::Hourly(first), ForecastRow::Hourly(last)) => {
                assert_eq!(first.hour, 0);
                assert_eq!(last.hour, 23);
            }
            other => panic!("expected hourly rows, got {other:?}"),
        }
        assert_eq!(view.title, "Sun, Jun 2 Forecast");
    }

    #[test]
    fn test_tomorrow_clips_to_series_length() {
        let view = build_view(&snapshot(30, 7), ViewKind::Tomorrow, 9).unwrap();
        assert_eq!(view.rows.len(), 6);
    }

    #[test]
    fn test_tomorrow_with_no_overlap_is_empty_but_titled() {
        let view = build_view(&snapshot(20, 7), ViewKind::Tomorrow, 9).unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.title, "Sun, Jun 2 Forecast");
    }

    #[test]
    fn test_tomorrow_requires_two_daily_entries() {
        let err = build_view(&snapshot(168, 1), ViewKind::Tomorrow, 9).unwrap_err();
        assert!(matches!(err, SkycastError::InsufficientData { .. }));
    }

    #[test]
    fn test_week_preserves_daily_order_and_count() {
        let view = build_view(&snapshot(168, 7), ViewKind::Week, 9).unwrap();
        assert_eq!(view.rows.len(), 7);

        let dates: Vec<_> = view
            .rows
            .iter()
            .map(|row| match row {
                ForecastRow::Daily(daily) => daily.date,
                other => panic!("expected daily row, got {other:?}"),
            })
            .collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_week_rows_carry_descriptions() {
        let view = build_view(&snapshot(168, 2), ViewKind::Week, 9).unwrap();
        match &view.rows[1] {
            ForecastRow::Daily(row) => assert_eq!(row.description, "Light rain"),
            other => panic!("expected daily row, got {other:?}"),
        }
    }

    #[test]
    fn test_windowing_is_deterministic() {
        let snap = snapshot(168, 7);
        let first = build_view(&snap, ViewKind::Today, 14).unwrap();
        let second = build_view(&snap, ViewKind::Today, 14).unwrap();
        assert_eq!(first, second);
    }
}
