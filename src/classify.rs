//! Pure classification of weather codes, UV index, and US AQI values
//!
//! Every function here is total: unmapped codes fall back to "Unknown" and
//! absent readings classify as N/A instead of failing.

use serde::Serialize;

/// Severity tier behind a classification, ordered from harmless to hazardous
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// No reading available
    Neutral,
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
    Hazardous,
}

impl Severity {
    /// Color token for this tier
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Severity::Neutral => "#9399b2",
            Severity::Low => "#a6e3a1",
            Severity::Moderate => "#f9e2af",
            Severity::High => "#fab387",
            Severity::VeryHigh => "#f38ba8",
            Severity::Extreme => "#cba6f7",
            Severity::Hazardous => "#b4befe",
        }
    }
}

/// A label/severity pair derived on demand from a numeric reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Human-readable label
    pub label: &'static str,
    /// Severity tier, carrying the display color token
    pub severity: Severity,
}

impl Classification {
    const fn new(label: &'static str, severity: Severity) -> Self {
        Self { label, severity }
    }
}

/// Map a WMO weather code to a short description
#[must_use]
pub fn weather_description(code: u32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 | 48 => "Foggy",
        51 => "Light drizzle",
        53 => "Drizzle",
        55 => "Heavy drizzle",
        61 => "Light rain",
        63 => "Rain",
        65 => "Heavy rain",
        71 => "Light snow",
        73 => "Snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Light showers",
        81 => "Showers",
        82 => "Heavy showers",
        85 => "Light snow showers",
        86 => "Snow showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

/// Classify a UV index reading; buckets are inclusive on their upper bound
#[must_use]
pub fn uv_classification(uv: Option<f64>) -> Classification {
    let Some(uv) = uv else {
        return Classification::new("N/A", Severity::Neutral);
    };
    if uv <= 2.0 {
        Classification::new("Low", Severity::Low)
    } else if uv <= 5.0 {
        Classification::new("Moderate", Severity::Moderate)
    } else if uv <= 7.0 {
        Classification::new("High", Severity::High)
    } else if uv <= 10.0 {
        Classification::new("Very High", Severity::VeryHigh)
    } else {
        Classification::new("Extreme", Severity::Extreme)
    }
}

/// Classify a US AQI reading against the standard breakpoints
#[must_use]
pub fn aqi_classification(aqi: Option<f64>) -> Classification {
    let Some(aqi) = aqi else {
        return Classification::new("N/A", Severity::Neutral);
    };
    if aqi <= 50.0 {
        Classification::new("Good", Severity::Low)
    } else if aqi <= 100.0 {
        Classification::new("Moderate", Severity::Moderate)
    } else if aqi <= 150.0 {
        Classification::new("Unhealthy for Sensitive", Severity::High)
    } else if aqi <= 200.0 {
        Classification::new("Unhealthy", Severity::VeryHigh)
    } else if aqi <= 300.0 {
        Classification::new("Very Unhealthy", Severity::Extreme)
    } else {
        Classification::new("Hazardous", Severity::Hazardous)
    }
}
