//! `skycast` - Open-Meteo weather forecast viewer
//!
//! This library provides the forecast transformation and view-state engine:
//! classification of weather/UV/air-quality readings, normalization of raw
//! API payloads into immutable snapshots, windowing of the hourly and daily
//! series per view, and the tab state machine that re-renders views without
//! refetching.

pub mod api;
pub mod classify;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod normalize;
pub mod render;
pub mod service;
pub mod window;

// Re-export core types for public API
pub use api::{LocationInput, LocationParser, OpenMeteoClient};
pub use classify::{aqi_classification, uv_classification, weather_description, Classification};
pub use config::SkycastConfig;
pub use controller::{RenderSink, ViewController};
pub use error::SkycastError;
pub use models::{ForecastSnapshot, GeoLocation, ViewKind, ViewModel};
pub use render::TerminalRenderer;
pub use service::ForecastService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkycastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
