//! Data models for the skycast application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Snapshot: Normalized forecast data from a single fetch cycle
//! - View: View selection and the rows handed to the renderer

pub mod location;
pub mod snapshot;
pub mod view;

// Re-export all public types for convenient access
pub use location::GeoLocation;
pub use snapshot::{AirQuality, CurrentConditions, DailyEntry, ForecastSnapshot, HourlyEntry};
pub use view::{CurrentSummary, DailyRow, ForecastRow, HourlyRow, IndexReading, ViewKind, ViewModel};
