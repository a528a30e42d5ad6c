//! Location model for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A resolved location, produced once per search or geolocation request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeoLocation {
    /// Location name (city, region, etc.)
    pub name: String,
    /// Country name, when the geocoder knows it
    pub country: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoLocation {
    /// Create a new location without country metadata
    #[must_use]
    pub fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country: None,
            latitude,
            longitude,
        }
    }

    /// Create a location with country
    #[must_use]
    pub fn with_country(name: String, country: String, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            country: Some(country),
            latitude,
            longitude,
        }
    }

    /// Placeholder for coordinates that could not be reverse geocoded
    #[must_use]
    pub fn unnamed(latitude: f64, longitude: f64) -> Self {
        Self::new("Your Location".to_string(), latitude, longitude)
    }

    /// Display name in the form "Name (Country)", or just "Name"
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{} ({})", self.name, country),
            _ => self.name.clone(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
