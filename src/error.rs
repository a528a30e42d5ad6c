//! Error types and handling for the `skycast` application

use thiserror::Error;

/// Main error type for the `skycast` application
#[derive(Error, Debug)]
pub enum SkycastError {
    /// Geocoding returned no results for the given query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// The primary weather fetch failed or returned a malformed body
    #[error("Weather data unavailable: {message}")]
    WeatherUnavailable { message: String },

    /// The snapshot does not contain enough data for the requested view
    #[error("Insufficient forecast data: {message}")]
    InsufficientData { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// HTTP transport errors
    #[error("HTTP error: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
}

impl SkycastError {
    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new weather-unavailable error
    pub fn weather_unavailable<S: Into<String>>(message: S) -> Self {
        Self::WeatherUnavailable {
            message: message.into(),
        }
    }

    /// Create a new insufficient-data error
    pub fn insufficient_data<S: Into<String>>(message: S) -> Self {
        Self::InsufficientData {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkycastError::LocationNotFound { query } => {
                format!("Could not find \"{query}\". Try a different spelling.")
            }
            SkycastError::WeatherUnavailable { .. } => {
                "Could not fetch weather data. Please try again later.".to_string()
            }
            SkycastError::InsufficientData { .. } => {
                "The forecast does not cover that period yet.".to_string()
            }
            SkycastError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SkycastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SkycastError::Http { .. } => {
                "Unable to connect to Open-Meteo. Please check your internet connection."
                    .to_string()
            }
        }
    }
}
