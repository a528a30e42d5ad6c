//! Open-Meteo API client
//!
//! HTTP client functionality for the geocoding, forecast, and air-quality
//! endpoints. No API key is required. The raw response structures live here;
//! turning them into a `ForecastSnapshot` is the normalizer's job.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::error::SkycastError;
use crate::models::GeoLocation;
use crate::Result;

/// Raw geocoding response
#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    pub results: Option<Vec<GeocodingRecord>>,
}

/// One geocoding match
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
}

impl From<GeocodingRecord> for GeoLocation {
    fn from(record: GeocodingRecord) -> Self {
        GeoLocation {
            name: record.name,
            country: record.country,
            latitude: record.latitude,
            longitude: record.longitude,
        }
    }
}

/// Raw forecast response; the normalizer validates which blocks are present
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: Option<CurrentPayload>,
    pub hourly: Option<HourlyPayload>,
    pub daily: Option<DailyPayload>,
}

/// Current-conditions block of the forecast response
#[derive(Debug, Deserialize)]
pub struct CurrentPayload {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub weather_code: u32,
    pub uv_index: Option<f64>,
}

/// Hourly block of the forecast response, as parallel arrays
#[derive(Debug, Deserialize)]
pub struct HourlyPayload {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Vec<f64>,
    pub weather_code: Vec<u32>,
}

/// Daily block of the forecast response, as parallel arrays
#[derive(Debug, Deserialize)]
pub struct DailyPayload {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    pub temperature_min: Vec<f64>,
    pub weather_code: Vec<u32>,
}

/// Raw air-quality response
#[derive(Debug, Deserialize)]
pub struct AirQualityResponse {
    pub current: Option<AirQualityCurrent>,
}

/// Current block of the air-quality response
#[derive(Debug, Deserialize)]
pub struct AirQualityCurrent {
    pub us_aqi: Option<f64>,
}

/// Async client for the Open-Meteo API family
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenMeteoClient {
    /// Create a new client with timeout and user agent from config
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("skycast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// Geocode a city name to its best matching location
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Option<GeoLocation>> {
        info!("Geocoding location: '{}'", name);
        let start = Instant::now();

        let url = format!(
            "{}?name={}&count=1&language=en&format=json",
            self.config.geocoding_url,
            urlencoding::encode(name)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("Geocoding request failed with HTTP {}", response.status());
            return Err(SkycastError::location_not_found(name));
        }

        let body: GeocodingResponse = response.json().await?;
        let record = body.results.unwrap_or_default().into_iter().next();

        match &record {
            Some(r) => info!(
                "Geocoded '{}' to {} ({:.4}, {:.4}) in {:.3}s",
                name,
                r.name,
                r.latitude,
                r.longitude,
                start.elapsed().as_secs_f64()
            ),
            None => warn!("No geocoding results for '{}'", name),
        }

        Ok(record.map(GeoLocation::from))
    }

    /// Reverse geocode coordinates to the nearest named place
    #[instrument(skip(self))]
    pub async fn reverse_search(&self, lat: f64, lon: f64) -> Result<Option<GeoLocation>> {
        debug!("Reverse geocoding coordinates: {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}?latitude={lat}&longitude={lon}&count=1&language=en&format=json",
            self.config.geocoding_url
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            debug!(
                "Reverse geocoding returned HTTP {}, falling back",
                response.status()
            );
            return Ok(None);
        }

        let body: GeocodingResponse = response.json().await?;
        let record = body.results.unwrap_or_default().into_iter().next();

        Ok(record.map(|r| GeoLocation {
            // Keep the caller's exact coordinates; the geocoder only names them
            latitude: lat,
            longitude: lon,
            name: r.name,
            country: r.country,
        }))
    }

    /// Get the 7-day forecast with current conditions for a location
    #[instrument(skip(self))]
    pub async fn get_forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse> {
        info!("Fetching forecast for {:.4}, {:.4}", lat, lon);
        let start = Instant::now();

        let url = format!(
            "{}?latitude={lat}&longitude={lon}\
             &current=temperature_2m,apparent_temperature,weather_code,uv_index\
             &hourly=temperature_2m,weather_code\
             &daily=temperature_2m_max,temperature_2m_min,weather_code\
             &timezone=auto&forecast_days={}",
            self.config.forecast_url, self.config.forecast_days
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SkycastError::weather_unavailable(format!(
                "Open-Meteo returned HTTP {}",
                response.status()
            )));
        }

        let body: ForecastResponse = response.json().await.map_err(|e| {
            SkycastError::weather_unavailable(format!("invalid forecast body: {e}"))
        })?;

        info!(
            "Retrieved forecast in {:.3}s",
            start.elapsed().as_secs_f64()
        );

        Ok(body)
    }

    /// Get current air quality for a location
    #[instrument(skip(self))]
    pub async fn get_air_quality(&self, lat: f64, lon: f64) -> Result<AirQualityResponse> {
        debug!("Fetching air quality for {:.4}, {:.4}", lat, lon);

        let url = format!(
            "{}?latitude={lat}&longitude={lon}&current=us_aqi&timezone=auto",
            self.config.air_quality_url
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: AirQualityResponse = response.json().await?;

        Ok(body)
    }

    /// Fetch forecast and air quality concurrently.
    ///
    /// The air-quality request is best-effort: its failure never fails the
    /// bundle, it just yields `None`.
    pub async fn fetch_bundle(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<(ForecastResponse, Option<AirQualityResponse>)> {
        let (weather, air) = tokio::join!(
            self.get_forecast(lat, lon),
            self.get_air_quality(lat, lon)
        );

        let weather = weather?;
        let air = match air {
            Ok(air) => Some(air),
            Err(e) => {
                debug!("Air quality unavailable: {}", e);
                None
            }
        };

        Ok((weather, air))
    }
}

/// Types of location input accepted on the command line
#[derive(Debug, Clone)]
pub enum LocationInput {
    /// Coordinates (latitude, longitude)
    Coordinates(f64, f64),
    /// Location name (city, region, etc.)
    Name(String),
}

/// Location parsing utilities
pub struct LocationParser;

impl LocationParser {
    /// Parse location input (coordinates or city name)
    pub fn parse(input: &str) -> Result<LocationInput> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SkycastError::validation("Location cannot be empty"));
        }

        if let Some(coords) = Self::parse_coordinates(input) {
            return Ok(LocationInput::Coordinates(coords.0, coords.1));
        }

        Ok(LocationInput::Name(input.to_string()))
    }

    /// Parse coordinates from strings like "46.8182,8.2275" or "46.8182 8.2275"
    fn parse_coordinates(input: &str) -> Option<(f64, f64)> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return None;
        }

        let lat = parts[0].parse::<f64>().ok()?;
        let lon = parts[1].parse::<f64>().ok()?;

        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }

        Some((lat, lon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_parser_coordinates() {
        assert!(matches!(
            LocationParser::parse("46.8182,8.2275").unwrap(),
            LocationInput::Coordinates(46.8182, 8.2275)
        ));

        assert!(matches!(
            LocationParser::parse("46.8182 8.2275").unwrap(),
            LocationInput::Coordinates(46.8182, 8.2275)
        ));

        assert!(matches!(
            LocationParser::parse("-46.8182, -8.2275").unwrap(),
            LocationInput::Coordinates(-46.8182, -8.2275)
        ));
    }

    #[test]
    fn test_location_parser_out_of_range_coordinates_are_names() {
        assert!(matches!(
            LocationParser::parse("91.0,8.0").unwrap(),
            LocationInput::Name(_)
        ));
        assert!(matches!(
            LocationParser::parse("46.0,181.0").unwrap(),
            LocationInput::Name(_)
        ));
    }

    #[test]
    fn test_location_parser_names() {
        assert!(matches!(
            LocationParser::parse("Berlin").unwrap(),
            LocationInput::Name(_)
        ));
        assert!(matches!(
            LocationParser::parse("New York City").unwrap(),
            LocationInput::Name(_)
        ));
    }

    #[test]
    fn test_location_parser_empty_input() {
        assert!(LocationParser::parse("   ").is_err());
    }

    #[test]
    fn test_geocoding_record_to_location() {
        let record = GeocodingRecord {
            name: "Berlin".to_string(),
            latitude: 52.52,
            longitude: 13.405,
            country: Some("Germany".to_string()),
        };

        let location: GeoLocation = record.into();
        assert_eq!(location.name, "Berlin");
        assert_eq!(location.country.as_deref(), Some("Germany"));
        assert_eq!(location.latitude, 52.52);
    }

    #[test]
    fn test_forecast_response_parses_optional_blocks() {
        let body = r#"{"current":{"temperature_2m":18.4,"apparent_temperature":17.2,"weather_code":2,"uv_index":4.5}}"#;
        let parsed: ForecastResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.current.is_some());
        assert!(parsed.hourly.is_none());
        assert!(parsed.daily.is_none());
    }

    #[test]
    fn test_air_quality_response_tolerates_null_aqi() {
        let body = r#"{"current":{"us_aqi":null}}"#;
        let parsed: AirQualityResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.current.unwrap().us_aqi.is_none());
    }
}
