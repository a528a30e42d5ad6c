//! Forecast service: fetch orchestration around the view controller
//!
//! Owns the caller-side policies the engine itself stays free of: the search
//! throttle (rapid searches are dropped, not queued) and the stale-response
//! guard (only the most recently issued fetch may present its result).

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::api::OpenMeteoClient;
use crate::config::SkycastConfig;
use crate::controller::{RenderSink, ViewController};
use crate::error::SkycastError;
use crate::models::{GeoLocation, ViewKind};
use crate::normalize;
use crate::Result;

/// Drops searches that arrive faster than the configured minimum spacing
#[derive(Debug)]
pub struct SearchThrottle {
    min_interval: Duration,
    last_allowed: Option<Instant>,
}

impl SearchThrottle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_allowed: None,
        }
    }

    /// Returns true and records the attempt when enough time has passed
    /// since the last allowed search
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        match self.last_allowed {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last_allowed = Some(now);
                true
            }
        }
    }
}

/// Issues monotonically increasing fetch tickets; a result is only presented
/// while its ticket is still the latest issued one
#[derive(Debug, Default)]
struct TicketIssuer {
    latest: u64,
}

impl TicketIssuer {
    fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

/// Ties the API client, normalizer, and view controller together for one
/// interactive session
pub struct ForecastService {
    client: OpenMeteoClient,
    controller: ViewController,
    throttle: SearchThrottle,
    tickets: TicketIssuer,
}

impl ForecastService {
    /// Create a service from configuration
    pub fn new(config: &SkycastConfig) -> Result<Self> {
        Ok(Self {
            client: OpenMeteoClient::new(config.weather.clone())?,
            controller: ViewController::new(),
            throttle: SearchThrottle::new(Duration::from_millis(config.search.min_interval_ms)),
            tickets: TicketIssuer::default(),
        })
    }

    /// The underlying view controller
    #[must_use]
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Search a city by name and present its forecast.
    ///
    /// Returns `Ok(false)` when the search was dropped by the throttle.
    pub async fn search(
        &mut self,
        query: &str,
        current_hour: u32,
        sink: &mut dyn RenderSink,
    ) -> Result<bool> {
        if !self.throttle.allow() {
            debug!("Search '{}' dropped by throttle", query);
            return Ok(false);
        }

        let ticket = self.tickets.issue();
        sink.show_loading();

        let location = self
            .client
            .search(query)
            .await?
            .ok_or_else(|| SkycastError::location_not_found(query))?;

        self.fetch_and_present(location, ticket, current_hour, sink)
            .await?;
        Ok(true)
    }

    /// Fetch the forecast for explicit coordinates, naming them via reverse
    /// geocoding when possible
    pub async fn locate(
        &mut self,
        lat: f64,
        lon: f64,
        current_hour: u32,
        sink: &mut dyn RenderSink,
    ) -> Result<bool> {
        let ticket = self.tickets.issue();
        sink.show_loading();

        // Reverse geocoding is best-effort; unnamed coordinates still get
        // a forecast
        let location = match self.client.reverse_search(lat, lon).await {
            Ok(Some(location)) => location,
            Ok(None) => GeoLocation::unnamed(lat, lon),
            Err(e) => {
                debug!("Reverse geocoding failed: {}", e);
                GeoLocation::unnamed(lat, lon)
            }
        };

        self.fetch_and_present(location, ticket, current_hour, sink)
            .await?;
        Ok(true)
    }

    /// Switch the active view; re-renders from the current snapshot without
    /// any network traffic
    pub fn select_view(
        &mut self,
        view: ViewKind,
        current_hour: u32,
        sink: &mut dyn RenderSink,
    ) -> Result<()> {
        self.controller.select_view(view, current_hour, sink)
    }

    async fn fetch_and_present(
        &mut self,
        location: GeoLocation,
        ticket: u64,
        current_hour: u32,
        sink: &mut dyn RenderSink,
    ) -> Result<()> {
        info!(
            "Fetching forecast bundle for {} ({})",
            location.name,
            location.format_coordinates()
        );

        let (weather, air) = self
            .client
            .fetch_bundle(location.latitude, location.longitude)
            .await?;
        let snapshot = normalize::build_snapshot(location, weather, air)?;

        if !self.tickets.is_current(ticket) {
            debug!("Discarding stale fetch result (ticket {})", ticket);
            return Ok(());
        }

        self.controller.present(snapshot, current_hour, sink)
    }
}
