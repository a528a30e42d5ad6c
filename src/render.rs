//! Terminal renderer for view models

use crate::controller::RenderSink;
use crate::models::view::format_hour_12;
use crate::models::{CurrentSummary, ForecastRow, ViewModel};

/// Renders view models to stdout
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn print_current(current: &CurrentSummary) {
        println!(
            "Now: {}°C ({})",
            current.temperature_c.round(),
            current.description
        );
        println!("Feels like: {}°C", current.apparent_temperature_c.round());

        if let Some(uv) = &current.uv {
            println!(
                "UV Index: {} - {}",
                uv.value.round(),
                uv.classification.label
            );
        }
        if let Some(aqi) = &current.air_quality {
            println!(
                "Air Quality: {} - {}",
                aqi.value.round(),
                aqi.classification.label
            );
        }
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, view: &ViewModel) {
        println!();
        println!("{} [{}]", view.title, view.kind.label());

        if let Some(current) = &view.current {
            Self::print_current(current);
        }

        for row in &view.rows {
            match row {
                ForecastRow::Hourly(hourly) => println!(
                    "  {:>5}  {:>4}°C  {}",
                    format_hour_12(hourly.hour),
                    hourly.temperature_c.round(),
                    hourly.description
                ),
                ForecastRow::Daily(daily) => println!("  {daily}"),
            }
        }
    }

    fn show_loading(&mut self) {
        println!("Loading forecast...");
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("Error: {message}");
    }
}
