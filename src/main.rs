use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::{Local, Timelike};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skycast::api::{LocationInput, LocationParser};
use skycast::config::SkycastConfig;
use skycast::error::SkycastError;
use skycast::models::ViewKind;
use skycast::render::TerminalRenderer;
use skycast::service::ForecastService;

#[derive(Parser, Debug)]
#[command(name = "skycast", version, about = "Weather forecasts from Open-Meteo")]
struct Cli {
    /// City name or "lat,lon" coordinates
    query: String,

    /// View to display: today, tomorrow, or week
    #[arg(long, default_value = "today")]
    view: String,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match SkycastConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("skycast=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("skycast={}", config.logging.level)))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(cli, config).await {
        let message = e
            .downcast_ref::<SkycastError>()
            .map(SkycastError::user_message)
            .unwrap_or_else(|| format!("{e:#}"));
        eprintln!("Error: {message}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(cli: Cli, config: SkycastConfig) -> Result<()> {
    let view: ViewKind = cli.view.parse::<ViewKind>()?;

    let mut service = ForecastService::new(&config)?;
    let mut sink = TerminalRenderer::new();

    // The wall-clock hour is read once here and passed down; the engine
    // itself never touches the clock
    let current_hour = Local::now().hour();

    let presented = match LocationParser::parse(&cli.query)? {
        LocationInput::Coordinates(lat, lon) => {
            service.locate(lat, lon, current_hour, &mut sink).await?
        }
        LocationInput::Name(name) => service.search(&name, current_hour, &mut sink).await?,
    };

    // The fetch always lands on the today view; switch tabs afterwards
    // without refetching
    if presented && view != ViewKind::Today {
        service.select_view(view, current_hour, &mut sink)?;
    }

    Ok(())
}
