mod config;
mod output;
mod predict;
mod tle;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Duration, Utc};
use clap::Parser;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::output::Report;
use crate::predict::{
    estimate_period, predict_passes, summarize_next_pass, visibility_footprint, GroundStation,
    ObservationModel, PredictError, PredictionWindow, Sgp4Model,
};
use crate::tle::{TleError, TleStore};

const DEFAULT_LATITUDE_DEG: f64 = 40.0;
const DEFAULT_LONGITUDE_DEG: f64 = -88.0;
const DEFAULT_ALTITUDE_KM: f64 = 0.2;

#[derive(Parser)]
#[command(name = "satpass")]
#[command(about = "Satellite pass prediction for a ground station")]
struct Cli {
    /// Satellite name (partial matches allowed)
    name: String,

    /// Directory containing .tle/.txt element-set files
    #[arg(long, default_value = "tle")]
    tle_dir: PathBuf,

    /// Station config file (YAML); the flags below override it
    #[arg(long)]
    config: Option<String>,

    /// Ground station latitude (degrees)
    #[arg(long)]
    gs_lat: Option<f64>,

    /// Ground station longitude (degrees)
    #[arg(long)]
    gs_lon: Option<f64>,

    /// Ground station altitude (km)
    #[arg(long)]
    gs_alt: Option<f64>,

    /// Prediction horizon, e.g. "24h" or "90m"
    #[arg(long, default_value = "24h")]
    horizon: String,

    /// Minimum elevation for a pass (degrees)
    #[arg(long, default_value_t = 10.0)]
    min_elevation: f64,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,

    /// Include the visibility footprint boundary in the report
    #[arg(long)]
    footprint: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Tle(#[from] TleError),
    #[error(transparent)]
    Predict(#[from] PredictError),
    #[error("invalid horizon: {0}")]
    Horizon(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&e.to_string(), cli.json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let station = resolve_station(cli)?;
    let horizon = parse_horizon(&cli.horizon)?;

    let mut store = TleStore::new(cli.tle_dir.clone());
    store.load_all()?;
    let entry = store.find(&cli.name)?;
    log::debug!("using element set for {} from {}", entry.name, entry.source);

    // One reference instant shared by the scan, the summary and the report.
    let now = Utc::now();

    let period_minutes = estimate_period(&entry.elements)?;
    let model = Sgp4Model {
        station: &station,
        elements: &entry.elements,
        constants: &entry.constants,
    };

    let position = model.subpoint(now)?;
    let observation = model.observe(now)?;

    let window = PredictionWindow::new(now, horizon, period_minutes)?;
    let passes = predict_passes(&model, &window, cli.min_elevation)?;
    let next_pass = summarize_next_pass(&passes, now);

    let footprint = cli
        .footprint
        .then(|| visibility_footprint(&station, cli.min_elevation));

    let report = Report::new(
        now,
        &entry.name,
        &position,
        &observation,
        period_minutes,
        &station,
        horizon,
        cli.min_elevation,
        passes,
        next_pass,
        footprint,
    );

    if cli.json {
        output::print_json(&report)?;
    } else {
        output::print_human(&report);
    }
    Ok(())
}

fn resolve_station(cli: &Cli) -> Result<GroundStation, AppError> {
    let mut station = match &cli.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            if let Some(name) = &config.station.name {
                log::info!("ground station: {}", name);
            }
            config.station.ground_station()?
        }
        None => GroundStation {
            latitude_deg: DEFAULT_LATITUDE_DEG,
            longitude_deg: DEFAULT_LONGITUDE_DEG,
            altitude_km: DEFAULT_ALTITUDE_KM,
        },
    };
    if let Some(lat) = cli.gs_lat {
        station.latitude_deg = lat;
    }
    if let Some(lon) = cli.gs_lon {
        station.longitude_deg = lon;
    }
    if let Some(alt) = cli.gs_alt {
        station.altitude_km = alt;
    }
    Ok(station)
}

fn parse_horizon(s: &str) -> Result<Duration, AppError> {
    humantime::parse_duration(s.trim())
        .map_err(|e| AppError::Horizon(e.to_string()))
        .and_then(|d| Duration::from_std(d).map_err(|e| AppError::Horizon(e.to_string())))
}
