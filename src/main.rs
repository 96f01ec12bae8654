mod core;
mod device;
mod input;
mod playback;
mod route;
mod settings;
mod ui;

use anyhow::{Context, Result};
use core::{PlannedRoute, Route, Waypoint};
use device::{probe, Platform};
use input::load_route_csv;
use playback::{event_channel, PlaybackEngine, PlaybackError};
use route::{generate_dwell_points, Geocoder, OsrmClient, TravelMode};
use settings::Settings;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ui::{is_yes, parse_delay, prompt, prompt_or, CONTROLS_LEGEND};

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the progress line
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gps_sim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Playback is a single flow of control
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    match rt.block_on(run()) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    println!("\n=== GPS Location Simulator ===");
    let mut settings = Settings::load();

    // Platform and tool check
    let answer = prompt_or("Enter PLATFORM (ios/android)", &settings.platform.to_string())?;
    let platform: Platform = answer.parse()?;
    if !probe::available(platform) {
        return Ok(ExitCode::FAILURE);
    }
    settings.platform = platform;

    if platform == Platform::Ios {
        settings.device_id = prompt_or("Enter SIMULATOR ID", &settings.device_id)?;
    }
    if let Some(devices) = probe::list_devices(platform).await {
        println!("{}", devices.trim_end());
    }

    // Route
    let use_csv = is_yes(&prompt("Use CSV file? (yes/no) [no]")?);
    let travel = if use_csv {
        route_from_csv(&mut settings)?
    } else {
        match route_from_router(&mut settings).await? {
            Some(route) => route,
            None => return Ok(ExitCode::FAILURE),
        }
    };

    let answer = prompt(&format!(
        "Enter INITIAL DELAY (0.1-5.0) [{}]",
        settings.initial_delay
    ))?;
    let initial_delay = parse_delay(&answer, settings.initial_delay);
    settings.initial_delay = initial_delay;

    // Simulated GPS drift once the destination is reached
    let destination = *travel.last().context("route has no destination")?;
    let dwell = generate_dwell_points(
        destination,
        settings.dwell_points,
        settings.dwell_min_radius,
        settings.dwell_max_radius,
        &mut rand::thread_rng(),
    );
    let planned = PlannedRoute::with_dwell(travel, dwell);

    let (tx, rx) = event_channel();
    let presenter = tokio::spawn(ui::present(rx));
    let engine = PlaybackEngine::new(planned, initial_delay).with_events(tx);
    let mut sink = device::sink_for(platform, &settings.device_id);

    println!("\n{}", CONTROLS_LEGEND);
    let result = engine.play(sink.as_mut()).await;

    // Closing the event channel lets the presenter finish
    drop(engine);
    let _ = presenter.await;

    let code = match result {
        Ok(summary) => {
            info!(
                "Visited {} waypoints in {:.1}s",
                summary.visited,
                summary.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(PlaybackError::Interrupted { index }) => {
            println!("\nSimulation interrupted by user at step {}.", index + 1);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!();
            error!("Simulation aborted: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Err(e) = settings.save() {
        warn!("Could not save settings: {:#}", e);
    }
    Ok(code)
}

/// Load travel waypoints from a CSV file
fn route_from_csv(settings: &mut Settings) -> Result<Route> {
    let path = prompt_or("Enter CSV file path", &settings.csv_path)?;
    let route = load_route_csv(&path).context("Aborting simulation due to CSV errors")?;
    settings.csv_path = path;

    if let (Some(start), Some(end)) = (route.first(), route.last()) {
        println!("Route loaded with {} waypoints", route.len());
        println!("Trip: {} -> {}", start, end);
    }
    Ok(route)
}

/// Ask for endpoints and fetch travel waypoints from the router
///
/// Returns `None` when the router has no route.
async fn route_from_router(settings: &mut Settings) -> Result<Option<Route>> {
    let start: Waypoint = prompt("Enter START (lat,lon)")?.parse()?;
    let end: Waypoint = prompt("Enter DESTINATION (lat,lon)")?.parse()?;
    let mode = TravelMode::parse_lenient(&prompt_or(
        "Enter MODE (driving/walking/cycling)",
        &settings.travel_mode.to_string(),
    )?);
    settings.travel_mode = mode;

    println!("Fetching route...");
    let client = OsrmClient::new(&settings.osrm_url, settings.route_timeout())?;
    let route = match client.fetch(start, end, mode).await {
        Ok(route) => route,
        Err(e) => {
            error!("Aborting simulation due to route errors: {}", e);
            return Ok(None);
        }
    };

    let geocoder = Geocoder::new(&settings.nominatim_url, settings.geocode_timeout())?;
    let start_name = geocoder.location_name(start).await;
    let end_name = geocoder.location_name(end).await;

    println!("Route found with {} waypoints", route.len());
    println!("Trip: {} -> {}", start_name, end_name);
    Ok(Some(route))
}
