use crate::core::{Route, Waypoint};
use crate::route::RouteError;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Load a route from a CSV file of `lat,lon` rows
///
/// An optional header row is detected and skipped. Rows with missing
/// columns, unparsable numbers or out-of-range coordinates are skipped
/// with a warning.
pub fn load_route_csv<P: AsRef<Path>>(path: P) -> Result<Route, RouteError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RouteError::FileNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|e| RouteError::Csv(e.to_string()))?;
    let route = read_route(file)?;

    info!("Loaded {} coordinates from {}", route.len(), path.display());
    Ok(route)
}

/// Read `lat,lon` rows from any reader
pub fn read_route<R: Read>(reader: R) -> Result<Route, RouteError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut route = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| RouteError::Csv(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 1);

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        if record.len() < 2 {
            warn!("Skipping row {}: insufficient columns", line);
            continue;
        }

        let lat = record.get(0).and_then(|s| s.parse::<f64>().ok());
        let lon = record.get(1).and_then(|s| s.parse::<f64>().ok());

        let (lat, lon) = match (lat, lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ if idx == 0 => continue, // header row
            _ => {
                warn!("Skipping row {}: invalid number format", line);
                continue;
            }
        };

        match Waypoint::new(lat, lon) {
            Ok(wp) => route.push(wp),
            Err(_) => warn!("Skipping row {}: invalid coordinates ({}, {})", line, lat, lon),
        }
    }

    if route.is_empty() {
        return Err(RouteError::NoCoordinates);
    }

    Ok(route)
}
