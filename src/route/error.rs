use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a route or place name
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no route found - check locations are valid and reachable")]
    NoRoute,

    #[error("invalid route geometry from router")]
    InvalidGeometry,

    #[error("malformed router response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("CSV file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("error reading CSV file: {0}")]
    Csv(String),

    #[error("no valid coordinates found in CSV file")]
    NoCoordinates,
}
