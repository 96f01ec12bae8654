use thiserror::Error;

/// Invalid user-supplied input, rejected before playback starts
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("coordinates out of range: ({lat}, {lon})")]
    OutOfRange { lat: f64, lon: f64 },

    #[error("invalid coordinates {input:?}. Use decimal format: 37.7749,-122.4194")]
    Malformed { input: String },

    #[error("unknown platform {0:?}, expected 'ios' or 'android'")]
    UnknownPlatform(String),

    #[error("invalid delay {0}: must be a positive number of seconds")]
    InvalidDelay(f64),

    #[error("invalid dwell radius range {min}..{max}")]
    InvalidDwellRadius { min: f64, max: f64 },
}
