use crate::core::ConfigError;
use crate::device::{Platform, BOOTED_DEVICE};
use crate::playback::DEFAULT_DELAY;
use crate::route::{TravelMode, DEFAULT_NOMINATIM_URL, DEFAULT_OSRM_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Overrides the routing server
pub const OSRM_URL_ENV: &str = "GPS_SIM_OSRM_URL";
/// Overrides the reverse geocoding server
pub const NOMINATIM_URL_ENV: &str = "GPS_SIM_NOMINATIM_URL";

/// Persistent simulator settings; also the defaults offered at each prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub platform: Platform,
    /// iOS simulator identifier, or `booted`
    pub device_id: String,
    /// Seconds between location updates
    pub initial_delay: f64,
    pub travel_mode: TravelMode,
    pub csv_path: String,
    /// Number of jitter points appended at the destination
    pub dwell_points: usize,
    /// Dwell jitter distance range, in metres
    pub dwell_min_radius: f64,
    pub dwell_max_radius: f64,
    pub osrm_url: String,
    pub nominatim_url: String,
    pub route_timeout_secs: u64,
    pub geocode_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            platform: Platform::Ios,
            device_id: BOOTED_DEVICE.to_string(),
            initial_delay: DEFAULT_DELAY,
            travel_mode: TravelMode::Driving,
            csv_path: "data/sample_route.csv".to_string(),
            dwell_points: 10,
            dwell_min_radius: 0.002,
            dwell_max_radius: 0.004,
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            route_timeout_secs: 10,
            geocode_timeout_secs: 5,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gps-sim").join("settings.json"))
    }

    /// Load from the user config directory, then apply environment overrides
    pub fn load() -> Self {
        let mut settings = Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default();
        settings.apply_env();
        settings
    }

    /// Load from a file, falling back to defaults when missing or invalid
    pub fn load_from(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!("No settings at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&contents) {
            Ok(settings) if settings.validate().is_ok() => settings,
            Ok(_) => {
                debug!("Ignoring invalid settings in {}", path.display());
                Self::default()
            }
            Err(e) => {
                debug!("Ignoring unreadable settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("Settings saved to {}", path.display());
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(OSRM_URL_ENV) {
            self.osrm_url = url;
        }
        if let Ok(url) = std::env::var(NOMINATIM_URL_ENV) {
            self.nominatim_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_delay.is_finite() && self.initial_delay > 0.0) {
            return Err(ConfigError::InvalidDelay(self.initial_delay));
        }
        let (min, max) = (self.dwell_min_radius, self.dwell_max_radius);
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(ConfigError::InvalidDwellRadius { min, max });
        }
        Ok(())
    }

    pub fn route_timeout(&self) -> Duration {
        Duration::from_secs(self.route_timeout_secs)
    }

    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_secs(self.geocode_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.device_id, "booted");
        assert_eq!(settings.dwell_points, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            platform: Platform::Android,
            initial_delay: 1.5,
            travel_mode: TravelMode::Cycling,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"platform":"android"}"#).unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.platform, Platform::Android);
        assert_eq!(settings.initial_delay, DEFAULT_DELAY);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        fs::write(&path, r#"{"dwell_min_radius":5.0,"dwell_max_radius":1.0}"#).unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        assert_eq!(Settings::load_from(&dir.path().join("missing.json")), Settings::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_delay = Settings {
            initial_delay: -1.0,
            ..Settings::default()
        };
        assert_eq!(bad_delay.validate(), Err(ConfigError::InvalidDelay(-1.0)));

        let bad_radius = Settings {
            dwell_min_radius: -0.1,
            ..Settings::default()
        };
        assert!(matches!(
            bad_radius.validate(),
            Err(ConfigError::InvalidDwellRadius { .. })
        ));
    }
}
