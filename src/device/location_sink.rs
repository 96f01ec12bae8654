use async_trait::async_trait;
use crate::core::{ConfigError, Waypoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// A location update the backend did not accept
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{tool}: {reason}")]
pub struct SinkFailure {
    /// Name of the backend tool that was invoked
    pub tool: String,
    /// Diagnostic text from the backend
    pub reason: String,
}

impl SinkFailure {
    pub fn new(tool: &str, reason: impl Into<String>) -> Self {
        Self {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for location sink operations
pub type SinkResult<T> = Result<T, SinkFailure>;

/// Device platform, selecting which control tool drives the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS simulator via `xcrun simctl`
    Ios,
    /// Android emulator via `adb emu`
    Android,
}

impl Platform {
    /// Control tool binary for this platform
    pub fn tool(&self) -> &'static str {
        match self {
            Platform::Ios => "xcrun",
            Platform::Android => "adb",
        }
    }

    /// What to install when the tool is missing
    pub fn install_hint(&self) -> &'static str {
        match self {
            Platform::Ios => "Install Xcode Command Line Tools.",
            Platform::Android => "Install Android SDK Platform Tools.",
        }
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(ConfigError::UnknownPlatform(other.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
        }
    }
}

/// Capability to move a controlled device to a coordinate
///
/// Implementations:
/// - `SimctlSink` for iOS simulators, addressed by device identifier
/// - `AdbSink` for the Android emulator, positional longitude/latitude
/// - `MockLocationSink` for tests
///
/// Ordinary backend failures (non-zero exit, missing binary) come back as
/// `Err(SinkFailure)` and never panic.
#[async_trait]
pub trait LocationSink: Send {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Apply a single coordinate to the device
    async fn set_location(&mut self, waypoint: Waypoint) -> SinkResult<()>;
}

/// Run a control tool to completion, returning its stdout on a zero exit
pub(crate) async fn run_tool(tool: &str, args: &[String]) -> SinkResult<String> {
    debug!("Running {} {}", tool, args.join(" "));

    let output = Command::new(tool)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| SinkFailure::new(tool, format!("failed to run: {}", e)))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() {
            format!("exited with {}", output.status)
        } else {
            stderr
        };
        Err(SinkFailure::new(tool, reason))
    }
}
