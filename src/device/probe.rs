use crate::device::location_sink::{run_tool, Platform};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// Locate a binary on `PATH`
pub fn find_in_path(tool: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(tool))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file()
}

/// Check that the control tool for `platform` is installed
pub fn available(platform: Platform) -> bool {
    if find_in_path(platform.tool()).is_none() {
        error!("'{}' command not found. {}", platform.tool(), platform.install_hint());
        return false;
    }
    true
}

/// List devices the platform tool can currently see
///
/// Returns the raw tool output, or `None` if the tool failed.
pub async fn list_devices(platform: Platform) -> Option<String> {
    let args: Vec<String> = match platform {
        Platform::Ios => ["simctl", "list", "devices", "booted"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        Platform::Android => vec!["devices".to_string()],
    };

    match run_tool(platform.tool(), &args).await {
        Ok(stdout) => Some(stdout),
        Err(e) => {
            warn!("Could not list devices: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_find_in_path_finds_shell() {
        assert!(find_in_path("sh").is_some());
    }

    #[test]
    fn test_find_in_path_missing_tool() {
        assert!(find_in_path("gps-sim-definitely-not-installed").is_none());
    }
}
