use async_trait::async_trait;
use crate::core::Waypoint;
use crate::device::location_sink::{run_tool, LocationSink, SinkResult};

/// Android emulator backend driven through `adb emu geo fix`
///
/// `geo fix` takes longitude before latitude; callers still pass (lat, lon).
#[derive(Default)]
pub struct AdbSink;

impl AdbSink {
    pub fn new() -> Self {
        Self
    }

    fn build_args(waypoint: Waypoint) -> Vec<String> {
        vec![
            "emu".to_string(),
            "geo".to_string(),
            "fix".to_string(),
            waypoint.lon.to_string(),
            waypoint.lat.to_string(),
        ]
    }
}

#[async_trait]
impl LocationSink for AdbSink {
    fn name(&self) -> &str {
        "adb"
    }

    async fn set_location(&mut self, waypoint: Waypoint) -> SinkResult<()> {
        run_tool("adb", &Self::build_args(waypoint)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longitude_comes_first() {
        let args = AdbSink::build_args(Waypoint { lat: 12.5, lon: -45.25 });
        assert_eq!(args, vec!["emu", "geo", "fix", "-45.25", "12.5"]);
    }
}
