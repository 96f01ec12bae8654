use async_trait::async_trait;
use crate::core::Waypoint;
use crate::device::location_sink::{run_tool, LocationSink, SinkResult};

/// Device identifier that targets whichever simulator is currently booted
pub const BOOTED_DEVICE: &str = "booted";

/// iOS simulator backend driven through `xcrun simctl location`
pub struct SimctlSink {
    device_id: String,
}

impl SimctlSink {
    pub fn new(device_id: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
        }
    }

    /// Arguments after `xcrun`
    fn build_args(&self, waypoint: Waypoint) -> Vec<String> {
        vec![
            "simctl".to_string(),
            "location".to_string(),
            self.device_id.clone(),
            "set".to_string(),
            format!("{},{}", waypoint.lat, waypoint.lon),
        ]
    }
}

impl Default for SimctlSink {
    fn default() -> Self {
        Self::new(BOOTED_DEVICE)
    }
}

#[async_trait]
impl LocationSink for SimctlSink {
    fn name(&self) -> &str {
        "simctl"
    }

    async fn set_location(&mut self, waypoint: Waypoint) -> SinkResult<()> {
        run_tool("xcrun", &self.build_args(waypoint)).await.map(|_| ())
    }
}
