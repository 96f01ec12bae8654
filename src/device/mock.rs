use async_trait::async_trait;
use crate::core::Waypoint;
use crate::device::location_sink::{LocationSink, SinkFailure, SinkResult};
use tokio::time::Instant;

/// Mock location sink for testing without a simulator
///
/// Records every update it receives together with the (virtual) time it
/// arrived, and can be told to reject the update at a given call index.
pub struct MockLocationSink {
    name: String,
    calls: Vec<(Waypoint, Instant)>,
    fail_at: Option<usize>,
}

impl MockLocationSink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Vec::new(),
            fail_at: None,
        }
    }

    /// Reject the update at this zero-based call index
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Coordinates received, in order
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.calls.iter().map(|(wp, _)| *wp).collect()
    }

    /// Arrival times of each update
    pub fn times(&self) -> Vec<Instant> {
        self.calls.iter().map(|(_, at)| *at).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

#[async_trait]
impl LocationSink for MockLocationSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn set_location(&mut self, waypoint: Waypoint) -> SinkResult<()> {
        let index = self.calls.len();
        self.calls.push((waypoint, Instant::now()));

        if self.fail_at == Some(index) {
            return Err(SinkFailure::new(&self.name, "Invalid device: mock rejected update"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mut sink = MockLocationSink::new("test");
        sink.set_location(Waypoint { lat: 1.0, lon: 2.0 }).await.unwrap();
        sink.set_location(Waypoint { lat: 3.0, lon: 4.0 }).await.unwrap();

        assert_eq!(sink.call_count(), 2);
        assert_eq!(
            sink.waypoints(),
            vec![Waypoint { lat: 1.0, lon: 2.0 }, Waypoint { lat: 3.0, lon: 4.0 }]
        );
    }

    #[tokio::test]
    async fn test_mock_fails_at_index() {
        let mut sink = MockLocationSink::new("test").failing_at(1);
        assert!(sink.set_location(Waypoint { lat: 0.0, lon: 0.0 }).await.is_ok());

        let failure = sink.set_location(Waypoint { lat: 0.0, lon: 0.0 }).await.unwrap_err();
        assert_eq!(failure.tool, "test");
    }
}
