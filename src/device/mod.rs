pub mod location_sink;
pub mod simctl;
pub mod adb;
#[cfg(test)]
pub mod mock;
pub mod probe;

pub use location_sink::{LocationSink, Platform, SinkFailure};
pub use simctl::{SimctlSink, BOOTED_DEVICE};
pub use adb::AdbSink;
#[cfg(test)]
pub use mock::MockLocationSink;

/// Build the sink for a platform; a blank iOS device id targets the booted simulator
pub fn sink_for(platform: Platform, device_id: &str) -> Box<dyn LocationSink> {
    match platform {
        Platform::Ios if device_id.trim().is_empty() => Box::new(SimctlSink::default()),
        Platform::Ios => Box::new(SimctlSink::new(device_id.trim())),
        Platform::Android => Box::new(AdbSink::new()),
    }
}
