pub mod engine;

pub use engine::PlaybackEngine;

use crate::core::Waypoint;
use crate::device::SinkFailure;
use std::io;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;

/// Shortest allowed delay between location updates, in seconds
pub const MIN_DELAY: f64 = 0.1;
/// Longest allowed delay between location updates, in seconds
pub const MAX_DELAY: f64 = 5.0;
/// Default delay between location updates, in seconds
pub const DEFAULT_DELAY: f64 = 0.5;

/// Delay multiplier applied by a speed-up keystroke
pub const SPEED_UP_FACTOR: f64 = 0.8;
/// Delay multiplier applied by a slow-down keystroke
pub const SLOW_DOWN_FACTOR: f64 = 1.2;

/// Resume polling interval while paused
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Control polling interval during the delay between updates
pub const CONTROL_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Clamp a delay into `[MIN_DELAY, MAX_DELAY]`
pub fn clamp_delay(delay: f64) -> f64 {
    if delay.is_nan() {
        return DEFAULT_DELAY;
    }
    delay.clamp(MIN_DELAY, MAX_DELAY)
}

/// Playback mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Running,
    Paused,
}

/// Mutable state of one playback run
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index of the waypoint being visited
    pub index: usize,
    /// Current delay between updates, in seconds
    pub delay: f64,
    pub mode: PlaybackMode,
    /// Set once the dwell segment has been reached
    pub dwell_entered: bool,
}

impl PlaybackState {
    pub fn new(initial_delay: f64) -> Self {
        Self {
            index: 0,
            delay: clamp_delay(initial_delay),
            mode: PlaybackMode::Running,
            dwell_entered: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.mode == PlaybackMode::Paused
    }
}

/// Progress reported by the engine; advisory output only
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    Started { total: usize, delay: f64 },
    Moved { index: usize, total: usize, waypoint: Waypoint, delay: f64 },
    DwellEntered { index: usize },
    Paused { index: usize },
    Resumed { index: usize },
    DelayChanged { delay: f64 },
    Finished { visited: usize },
}

pub type EventSender = mpsc::UnboundedSender<PlaybackEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<PlaybackEvent>;

/// Channel for engine progress events
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Result of a playback run that visited every waypoint
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSummary {
    pub visited: usize,
    pub elapsed: Duration,
}

/// Ways a playback run can end other than completion
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("route is empty")]
    EmptyRoute,

    #[error("failed to set location at index {index}: {failure}")]
    SinkFailure { index: usize, failure: SinkFailure },

    #[error("interrupted at index {index}")]
    Interrupted { index: usize },

    #[error("terminal input unavailable: {0}")]
    Terminal(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_delay() {
        assert_eq!(clamp_delay(0.01), MIN_DELAY);
        assert_eq!(clamp_delay(60.0), MAX_DELAY);
        assert_eq!(clamp_delay(1.5), 1.5);
        assert_eq!(clamp_delay(f64::NAN), DEFAULT_DELAY);
    }

    #[test]
    fn test_new_state_is_running_at_zero() {
        let state = PlaybackState::new(9.0);
        assert_eq!(state.index, 0);
        assert_eq!(state.delay, MAX_DELAY);
        assert_eq!(state.mode, PlaybackMode::Running);
        assert!(!state.dwell_entered);
    }
}
