use crate::input::keyboard::{ControlSignal, SignalSource};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;
use tokio::time::Instant;

/// Signal source that releases pre-scheduled signals at fixed offsets from
/// its creation, measured on the tokio clock
pub struct ScriptedInput {
    start: Instant,
    pending: VecDeque<(Duration, ControlSignal)>,
    hang_up_at: Option<Duration>,
}

impl ScriptedInput {
    pub fn new(mut script: Vec<(Duration, ControlSignal)>) -> Self {
        script.sort_by_key(|(at, _)| *at);
        Self {
            start: Instant::now(),
            pending: script.into(),
            hang_up_at: None,
        }
    }

    /// A source that never produces a signal
    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    /// Fail every poll from `at` onwards, like a terminal that went away
    pub fn hang_up_at(mut self, at: Duration) -> Self {
        self.hang_up_at = Some(at);
        self
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl SignalSource for ScriptedInput {
    fn poll_signal(&mut self) -> io::Result<Option<ControlSignal>> {
        let elapsed = self.start.elapsed();
        if matches!(self.hang_up_at, Some(at) if at <= elapsed) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal hung up"));
        }
        Ok(match self.pending.front() {
            Some((at, _)) if *at <= elapsed => self.pending.pop_front().map(|(_, s)| s),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_signals_release_in_order() {
        let mut input = ScriptedInput::new(vec![
            (Duration::from_millis(200), ControlSignal::Resume),
            (Duration::from_millis(100), ControlSignal::Pause),
        ]);
        assert_eq!(input.poll_signal().unwrap(), None);

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(input.poll_signal().unwrap(), Some(ControlSignal::Pause));
        assert_eq!(input.poll_signal().unwrap(), Some(ControlSignal::Resume));
        assert_eq!(input.poll_signal().unwrap(), None);
        assert_eq!(input.remaining(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang_up_fails_later_polls() {
        let mut input = ScriptedInput::silent().hang_up_at(Duration::from_millis(100));
        assert_eq!(input.poll_signal().unwrap(), None);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(input.poll_signal().is_err());
    }
}
