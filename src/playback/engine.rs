use crate::core::PlannedRoute;
use crate::device::LocationSink;
use crate::input::{ControlSignal, SignalSource, TerminalFd, TerminalInput, STDIN_FD};
use crate::playback::{
    EventSender, PlaybackError, PlaybackEvent, PlaybackMode, PlaybackState, PlaybackSummary,
    CONTROL_POLL_INTERVAL, MAX_DELAY, MIN_DELAY, PAUSE_POLL_INTERVAL, SLOW_DOWN_FACTOR,
    SPEED_UP_FACTOR,
};
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, warn};

/// Real-time playback of a route through a location sink
///
/// Each waypoint is applied in order, followed by a delay during which
/// keyboard controls are polled. Pausing holds the run without losing the
/// part of the delay already waited. The first time the dwell segment is
/// reached the delay drops to `MAX_DELAY`.
pub struct PlaybackEngine {
    route: PlannedRoute,
    initial_delay: f64,
    events: Option<EventSender>,
}

impl PlaybackEngine {
    pub fn new(route: PlannedRoute, initial_delay: f64) -> Self {
        Self {
            route,
            initial_delay,
            events: None,
        }
    }

    /// Report progress on this channel
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Play the route with keyboard controls on stdin until it completes,
    /// the sink fails, or Ctrl-C is pressed
    pub async fn play(&self, sink: &mut dyn LocationSink) -> Result<PlaybackSummary, PlaybackError> {
        self.play_with_terminal(STDIN_FD, sink, ctrl_c()).await
    }

    /// Hold the terminal behind `fd` in immediate mode for the whole run.
    ///
    /// The saved mode is restored before returning on every outcome. A run
    /// error takes precedence over a failed restore, which is only logged.
    pub async fn play_with_terminal<F>(
        &self,
        fd: TerminalFd,
        sink: &mut dyn LocationSink,
        shutdown: F,
    ) -> Result<PlaybackSummary, PlaybackError>
    where
        F: Future<Output = ()>,
    {
        let mut terminal = TerminalInput::acquire_fd(fd)?;
        let result = self.play_until(sink, &mut terminal, shutdown).await;
        let restored = terminal.release();

        match (result, restored) {
            (Ok(summary), Ok(())) => Ok(summary),
            (Ok(_), Err(e)) => Err(PlaybackError::Terminal(e)),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(restore)) => {
                error!("Failed to restore terminal mode: {}", restore);
                Err(e)
            }
        }
    }

    /// Play the route, stopping with `Interrupted` if `shutdown` resolves first
    pub async fn play_until<F>(
        &self,
        sink: &mut dyn LocationSink,
        input: &mut dyn SignalSource,
        shutdown: F,
    ) -> Result<PlaybackSummary, PlaybackError>
    where
        F: Future<Output = ()>,
    {
        if self.route.is_empty() {
            return Err(PlaybackError::EmptyRoute);
        }

        let mut state = PlaybackState::new(self.initial_delay);
        let started = Instant::now();

        info!(
            "Starting playback of {} waypoints through {} (delay {:.2}s)",
            self.route.len(),
            sink.name(),
            state.delay
        );

        let finished = {
            let run = self.run(&mut state, sink, input);
            tokio::select! {
                result = run => Some(result),
                _ = shutdown => None,
            }
        };

        match finished {
            Some(Ok(visited)) => Ok(PlaybackSummary {
                visited,
                elapsed: started.elapsed(),
            }),
            Some(Err(e)) => Err(e),
            None => {
                warn!("Playback interrupted at index {}", state.index);
                Err(PlaybackError::Interrupted { index: state.index })
            }
        }
    }

    async fn run(
        &self,
        state: &mut PlaybackState,
        sink: &mut dyn LocationSink,
        input: &mut dyn SignalSource,
    ) -> Result<usize, PlaybackError> {
        let total = self.route.len();
        self.emit(PlaybackEvent::Started {
            total,
            delay: state.delay,
        });

        while state.index < total {
            let index = state.index;
            let waypoint = self.route.waypoints[index];

            self.enter_dwell_if_due(state);
            self.wait_while_paused(state, input).await?;

            if let Err(failure) = sink.set_location(waypoint).await {
                error!("Step {}/{}: failed to set location: {}", index + 1, total, failure);
                return Err(PlaybackError::SinkFailure { index, failure });
            }

            debug!("Step {}/{} -> {}", index + 1, total, waypoint);
            self.emit(PlaybackEvent::Moved {
                index,
                total,
                waypoint,
                delay: state.delay,
            });

            self.hold(state, input).await?;
            state.index += 1;
        }

        info!("Playback completed: {} waypoints", total);
        self.emit(PlaybackEvent::Finished { visited: total });
        Ok(total)
    }

    /// One-shot switch to the slow dwell delay
    fn enter_dwell_if_due(&self, state: &mut PlaybackState) {
        let due = self
            .route
            .dwell_start
            .map_or(false, |start| state.index >= start);

        if due && !state.dwell_entered {
            state.dwell_entered = true;
            state.delay = MAX_DELAY;
            info!("Entering dwell phase at index {}", state.index);
            self.emit(PlaybackEvent::DwellEntered { index: state.index });
        }
    }

    /// Wait out the current delay while polling for controls.
    ///
    /// Only time spent running counts towards the delay, so a pause keeps
    /// whatever remained of it. Losing the input ends the run.
    async fn hold(
        &self,
        state: &mut PlaybackState,
        input: &mut dyn SignalSource,
    ) -> Result<(), PlaybackError> {
        let mut waited = Duration::ZERO;

        loop {
            if let Some(signal) = input.poll_signal()? {
                self.apply_signal(state, signal);
                self.wait_while_paused(state, input).await?;
            }

            let target = Duration::from_secs_f64(state.delay);
            if waited >= target {
                break;
            }

            let tick = CONTROL_POLL_INTERVAL.min(target - waited);
            let before = Instant::now();
            sleep(tick).await;
            waited += before.elapsed();
        }
        Ok(())
    }

    /// Block until a resume signal arrives; returns at once when running
    async fn wait_while_paused(
        &self,
        state: &mut PlaybackState,
        input: &mut dyn SignalSource,
    ) -> Result<(), PlaybackError> {
        while state.is_paused() {
            if input.poll_signal()? == Some(ControlSignal::Resume) {
                state.mode = PlaybackMode::Running;
                info!("Resumed at index {}", state.index);
                self.emit(PlaybackEvent::Resumed { index: state.index });
                break;
            }
            sleep(PAUSE_POLL_INTERVAL).await;
        }
        Ok(())
    }

    fn apply_signal(&self, state: &mut PlaybackState, signal: ControlSignal) {
        match signal {
            ControlSignal::Pause => {
                if !state.is_paused() {
                    state.mode = PlaybackMode::Paused;
                    info!("Paused at index {}", state.index);
                    self.emit(PlaybackEvent::Paused { index: state.index });
                }
            }
            ControlSignal::Resume => {}
            ControlSignal::SpeedUp => {
                self.set_delay(state, (state.delay * SPEED_UP_FACTOR).max(MIN_DELAY));
            }
            ControlSignal::SlowDown => {
                self.set_delay(state, (state.delay * SLOW_DOWN_FACTOR).min(MAX_DELAY));
            }
        }
    }

    fn set_delay(&self, state: &mut PlaybackState, delay: f64) {
        if delay != state.delay {
            state.delay = delay;
            debug!("Delay changed to {:.2}s", delay);
            self.emit(PlaybackEvent::DelayChanged { delay });
        }
    }

    fn emit(&self, event: PlaybackEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
