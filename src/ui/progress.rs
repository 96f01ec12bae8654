use crate::playback::{EventReceiver, PlaybackEvent};
use chrono::Local;
use std::io::{self, Write};

/// Key legend shown before playback starts
pub const CONTROLS_LEGEND: &str = "Controls: [P]ause [R]esume [+]SpeedUp [-]SlowDown";

/// Render one playback event as terminal text
///
/// Step updates start with a carriage return so they overwrite each other on
/// a single line; status lines start on a fresh line.
pub fn render(event: &PlaybackEvent) -> String {
    let now = Local::now().format("%H:%M:%S");
    match event {
        PlaybackEvent::Started { total, delay } => {
            format!("Starting simulation of {} waypoints (delay: {:.2}s)\n", total, delay)
        }
        PlaybackEvent::Moved { index, total, waypoint, .. } => {
            format!("\rStep {}/{} -> {}", index + 1, total, waypoint)
        }
        PlaybackEvent::DwellEntered { .. } => {
            format!("\n[{}] Arrived, dwelling at destination\n", now)
        }
        PlaybackEvent::Paused { .. } => format!("\n[{}] Paused\n", now),
        PlaybackEvent::Resumed { .. } => format!("[{}] Resumed\n", now),
        PlaybackEvent::DelayChanged { delay } => {
            format!("\n[{}] Delay: {:.2}s\n", now, delay)
        }
        PlaybackEvent::Finished { visited } => {
            format!("\n\nSimulation completed! {} waypoints visited\n", visited)
        }
    }
}

/// Print events until the engine drops its sender
pub async fn present(mut events: EventReceiver) {
    while let Some(event) = events.recv().await {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(render(&event).as_bytes());
        let _ = stdout.flush();
    }
}
