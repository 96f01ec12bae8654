pub mod csv;
pub mod keyboard;
#[cfg(all(test, target_os = "linux"))]
pub mod pty;
#[cfg(test)]
pub mod scripted;

pub use self::csv::load_route_csv;
pub use keyboard::{ControlSignal, SignalSource, TerminalFd, TerminalInput, STDIN_FD};
#[cfg(test)]
pub use scripted::ScriptedInput;
