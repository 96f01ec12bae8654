use std::io;
use tracing::{debug, error};

/// Live playback control, one per keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    Pause,
    Resume,
    SpeedUp,
    SlowDown,
}

impl ControlSignal {
    /// Map a keystroke to a signal; anything unrecognised is ignored
    pub fn from_key(key: u8) -> Option<Self> {
        match key.to_ascii_lowercase() {
            b'p' => Some(ControlSignal::Pause),
            b'r' => Some(ControlSignal::Resume),
            b'+' => Some(ControlSignal::SpeedUp),
            b'-' => Some(ControlSignal::SlowDown),
            _ => None,
        }
    }
}

/// Source of control signals, polled without blocking
///
/// An `Err` means the input is gone (hangup, EOF, read failure) and playback
/// can no longer be controlled.
pub trait SignalSource {
    /// Return the next pending signal, or `None` immediately if there is none
    fn poll_signal(&mut self) -> io::Result<Option<ControlSignal>>;
}

/// File descriptor of a terminal
pub type TerminalFd = std::os::raw::c_int;

/// Standard input
pub const STDIN_FD: TerminalFd = 0;

/// Terminal keyboard input in immediate (cbreak) mode
///
/// Acquiring switches the terminal out of line-buffered mode with echo off,
/// so single keystrokes are readable without Enter. The previous mode is
/// restored exactly once: by `release`, or on drop if `release` was never
/// called.
#[cfg(unix)]
pub struct TerminalInput {
    fd: TerminalFd,
    saved: Option<libc::termios>,
}

#[cfg(unix)]
impl TerminalInput {
    /// Put the terminal behind `fd` into immediate mode
    pub fn acquire_fd(fd: TerminalFd) -> io::Result<Self> {
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } < 0 {
            return Err(io::Error::last_os_error());
        }

        let mut immediate = original;
        immediate.c_lflag &= !(libc::ICANON | libc::ECHO);
        immediate.c_cc[libc::VMIN] = 1;
        immediate.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &immediate) } < 0 {
            return Err(io::Error::last_os_error());
        }

        debug!("Terminal input acquired on fd {}", fd);
        Ok(Self {
            fd,
            saved: Some(original),
        })
    }

    /// Whether the terminal is still held in immediate mode
    #[cfg(test)]
    pub fn is_acquired(&self) -> bool {
        self.saved.is_some()
    }

    /// Restore the saved terminal mode. Later calls are no-ops.
    pub fn release(&mut self) -> io::Result<()> {
        if let Some(original) = self.saved.take() {
            if unsafe { libc::tcsetattr(self.fd, libc::TCSADRAIN, &original) } < 0 {
                return Err(io::Error::last_os_error());
            }
            debug!("Terminal input released on fd {}", self.fd);
        }
        Ok(())
    }

    /// Read one byte if one is pending, without blocking.
    ///
    /// A hangup, end of input or failed read is an error.
    fn read_key(&self) -> io::Result<Option<u8>> {
        let mut pollfd = libc::pollfd {
            fd: self.fd,
            events: libc::POLLIN,
            revents: 0,
        };

        let result = unsafe { libc::poll(&mut pollfd, 1, 0) };
        if result < 0 {
            let err = io::Error::last_os_error();
            return match err.kind() {
                io::ErrorKind::Interrupted => Ok(None),
                _ => Err(err),
            };
        }
        if result == 0 {
            return Ok(None);
        }
        if pollfd.revents & (libc::POLLERR | libc::POLLNVAL) != 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal input error"));
        }
        if pollfd.revents & libc::POLLIN == 0 {
            if pollfd.revents & libc::POLLHUP != 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal hung up"));
            }
            return Ok(None);
        }

        let mut byte = 0u8;
        let n = unsafe { libc::read(self.fd, &mut byte as *mut u8 as *mut libc::c_void, 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "terminal input closed")),
            _ => {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
                    _ => Err(err),
                }
            }
        }
    }
}

#[cfg(unix)]
impl SignalSource for TerminalInput {
    fn poll_signal(&mut self) -> io::Result<Option<ControlSignal>> {
        Ok(self.read_key()?.and_then(ControlSignal::from_key))
    }
}

#[cfg(unix)]
impl Drop for TerminalInput {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            error!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Terminal keyboard input; immediate mode needs termios
#[cfg(not(unix))]
pub struct TerminalInput;

#[cfg(not(unix))]
impl TerminalInput {
    pub fn acquire_fd(_fd: TerminalFd) -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "immediate terminal input requires a unix terminal",
        ))
    }

    pub fn release(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(not(unix))]
impl SignalSource for TerminalInput {
    fn poll_signal(&mut self) -> io::Result<Option<ControlSignal>> {
        Ok(None)
    }
}
