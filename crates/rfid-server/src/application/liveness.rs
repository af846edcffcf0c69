//! LivenessMonitor: bounded wait for device activity.
//!
//! Each call to [`LivenessMonitor::wait`] races one `next_event` against a
//! countdown.  If the reader produces an event first the caller gets it;
//! if the countdown wins the caller is told to send a heartbeat.  The
//! countdown restarts on every call, so the heartbeat fires only after a
//! full window of silence.

use std::time::Duration;

use rfid_core::KeyEvent;
use tokio::time::timeout;

use crate::infrastructure::input_device::{DeviceError, KeySource};

/// Outcome of one bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The device produced an event within the window.
    Ready(KeyEvent),
    /// The window elapsed with no device activity.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Waiting,
    TimedOut,
}

/// Races device reads against a fixed silence window.
#[derive(Debug)]
pub struct LivenessMonitor {
    window: Duration,
    state: MonitorState,
}

impl LivenessMonitor {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: MonitorState::Waiting,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Waits up to one window for the next event from `source`.
    ///
    /// # Errors
    ///
    /// Device errors are returned unchanged; the caller decides whether they
    /// end the session or the process.
    pub async fn wait<S>(&mut self, source: &mut S) -> Result<Liveness, DeviceError>
    where
        S: KeySource + ?Sized,
    {
        self.state = MonitorState::Waiting;
        // On expiry `timeout` drops the `next_event` future; the source's
        // cancel safety guarantees no key event is lost with it.
        match timeout(self.window, source.next_event()).await {
            Ok(Ok(event)) => Ok(Liveness::Ready(event)),
            Ok(Err(error)) => Err(error),
            Err(_elapsed) => {
                self.state = MonitorState::TimedOut;
                Ok(Liveness::TimedOut)
            }
        }
    }
}
