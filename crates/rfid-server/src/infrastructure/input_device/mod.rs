//! Input device infrastructure.
//!
//! On Linux the RFID reader appears as an evdev node (`/dev/input/eventN`,
//! usually symlinked to `/dev/rfid-reader` by a udev rule).  The device is
//! opened once and grabbed with `EVIOCGRAB` so the console and any desktop
//! session never see the reader's keystrokes.
//!
//! # Testability
//!
//! The [`KeySource`] trait lets the session loop run against
//! [`mock::MockKeySource`], a scripted source with controllable silences,
//! without a real device.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use rfid_core::KeyEvent;
use thiserror::Error;

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;

/// Error type for input device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("failed to open input device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to grab exclusive access to {path}: {source}")]
    Grab {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to release exclusive access: {0}")]
    Release(#[source] io::Error),
    /// A short or undecodable event read.  Ends the current session only.
    #[error("malformed event from input device: {0}")]
    Malformed(String),
    #[error("input device read failed: {0}")]
    Read(#[source] io::Error),
    #[error("input device closed")]
    Closed,
}

impl DeviceError {
    /// `true` if the error ends only the current client session; every other
    /// device error leaves no way to keep serving and stops the process.
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, DeviceError::Malformed(_))
    }
}

/// A source of key events from an exclusively held device.
///
/// Implementations retry reads interrupted by a signal internally, so
/// callers never see `ErrorKind::Interrupted`.
///
/// Waiting for readiness and reading are one operation here: the evdev
/// stream polls the descriptor and reads in the same `next_event` call.  A
/// failed readiness wait therefore surfaces as [`DeviceError::Read`] and is
/// process-fatal, not session-fatal.  Only [`DeviceError::Malformed`] ends
/// just the current session (see [`DeviceError::is_session_fatal`]).
#[async_trait]
pub trait KeySource: Send {
    /// Human-readable device name, sent to each client in the preamble.
    fn name(&self) -> &str;

    /// Waits for the next key event.
    ///
    /// Must be cancel-safe: dropping the future before it completes loses no
    /// events, because the liveness monitor and the accept loop both race
    /// this call against a timer or a new connection.
    async fn next_event(&mut self) -> Result<KeyEvent, DeviceError>;
}
