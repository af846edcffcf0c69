//! evdev-backed key source for Linux.
//!
//! Opens the reader's event node, records its name, grabs it exclusively,
//! and converts the device into a tokio event stream.  Only `EV_KEY` events
//! are surfaced; `EV_SYN`, `EV_MSC` and friends are consumed silently.
//!
//! # Error mapping
//!
//! | `io::ErrorKind`                   | Result                                 |
//! |-----------------------------------|----------------------------------------|
//! | `Interrupted`                     | read retried, no state change          |
//! | `UnexpectedEof`, `InvalidData`    | [`DeviceError::Malformed`] (session)   |
//! | anything else                     | [`DeviceError::Read`] (process)        |
//!
//! # Permissions
//!
//! Reading `/dev/input/event*` normally requires root or membership of the
//! `input` group.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use evdev::{Device, EventStream, EventType};
use rfid_core::{KeyEvent, KeyKind};
use tracing::{debug, info};

use super::{DeviceError, KeySource};

/// Name reported when the kernel does not provide one.
const UNKNOWN_DEVICE_NAME: &str = "Unknown";

/// An exclusively grabbed evdev input device.
pub struct EvdevKeySource {
    stream: EventStream,
    name: String,
    path: PathBuf,
    grabbed: bool,
}

impl EvdevKeySource {
    /// Opens `path` and takes exclusive access.
    ///
    /// # Errors
    ///
    /// [`DeviceError::Open`] if the node cannot be opened or turned into an
    /// async stream, [`DeviceError::Grab`] if another process already holds
    /// the grab.
    pub fn open(path: &Path) -> Result<Self, DeviceError> {
        let mut device = Device::open(path).map_err(|source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let name = device.name().unwrap_or(UNKNOWN_DEVICE_NAME).to_string();

        device.grab().map_err(|source| DeviceError::Grab {
            path: path.to_path_buf(),
            source,
        })?;
        info!("grabbed input device {} ({name})", path.display());

        let stream = device.into_event_stream().map_err(|source| DeviceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            stream,
            name,
            path: path.to_path_buf(),
            grabbed: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Releases the exclusive grab.  Calling it twice is a no-op.
    pub fn release(&mut self) -> Result<(), DeviceError> {
        if !self.grabbed {
            return Ok(());
        }
        self.stream
            .device_mut()
            .ungrab()
            .map_err(DeviceError::Release)?;
        self.grabbed = false;
        info!("released input device {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl KeySource for EvdevKeySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next_event(&mut self) -> Result<KeyEvent, DeviceError> {
        loop {
            match self.stream.next_event().await {
                Ok(event) if event.event_type() == EventType::KEY => {
                    match KeyKind::from_value(event.value()) {
                        Some(kind) => return Ok(KeyEvent::new(event.code(), kind)),
                        None => debug!("skipping key event with value {}", event.value()),
                    }
                }
                // EV_SYN / EV_MSC frames around each key; not interesting.
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                    debug!("device read interrupted; retrying");
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData
                    ) =>
                {
                    return Err(DeviceError::Malformed(e.to_string()));
                }
                Err(e) => return Err(DeviceError::Read(e)),
            }
        }
    }
}
