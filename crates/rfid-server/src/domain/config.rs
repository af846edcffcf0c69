//! Server configuration.
//!
//! [`ServerConfig`] collects every runtime setting in one plain struct.  Only
//! the device path is exposed on the command line; the port, heartbeat window,
//! and identifier capacity are fixed for deployments and overridden only by
//! tests that need short timeouts or an ephemeral port.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use rfid_core::DEFAULT_IDENTIFIER_CAPACITY;

/// Device opened when no path is given.
pub const DEFAULT_DEVICE_PATH: &str = "/dev/rfid-reader";

/// TCP port the bridge listens on.
pub const DEFAULT_PORT: u16 = 9090;

/// Silence after which a heartbeat is sent.
pub const DEFAULT_HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(10);

/// All runtime configuration for the bridge.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path of the evdev node for the RFID reader.
    pub device_path: PathBuf,
    /// Listening address; all interfaces on port 9090 by default.
    pub bind_addr: SocketAddr,
    /// Maximum device silence before a `ping` line is sent.
    pub heartbeat_timeout: Duration,
    /// Maximum identifier length in bytes.
    pub identifier_capacity: usize,
}

impl ServerConfig {
    /// Default configuration reading from `device_path`.
    pub fn for_device(device_path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: device_path.into(),
            ..Self::default()
        }
    }
}

impl Default for ServerConfig {
    /// | Field               | Default             |
    /// |---------------------|---------------------|
    /// | device_path         | `/dev/rfid-reader`  |
    /// | bind_addr           | `0.0.0.0:9090`      |
    /// | heartbeat_timeout   | 10 seconds          |
    /// | identifier_capacity | 1024 bytes          |
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            heartbeat_timeout: DEFAULT_HEARTBEAT_TIMEOUT,
            identifier_capacity: DEFAULT_IDENTIFIER_CAPACITY,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
