//! Feed client configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file at all) yields a client that connects to
//! `localhost:9090`.
//!
//! ```toml
//! host = "reader-gw.local"
//! port = 9090
//! uid = "Door 1"
//! group_uid = "Building A"
//! connect_retry_secs = 60
//! watchdog_secs = 120
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one feed client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Host name or IP address of the bridge.
    pub host: String,
    /// TCP port of the bridge.
    pub port: u16,
    /// Identifies this reader in published messages.
    pub uid: Option<String>,
    /// Groups several readers in published messages.
    pub group_uid: Option<String>,
    /// Delay before reconnecting after a disconnect.
    pub connect_retry_secs: u64,
    /// Reconnect if no line arrives for this long.  `0` disables the watchdog.
    pub watchdog_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9090,
            uid: None,
            group_uid: None,
            connect_retry_secs: 60,
            watchdog_secs: 0,
        }
    }
}

impl ClientConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read (a missing file is an
    /// error here since the path was given explicitly), [`ConfigError::Parse`]
    /// for malformed TOML, [`ConfigError::Invalid`] for unusable values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Rejects settings the connection loop cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be between 1 and 65535".to_string()));
        }
        Ok(())
    }

    /// `host:port`, suitable for `TcpStream::connect`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_retry(&self) -> Duration {
        Duration::from_secs(self.connect_retry_secs)
    }

    /// The watchdog window, or `None` when disabled.
    pub fn watchdog(&self) -> Option<Duration> {
        (self.watchdog_secs > 0).then(|| Duration::from_secs(self.watchdog_secs))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
