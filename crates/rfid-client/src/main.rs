//! RFID Client: entry point.
//!
//! Connects to an RFID bridge and prints one JSON object per tag read on
//! stdout.  Logs go to stderr so stdout can be piped into another program.
//!
//! # Usage
//!
//! ```text
//! rfid-client [OPTIONS]
//!
//! Options:
//!   --config <FILE>           TOML config file [env: RFID_CLIENT_CONFIG]
//!   --host <HOST>             Bridge host [env: RFID_HOST]
//!   --port <PORT>             Bridge port [env: RFID_PORT]
//!   --uid <UID>               Reader id added to every message [env: RFID_UID]
//!   --group-uid <GROUP_UID>   Group id added to every message [env: RFID_GROUP_UID]
//!   --connect-retry <SECS>    Delay between reconnects [env: RFID_CONNECT_RETRY]
//!   --watchdog <SECS>         Reconnect after this much silence, 0 = off [env: RFID_WATCHDOG]
//! ```
//!
//! Flags override values from the config file; unset values fall back to
//! the file, then to the built-in defaults (`localhost:9090`, 60 s retry,
//! watchdog off).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rfid_client::application::FeedTracker;
use rfid_client::domain::ClientConfig;
use rfid_client::infrastructure::{run_feed, JsonLinesPublisher};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Publishes tag reads from an RFID bridge as JSON lines.
#[derive(Debug, Parser)]
#[command(
    name = "rfid-client",
    about = "Reads an RFID bridge feed and prints each tag as a JSON line",
    version
)]
struct Cli {
    /// TOML file with client settings.
    #[arg(long, env = "RFID_CLIENT_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "RFID_HOST")]
    host: Option<String>,

    #[arg(long, env = "RFID_PORT")]
    port: Option<u16>,

    #[arg(long, env = "RFID_UID")]
    uid: Option<String>,

    #[arg(long, env = "RFID_GROUP_UID")]
    group_uid: Option<String>,

    /// Seconds to wait before reconnecting.
    #[arg(long, env = "RFID_CONNECT_RETRY")]
    connect_retry: Option<u64>,

    /// Seconds without any line before forcing a reconnect; 0 disables.
    #[arg(long, env = "RFID_WATCHDOG")]
    watchdog: Option<u64>,
}

impl Cli {
    /// Loads the config file (if any) and applies the flag overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged settings are invalid.
    fn into_client_config(self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)
                .with_context(|| format!("cannot load config {}", path.display()))?,
            None => ClientConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.uid.is_some() {
            config.uid = self.uid;
        }
        if self.group_uid.is_some() {
            config.group_uid = self.group_uid;
        }
        if let Some(secs) = self.connect_retry {
            config.connect_retry_secs = secs;
        }
        if let Some(secs) = self.watchdog {
            config.watchdog_secs = secs;
        }

        config.validate().context("invalid client settings")?;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_client_config()?;
    match config.watchdog() {
        Some(window) => info!("configuring RFID watchdog for {window:?}"),
        None => info!("RFID watchdog disabled"),
    }

    let mut tracker = FeedTracker::from_config(&config);
    let mut publisher = JsonLinesPublisher::new(std::io::stdout());

    tokio::select! {
        result = run_feed(&config, &mut tracker, &mut publisher) => {
            result.context("cannot publish RFID messages")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("received Ctrl+C; shutting down");
        }
    }

    info!("{}", tracker.status(std::time::SystemTime::now()));
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            config: None,
            host: None,
            port: None,
            uid: None,
            group_uid: None,
            connect_retry: None,
            watchdog: None,
        }
    }

    #[test]
    fn test_no_flags_yield_defaults() {
        let config = bare_cli().into_client_config().unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        // Arrange
        let cli = Cli {
            host: Some("10.1.2.3".to_string()),
            port: Some(9191),
            uid: Some("Door 1".to_string()),
            watchdog: Some(90),
            ..bare_cli()
        };

        // Act
        let config = cli.into_client_config().unwrap();

        // Assert
        assert_eq!(config.address(), "10.1.2.3:9191");
        assert_eq!(config.uid.as_deref(), Some("Door 1"));
        assert_eq!(config.watchdog(), Some(Duration::from_secs(90)));
        assert_eq!(config.connect_retry(), Duration::from_secs(60));
    }

    #[test]
    fn test_zero_port_flag_is_rejected() {
        let cli = Cli {
            port: Some(0),
            ..bare_cli()
        };
        assert!(cli.into_client_config().is_err());
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/rfid-client.toml")),
            ..bare_cli()
        };
        let err = cli.into_client_config().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/rfid-client.toml"));
    }

    #[test]
    fn test_cli_parses_long_flags() {
        let cli = Cli::try_parse_from([
            "rfid-client",
            "--host",
            "gw",
            "--group-uid",
            "Building A",
            "--connect-retry",
            "5",
        ])
        .unwrap();
        assert_eq!(cli.host.as_deref(), Some("gw"));
        assert_eq!(cli.group_uid.as_deref(), Some("Building A"));
        assert_eq!(cli.connect_retry, Some(5));
    }
}
