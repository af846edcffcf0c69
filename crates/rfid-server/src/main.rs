//! RFID Server: entry point.
//!
//! Grabs a keyboard-emulating RFID reader and streams each tag it reads to a
//! single TCP client as one line of text.
//!
//! # Usage
//!
//! ```text
//! rfid-server [DEVICE]
//!
//! Arguments:
//!   [DEVICE]  evdev node of the reader [env: RFID_DEVICE] [default: /dev/rfid-reader]
//! ```
//!
//! The listening port (9090), heartbeat window (10 s) and identifier
//! capacity (1024 bytes) are fixed.  Logging is controlled by `RUST_LOG`.
//!
//! # Lifecycle
//!
//! 1. Open and exclusively grab the device.
//! 2. Bind port 9090 with address reuse.
//! 3. Serve clients one at a time until Ctrl+C or a device failure.
//! 4. Release the grab so the reader types into the console again.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rfid_server::domain::config::{ServerConfig, DEFAULT_DEVICE_PATH};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Bridges a keyboard-emulating RFID reader to a TCP client on port 9090.
#[derive(Debug, Parser)]
#[command(
    name = "rfid-server",
    about = "Streams RFID tag reads from an input device to a TCP client",
    version
)]
struct Cli {
    /// Path of the reader's evdev node.
    #[arg(default_value = DEFAULT_DEVICE_PATH, env = "RFID_DEVICE")]
    device: PathBuf,
}

impl Cli {
    fn into_server_config(self) -> ServerConfig {
        ServerConfig::for_device(self.device)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Single-threaded runtime: one session at a time, and the device read is the
/// only thing that ever waits.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config();
    run(config).await
}

#[cfg(target_os = "linux")]
async fn run(config: ServerConfig) -> anyhow::Result<()> {
    use anyhow::Context;
    use rfid_server::infrastructure::input_device::linux::EvdevKeySource;
    use rfid_server::infrastructure::input_device::KeySource;
    use rfid_server::infrastructure::{bind_listener, serve};
    use tracing::{info, warn};

    let mut device = EvdevKeySource::open(&config.device_path)
        .with_context(|| format!("cannot use input device {}", config.device_path.display()))?;
    info!("reading from: {}", device.name());

    let listener = bind_listener(config.bind_addr)
        .with_context(|| format!("cannot listen on {}", config.bind_addr))?;
    info!("listening on {}", config.bind_addr);

    let outcome = tokio::select! {
        served = serve(&listener, &mut device, &config) => {
            served.context("input device failed")
        }
        signal = tokio::signal::ctrl_c() => {
            info!("received Ctrl+C; shutting down");
            signal.context("failed to listen for Ctrl+C")
        }
    };

    if let Err(e) = device.release() {
        warn!("{e}");
    }
    info!("RFID server stopped");
    outcome
}

#[cfg(not(target_os = "linux"))]
async fn run(config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "cannot open {}: evdev input devices are only available on Linux",
        config.device_path.display()
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
