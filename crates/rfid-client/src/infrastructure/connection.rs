//! TCP connection to the bridge and the reconnect loop.
//!
//! ```text
//!  ┌────────────┐  ok   ┌───────────────┐ EOF / error / watchdog
//!  │  connect   │──────▶│  read_feed    │──────────────┐
//!  └────────────┘       └───────────────┘              ▼
//!        ▲  refused                          sleep(connect_retry)
//!        └─────────────────────────────────────────────┘
//! ```
//!
//! Connection problems never end the loop.  A publisher failure does, since
//! reconnecting cannot fix a closed output.

use std::io;
use std::time::{Duration, SystemTime};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};
use tracing::{info, warn};

use crate::application::{FeedTracker, MessagePublisher, PublishError};
use crate::domain::ClientConfig;

/// Errors that can occur in the client network layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to RFID server at {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("RFID server communication error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl ClientError {
    /// `true` for failures a later reconnect may fix.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ClientError::Publish(_))
    }
}

/// Why a connection ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disconnect {
    /// The server closed the connection.
    Eof,
    /// No line arrived within the watchdog window.
    WatchdogExpired(Duration),
}

/// Reads lines until the feed ends, feeding each to `tracker`.
///
/// With a watchdog window each line must arrive within the window; any line,
/// heartbeats included, restarts it.
pub async fn read_feed<R, P>(
    reader: R,
    tracker: &mut FeedTracker,
    publisher: &mut P,
    watchdog: Option<Duration>,
) -> Result<Disconnect, ClientError>
where
    R: AsyncBufRead + Unpin,
    P: MessagePublisher + ?Sized,
{
    let mut lines = reader.lines();
    loop {
        let next = match watchdog {
            Some(window) => match timeout(window, lines.next_line()).await {
                Ok(next) => next?,
                Err(_elapsed) => return Ok(Disconnect::WatchdogExpired(window)),
            },
            None => lines.next_line().await?,
        };
        let Some(line) = next else {
            return Ok(Disconnect::Eof);
        };
        tracker.handle_line(&line, SystemTime::now(), publisher)?;
    }
}

/// Connects once and reads the feed until it ends.
pub async fn connect_once<P>(
    config: &ClientConfig,
    tracker: &mut FeedTracker,
    publisher: &mut P,
) -> Result<Disconnect, ClientError>
where
    P: MessagePublisher + ?Sized,
{
    let addr = config.address();
    info!("connecting to RFID server {addr}");
    let stream = TcpStream::connect(addr.as_str())
        .await
        .map_err(|source| ClientError::ConnectFailed {
            addr: addr.clone(),
            source,
        })?;
    info!("connected to RFID server {addr}");

    tracker.on_connect();
    let result = read_feed(BufReader::new(stream), tracker, publisher, config.watchdog()).await;
    tracker.on_disconnect();
    info!("disconnected from RFID server {addr}");
    result
}

/// Runs the reconnect loop.  Returns only when publishing fails.
pub async fn run_feed<P>(
    config: &ClientConfig,
    tracker: &mut FeedTracker,
    publisher: &mut P,
) -> Result<(), ClientError>
where
    P: MessagePublisher + ?Sized,
{
    loop {
        match connect_once(config, tracker, publisher).await {
            Ok(Disconnect::Eof) => info!("RFID server closed the connection"),
            Ok(Disconnect::WatchdogExpired(window)) => {
                info!("RFID watchdog timer tripped: no message received in {window:?}");
            }
            Err(e) if e.is_retryable() => warn!("{e}"),
            Err(e) => return Err(e),
        }
        info!("{}", tracker.status(SystemTime::now()));
        info!(
            "will try to connect to RFID server in {:?}",
            config.connect_retry()
        );
        sleep(config.connect_retry()).await;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
