//! Session: one client connection from preamble to close.
//!
//! # State machine
//!
//! ```text
//!            preamble sent
//! Greeting ───────────────▶ Active ──┐ heartbeat / identifier sent,
//!     │                      │  ▲    │ key text appended
//!     │ write failed         │  └────┘
//!     ▼                      ▼ write failed, malformed device read
//! Closing ◀──────────────────┘
//! ```
//!
//! Each call to [`Session::step`] performs exactly one transition, so tests
//! can drive the machine one state at a time.  Any device error other than
//! a malformed read is returned to the caller instead of closing the
//! session: it means the device itself is gone and no session can continue.
//!
//! The session borrows the key source and the client writer; it owns only
//! its identifier buffer, so every new client starts with an empty one.

use std::io;

use rfid_core::{IdentifierAssembler, KeyTranslator, ServerMessage, Translation};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::application::liveness::{Liveness, LivenessMonitor};
use crate::domain::ServerConfig;
use crate::infrastructure::input_device::{DeviceError, KeySource};

/// Why a session reached `Closing`.
#[derive(Debug, Error)]
pub enum SessionEnd {
    #[error("client write failed: {0}")]
    ClientGone(#[source] io::Error),
    #[error("device read failed: {0}")]
    DeviceFault(#[source] DeviceError),
}

#[derive(Debug)]
pub enum SessionState {
    Greeting,
    Active,
    Closing(SessionEnd),
}

/// Summary returned when a session finishes.
#[derive(Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub identifiers_sent: u64,
    pub heartbeats_sent: u64,
}

/// The per-client event loop.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    monitor: LivenessMonitor,
    translator: KeyTranslator,
    assembler: IdentifierAssembler,
    identifiers_sent: u64,
    heartbeats_sent: u64,
}

impl Session {
    /// Creates a session in `Greeting` using the US-layout translator.
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_translator(config, KeyTranslator::default())
    }

    pub fn with_translator(config: &ServerConfig, translator: KeyTranslator) -> Self {
        Self {
            state: SessionState::Greeting,
            monitor: LivenessMonitor::new(config.heartbeat_timeout),
            translator,
            assembler: IdentifierAssembler::new(config.identifier_capacity),
            identifiers_sent: 0,
            heartbeats_sent: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.state, SessionState::Closing(_))
    }

    /// The identifier collected so far.
    pub fn pending_identifier(&self) -> &str {
        self.assembler.as_str()
    }

    pub fn identifiers_sent(&self) -> u64 {
        self.identifiers_sent
    }

    pub fn heartbeats_sent(&self) -> u64 {
        self.heartbeats_sent
    }

    /// Runs the session until it reaches `Closing`.
    ///
    /// # Errors
    ///
    /// Returns the device error when the device fails in a way that ends
    /// the whole process.
    pub async fn run<S, W>(
        mut self,
        source: &mut S,
        client: &mut W,
    ) -> Result<SessionReport, DeviceError>
    where
        S: KeySource + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        loop {
            // Moves `end` out of `self.state` only on the path that returns,
            // so the loop never touches the moved-from field again.
            if let SessionState::Closing(end) = self.state {
                return Ok(SessionReport {
                    end,
                    identifiers_sent: self.identifiers_sent,
                    heartbeats_sent: self.heartbeats_sent,
                });
            }
            self.step(source, client).await?;
        }
    }

    /// Performs one state transition.  Does nothing once `Closing`.
    pub async fn step<S, W>(&mut self, source: &mut S, client: &mut W) -> Result<(), DeviceError>
    where
        S: KeySource + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        match self.state {
            SessionState::Greeting => {
                let preamble = ServerMessage::preamble(source.name());
                if self.deliver(client, &preamble).await {
                    self.state = SessionState::Active;
                }
                Ok(())
            }
            SessionState::Active => self.step_active(source, client).await,
            SessionState::Closing(_) => Ok(()),
        }
    }

    async fn step_active<S, W>(&mut self, source: &mut S, client: &mut W) -> Result<(), DeviceError>
    where
        S: KeySource + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let liveness = match self.monitor.wait(source).await {
            Ok(liveness) => liveness,
            Err(error) if error.is_session_fatal() => {
                warn!("closing session: {error}");
                self.state = SessionState::Closing(SessionEnd::DeviceFault(error));
                return Ok(());
            }
            Err(error) => return Err(error),
        };

        match liveness {
            Liveness::TimedOut => {
                // A tag never spans a silent window, so leftover text is
                // a fragment and is dropped before the heartbeat goes out.
                if !self.assembler.is_empty() {
                    debug!(
                        "discarding partial identifier ({} bytes) after silence",
                        self.assembler.len()
                    );
                }
                self.assembler.reset();
                debug!("device silent for {:?}; sending heartbeat", self.monitor.window());
                if self.deliver(client, &ServerMessage::Heartbeat).await {
                    self.heartbeats_sent += 1;
                }
            }
            Liveness::Ready(event) => match self.translator.translate(&event) {
                Translation::Text(text) => {
                    if !self.assembler.append(text) {
                        debug!("identifier full; dropped {text:?}");
                    }
                }
                Translation::Terminator => {
                    // Sent even when empty: every ENTER yields exactly one line.
                    let identifier = self.assembler.flush();
                    debug!("identifier complete: {identifier:?}");
                    if self
                        .deliver(client, &ServerMessage::Identifier(identifier))
                        .await
                    {
                        self.identifiers_sent += 1;
                    }
                }
                Translation::Ignored => {}
            },
        }
        Ok(())
    }

    /// Writes one line; on failure moves to `Closing` and returns `false`.
    async fn deliver<W>(&mut self, client: &mut W, message: &ServerMessage) -> bool
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        match write_line(client, message).await {
            Ok(()) => true,
            Err(error) => {
                debug!("client write failed: {error}");
                self.state = SessionState::Closing(SessionEnd::ClientGone(error));
                false
            }
        }
    }
}

async fn write_line<W>(client: &mut W, message: &ServerMessage) -> io::Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    client.write_all(message.encode().as_bytes()).await?;
    client.flush().await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
