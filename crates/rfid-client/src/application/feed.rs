//! FeedTracker: turns received lines into published messages.
//!
//! Per connection the bridge sends a status line first, then any mix of
//! heartbeats and identifiers.  Both the status line and heartbeats count as
//! signs of life; only identifiers are counted and published.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rfid_core::{LineClassifier, ServerMessage};
use tracing::debug;

use crate::application::publisher::{MessagePublisher, PublishError};
use crate::domain::{ClientConfig, RfidMessage};

/// What one received line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Status(String),
    Heartbeat,
    Published(RfidMessage),
}

/// Per-client feed state kept across reconnects.
#[derive(Debug)]
pub struct FeedTracker {
    classifier: LineClassifier,
    uid: Option<String>,
    group_uid: Option<String>,
    connected: bool,
    message_count: u64,
    last_message: Option<SystemTime>,
    last_heartbeat: Option<SystemTime>,
}

impl FeedTracker {
    pub fn new(uid: Option<String>, group_uid: Option<String>) -> Self {
        Self {
            classifier: LineClassifier::new(),
            uid,
            group_uid,
            connected: false,
            message_count: 0,
            last_message: None,
            last_heartbeat: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.uid.clone(), config.group_uid.clone())
    }

    /// Marks a fresh connection; its first line is read as a status line.
    pub fn on_connect(&mut self) {
        self.classifier.reset();
        self.connected = true;
    }

    pub fn on_disconnect(&mut self) {
        self.connected = false;
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn message_count(&self) -> u64 {
        self.message_count
    }

    pub fn last_message(&self) -> Option<SystemTime> {
        self.last_message
    }

    pub fn last_heartbeat(&self) -> Option<SystemTime> {
        self.last_heartbeat
    }

    /// Classifies `line` (terminator stripped) received at `now`.
    ///
    /// Identifiers are counted and handed to `publisher` before returning.
    ///
    /// # Errors
    ///
    /// Returns the publisher's error; the message still counts as received.
    pub fn handle_line<P>(
        &mut self,
        line: &str,
        now: SystemTime,
        publisher: &mut P,
    ) -> Result<LineOutcome, PublishError>
    where
        P: MessagePublisher + ?Sized,
    {
        match self.classifier.classify(line) {
            ServerMessage::Preamble { device_name } => {
                self.last_heartbeat = Some(now);
                debug!("RFID status message: {device_name}");
                Ok(LineOutcome::Status(device_name))
            }
            ServerMessage::Heartbeat => {
                self.last_heartbeat = Some(now);
                debug!("RFID heartbeat");
                Ok(LineOutcome::Heartbeat)
            }
            ServerMessage::Identifier(identifier) => {
                self.last_message = Some(now);
                self.message_count += 1;
                let message = RfidMessage {
                    count: self.message_count,
                    date: epoch_millis(now),
                    message: identifier,
                    uid: self.uid.clone(),
                    group_uid: self.group_uid.clone(),
                };
                debug!("publishing RFID message {}: {:?}", message.count, message.message);
                publisher.publish(&message)?;
                Ok(LineOutcome::Published(message))
            }
        }
    }

    /// One-line summary, e.g.
    /// `connected; 3 messages received; last message 12s ago; last heartbeat 2s ago`.
    pub fn status(&self, now: SystemTime) -> String {
        format!(
            "{}; {} {} received; last message {}; last heartbeat {}",
            if self.connected { "connected" } else { "disconnected" },
            self.message_count,
            if self.message_count == 1 { "message" } else { "messages" },
            describe_age(self.last_message, now),
            describe_age(self.last_heartbeat, now),
        )
    }
}

/// Milliseconds since the Unix epoch; `0` before the epoch, saturating at
/// `u64::MAX` for times the field cannot hold.
fn epoch_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn describe_age(at: Option<SystemTime>, now: SystemTime) -> String {
    match at {
        None => "never".to_string(),
        Some(at) => {
            let age = now.duration_since(at).unwrap_or(Duration::ZERO);
            format!("{}s ago", age.as_secs())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
