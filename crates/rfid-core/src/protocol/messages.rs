//! Server-to-client line messages.
//!
//! Every message is one line of UTF-8 text terminated by `\n`:
//!
//! | Message    | Wire form                     | When                          |
//! |------------|-------------------------------|-------------------------------|
//! | Preamble   | `Reading from: <device>\n`    | once, right after accept      |
//! | Identifier | `<identifier>\n`              | on every terminator key press |
//! | Heartbeat  | `ping\n`                      | after each silent window      |
//!
//! The client never sends anything.  Because identifiers are free text, a
//! client can only tell them apart from heartbeats by content, and from the
//! preamble by position; [`LineClassifier`] encodes those rules.

/// The heartbeat line, without its terminator.
pub const HEARTBEAT: &str = "ping";

/// Prefix of the preamble line.
pub const PREAMBLE_PREFIX: &str = "Reading from: ";

/// A line sent by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Names the input device feeding this connection.
    Preamble { device_name: String },
    /// One completed identifier; may be empty.
    Identifier(String),
    /// Liveness signal after a silent window.
    Heartbeat,
}

impl ServerMessage {
    /// Builds a preamble, replacing line breaks in `device_name` so the
    /// preamble stays on one line.
    pub fn preamble(device_name: &str) -> Self {
        ServerMessage::Preamble {
            device_name: device_name.replace(['\r', '\n'], " "),
        }
    }

    /// Encodes the message as a newline-terminated line.
    pub fn encode(&self) -> String {
        match self {
            ServerMessage::Preamble { device_name } => format!("{PREAMBLE_PREFIX}{device_name}\n"),
            ServerMessage::Identifier(identifier) => format!("{identifier}\n"),
            ServerMessage::Heartbeat => format!("{HEARTBEAT}\n"),
        }
    }
}

/// Classifies received lines (with the terminator already stripped).
///
/// The first line of a connection is always the preamble.  After that a
/// line equal to `ping`, ignoring ASCII case, is a heartbeat and anything
/// else is an identifier.
#[derive(Debug, Default)]
pub struct LineClassifier {
    seen_preamble: bool,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, line: &str) -> ServerMessage {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !self.seen_preamble {
            self.seen_preamble = true;
            let device_name = line.strip_prefix(PREAMBLE_PREFIX).unwrap_or(line);
            return ServerMessage::Preamble {
                device_name: device_name.to_string(),
            };
        }
        if line.eq_ignore_ascii_case(HEARTBEAT) {
            ServerMessage::Heartbeat
        } else {
            ServerMessage::Identifier(line.to_string())
        }
    }

    /// Forgets the preamble so the classifier can be reused after a reconnect.
    pub fn reset(&mut self) {
        self.seen_preamble = false;
    }
}
