//! Line protocol between the bridge and its client.

pub mod messages;

pub use messages::{LineClassifier, ServerMessage, HEARTBEAT, PREAMBLE_PREFIX};
