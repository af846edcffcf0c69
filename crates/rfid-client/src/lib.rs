//! rfid-client library crate.
//!
//! Consumes the line feed of an RFID bridge and publishes every identifier
//! as an [`domain::RfidMessage`].
//!
//! ```text
//! RFID bridge (TCP, port 9090)
//!         ↓ status / ping / identifier lines
//! [rfid-client]
//!   ├── domain/           ClientConfig, RfidMessage
//!   ├── application/      FeedTracker, MessagePublisher
//!   └── infrastructure/   reconnect loop, JsonLinesPublisher
//!         ↓ one JSON object per line
//! stdout
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
