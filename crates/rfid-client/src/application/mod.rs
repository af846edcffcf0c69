//! Application layer for rfid-client.
//!
//! Knows how to interpret the bridge's line feed and what to publish; the
//! socket and the output writer live in the infrastructure layer.

pub mod feed;
pub mod publisher;

pub use feed::{FeedTracker, LineOutcome};
pub use publisher::{MessagePublisher, PublishError};
