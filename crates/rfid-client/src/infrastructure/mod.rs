//! Infrastructure layer for rfid-client.
//!
//! - `connection`: TCP connection to the bridge, watchdog, reconnect loop
//! - `json_lines`: the stdout publisher

pub mod connection;
pub mod json_lines;

pub use connection::{connect_once, read_feed, run_feed, ClientError, Disconnect};
pub use json_lines::JsonLinesPublisher;
