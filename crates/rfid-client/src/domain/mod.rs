//! Domain layer for rfid-client: configuration and the published record.

pub mod config;
pub mod message;

pub use config::{ClientConfig, ConfigError};
pub use message::RfidMessage;
