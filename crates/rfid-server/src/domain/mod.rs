//! Domain layer for rfid-server.
//!
//! Holds plain configuration types with no I/O.  The infrastructure layer
//! and `main.rs` decide how the values are populated.

pub mod config;

pub use config::ServerConfig;
