//! Application layer for rfid-server.
//!
//! Owns the stateful part of the bridge: the [`liveness::LivenessMonitor`]
//! that turns device silence into heartbeats, and the per-client
//! [`session::Session`] state machine that drives translation, identifier
//! assembly and writes to the client.
//!
//! # What does NOT belong here?
//!
//! - Opening or grabbing the input device (infrastructure)
//! - Binding sockets or accepting clients (infrastructure)
//! - The scan-code table and line formats (`rfid_core`)

pub mod liveness;
pub mod session;

pub use liveness::{Liveness, LivenessMonitor, MonitorState};
pub use session::{Session, SessionEnd, SessionReport, SessionState};
