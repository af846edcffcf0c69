//! Infrastructure layer for the bridge.
//!
//! Contains OS-facing adapters: the evdev input device and the TCP
//! listener with its sequential accept loop.
//!
//! **Dependency rule**: this layer may depend on `application`, `domain`
//! and `rfid_core`; `application` only names the [`input_device::KeySource`]
//! trait and its error type from here.

pub mod input_device;
pub mod network;

pub use network::{bind_listener, serve};
