//! rfid-server library crate.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! ```text
//! RFID reader (evdev, exclusively grabbed)
//!         ↓ key events
//! [rfid-server]
//!   ├── domain/           ServerConfig
//!   ├── application/      LivenessMonitor, Session (Greeting → Active → Closing)
//!   └── infrastructure/
//!         ├── input_device/ KeySource trait, evdev adapter, scripted mock
//!         └── network/      listener binding and the sequential accept loop
//!         ↓ newline-framed text
//! TCP client (port 9090)
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
