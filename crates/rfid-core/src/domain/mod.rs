//! Domain layer: pure types with no I/O.
//!
//! - **`key_event`** – A single key transition read from the input device.
//! - **`identifier`** – The bounded buffer that turns a burst of key text
//!   into one identifier.

pub mod identifier;
pub mod key_event;
