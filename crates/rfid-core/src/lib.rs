//! # rfid-core
//!
//! Shared library for the RFID keyboard bridge containing the scan-code
//! translation table, the identifier assembly rules, and the newline-framed
//! wire protocol spoken between the bridge and its client.
//!
//! This crate is used by both the server (`rfid-server`) and the feed client
//! (`rfid-client`).  It has zero dependencies on OS APIs, input devices, or
//! network sockets.
//!
//! # Architecture overview
//!
//! A keyboard-emulating RFID reader "types" the tag number it just read,
//! followed by ENTER, exactly as if someone pressed the keys.  The bridge
//! grabs the reader's Linux input device, turns those key presses back into
//! text, and streams one line per tag to a TCP client.
//!
//! - **`keymap`** – The fixed 256-entry table from Linux key codes to text,
//!   and the [`KeyTranslator`] that applies it to a single key event.
//!
//! - **`domain`** – Pure types: [`KeyEvent`] and the bounded
//!   [`IdentifierAssembler`] that collects text until the terminator key.
//!
//! - **`protocol`** – How lines travel over the socket: the preamble, the
//!   `ping` heartbeat, and identifier lines, plus the client-side classifier.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::identifier::{IdentifierAssembler, DEFAULT_IDENTIFIER_CAPACITY};
pub use domain::key_event::{KeyEvent, KeyKind};
pub use keymap::{KeyTranslator, ScanCodeMap, Translation};
pub use protocol::messages::{LineClassifier, ServerMessage, HEARTBEAT};
