//! Key events as delivered by a Linux input device.
//!
//! The kernel reports every key transition as an `EV_KEY` event whose value
//! is `0` (release), `1` (press), or `2` (auto-repeat).  Only presses carry
//! meaning for the bridge; the other kinds are kept so the translator can
//! reject them explicitly.

/// The transition reported for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Release,
    Press,
    Repeat,
}

impl KeyKind {
    /// Maps an evdev `EV_KEY` value to a [`KeyKind`].
    ///
    /// Returns `None` for values the kernel does not define for key events.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(KeyKind::Release),
            1 => Some(KeyKind::Press),
            2 => Some(KeyKind::Repeat),
            _ => None,
        }
    }
}

/// A single key transition.
///
/// `code` uses the Linux `input-event-codes.h` numbering (`KEY_A` = 30,
/// `KEY_ENTER` = 28, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: u16,
    pub kind: KeyKind,
}

impl KeyEvent {
    pub fn new(code: u16, kind: KeyKind) -> Self {
        Self { code, kind }
    }

    pub fn press(code: u16) -> Self {
        Self::new(code, KeyKind::Press)
    }

    pub fn release(code: u16) -> Self {
        Self::new(code, KeyKind::Release)
    }

    pub fn repeat(code: u16) -> Self {
        Self::new(code, KeyKind::Repeat)
    }

    pub fn is_press(&self) -> bool {
        self.kind == KeyKind::Press
    }
}
