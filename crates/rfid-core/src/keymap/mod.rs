//! Key code to text translation.
//!
//! [`ScanCodeMap`] wraps an immutable 256-entry table; [`KeyTranslator`]
//! applies it to a single [`KeyEvent`] and recognises the terminator key.

pub mod us_layout;

pub use us_layout::{KEY_ENTER, SCAN_CODE_TABLE_SIZE, US_LAYOUT};

use crate::domain::key_event::KeyEvent;

/// Immutable lookup from key code to text.
#[derive(Debug, Clone, Copy)]
pub struct ScanCodeMap {
    table: &'static [&'static str; SCAN_CODE_TABLE_SIZE],
}

impl ScanCodeMap {
    /// Wraps a static table.
    pub const fn from_static(table: &'static [&'static str; SCAN_CODE_TABLE_SIZE]) -> Self {
        Self { table }
    }

    /// The US-layout table used by the bridge.
    pub const fn us_layout() -> Self {
        Self::from_static(&US_LAYOUT)
    }

    /// Returns the text for `code`, or `""` if the code is unmapped or out of range.
    pub fn lookup(&self, code: u16) -> &'static str {
        self.table.get(usize::from(code)).copied().unwrap_or("")
    }
}

impl Default for ScanCodeMap {
    fn default() -> Self {
        Self::us_layout()
    }
}

/// Result of translating one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// A press whose code maps to non-empty text.
    Text(&'static str),
    /// A press of the terminator key.
    Terminator,
    /// Releases, repeats, unmapped codes, and codes outside the table.
    Ignored,
}

/// Applies a [`ScanCodeMap`] to key events.
#[derive(Debug, Clone, Copy)]
pub struct KeyTranslator {
    map: ScanCodeMap,
    terminator: u16,
}

impl KeyTranslator {
    /// Creates a translator that uses `KEY_ENTER` as the terminator.
    pub fn new(map: ScanCodeMap) -> Self {
        Self {
            map,
            terminator: KEY_ENTER,
        }
    }

    pub fn translate(&self, event: &KeyEvent) -> Translation {
        if !event.is_press() {
            return Translation::Ignored;
        }
        if event.code == self.terminator {
            return Translation::Terminator;
        }
        match self.map.lookup(event.code) {
            "" => Translation::Ignored,
            text => Translation::Text(text),
        }
    }
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new(ScanCodeMap::us_layout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_A: u16 = 30;
    const KEY_F1: u16 = 59;
    const KEY_LEFTSHIFT: u16 = 42;

    #[test]
    fn test_lookup_out_of_range_is_empty() {
        let map = ScanCodeMap::us_layout();
        assert_eq!(map.lookup(255), "");
        assert_eq!(map.lookup(256), "");
        assert_eq!(map.lookup(u16::MAX), "");
    }

    #[test]
    fn test_press_of_mapped_key_yields_text() {
        let translator = KeyTranslator::default();
        assert_eq!(
            translator.translate(&KeyEvent::press(KEY_A)),
            Translation::Text("a")
        );
        assert_eq!(
            translator.translate(&KeyEvent::press(KEY_F1)),
            Translation::Text("<f1>")
        );
    }

    #[test]
    fn test_release_and_repeat_are_ignored() {
        let translator = KeyTranslator::default();
        for event in [
            KeyEvent::release(KEY_A),
            KeyEvent::repeat(KEY_A),
            KeyEvent::release(KEY_ENTER),
            KeyEvent::repeat(KEY_ENTER),
        ] {
            assert_eq!(translator.translate(&event), Translation::Ignored, "{event:?}");
        }
    }

    #[test]
    fn test_enter_press_is_terminator() {
        let translator = KeyTranslator::default();
        assert_eq!(
            translator.translate(&KeyEvent::press(KEY_ENTER)),
            Translation::Terminator
        );
    }

    #[test]
    fn test_unmapped_and_large_codes_are_ignored() {
        let translator = KeyTranslator::default();
        assert_eq!(
            translator.translate(&KeyEvent::press(KEY_LEFTSHIFT)),
            Translation::Ignored
        );
        assert_eq!(
            translator.translate(&KeyEvent::press(0x2FF)),
            Translation::Ignored
        );
    }

    #[test]
    fn test_custom_table_is_used() {
        static TABLE: [&str; SCAN_CODE_TABLE_SIZE] = {
            let mut t = [""; SCAN_CODE_TABLE_SIZE];
            t[200] = "X";
            t
        };
        let translator = KeyTranslator::new(ScanCodeMap::from_static(&TABLE));
        assert_eq!(
            translator.translate(&KeyEvent::press(200)),
            Translation::Text("X")
        );
        assert_eq!(
            translator.translate(&KeyEvent::press(KEY_A)),
            Translation::Ignored
        );
    }
}
