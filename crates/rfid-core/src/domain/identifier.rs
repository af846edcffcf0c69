//! Bounded accumulation of translated key text into identifiers.
//!
//! An RFID reader types a tag as a burst of key presses followed by ENTER.
//! [`IdentifierAssembler`] collects the text of those presses and hands the
//! finished identifier back when the terminator arrives.
//!
//! # Overflow policy
//!
//! The buffer never grows beyond its capacity.  A text unit that would not
//! fit is dropped *whole*: a multi-character unit such as `"<f1>"` is never
//! split.  Later units that still fit are appended normally, so a long burst
//! keeps its prefix and any short units that squeeze in at the end.

/// Capacity used by the bridge for a single identifier, in bytes.
pub const DEFAULT_IDENTIFIER_CAPACITY: usize = 1024;

/// Line buffer for one in-progress identifier.
#[derive(Debug, Clone)]
pub struct IdentifierAssembler {
    buffer: String,
    capacity: usize,
}

impl IdentifierAssembler {
    /// Creates an empty assembler holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `text` if the result stays within capacity.
    ///
    /// Returns `false` when the text was dropped.
    pub fn append(&mut self, text: &str) -> bool {
        if self.buffer.len() + text.len() > self.capacity {
            return false;
        }
        self.buffer.push_str(text);
        true
    }

    /// Returns the accumulated identifier and leaves the buffer empty.
    ///
    /// An empty string is a valid identifier: it corresponds to a terminator
    /// with no text since the previous flush.
    pub fn flush(&mut self) -> String {
        let identifier = self.buffer.clone();
        self.buffer.clear();
        identifier
    }

    /// Discards any in-progress identifier.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for IdentifierAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_concatenates_in_order() {
        let mut asm = IdentifierAssembler::default();
        for text in ["0", "4", "a", "f"] {
            assert!(asm.append(text));
        }
        assert_eq!(asm.as_str(), "04af");
    }

    #[test]
    fn test_append_fills_exactly_to_capacity() {
        // Arrange
        let mut asm = IdentifierAssembler::new(4);

        // Act
        let accepted = asm.append("abcd");

        // Assert
        assert!(accepted);
        assert_eq!(asm.len(), 4);
    }

    #[test]
    fn test_append_drops_unit_that_would_overflow() {
        // Arrange: 6 of 8 bytes used
        let mut asm = IdentifierAssembler::new(8);
        asm.append("123456");

        // Act: a 4-byte unit does not fit and must not be split
        let accepted = asm.append("<f1>");

        // Assert
        assert!(!accepted);
        assert_eq!(asm.as_str(), "123456");
    }

    #[test]
    fn test_append_continues_after_dropped_unit() {
        let mut asm = IdentifierAssembler::new(8);
        asm.append("123456");
        asm.append("<f1>");

        assert!(asm.append("7"));
        assert!(asm.append("8"));
        assert!(!asm.append("9"));
        assert_eq!(asm.as_str(), "12345678");
    }

    #[test]
    fn test_flush_returns_contents_and_resets() {
        let mut asm = IdentifierAssembler::default();
        asm.append("abc");

        assert_eq!(asm.flush(), "abc");
        assert!(asm.is_empty());
        assert_eq!(asm.flush(), "");
    }

    #[test]
    fn test_flush_on_empty_buffer_yields_empty_identifier() {
        let mut asm = IdentifierAssembler::default();
        assert_eq!(asm.flush(), "");
    }

    #[test]
    fn test_reset_discards_partial_identifier() {
        let mut asm = IdentifierAssembler::default();
        asm.append("partial");

        asm.reset();

        assert!(asm.is_empty());
        assert_eq!(asm.capacity(), DEFAULT_IDENTIFIER_CAPACITY);
    }

    #[test]
    fn test_zero_capacity_accepts_only_empty_text() {
        let mut asm = IdentifierAssembler::new(0);
        assert!(asm.append(""));
        assert!(!asm.append("a"));
    }
}
