//! Byte classification and display rendering.

use super::capability::TerminalIo;

/// What a byte is, for display purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Control,
    Printable,
}

/// Maps bytes to their kind and display line.
pub struct KeyClassifier;

impl KeyClassifier {
    /// Classify a byte using the capability's control-character predicate.
    ///
    /// The predicate is delegated rather than hard-coded because some
    /// platforms admit locale-dependent variants of `iscntrl`.
    pub fn classify<T: TerminalIo>(tio: &T, byte: u8) -> KeyKind {
        if tio.is_control_byte(byte) {
            KeyKind::Control
        } else {
            KeyKind::Printable
        }
    }

    /// Render the display line for a byte.
    ///
    /// Control bytes render as bare uppercase hex with no padding; printable
    /// bytes as hex, a space, and the character itself.
    pub fn render(byte: u8, kind: KeyKind) -> String {
        match kind {
            KeyKind::Control => format!("{:X}", byte),
            KeyKind::Printable => format!("{:X} {}", byte, byte as char),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::capability::testing::FakeTerminalIo;
    use super::*;

    #[test]
    fn test_control_range_classifies_as_control() {
        let tio = FakeTerminalIo::new(vec![]);
        for byte in (0u8..=0x1f).chain(std::iter::once(0x7f)) {
            assert_eq!(KeyClassifier::classify(&tio, byte), KeyKind::Control);
        }
    }

    #[test]
    fn test_printable_range_classifies_as_printable() {
        let tio = FakeTerminalIo::new(vec![]);
        for byte in 0x20u8..=0x7e {
            assert_eq!(KeyClassifier::classify(&tio, byte), KeyKind::Printable);
        }
    }

    #[test]
    fn test_control_render_is_bare_hex() {
        assert_eq!(KeyClassifier::render(0x03, KeyKind::Control), "3");
        assert_eq!(KeyClassifier::render(0x1b, KeyKind::Control), "1B");
        assert_eq!(KeyClassifier::render(0x7f, KeyKind::Control), "7F");
    }

    #[test]
    fn test_printable_render_is_hex_space_char() {
        assert_eq!(KeyClassifier::render(0x41, KeyKind::Printable), "41 A");
        assert_eq!(KeyClassifier::render(0x20, KeyKind::Printable), "20  ");
        assert_eq!(KeyClassifier::render(0x7e, KeyKind::Printable), "7E ~");
    }
}
