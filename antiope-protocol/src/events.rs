//! Keypad events from the display unit

/// A key press reported by the display unit's keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// A numeric key, value 0-9
    Digit(u8),
    /// The index key (jump straight to the home page)
    Index,
    /// The reveal key (show concealed text; reserved)
    Reveal,
    /// The hold key (stop rolling sub-pages; reserved)
    Hold,
}

// Wire format values: digits travel as their ASCII codes, named keys
// in the control range below 0x20.
const KEY_INDEX: u8 = 0x10;
const KEY_REVEAL: u8 = 0x11;
const KEY_HOLD: u8 = 0x12;

impl KeyCode {
    /// Parse a key from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'0'..=b'9' => Some(KeyCode::Digit(byte - b'0')),
            KEY_INDEX => Some(KeyCode::Index),
            KEY_REVEAL => Some(KeyCode::Reveal),
            KEY_HOLD => Some(KeyCode::Hold),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            KeyCode::Digit(d) => b'0' + (d % 10),
            KeyCode::Index => KEY_INDEX,
            KeyCode::Reveal => KEY_REVEAL,
            KeyCode::Hold => KEY_HOLD,
        }
    }

    /// Returns true if this is a numeric key
    pub fn is_digit(&self) -> bool {
        matches!(self, KeyCode::Digit(_))
    }

    /// The token string fed to the navigation classifier
    pub fn token(&self) -> &'static str {
        match self {
            KeyCode::Digit(0) => "0",
            KeyCode::Digit(1) => "1",
            KeyCode::Digit(2) => "2",
            KeyCode::Digit(3) => "3",
            KeyCode::Digit(4) => "4",
            KeyCode::Digit(5) => "5",
            KeyCode::Digit(6) => "6",
            KeyCode::Digit(7) => "7",
            KeyCode::Digit(8) => "8",
            KeyCode::Digit(9) => "9",
            KeyCode::Digit(_) => "?",
            KeyCode::Index => "index",
            KeyCode::Reveal => "reveal",
            KeyCode::Hold => "hold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_roundtrip() {
        for d in 0u8..=9 {
            let key = KeyCode::Digit(d);
            assert_eq!(KeyCode::from_byte(key.to_byte()), Some(key));
        }
    }

    #[test]
    fn test_named_key_roundtrip() {
        for key in [KeyCode::Index, KeyCode::Reveal, KeyCode::Hold] {
            assert_eq!(KeyCode::from_byte(key.to_byte()), Some(key));
        }
    }

    #[test]
    fn test_unknown_bytes_rejected() {
        assert_eq!(KeyCode::from_byte(0x00), None);
        assert_eq!(KeyCode::from_byte(b'a'), None);
        assert_eq!(KeyCode::from_byte(0xFF), None);
    }

    #[test]
    fn test_digit_tokens() {
        assert_eq!(KeyCode::Digit(0).token(), "0");
        assert_eq!(KeyCode::Digit(9).token(), "9");
        assert!(KeyCode::Digit(5).is_digit());
    }

    #[test]
    fn test_named_tokens_are_not_digits() {
        assert_eq!(KeyCode::Index.token(), "index");
        assert!(!KeyCode::Index.is_digit());
        assert!(!KeyCode::Hold.is_digit());
    }
}
