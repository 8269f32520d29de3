//! Keystroke classification

/// Classification of a raw key token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyClass {
    /// A single decimal digit key, value 0-9
    Digit(u8),
    /// Anything else: named keys, modifiers, empty or multi-character tokens
    Ignored,
}

/// Classify a raw key token.
///
/// A token is a digit iff it is exactly one character in `0-9`.
/// Everything else is ignored, silently.
pub fn classify(token: &str) -> KeyClass {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() => KeyClass::Digit(c as u8 - b'0'),
        _ => KeyClass::Ignored,
    }
}
