//! Keypad input trait

use antiope_protocol::KeyCode;

use crate::backend::DisplayError;

/// Source of keypad presses
///
/// Normally the UART link from the display unit; a GPIO matrix keypad
/// implements the same interface.
pub trait KeypadSource {
    /// Poll for a pending key press.
    ///
    /// Returns `Ok(Some(key))` if a press is available, `Ok(None)` if
    /// nothing is pending.
    fn poll_key(&mut self) -> Result<Option<KeyCode>, DisplayError>;
}
