//! Keypad navigation
//!
//! Raw key tokens are classified into digits, digits accumulate in a
//! 3-slot entry buffer, and a full entry resolves atomically into a page
//! change. Nothing here can fail: unrecognised keys are ignored.

pub mod keys;
pub mod pad;

pub use keys::{classify, KeyClass};
pub use pad::{NavigationPad, PageChange, ENTRY_DIGITS};
