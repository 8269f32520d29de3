//! The fixed 8-colour palette
//!
//! Teletext Level 1 knows exactly eight colours. Anything outside the
//! palette is rejected; there is no nearest-colour approximation.

pub mod color;

pub use color::{is_palette_hex, is_palette_name, Color};
