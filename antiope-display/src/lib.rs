//! Display abstraction traits and shared screen buffer for Antiope
//!
//! This crate provides:
//! - `Screen`: the 40x24 character buffer with colour attributes
//! - `DisplayBackend` trait for different video outputs
//! - `KeypadSource` trait for different keypad inputs
//!
//! # Architecture
//!
//! The controller firmware renders pages into a `Screen` and hands it
//! to whatever `DisplayBackend` the board provides - typically the
//! UART link to the external display unit, but a directly driven
//! framebuffer works the same way. Input arrives through a
//! `KeypadSource`, normally the same UART link.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod input;
pub mod screen;

pub use backend::{DisplayBackend, DisplayError};
pub use input::KeypadSource;
pub use screen::{Screen, ScreenColor};
