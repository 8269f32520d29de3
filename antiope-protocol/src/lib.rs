//! Antiope Link Protocol
//!
//! This crate defines the framed UART protocols spoken by the terminal:
//! the *display link* to the video/keypad unit, and the *gateway link*
//! to the feed gateway that supplies live page content and the time of
//! day.
//!
//! # Frame format
//!
//! Both links use the same binary frame:
//! ```text
//! ┌─────┬────────┬──────┬─────────────┬──────────┐
//! │ STX │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B  │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └─────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The display unit acts as a dumb terminal: it paints what it is told
//! and reports keypad presses. All page logic stays on the controller.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod feed;
pub mod frame;
pub mod messages;

pub use events::KeyCode;
pub use feed::{GatewayMessage, GatewayRequest};
pub use frame::{Frame, FrameError, FrameParser, FRAME_STX, MAX_PAYLOAD_SIZE};
pub use messages::{ScreenMessage, TerminalEvent};
