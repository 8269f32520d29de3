//! Display unit communication
//!
//! Handles encoding of screen content for the UART display unit.
//!
//! The display unit acts as a dumb terminal: it paints the text and
//! colour frames it is sent and reports keypad presses back. All page
//! logic stays on the controller.
//!
//! # Protocol overview
//!
//! Communication uses the framed protocol from `antiope-protocol` over
//! UART at 115200 baud:
//! - Display unit → terminal: keypad events, heartbeats
//! - Terminal → display unit: screen commands (clear, text, paint),
//!   heartbeat responses
//!
//! The display unit sends periodic PING messages. If the terminal does
//! not answer with PONG within its timeout, the unit shows a
//! "link lost" card.

pub mod protocol;
