//! Display link messages
//!
//! Two directions:
//! - Terminal → display unit: screen painting commands, heartbeat
//!   responses
//! - Display unit → terminal: keypad events, heartbeat requests

use heapless::Vec;

use crate::events::KeyCode;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: display unit → terminal
pub const MSG_KEY: u8 = 0x01;
pub const MSG_PING: u8 = 0x02;
pub const MSG_ACK: u8 = 0x03;

// Message type IDs: terminal → display unit
pub const MSG_CLEAR: u8 = 0x20;
pub const MSG_TEXT: u8 = 0x21;
pub const MSG_PAINT: u8 = 0x22;
pub const MSG_PONG: u8 = 0x24;
pub const MSG_RESET: u8 = 0x2F;

/// Screen dimensions as fixed by the wire contract
pub const SCREEN_ROWS: u8 = 24;
pub const SCREEN_COLS: u8 = 40;

/// Messages from the terminal to the display unit
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenMessage<'a> {
    /// Blank the entire screen
    Clear,
    /// Draw text at a position
    Text { row: u8, col: u8, text: &'a str },
    /// Set the foreground colour from a cell to the end of its row
    Paint { row: u8, col: u8, color: u8 },
    /// Heartbeat response
    Pong,
    /// Reset the display unit to its boot state
    Reset,
}

impl<'a> ScreenMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            ScreenMessage::Clear => Ok(Frame::empty(MSG_CLEAR)),
            ScreenMessage::Text { row, col, text } => {
                // Payload: [row][col][chars...]
                let bytes = text.as_bytes();
                let len = bytes.len().min(SCREEN_COLS as usize);

                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload.push(*row).map_err(|_| FrameError::PayloadTooLarge)?;
                payload.push(*col).map_err(|_| FrameError::PayloadTooLarge)?;
                payload
                    .extend_from_slice(&bytes[..len])
                    .map_err(|_| FrameError::PayloadTooLarge)?;
                Frame::new(MSG_TEXT, &payload)
            }
            ScreenMessage::Paint { row, col, color } => {
                Frame::new(MSG_PAINT, &[*row, *col, *color])
            }
            ScreenMessage::Pong => Ok(Frame::empty(MSG_PONG)),
            ScreenMessage::Reset => Ok(Frame::empty(MSG_RESET)),
        }
    }
}

/// Events parsed from display-unit frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminalEvent {
    /// A keypad press
    Key(KeyCode),
    /// Heartbeat request
    Ping,
    /// Acknowledgement of a received command
    Ack { seq: u8 },
}

impl TerminalEvent {
    /// Parse an event from a frame
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_KEY => {
                let byte = frame.payload.first().ok_or(FrameError::Malformed)?;
                let key = KeyCode::from_byte(*byte).ok_or(FrameError::Malformed)?;
                Ok(TerminalEvent::Key(key))
            }
            MSG_PING => Ok(TerminalEvent::Ping),
            MSG_ACK => {
                let seq = frame.payload.first().ok_or(FrameError::Malformed)?;
                Ok(TerminalEvent::Ack { seq: *seq })
            }
            _ => Err(FrameError::Malformed),
        }
    }

    /// Encode this event into a frame (display-unit side, and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            TerminalEvent::Key(key) => Frame::new(MSG_KEY, &[key.to_byte()]),
            TerminalEvent::Ping => Ok(Frame::empty(MSG_PING)),
            TerminalEvent::Ack { seq } => Frame::new(MSG_ACK, &[*seq]),
        }
    }
}
