//! Frame encoding and decoding
//!
//! Frame format:
//! - STX (1 byte): 0x02 synchronisation byte
//! - LENGTH (1 byte): payload length (0-250)
//! - TYPE (1 byte): message type identifier
//! - PAYLOAD (0-250 bytes): type-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, TYPE, and all PAYLOAD bytes
//!
//! The parser is fed one byte at a time and resynchronises on the next
//! STX after garbage or a checksum failure.

use heapless::Vec;

/// Frame synchronisation byte
pub const FRAME_STX: u8 = 0x02;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Maximum complete frame size (STX + LENGTH + TYPE + MAX_PAYLOAD + CHECKSUM)
pub const MAX_FRAME_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    BadChecksum,
    /// Invalid frame structure or length
    Malformed,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type identifier
    pub msg_type: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a frame with the given message type and payload
    pub fn new(msg_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut vec = Vec::new();
        vec.extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self {
            msg_type,
            payload: vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(msg_type: u8) -> Self {
        Self {
            msg_type,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, msg_type: u8, payload: &[u8]) -> u8 {
        payload
            .iter()
            .fold(length ^ msg_type, |check, &byte| check ^ byte)
    }

    /// Encode this frame into a byte buffer.
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let total = 4 + self.payload.len();
        if buffer.len() < total {
            return Err(FrameError::BufferTooSmall);
        }

        let length = self.payload.len() as u8;
        buffer[0] = FRAME_STX;
        buffer[1] = length;
        buffer[2] = self.msg_type;
        buffer[3..3 + self.payload.len()].copy_from_slice(&self.payload);
        buffer[3 + self.payload.len()] = Self::checksum(length, self.msg_type, &self.payload);
        Ok(total)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Scanning for STX
    Sync,
    /// Got STX, expecting LENGTH
    Length,
    /// Got LENGTH, expecting TYPE
    Type,
    /// Accumulating payload bytes
    Payload,
    /// Expecting CHECKSUM
    Checksum,
}

/// Incremental frame parser
///
/// Feed it bytes as they arrive; it yields a frame whenever one
/// completes and drops back to scanning for STX after any error.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_len: u8,
    msg_type: u8,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a parser scanning for the next STX
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            buffer: Vec::new(),
            expected_len: 0,
            msg_type: 0,
        }
    }

    /// Drop any partial frame and rescan for STX
    pub fn reset(&mut self) {
        self.state = ParseState::Sync;
        self.buffer.clear();
        self.expected_len = 0;
        self.msg_type = 0;
    }

    /// Feed a single byte.
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on a parse
    /// error. After an error the parser has already reset itself.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_STX {
                    self.state = ParseState::Length;
                }
                // Non-STX bytes between frames are line noise; skip them
                Ok(None)
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::Malformed);
                }
                self.expected_len = byte;
                self.state = ParseState::Type;
                Ok(None)
            }
            ParseState::Type => {
                self.msg_type = byte;
                self.buffer.clear();
                self.state = if self.expected_len == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
                Ok(None)
            }
            ParseState::Payload => {
                // Cannot overflow: expected_len is bounded by the capacity
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_len as usize {
                    self.state = ParseState::Checksum;
                }
                Ok(None)
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.expected_len, self.msg_type, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::BadChecksum);
                }
                let frame = Frame {
                    msg_type: self.msg_type,
                    payload: self.buffer.clone(),
                };
                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed a slice of bytes, returning the first complete frame found.
    ///
    /// Bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
