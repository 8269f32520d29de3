//! Gateway link messages
//!
//! The feed gateway supplies live article content and the time of day.
//! A fetch is a single request; the response is a short stream of
//! frames (start, titles and lines, end), each carrying the category
//! and the request generation so the terminal can discard stale
//! deliveries.

use heapless::Vec;

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs: terminal → gateway
pub const MSG_FETCH_FEED: u8 = 0x40;

// Message type IDs: gateway → terminal
pub const MSG_FEED_START: u8 = 0x60;
pub const MSG_FEED_TITLE: u8 = 0x61;
pub const MSG_FEED_LINE: u8 = 0x62;
pub const MSG_FEED_END: u8 = 0x63;
pub const MSG_FEED_FAIL: u8 = 0x64;
pub const MSG_TIME_SYNC: u8 = 0x65;

/// Requests from the terminal to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatewayRequest {
    /// Fetch the articles of one category
    FetchFeed { category: u8, generation: u16 },
}

impl GatewayRequest {
    /// Encode this request into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            GatewayRequest::FetchFeed {
                category,
                generation,
            } => {
                let [hi, lo] = generation.to_be_bytes();
                Frame::new(MSG_FETCH_FEED, &[*category, hi, lo])
            }
        }
    }

    /// Parse a request from a frame (gateway side, and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_FETCH_FEED => {
                let payload: &[u8] = &frame.payload;
                if payload.len() != 3 {
                    return Err(FrameError::Malformed);
                }
                Ok(GatewayRequest::FetchFeed {
                    category: payload[0],
                    generation: u16::from_be_bytes([payload[1], payload[2]]),
                })
            }
            _ => Err(FrameError::Malformed),
        }
    }
}

/// Messages from the gateway to the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GatewayMessage<'a> {
    /// A feed delivery begins; `count` articles follow
    FeedStart {
        category: u8,
        generation: u16,
        count: u8,
    },
    /// Headline of one article (1-based index)
    FeedTitle {
        category: u8,
        generation: u16,
        article: u8,
        text: &'a str,
    },
    /// One body line of one article
    FeedLine {
        category: u8,
        generation: u16,
        article: u8,
        text: &'a str,
    },
    /// The delivery is complete
    FeedEnd { category: u8, generation: u16 },
    /// The gateway could not produce the feed
    FeedFail { category: u8, generation: u16 },
    /// Broadcast time of day
    TimeSync { hour: u8, minute: u8, second: u8 },
}

impl<'a> GatewayMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            GatewayMessage::FeedStart {
                category,
                generation,
                count,
            } => {
                let [hi, lo] = generation.to_be_bytes();
                Frame::new(MSG_FEED_START, &[*category, hi, lo, *count])
            }
            GatewayMessage::FeedTitle {
                category,
                generation,
                article,
                text,
            } => text_frame(MSG_FEED_TITLE, *category, *generation, *article, text),
            GatewayMessage::FeedLine {
                category,
                generation,
                article,
                text,
            } => text_frame(MSG_FEED_LINE, *category, *generation, *article, text),
            GatewayMessage::FeedEnd {
                category,
                generation,
            } => {
                let [hi, lo] = generation.to_be_bytes();
                Frame::new(MSG_FEED_END, &[*category, hi, lo])
            }
            GatewayMessage::FeedFail {
                category,
                generation,
            } => {
                let [hi, lo] = generation.to_be_bytes();
                Frame::new(MSG_FEED_FAIL, &[*category, hi, lo])
            }
            GatewayMessage::TimeSync {
                hour,
                minute,
                second,
            } => Frame::new(MSG_TIME_SYNC, &[*hour, *minute, *second]),
        }
    }

    /// Parse a message from a frame.
    ///
    /// Text payloads borrow from the frame; non-UTF-8 text is rejected
    /// as malformed.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let payload: &[u8] = &frame.payload;
        match frame.msg_type {
            MSG_FEED_START => {
                if payload.len() != 4 {
                    return Err(FrameError::Malformed);
                }
                Ok(GatewayMessage::FeedStart {
                    category: payload[0],
                    generation: u16::from_be_bytes([payload[1], payload[2]]),
                    count: payload[3],
                })
            }
            MSG_FEED_TITLE | MSG_FEED_LINE => {
                if payload.len() < 4 {
                    return Err(FrameError::Malformed);
                }
                let text =
                    core::str::from_utf8(&payload[4..]).map_err(|_| FrameError::Malformed)?;
                let parsed = (
                    payload[0],
                    u16::from_be_bytes([payload[1], payload[2]]),
                    payload[3],
                );
                if frame.msg_type == MSG_FEED_TITLE {
                    Ok(GatewayMessage::FeedTitle {
                        category: parsed.0,
                        generation: parsed.1,
                        article: parsed.2,
                        text,
                    })
                } else {
                    Ok(GatewayMessage::FeedLine {
                        category: parsed.0,
                        generation: parsed.1,
                        article: parsed.2,
                        text,
                    })
                }
            }
            MSG_FEED_END | MSG_FEED_FAIL => {
                if payload.len() != 3 {
                    return Err(FrameError::Malformed);
                }
                let category = payload[0];
                let generation = u16::from_be_bytes([payload[1], payload[2]]);
                if frame.msg_type == MSG_FEED_END {
                    Ok(GatewayMessage::FeedEnd {
                        category,
                        generation,
                    })
                } else {
                    Ok(GatewayMessage::FeedFail {
                        category,
                        generation,
                    })
                }
            }
            MSG_TIME_SYNC => {
                if payload.len() != 3 {
                    return Err(FrameError::Malformed);
                }
                Ok(GatewayMessage::TimeSync {
                    hour: payload[0],
                    minute: payload[1],
                    second: payload[2],
                })
            }
            _ => Err(FrameError::Malformed),
        }
    }
}

fn text_frame(
    msg_type: u8,
    category: u8,
    generation: u16,
    article: u8,
    text: &str,
) -> Result<Frame, FrameError> {
    let [hi, lo] = generation.to_be_bytes();
    let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
    for byte in [category, hi, lo, article] {
        payload.push(byte).map_err(|_| FrameError::PayloadTooLarge)?;
    }
    payload
        .extend_from_slice(text.as_bytes())
        .map_err(|_| FrameError::PayloadTooLarge)?;
    Frame::new(msg_type, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_roundtrip() {
        let original = GatewayRequest::FetchFeed {
            category: 1,
            generation: 0x1234,
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(GatewayRequest::from_frame(&frame).unwrap(), original);
    }

    #[test]
    fn test_feed_start_roundtrip() {
        let original = GatewayMessage::FeedStart {
            category: 0,
            generation: 7,
            count: 5,
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(GatewayMessage::from_frame(&frame).unwrap(), original);
    }

    #[test]
    fn test_title_carries_text() {
        let original = GatewayMessage::FeedTitle {
            category: 2,
            generation: 300,
            article: 1,
            text: "STORM WARNING FOR THE COAST",
        };
        let frame = original.to_frame().unwrap();
        match GatewayMessage::from_frame(&frame).unwrap() {
            GatewayMessage::FeedTitle { article, text, .. } => {
                assert_eq!(article, 1);
                assert_eq!(text, "STORM WARNING FOR THE COAST");
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_line_roundtrip() {
        let original = GatewayMessage::FeedLine {
            category: 0,
            generation: 1,
            article: 3,
            text: "line of body text",
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(GatewayMessage::from_frame(&frame).unwrap(), original);
    }

    #[test]
    fn test_end_and_fail_distinct() {
        let end = GatewayMessage::FeedEnd {
            category: 1,
            generation: 9,
        };
        let fail = GatewayMessage::FeedFail {
            category: 1,
            generation: 9,
        };
        let end_frame = end.to_frame().unwrap();
        let fail_frame = fail.to_frame().unwrap();
        assert_ne!(end_frame.msg_type, fail_frame.msg_type);
        assert_eq!(GatewayMessage::from_frame(&end_frame).unwrap(), end);
        assert_eq!(GatewayMessage::from_frame(&fail_frame).unwrap(), fail);
    }

    #[test]
    fn test_time_sync_roundtrip() {
        let original = GatewayMessage::TimeSync {
            hour: 14,
            minute: 30,
            second: 0,
        };
        let frame = original.to_frame().unwrap();
        assert_eq!(GatewayMessage::from_frame(&frame).unwrap(), original);
    }

    #[test]
    fn test_truncated_payload_rejected() {
        let frame = Frame::new(MSG_FEED_START, &[0, 0]).unwrap();
        assert!(GatewayMessage::from_frame(&frame).is_err());
    }

    #[test]
    fn test_non_utf8_text_rejected() {
        let frame = Frame::new(MSG_FEED_LINE, &[0, 0, 1, 1, 0xFF, 0xFE]).unwrap();
        assert!(GatewayMessage::from_frame(&frame).is_err());
    }
}
