//! Protocol helpers for display communication
//!
//! Provides convenience functions for encoding screen content into
//! frames.

use antiope_display::Screen;
use antiope_protocol::{Frame, FrameError, ScreenMessage};

/// Encode a screen to a series of frames
///
/// Returns frames for:
/// 1. Clear screen
/// 2. Text for each non-empty line
/// 3. Paint for each colour attribute
pub fn encode_screen(screen: &Screen) -> impl Iterator<Item = Frame> + '_ {
    ScreenEncoder::new(screen)
}

/// Iterator that encodes a screen into frames
struct ScreenEncoder<'a> {
    screen: &'a Screen,
    state: EncoderState,
    row: usize,
    color: usize,
}

#[derive(Clone, Copy)]
enum EncoderState {
    Clear,
    Lines,
    Colors,
    Done,
}

impl<'a> ScreenEncoder<'a> {
    fn new(screen: &'a Screen) -> Self {
        Self {
            screen,
            state: EncoderState::Clear,
            row: 0,
            color: 0,
        }
    }
}

impl<'a> Iterator for ScreenEncoder<'a> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                EncoderState::Clear => {
                    self.state = EncoderState::Lines;
                    return ScreenMessage::Clear.to_frame().ok();
                }
                EncoderState::Lines => {
                    while self.row < self.screen.rows() {
                        let row = self.row;
                        self.row += 1;

                        let line = self.screen.line(row);
                        if !line.is_empty() {
                            let msg = ScreenMessage::Text {
                                row: row as u8,
                                col: 0,
                                text: line,
                            };
                            return msg.to_frame().ok();
                        }
                    }
                    self.state = EncoderState::Colors;
                }
                EncoderState::Colors => {
                    while self.color < self.screen.colors().len() {
                        let cell = self.screen.colors()[self.color];
                        self.color += 1;

                        let msg = ScreenMessage::Paint {
                            row: cell.row,
                            col: cell.col,
                            color: cell.color.code(),
                        };
                        return msg.to_frame().ok();
                    }
                    self.state = EncoderState::Done;
                }
                EncoderState::Done => return None,
            }
        }
    }
}

/// Build a PONG response frame
pub fn pong_frame() -> Result<Frame, FrameError> {
    ScreenMessage::Pong.to_frame()
}
