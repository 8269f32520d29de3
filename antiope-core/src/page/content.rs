//! Raw page content as produced by content collaborators
//!
//! Content arrives oversized and untrusted: lines may be longer than the
//! grid is wide, there may be more lines than the grid has rows, and
//! colour marks may name colours outside the palette or cells outside
//! the grid. Composition clips and drops; nothing here is an error.

use heapless::{String, Vec};

/// Maximum length of a raw source line (bytes)
pub const MAX_SOURCE_LINE: usize = 64;

/// Maximum number of raw source lines per page
pub const MAX_SOURCE_LINES: usize = 32;

/// Maximum colour marks per page
pub const MAX_COLOR_MARKS: usize = 24;

/// Maximum length of a colour name ("magenta" is the longest)
pub const MAX_COLOR_NAME: usize = 8;

/// A colour request for one grid cell
///
/// The name is validated against the palette at composition time; a
/// mark that names an unknown colour, or a cell outside the rendered
/// bounds, is dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorMark {
    /// Content row (0-based)
    pub row: u8,
    /// Column (0-based)
    pub col: u8,
    /// Requested colour name
    pub name: String<MAX_COLOR_NAME>,
}

impl ColorMark {
    /// Build a mark from a colour name
    pub fn new(row: u8, col: u8, name: &str) -> Self {
        let mut n = String::new();
        let _ = n.push_str(name);
        Self { row, col, name: n }
    }
}

/// A page-sized payload of text rows plus sparse colour marks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageContent {
    pub lines: Vec<String<MAX_SOURCE_LINE>, MAX_SOURCE_LINES>,
    pub colors: Vec<ColorMark, MAX_COLOR_MARKS>,
}

impl PageContent {
    /// Create empty content
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line, clipping it to the source-line capacity.
    ///
    /// Lines beyond [`MAX_SOURCE_LINES`] are dropped silently.
    pub fn push_line(&mut self, text: &str) {
        let mut line: String<MAX_SOURCE_LINE> = String::new();
        for ch in text.chars() {
            if line.push(ch).is_err() {
                break;
            }
        }
        let _ = self.lines.push(line);
    }

    /// Append a colour mark; marks beyond capacity are dropped silently
    pub fn mark(&mut self, row: u8, col: u8, name: &str) {
        let _ = self.colors.push(ColorMark::new(row, col, name));
    }

    /// Number of raw lines held
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
