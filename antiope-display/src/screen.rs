//! The screen buffer
//!
//! A character buffer the size of the whole grid (header row included)
//! plus a bounded list of colour attributes. A colour attribute sets
//! the foreground from its cell to the end of the row, teletext-style.

use heapless::{String, Vec};

use antiope_core::compose::MAX_COLOR_CELLS;
use antiope_core::grid::{clip_line, COLUMNS, ROWS};
use antiope_core::palette::Color;

use crate::backend::{DisplayBackend, DisplayError};

/// One colour attribute on the screen (row 0 is the header row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenColor {
    pub row: u8,
    pub col: u8,
    pub color: Color,
}

/// Screen buffer for the full 40x24 grid
///
/// Double-buffered by the caller: render into it, then flush it to a
/// `DisplayBackend` when dirty.
#[derive(Clone)]
pub struct Screen {
    lines: [String<COLUMNS>; ROWS],
    colors: Vec<ScreenColor, MAX_COLOR_CELLS>,
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            lines: [const { String::new() }; ROWS],
            colors: Vec::new(),
            dirty: true,
        }
    }

    /// Blank the whole screen and drop all colour attributes
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.colors.clear();
        self.dirty = true;
    }

    /// Set the content of a row; text is clipped to the grid width.
    ///
    /// Rows outside the grid are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < ROWS {
            self.lines[row].clear();
            let _ = self.lines[row].push_str(clip_line(text));
            self.dirty = true;
        }
    }

    /// The content of a row (empty for rows outside the grid)
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|s| s.as_str()).unwrap_or("")
    }

    /// Add a colour attribute; out-of-grid cells and attributes beyond
    /// capacity are dropped silently
    pub fn set_color(&mut self, row: u8, col: u8, color: Color) {
        if (row as usize) < ROWS && (col as usize) < COLUMNS {
            let _ = self.colors.push(ScreenColor { row, col, color });
            self.dirty = true;
        }
    }

    /// The colour attributes in insertion order
    pub fn colors(&self) -> &[ScreenColor] {
        &self.colors
    }

    /// All lines, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Check if the screen needs flushing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the screen as flushed
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Force a reflush on the next check
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Grid height in rows
    pub const fn rows(&self) -> usize {
        ROWS
    }

    /// Grid width in columns
    pub const fn cols(&self) -> usize {
        COLUMNS
    }

    /// Push the whole buffer through a backend.
    ///
    /// Clears the device, draws every non-empty row, applies the
    /// colour attributes and flushes. Does not touch the dirty flag;
    /// callers mark the screen clean once the flush succeeds.
    pub fn flush_to<B: DisplayBackend>(&self, backend: &mut B) -> Result<(), DisplayError> {
        backend.clear()?;
        for (row, line) in self.lines.iter().enumerate() {
            if !line.is_empty() {
                backend.draw_text(row as u8, 0, line.as_str())?;
            }
        }
        for cell in self.colors.iter() {
            backend.paint(cell.row, cell.col, cell.color)?;
        }
        backend.flush()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
