//! Display backend trait
//!
//! Defines the interface between the controller and whatever paints
//! the grid: the UART display unit, or a directly driven framebuffer.

use antiope_core::palette::Color;

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the display
    Communication,
    /// Invalid coordinates
    InvalidCoordinates,
    /// Display not initialised
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Display backend trait
///
/// Coordinates are character cells, 0-based, row 0 being the header
/// row. Implementations may buffer; `flush` makes everything visible.
pub trait DisplayBackend {
    /// Blank the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text starting at a cell
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Set the foreground colour from a cell to the end of its row
    fn paint(&mut self, row: u8, col: u8, color: Color) -> Result<(), DisplayError>;

    /// Flush buffered content to the device
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Display dimensions in character cells: (columns, rows)
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
