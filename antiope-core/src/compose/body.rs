//! Page grid composition
//!
//! Clips raw content to the grid and validates colour marks against the
//! palette. Composition is total: malformed input degrades to clipped
//! or partial output, never to an error.

use heapless::{String, Vec};

use crate::grid::{clip_line, clip_rows, COLUMNS, CONTENT_ROWS};
use crate::page::content::{PageContent, MAX_COLOR_MARKS};
use crate::palette::Color;

/// Maximum colour attributes per composed grid
pub const MAX_COLOR_CELLS: usize = MAX_COLOR_MARKS;

/// A validated colour attribute on one grid cell.
///
/// The display paints from this cell to the end of the row in the given
/// colour, teletext-style, until another attribute takes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ColorCell {
    /// Content row (0-based)
    pub row: u8,
    /// Column (0-based)
    pub col: u8,
    pub color: Color,
}

/// A composed page: at most [`CONTENT_ROWS`] rows of at most
/// [`COLUMNS`] characters, plus validated colour attributes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageGrid {
    pub rows: Vec<String<COLUMNS>, CONTENT_ROWS>,
    pub colors: Vec<ColorCell, MAX_COLOR_CELLS>,
}

impl PageGrid {
    /// An empty grid
    pub fn blank() -> Self {
        Self::default()
    }

    /// Number of composed rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Compose raw content into a grid.
///
/// Row clipping first, then per-row column clipping. Colour marks are
/// kept only when the cell lies within the rendered bounds and the
/// colour name validates against the palette; everything else is
/// dropped silently. Deterministic: the same content always composes to
/// byte-identical output.
pub fn compose_page(content: &PageContent) -> PageGrid {
    let mut grid = PageGrid::blank();

    for line in clip_rows(&content.lines) {
        let mut row: String<COLUMNS> = String::new();
        let _ = row.push_str(clip_line(line.as_str()));
        let _ = grid.rows.push(row);
    }

    for mark in &content.colors {
        if (mark.row as usize) >= grid.rows.len() || (mark.col as usize) >= COLUMNS {
            continue;
        }
        if let Some(color) = Color::from_name(mark.name.as_str()) {
            let _ = grid.colors.push(ColorCell {
                row: mark.row,
                col: mark.col,
                color,
            });
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oversized_content() -> PageContent {
        let mut content = PageContent::new();
        for i in 0..30 {
            let mut line = heapless::String::<64>::new();
            for _ in 0..60 {
                let _ = line.push((b'A' + (i % 26) as u8) as char);
            }
            content.push_line(line.as_str());
        }
        content
    }

    #[test]
    fn test_rows_then_columns_clipped() {
        let grid = compose_page(&oversized_content());
        assert_eq!(grid.row_count(), CONTENT_ROWS);
        for row in &grid.rows {
            assert_eq!(row.len(), COLUMNS);
        }
    }

    #[test]
    fn test_small_content_untouched() {
        let mut content = PageContent::new();
        content.push_line("HELLO");
        content.push_line("");
        content.push_line("WORLD");
        let grid = compose_page(&content);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.rows[0].as_str(), "HELLO");
        assert_eq!(grid.rows[1].as_str(), "");
        assert_eq!(grid.rows[2].as_str(), "WORLD");
    }

    #[test]
    fn test_valid_marks_attached() {
        let mut content = PageContent::new();
        content.push_line("HEADLINES");
        content.mark(0, 0, "yellow");
        let grid = compose_page(&content);
        assert_eq!(grid.colors.len(), 1);
        assert_eq!(grid.colors[0].color, Color::Yellow);
    }

    #[test]
    fn test_invalid_color_dropped() {
        let mut content = PageContent::new();
        content.push_line("HEADLINES");
        content.mark(0, 0, "orange");
        content.mark(0, 1, "Yellow");
        let grid = compose_page(&content);
        assert!(grid.colors.is_empty());
    }

    #[test]
    fn test_out_of_bounds_marks_inert() {
        let mut content = PageContent::new();
        content.push_line("ONE ROW");
        content.mark(1, 0, "red"); // row beyond rendered content
        content.mark(0, 40, "red"); // column beyond the grid
        content.mark(0, 3, "red"); // in bounds
        let grid = compose_page(&content);
        assert_eq!(grid.colors.len(), 1);
        assert_eq!(grid.colors[0].col, 3);
    }

    #[test]
    fn test_marks_on_clipped_rows_dropped() {
        let mut content = oversized_content();
        content.colors.clear();
        content.mark(25, 0, "cyan"); // row exists in source, not in the grid
        let grid = compose_page(&content);
        assert!(grid.colors.is_empty());
    }

    #[test]
    fn test_composition_deterministic() {
        let mut content = oversized_content();
        content.mark(2, 4, "white");
        let a = compose_page(&content);
        let b = compose_page(&content);
        assert_eq!(a, b);
    }
}
