//! Fixed grid geometry and clipping
//!
//! Everything the terminal emits lives on a 40x24 character cell grid:
//! one header row and 23 content rows. The clipping operations here are
//! the only way content enters the grid.

pub mod bounds;

pub use bounds::{
    clip_line, clip_rows, COLUMNS, CONTENT_ROWS, CONTENT_START_ROW, HEADER_ROW, ROWS,
};
