//! Content composition
//!
//! Turns raw page payloads and header fields into grid-shaped output:
//! a 40-character header line and a clipped, colour-validated page grid.

pub mod body;
pub mod header;

pub use body::{compose_page, ColorCell, PageGrid, MAX_COLOR_CELLS};
pub use header::{format_header, format_header_token, page_token, CLOCK_WIDTH, PAGE_TOKEN_WIDTH};
