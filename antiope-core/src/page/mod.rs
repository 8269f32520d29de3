//! Pages: raw content, registry and routing
//!
//! A page is one grid-full of text addressed by a 3-digit number. The
//! registry routes a number to static content, a live feed page, or a
//! fallback block; it never reports "no such page" as an error.

pub mod content;
pub mod registry;

pub use content::{ColorMark, PageContent, MAX_COLOR_MARKS, MAX_SOURCE_LINE, MAX_SOURCE_LINES};
pub use registry::{Category, FeedRoute, PageStore, Route};
