//! Configuration type definitions
//!
//! The terminal configuration declares the service identity, the boot
//! page, static pages and feed routes. The firmware embeds it as TOML
//! and parses it at boot.

pub mod types;

pub use types::{
    FeedRouteConfig, StaticPageConfig, TerminalConfig, MAX_CATEGORY_LEN, MAX_FEEDS,
    MAX_PAGES, MAX_PAGE_LINES, MAX_TITLE_LEN,
};
