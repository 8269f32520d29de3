//! Configuration records
//!
//! All records use bounded heapless collections so a parsed
//! configuration has a known worst-case footprint.

use heapless::{String, Vec};

use crate::page::content::{ColorMark, MAX_COLOR_MARKS, MAX_SOURCE_LINE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum page title length
pub const MAX_TITLE_LEN: usize = 16;

/// Maximum static pages per configuration
pub const MAX_PAGES: usize = 12;

/// Maximum feed routes per configuration
pub const MAX_FEEDS: usize = 4;

/// Maximum lines per static page (one more than the grid shows, so
/// oversized authoring is representable and clipped at composition)
pub const MAX_PAGE_LINES: usize = 24;

/// Maximum feed category name length
pub const MAX_CATEGORY_LEN: usize = 8;

/// A static page: fixed text plus optional colour marks
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaticPageConfig {
    /// Page number (100-999 addressable from the keypad)
    pub number: u16,
    /// Title shown in the header while the page is displayed
    pub title: String<MAX_TITLE_LEN>,
    /// Page body, top to bottom
    pub lines: Vec<String<MAX_SOURCE_LINE>, MAX_PAGE_LINES>,
    /// Sparse colour marks
    pub colors: Vec<ColorMark, MAX_COLOR_MARKS>,
}

impl Default for StaticPageConfig {
    fn default() -> Self {
        Self {
            number: 0,
            title: String::new(),
            lines: Vec::new(),
            colors: Vec::new(),
        }
    }
}

/// A feed route: a category served by the gateway, with its index page.
///
/// The nine pages following the index page show individual articles.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeedRouteConfig {
    /// Category name ("news", "sport", "weather")
    pub category: String<MAX_CATEGORY_LEN>,
    /// Index page number (e.g. 200)
    pub page: u16,
    /// Title shown in the header on the index and article pages
    pub title: String<MAX_TITLE_LEN>,
}

/// Complete terminal configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerminalConfig {
    /// Service name, used as the header title on fallback pages
    pub service_name: String<MAX_TITLE_LEN>,
    /// Page shown after boot; also the suggested fallback page
    pub home_page: u16,
    /// Static pages
    pub pages: Vec<StaticPageConfig, MAX_PAGES>,
    /// Feed routes
    pub feeds: Vec<FeedRouteConfig, MAX_FEEDS>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            home_page: 100,
            pages: Vec::new(),
            feeds: Vec::new(),
        }
    }
}

impl TerminalConfig {
    /// Create an empty configuration with the default home page
    pub fn new() -> Self {
        Self::default()
    }
}
