//! Sequencer outputs
//!
//! The sequencer never performs I/O. It asks for fetches and hands out
//! finished render requests; the runtime carries both to the links.

use heapless::String;

use crate::compose::PageGrid;
use crate::config::types::MAX_TITLE_LEN;
use crate::grid::COLUMNS;
use crate::page::registry::Category;

/// A request to fetch a feed category from the gateway.
///
/// The generation must be echoed back with the outcome; outcomes with a
/// stale generation are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FetchRequest {
    pub category: Category,
    pub generation: u16,
}

/// A finished page ready for the display: header line plus body grid.
///
/// The page title is carried alongside the prebuilt header so the
/// runtime can rebuild the header line alone for clock and keypad-entry
/// updates without a full page turn.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderRequest {
    pub page: u16,
    pub title: String<MAX_TITLE_LEN>,
    pub header: String<COLUMNS>,
    pub grid: PageGrid,
}

/// What the sequencer wants done after an input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    /// Start a gateway fetch
    Fetch(FetchRequest),
    /// Paint a page
    Render(RenderRequest),
}
