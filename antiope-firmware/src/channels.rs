//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy
//! tasks. Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use antiope_core::cache::ArticleSet;
use antiope_core::clock::TimeOfDay;
use antiope_core::nav::PageChange;
use antiope_core::page::Category;
use antiope_core::sequencer::FetchRequest;
use antiope_protocol::KeyCode;

/// Channel capacity for keypad events from the display unit
const KEY_CHANNEL_SIZE: usize = 8;

/// Channel capacity for page-change events
const PAGE_EVENT_SIZE: usize = 8;

/// Channel capacity for pending gateway fetches
const FETCH_CHANNEL_SIZE: usize = 4;

/// Channel capacity for completed feed deliveries
const FEED_CHANNEL_SIZE: usize = 2;

/// Keypad events from the display unit
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, KeyCode, KEY_CHANNEL_SIZE> =
    Channel::new();

/// Page-change events (for logging/diagnostics)
pub static PAGE_EVENTS: Channel<CriticalSectionRawMutex, PageChange, PAGE_EVENT_SIZE> =
    Channel::new();

/// Signal that a screen update is ready to be sent
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a heartbeat (PING) was received from the display unit
pub static HEARTBEAT_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Fetch requests bound for the gateway task
pub static FETCH_CHANNEL: Channel<CriticalSectionRawMutex, FetchRequest, FETCH_CHANNEL_SIZE> =
    Channel::new();

/// A completed feed delivery from the gateway task.
///
/// `articles` is `None` when the gateway reported failure.
pub struct FeedDelivery {
    pub category: Category,
    pub generation: u16,
    pub articles: Option<ArticleSet>,
}

/// Completed feed deliveries for the controller
pub static FEED_CHANNEL: Channel<CriticalSectionRawMutex, FeedDelivery, FEED_CHANNEL_SIZE> =
    Channel::new();

/// Latest time-of-day broadcast from the gateway
pub static TIME_SYNC: Signal<CriticalSectionRawMutex, TimeOfDay> = Signal::new();
