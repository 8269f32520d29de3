//! Tick task for time-based updates
//!
//! Provides periodic ticks to the controller for:
//! - Sequencer hold and budget tracking
//! - Feed cache aging
//! - Header clock refresh

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Tick interval in milliseconds
///
/// Half the clearing hold, so page-turn deadlines land on a tick.
pub const TICK_INTERVAL_MS: u32 = 50;

/// Signal to notify the controller of a tick, carrying the uptime in ms
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with the uptime
#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS as u64));

    loop {
        ticker.next().await;
        TICK_SIGNAL.signal(Instant::now().as_millis() as u32);
    }
}
