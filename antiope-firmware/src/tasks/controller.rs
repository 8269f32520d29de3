//! Main controller task
//!
//! Coordinates the navigation pad, screen sequencer and wall clock.
//! Receives keypad events, tick signals and feed deliveries, forwards
//! fetch requests to the gateway, and syncs the screen buffer for the
//! display link.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Instant;

use antiope_core::config::TerminalConfig;

use crate::channels::{FEED_CHANNEL, FETCH_CHANNEL, KEY_CHANNEL, PAGE_EVENTS, SCREEN_UPDATE, TIME_SYNC};
use crate::controller::Terminal;
use crate::tasks::link_tx::SCREEN_BUFFER;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(config: TerminalConfig) {
    info!("Controller task started");

    let mut terminal = Terminal::new(config);

    // Push the boot splash out before the first tick
    sync_screen(&mut terminal).await;

    loop {
        match select3(
            KEY_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
            FEED_CHANNEL.receive(),
        )
        .await
        {
            Either3::First(key) => {
                debug!("Key: {:?}", key);
                let now_ms = uptime_ms();
                if let Some(change) = terminal.handle_key(key, now_ms) {
                    debug!("Page change: {}", change.page);
                    // Log the navigation event, dropping if full
                    let _ = PAGE_EVENTS.try_send(change);
                }
            }

            Either3::Second(now_ms) => {
                // Apply a pending time sync before the tick renders anything
                if let Some(time) = TIME_SYNC.try_take() {
                    terminal.time_sync(time, now_ms);
                }
                terminal.tick(now_ms);
            }

            Either3::Third(delivery) => {
                let now_ms = uptime_ms();
                terminal.feed_delivered(
                    delivery.category,
                    delivery.generation,
                    delivery.articles,
                    now_ms,
                );
            }
        }

        // Forward any fetch the sequencer asked for
        if let Some(request) = terminal.take_fetch() {
            if FETCH_CHANNEL.try_send(request).is_err() {
                warn!("Fetch channel full, dropping request");
            }
        }

        sync_screen(&mut terminal).await;
    }
}

/// Uptime in milliseconds, the controller's time base
fn uptime_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Copy a dirty screen into the shared buffer and wake the TX task
async fn sync_screen(terminal: &mut Terminal) {
    if terminal.screen_dirty() {
        let mut buffer = SCREEN_BUFFER.lock().await;
        *buffer = terminal.screen().clone();
        terminal.mark_screen_clean();
        SCREEN_UPDATE.signal(());
    }
}
