//! Display link transmit task
//!
//! Sends screen updates and heartbeat responses to the display unit.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use antiope_display::Screen;

use crate::channels::{HEARTBEAT_RECEIVED, SCREEN_UPDATE};
use crate::display::protocol;

/// Shared screen buffer protected by mutex
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Display link TX task - sends frames to the display unit
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx<'static, UART0>) {
    info!("Display link TX task started");

    let mut ticker = Ticker::every(Duration::from_millis(50));

    loop {
        // Answer pending heartbeats
        if HEARTBEAT_RECEIVED.signaled() {
            HEARTBEAT_RECEIVED.reset();
            send_pong(&mut tx).await;
        }

        // Push pending screen updates
        if SCREEN_UPDATE.signaled() {
            SCREEN_UPDATE.reset();
            send_screen_update(&mut tx).await;
        }

        ticker.next().await;
    }
}

/// Send PONG response to the display unit
async fn send_pong(tx: &mut BufferedUartTx<'static, UART0>) {
    if let Ok(frame) = protocol::pong_frame() {
        let mut buf = [0u8; 8];
        if let Ok(len) = frame.encode(&mut buf) {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send PONG: {:?}", e);
            } else {
                trace!("PONG sent");
            }
        }
    }
}

/// Send the current screen content to the display unit
async fn send_screen_update(tx: &mut BufferedUartTx<'static, UART0>) {
    let screen = SCREEN_BUFFER.lock().await;

    for frame in protocol::encode_screen(&screen) {
        let mut buf = [0u8; 64];
        if let Ok(len) = frame.encode(&mut buf) {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send screen frame: {:?}", e);
                break;
            }
        }
    }

    trace!("Screen update sent");
}
