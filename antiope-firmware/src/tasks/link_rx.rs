//! Display link receive task
//!
//! Receives frames from the display unit and dispatches keypad events.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use antiope_protocol::{FrameParser, TerminalEvent};

use crate::channels::{HEARTBEAT_RECEIVED, KEY_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Display link RX task - receives and parses frames from the display unit
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Display link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match TerminalEvent::from_frame(&frame) {
                            Ok(event) => handle_event(event),
                            Err(e) => warn!("Bad display frame: {:?}", e),
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

/// Dispatch a parsed display-unit event
fn handle_event(event: TerminalEvent) {
    match event {
        TerminalEvent::Ping => {
            trace!("PING received");
            HEARTBEAT_RECEIVED.signal(());
        }
        TerminalEvent::Key(key) => {
            debug!("Key event: {:?}", key);
            // Send to key channel, dropping if full
            if KEY_CHANNEL.try_send(key).is_err() {
                warn!("Key channel full, dropping event");
            }
        }
        TerminalEvent::Ack { seq: _ } => {
            // ACK received, could use for flow control
            trace!("ACK received");
        }
    }
}
