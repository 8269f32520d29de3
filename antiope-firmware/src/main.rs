//! Antiope - Broadcast Teletext Terminal Firmware
//!
//! Main firmware binary for RP2040-based teletext terminals.
//! Implements a Klipper-inspired, config-driven architecture.
//!
//! Named after ANTIOPE, the French broadcast teletext standard of the
//! late 1970s.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{
    BufferedInterruptHandler, Config as UartConfig, InterruptHandler as UartInterruptHandler, Uart,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use antiope_core::config::TerminalConfig;
use heapless::String;

use crate::config::parse_registry;

/// Embedded page registry (compiled into the firmware)
/// Edit pages.toml and rebuild to customise
const EMBEDDED_REGISTRY: &str = include_str!("../pages.toml");

mod channels;
mod config;
mod controller;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => UartInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Antiope firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Parse the embedded page registry
    let registry = load_registry();
    info!(
        "Registry loaded: {} static pages, {} feeds, home page {}",
        registry.pages.len(),
        registry.feeds.len(),
        registry.home_page
    );

    // UART0: display link (display unit with keypad)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (link_tx, link_rx) = uart.split();

    info!("UART0 initialized for display link");

    // UART1: gateway link (feed gateway)
    let gateway_config = UartConfig::default();
    let gateway_uart = Uart::new(
        p.UART1,
        p.PIN_8,
        p.PIN_9,
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        gateway_config,
    );
    let (gateway_tx, gateway_rx) = gateway_uart.split();

    info!("UART1 initialized for gateway link");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::link_rx_task(link_rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(link_tx)).unwrap();
    spawner.spawn(tasks::gateway_task(gateway_tx, gateway_rx)).unwrap();
    spawner.spawn(tasks::controller_task(registry)).unwrap();

    info!("All tasks spawned, terminal running");

    // Main task has nothing else to do - all work happens in spawned tasks.
    // Drain page events so the channel never backs up.
    loop {
        let change = channels::PAGE_EVENTS.receive().await;
        info!("Viewing page {}", change.page);
    }
}

/// Parse the embedded registry, falling back to a minimal one
fn load_registry() -> TerminalConfig {
    match parse_registry(EMBEDDED_REGISTRY) {
        Ok(registry) => {
            info!("Parsed embedded page registry successfully");
            registry
        }
        Err(e) => {
            // Should never happen if pages.toml passed build validation
            error!("Failed to parse embedded registry: {:?}", e);
            error!("Using minimal fallback registry");
            minimal_registry()
        }
    }
}

/// Minimal registry if the embedded TOML fails to parse
///
/// Last resort - should only happen during development if pages.toml
/// has errors the build-time validation missed.
fn minimal_registry() -> TerminalConfig {
    use antiope_core::config::StaticPageConfig;

    let mut config = TerminalConfig::new();

    let mut name: String<16> = String::new();
    let _ = name.push_str("ANTIOPE");
    config.service_name = name;
    config.home_page = 100;

    let mut page = StaticPageConfig::default();
    page.number = 100;
    let mut title: String<16> = String::new();
    let _ = title.push_str("INDEX");
    page.title = title;
    let mut line: String<64> = String::new();
    let _ = line.push_str("REGISTRY UNAVAILABLE");
    let _ = page.lines.push(line);
    let _ = config.pages.push(page);

    config
}
