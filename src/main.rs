//! RabitLink firmware: main entry point.
//!
//! Brings up the logger and the companion UART, then pumps link events
//! into the bridge forever.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  UART1 RX ──(reader thread)──▶ LINK_EVENTS               │
//! │                                    │                     │
//! │                                    ▼                     │
//! │  ┌──────────────────────────────────────────────────┐    │
//! │  │          Bridge<UartLink> (main thread)          │    │
//! │  │  Session · Registry · Ledger · Dispatch          │    │
//! │  └──────────────────────────────────────────────────┘    │
//! │                                    │                     │
//! │  UART1 TX ◀────────────────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::{info, warn};

use rabitlink::adapters::log_sink::LogSignalSink;
use rabitlink::adapters::uart::{UartLink, spawn_reader};
use rabitlink::bridge::Bridge;
use rabitlink::config::BridgeConfig;
use rabitlink::proto::channels::LINK_EVENTS;
use rabitlink::proto::request::Scope;

/// Optional JSON config baked in at build time.
const BUILD_CONFIG: Option<&str> = option_env!("RABITLINK_CONFIG_JSON");

fn load_config() -> BridgeConfig {
    match BUILD_CONFIG {
        Some(json) => BridgeConfig::from_json(json).unwrap_or_else(|e| {
            warn!("Config rejected ({}), using defaults", e);
            BridgeConfig::default()
        }),
        None => BridgeConfig::default(),
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RabitLink v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = load_config();
    info!("Config: {:?}", config);

    // ── 2. Companion UART (UART1, TX=GPIO17, RX=GPIO18) ───────
    let peripherals = Peripherals::take()?;
    let uart_config = UartConfig::default().baudrate(Hertz(config.uart_baud));
    let uart = UartDriver::new(
        peripherals.uart1,
        peripherals.pins.gpio17,
        peripherals.pins.gpio18,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &uart_config,
    )?;
    let (tx, rx) = uart.into_split();
    let _reader = spawn_reader(rx, &LINK_EVENTS)?;

    // ── 3. Bridge ─────────────────────────────────────────────
    let mut bridge = Bridge::new(UartLink::new(tx), config);
    let mut sink = LogSignalSink::new();
    bridge.set_init_handler(move |signal| sink.emit(signal));

    bridge.subscribe_topic(Scope::Local, "rabitlink/ping", |status, payload| {
        info!("ping ({}): {}", status, payload);
    })?;

    // The UART is up from boot, so this opens the handshake directly.
    if let Err(e) = bridge.init_session() {
        warn!("Handshake not sent: {}", e);
    }

    // ── 4. Event loop ─────────────────────────────────────────
    info!("Entering link event loop");
    loop {
        let event = LINK_EVENTS.next();
        bridge.handle_event(event);
        bridge.pump(&LINK_EVENTS);
    }
}
