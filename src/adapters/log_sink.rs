//! Log-based lifecycle sink.
//!
//! Writes every [`InitSignal`] to the logger (UART / USB-CDC console in
//! production).  Install it as the bridge's init handler when nothing
//! else needs to react to the session lifecycle.

use log::{info, warn};

use crate::bridge::events::InitSignal;

/// Logs lifecycle signals and counts handshakes.
#[derive(Debug, Default)]
pub struct LogSignalSink {
    ready_count: u32,
}

impl LogSignalSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, signal: &InitSignal) {
        match signal {
            InitSignal::Loading => info!("LINK | handshake pending"),
            InitSignal::Ready => {
                self.ready_count += 1;
                info!("LINK | ready (handshake #{})", self.ready_count);
            }
            InitSignal::Failed(reason) => warn!("LINK | handshake rejected: {}", reason),
            InitSignal::Disconnected => info!("LINK | companion disconnected"),
        }
    }

    /// Successful handshakes seen so far.
    pub fn ready_count(&self) -> u32 {
        self.ready_count
    }
}
