//! Link abstraction: any line-capable channel to the companion.
//!
//! Concrete implementations:
//! - UART serial (`adapters::uart`, device only)
//! - In-memory recorder (`adapters::memory`, host and tests)
//!
//! The bridge is generic over `LinkTransport`, so adding a new link
//! (BLE UART service, TCP) requires zero changes to the protocol logic.
//! Connect/disconnect notifications and inbound bytes are delivered to the
//! bridge by whoever drives the link, not pulled through this trait.

use crate::error::LinkError;

/// Write side of a companion link.
pub trait LinkTransport {
    /// Write `line` followed by the `\n` delimiter.
    fn write_line(&mut self, line: &str) -> Result<(), LinkError>;

    /// Write `data` exactly as given, without a delimiter.
    fn write_raw(&mut self, data: &str) -> Result<(), LinkError>;

    /// Whether a companion is currently attached.
    fn is_connected(&self) -> bool;

    /// Whether every write reaches the companion as one discrete message
    /// (a BLE UART characteristic write, for instance).  Byte-stream links
    /// such as a plain UART return `false` and need every frame delimited.
    fn is_packet_framed(&self) -> bool {
        false
    }
}

/// A null link that discards all writes and is never connected.
/// Useful as a placeholder before the real link is brought up.
pub struct NullTransport;

impl LinkTransport for NullTransport {
    fn write_line(&mut self, _line: &str) -> Result<(), LinkError> {
        Ok(())
    }

    fn write_raw(&mut self, _data: &str) -> Result<(), LinkError> {
        Ok(())
    }

    fn is_connected(&self) -> bool {
        false
    }
}
