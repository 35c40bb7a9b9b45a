//! In-memory link adapter.
//!
//! Records every write so host code and tests can inspect exactly what
//! would have gone over the wire.  Connection state and write failures
//! are set by hand.

use crate::error::LinkError;
use crate::proto::codec::DELIMITER;
use crate::proto::transport::LinkTransport;

#[derive(Debug, Default, Clone)]
pub struct MemoryLink {
    connected: bool,
    packet_framed: bool,
    fail_with: Option<LinkError>,
    /// Everything written, delimiters included, in order.
    wire: Vec<u8>,
    lines: Vec<String>,
    raw: Vec<String>,
}

impl MemoryLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A link that reports a companion attached.
    pub fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Behave like a message-oriented link (BLE UART) instead of a byte
    /// stream.
    pub fn set_packet_framed(&mut self, packet_framed: bool) {
        self.packet_framed = packet_framed;
    }

    /// Make every following write fail with `error` (`None` to recover).
    pub fn fail_writes(&mut self, error: Option<LinkError>) {
        self.fail_with = error;
    }

    /// Lines written with `write_line`, without delimiters.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Strings written with `write_raw`.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// The byte stream as the companion would see it.
    pub fn wire(&self) -> &[u8] {
        &self.wire
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.wire.clear();
        self.lines.clear();
        self.raw.clear();
    }

    fn check(&self) -> Result<(), LinkError> {
        match self.fail_with {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl LinkTransport for MemoryLink {
    fn write_line(&mut self, line: &str) -> Result<(), LinkError> {
        self.check()?;
        self.wire.extend_from_slice(line.as_bytes());
        self.wire.push(DELIMITER);
        self.lines.push(line.to_owned());
        Ok(())
    }

    fn write_raw(&mut self, data: &str) -> Result<(), LinkError> {
        self.check()?;
        self.wire.extend_from_slice(data.as_bytes());
        self.raw.push(data.to_owned());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn is_packet_framed(&self) -> bool {
        self.packet_framed
    }
}
