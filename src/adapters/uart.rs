//! UART link adapter (ESP-IDF only).
//!
//! The companion sits on a plain serial line, so the write half becomes a
//! [`LinkTransport`] and the read half runs on its own thread, posting raw
//! bytes into a [`LinkQueue`] for the bridge owner to pump.
//!
//! ```text
//!  UartRxDriver ──(reader thread)──▶ LinkQueue ──▶ Bridge::pump
//!  Bridge ──▶ UartLink (UartTxDriver) ──▶ TX pin
//! ```
//!
//! The UART is a byte stream, so every frame (the handshake included) goes
//! out `\n`-delimited.  A UART has no attach/detach notion; the link counts as connected from
//! boot unless the owner says otherwise.

use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::uart::{UartRxDriver, UartTxDriver};
use log::{info, warn};

use crate::error::LinkError;
use crate::proto::channels::LinkQueue;
use crate::proto::codec::DELIMITER;
use crate::proto::transport::LinkTransport;

/// Bytes pulled from the driver per read.
const READ_BUF_LEN: usize = 128;
const READER_STACK_KB: usize = 4;

pub struct UartLink {
    tx: UartTxDriver<'static>,
    connected: bool,
}

impl UartLink {
    pub fn new(tx: UartTxDriver<'static>) -> Self {
        Self {
            tx,
            connected: true,
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), LinkError> {
        while !bytes.is_empty() {
            let written = self.tx.write(bytes).map_err(|e| {
                warn!("uart: write failed: {}", e);
                LinkError::Io
            })?;
            if written == 0 {
                return Err(LinkError::Overflow);
            }
            bytes = &bytes[written..];
        }
        Ok(())
    }
}

impl LinkTransport for UartLink {
    fn write_line(&mut self, line: &str) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::NotConnected);
        }
        self.write_all(line.as_bytes())?;
        self.write_all(&[DELIMITER])
    }

    fn write_raw(&mut self, data: &str) -> Result<(), LinkError> {
        if !self.connected {
            return Err(LinkError::NotConnected);
        }
        self.write_all(data.as_bytes())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Start the reader thread.  Every byte received is posted to `queue`.
pub fn spawn_reader(
    rx: UartRxDriver<'static>,
    queue: &'static LinkQueue,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    info!("uart: starting reader ({}KB stack)", READER_STACK_KB);
    std::thread::Builder::new()
        .name("uart-rx".into())
        .stack_size(READER_STACK_KB * 1024)
        .spawn(move || {
            let mut buf = [0u8; READ_BUF_LEN];
            loop {
                match rx.read(&mut buf, BLOCK) {
                    Ok(0) => {}
                    Ok(n) => {
                        if !queue.post_bytes(&buf[..n]) {
                            warn!("uart: link queue full, {} bytes lost", n);
                        }
                    }
                    Err(e) => warn!("uart: read failed: {}", e),
                }
            }
        })
}
