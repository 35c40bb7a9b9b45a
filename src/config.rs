//! Bridge configuration parameters
//!
//! All tunable parameters for the RabitLink bridge.
//! Values can be overridden by a JSON document shipped with the firmware
//! image or pushed during provisioning.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::proto::codec::{EscapeMode, MAX_LINE_LEN};

/// Core bridge configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    // --- Wire format ---
    /// How separator characters inside outbound fields are removed/escaped
    pub escape_mode: EscapeMode,
    /// Longest inbound line buffered before it is discarded (bytes)
    pub max_line_len: usize,

    // --- Diagnostics ---
    /// Echo received lines, replays and lifecycle signals at `info` level
    pub debug_echo: bool,

    // --- Link ---
    /// UART baud rate for the companion link
    pub uart_baud: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            escape_mode: EscapeMode::AllOccurrences,
            max_line_len: MAX_LINE_LEN,
            debug_echo: false,
            uart_baud: 115_200,
        }
    }
}

impl BridgeConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON document"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the bridge cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_len == 0 {
            return Err(Error::Config("max_line_len must be non-zero"));
        }
        if self.max_line_len > MAX_LINE_LEN {
            return Err(Error::Config("max_line_len exceeds assembler capacity"));
        }
        if self.uart_baud == 0 {
            return Err(Error::Config("uart_baud must be non-zero"));
        }
        Ok(())
    }
}
