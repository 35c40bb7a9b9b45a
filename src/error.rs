//! Unified error types for the RabitLink bridge.
//!
//! Follows the firmware convention: a single `Error` enum that every
//! subsystem converts into.  All variants are `Copy` so they can be
//! returned from the outbound path without allocation.
//!
//! Most failure in this crate is deliberately silent (malformed inbound
//! lines, requests without a registered handler).  Only a transport
//! write failure or an invalid configuration is surfaced as an error.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level bridge error
// ---------------------------------------------------------------------------

/// Every fallible bridge operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The link transport refused or failed a write.
    Link(LinkError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Link (transport) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// No companion is connected to the link.
    NotConnected,
    /// The underlying driver reported an I/O failure.
    Io,
    /// The outgoing data does not fit the driver's buffer.
    Overflow,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Io => write!(f, "I/O error"),
            Self::Overflow => write!(f, "write buffer overflow"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
