//! Bridge events.
//!
//! [`LinkEvent`]s flow *into* the bridge from the link driver;
//! [`InitSignal`]s flow *out* of it to the application's init handler.

use core::fmt;

use crate::proto::codec::MAX_LINE_LEN;

/// Largest raw byte chunk carried by a single [`LinkEvent::Bytes`].
pub const CHUNK_LEN: usize = 64;

/// Something that happened on the companion link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    /// A companion attached.
    Connected,
    /// The companion went away.
    Disconnected,
    /// One complete inbound line, delimiter removed.
    Line(heapless::String<MAX_LINE_LEN>),
    /// Raw inbound bytes that still need line assembly.
    Bytes(heapless::Vec<u8, CHUNK_LEN>),
}

/// Session lifecycle notification delivered to the init handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitSignal {
    /// Session started or link attached; handshake pending.
    Loading,
    /// Handshake accepted and subscriptions restored.
    Ready,
    /// Companion rejected the handshake.
    Failed(String),
    /// Link lost.
    Disconnected,
}

impl InitSignal {
    /// The boolean form used by simple init handlers.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Rejection reason, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for InitSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::Disconnected => write!(f, "disconnected"),
        }
    }
}
