//! Link event queue.
//!
//! Uses an `embassy-sync` bounded MPMC channel to serialise link events
//! coming from driver callbacks, ISRs or a reader thread onto the single
//! context that owns the [`Bridge`](crate::bridge::service::Bridge).
//! Nothing in the bridge is touched from the producer side.
//!
//! ```text
//! ┌──────────────┐  LinkEvent  ┌──────────────┐
//! │ Link driver  │────────────▶│  Bridge owner │
//! │ (callbacks)  │             │  (pump loop)  │
//! └──────────────┘             └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use super::codec::MAX_LINE_LEN;
use crate::bridge::events::{CHUNK_LEN, LinkEvent};

/// Channel depth for link events.
pub const LINK_QUEUE_DEPTH: usize = 16;

/// Bounded queue of [`LinkEvent`]s.
pub struct LinkQueue {
    channel: Channel<CriticalSectionRawMutex, LinkEvent, LINK_QUEUE_DEPTH>,
}

/// Process-wide queue for drivers whose callbacks cannot carry context.
pub static LINK_EVENTS: LinkQueue = LinkQueue::new();

impl LinkQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    pub fn post_connected(&self) -> bool {
        self.post(LinkEvent::Connected)
    }

    pub fn post_disconnected(&self) -> bool {
        self.post(LinkEvent::Disconnected)
    }

    /// Post one already-delimited line.  Lines longer than
    /// [`MAX_LINE_LEN`] are dropped.
    pub fn post_line(&self, line: &str) -> bool {
        let mut buf = heapless::String::<MAX_LINE_LEN>::new();
        if buf.push_str(line).is_err() {
            warn!("link queue: line of {} bytes too long, dropping", line.len());
            return false;
        }
        self.post(LinkEvent::Line(buf))
    }

    /// Post raw bytes, split into [`CHUNK_LEN`] pieces.  Returns `false` if
    /// any piece was dropped.
    pub fn post_bytes(&self, data: &[u8]) -> bool {
        let mut all_posted = true;
        for piece in data.chunks(CHUNK_LEN) {
            let mut chunk = heapless::Vec::new();
            // `chunks` never yields more than CHUNK_LEN bytes.
            let _ = chunk.extend_from_slice(piece);
            all_posted &= self.post(LinkEvent::Bytes(chunk));
        }
        all_posted
    }

    /// Take the next event without waiting.
    pub fn try_next(&self) -> Option<LinkEvent> {
        self.channel.try_receive().ok()
    }

    /// Block the calling thread until an event arrives.
    pub fn next(&self) -> LinkEvent {
        futures_lite::future::block_on(self.channel.receive())
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    fn post(&self, event: LinkEvent) -> bool {
        if self.channel.try_send(event).is_err() {
            warn!("link queue full, dropping event");
            return false;
        }
        true
    }
}

impl Default for LinkQueue {
    fn default() -> Self {
        Self::new()
    }
}
