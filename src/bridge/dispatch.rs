//! Inbound line dispatcher.
//!
//! Decodes one line, classifies it, and delivers results to the handler
//! registered under their key.  Handshake replies are handed back to the
//! caller because they drive the session machine, which the dispatcher
//! does not own.  Nothing here ever fails: malformed or orphan frames are
//! logged and dropped.

use log::{debug, warn};

use super::registry::CallbackRegistry;
use crate::proto::codec::decode_line;
use crate::proto::reply::{Reply, Unroutable};

/// What happened to a dispatched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed<'a> {
    /// Handshake reply; the caller advances the session.
    Handshake { error: &'a str },
    /// A registered handler ran.
    Delivered,
    /// Well-formed result with no handler for its key.
    Orphan,
    /// Not routable.
    Dropped,
}

pub fn dispatch<'a>(line: &'a str, registry: &mut CallbackRegistry) -> Routed<'a> {
    let frame = decode_line(line);
    match Reply::from_frame(&frame) {
        Ok(Reply::Handshake { error }) => Routed::Handshake { error },

        Ok(Reply::Result {
            tag,
            key,
            status,
            payload,
        }) => {
            if registry.invoke(key, status, payload) {
                Routed::Delivered
            } else {
                debug!("dispatch: no handler for {tag} key {key:?}");
                Routed::Orphan
            }
        }

        Err(Unroutable::Empty) => Routed::Dropped,
        Err(reason @ Unroutable::BadStatus(_)) => {
            warn!("dispatch: dropping line: {reason}");
            Routed::Dropped
        }
        Err(reason) => {
            debug!("dispatch: dropping line: {reason}");
            Routed::Dropped
        }
    }
}
