//! Typed inbound replies.
//!
//! [`Reply::from_frame`] turns a decoded [`Frame`] into either a routable
//! reply or the reason it is not routable.  The reasons exist only so the
//! dispatcher can log them; none of them is ever surfaced to callers.

use core::fmt;

use super::codec::Frame;
use super::tag::MessageTag;

/// Status handed to pub/sub and notification handlers, whose frames carry
/// no status of their own.
pub const IMPLICIT_STATUS: i32 = 200;

/// A routable inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply<'a> {
    /// Handshake outcome.  An empty `error` means the companion accepted.
    Handshake { error: &'a str },
    /// A result for the handler registered under `key` (an event id or a
    /// subscribed topic).
    Result {
        tag: MessageTag,
        key: &'a str,
        status: i32,
        payload: &'a str,
    },
}

/// Why a frame cannot be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unroutable<'a> {
    /// Blank line.
    Empty,
    /// Tag outside the alphabet.
    UnknownTag(&'a str),
    /// A tag the device sends, not receives.
    Outbound(MessageTag),
    /// Fewer fields than the tag requires.
    Underfilled { tag: MessageTag, fields: usize },
    /// Status field is not an integer.
    BadStatus(&'a str),
}

impl fmt::Display for Unroutable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::UnknownTag(tag) => write!(f, "unknown tag {tag:?}"),
            Self::Outbound(tag) => write!(f, "outbound-only tag {tag}"),
            Self::Underfilled { tag, fields } => {
                write!(f, "{tag} frame with only {fields} fields")
            }
            Self::BadStatus(status) => write!(f, "non-numeric status {status:?}"),
        }
    }
}

/// Minimum number of fields (tag included) an inbound tag needs.
const fn min_fields(tag: MessageTag) -> usize {
    match tag {
        MessageTag::HttpReply | MessageTag::DashboardPublishReply => 4,
        MessageTag::MqttSubscribeReply
        | MessageTag::LocalSubscribeReply
        | MessageTag::NotificationReply => 3,
        _ => 2,
    }
}

impl<'a> Reply<'a> {
    pub fn from_frame(frame: &Frame<'a>) -> Result<Self, Unroutable<'a>> {
        if frame.is_empty() {
            return Err(Unroutable::Empty);
        }
        let Some(tag) = frame.message_tag() else {
            return Err(Unroutable::UnknownTag(frame.tag()));
        };
        if !tag.is_inbound() {
            return Err(Unroutable::Outbound(tag));
        }
        if frame.len() < min_fields(tag) {
            return Err(Unroutable::Underfilled {
                tag,
                fields: frame.len(),
            });
        }

        // Field counts were checked above.
        let field = |i: usize| frame.field(i).unwrap_or("");

        match tag {
            MessageTag::InitReply => Ok(Self::Handshake { error: field(1) }),

            MessageTag::HttpReply | MessageTag::DashboardPublishReply => {
                let raw = field(2);
                let status = raw.parse::<i32>().map_err(|_| Unroutable::BadStatus(raw))?;
                Ok(Self::Result {
                    tag,
                    key: field(1),
                    status,
                    payload: field(3),
                })
            }

            MessageTag::MqttSubscribeReply
            | MessageTag::LocalSubscribeReply
            | MessageTag::NotificationReply => Ok(Self::Result {
                tag,
                key: field(1),
                status: IMPLICIT_STATUS,
                payload: field(2),
            }),

            other => Err(Unroutable::Outbound(other)),
        }
    }
}
