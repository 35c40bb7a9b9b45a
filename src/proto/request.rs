//! Typed outbound requests and their wire encoding.
//!
//! Each variant knows its tag and which of its fields are tokens (stripped)
//! and which are free-form text (percent-escaped).  The per-field policy
//! follows the companion's parser, which is why e.g. an MQTT message is
//! stripped while a local message is escaped.

use core::fmt;
use core::str::FromStr;

use super::codec::{EscapeMode, Field, encode_frame, strip};
use super::tag::MessageTag;

/// Separator between the account, key and feed of a dashboard publish.
const DASHBOARD_JOIN: char = '|';

// ── HTTP method ──────────────────────────────────────────────

/// HTTP verbs understood by the companion, sent as their ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HttpMethod {
    Get = 0,
    Head = 1,
    Post = 2,
    Put = 3,
    Delete = 4,
    Options = 5,
    Trace = 6,
    Patch = 7,
}

impl HttpMethod {
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Options,
        Self::Trace,
        Self::Patch,
    ];

    /// Wire ordinal.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a verb name is not one of [`HttpMethod::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMethod;

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown HTTP method")
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    /// Case-insensitive verb lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(UnknownMethod)
    }
}

// ── Pub/sub scope ────────────────────────────────────────────

/// Which broker a publish/subscribe goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Remote MQTT broker configured in the companion.
    Mqtt,
    /// Companion-local pub/sub bus.
    Local,
}

impl Scope {
    pub const fn publish_tag(self) -> MessageTag {
        match self {
            Self::Mqtt => MessageTag::MqttPublish,
            Self::Local => MessageTag::LocalPublish,
        }
    }

    pub const fn subscribe_tag(self) -> MessageTag {
        match self {
            Self::Mqtt => MessageTag::MqttSubscribe,
            Self::Local => MessageTag::LocalSubscribe,
        }
    }
}

// ── Requests ─────────────────────────────────────────────────

/// A request the device sends to the companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Handshake opener.
    Init,
    Http {
        event_id: &'a str,
        method: HttpMethod,
        url: &'a str,
        headers: &'a str,
        body: &'a str,
        path: &'a str,
    },
    Publish {
        scope: Scope,
        topic: &'a str,
        message: &'a str,
    },
    Subscribe {
        scope: Scope,
        topic: &'a str,
    },
    DashboardPublish {
        event_id: &'a str,
        account: &'a str,
        key: &'a str,
        feed_key: &'a str,
        value: &'a str,
    },
    Notification {
        event_id: &'a str,
        method: &'a str,
        recipient: &'a str,
        template: &'a str,
        data: &'a str,
    },
}

impl Request<'_> {
    pub fn tag(&self) -> MessageTag {
        match self {
            Self::Init => MessageTag::InitRequest,
            Self::Http { .. } => MessageTag::HttpRequest,
            Self::Publish { scope, .. } => scope.publish_tag(),
            Self::Subscribe { scope, .. } => scope.subscribe_tag(),
            Self::DashboardPublish { .. } => MessageTag::DashboardPublishRequest,
            Self::Notification { .. } => MessageTag::NotificationRequest,
        }
    }

    /// Encode into a single line (without the delimiter).
    pub fn encode(&self, mode: EscapeMode) -> String {
        let tag = self.tag();
        match *self {
            Self::Init => encode_frame(tag, &[], mode),

            Self::Http {
                event_id,
                method,
                url,
                headers,
                body,
                path,
            } => {
                let ordinal = method.ordinal().to_string();
                encode_frame(
                    tag,
                    &[
                        Field::Token(event_id),
                        Field::Raw(&ordinal),
                        Field::Token(url),
                        Field::Text(headers),
                        Field::Text(body),
                        Field::Text(path),
                    ],
                    mode,
                )
            }

            Self::Publish {
                scope: Scope::Mqtt,
                topic,
                message,
            } => encode_frame(tag, &[Field::Token(topic), Field::Token(message)], mode),

            Self::Publish {
                scope: Scope::Local,
                topic,
                message,
            } => encode_frame(tag, &[Field::Token(topic), Field::Text(message)], mode),

            Self::Subscribe { topic, .. } => encode_frame(tag, &[Field::Token(topic)], mode),

            Self::DashboardPublish {
                event_id,
                account,
                key,
                feed_key,
                value,
            } => {
                // The legacy companion takes the target parts verbatim.
                let mut target = String::new();
                for (i, part) in [account, key, feed_key].into_iter().enumerate() {
                    if i > 0 {
                        target.push(DASHBOARD_JOIN);
                    }
                    match mode {
                        EscapeMode::FirstOccurrence => target.push_str(part),
                        EscapeMode::AllOccurrences => target.push_str(&strip(part, mode)),
                    }
                }
                encode_frame(
                    tag,
                    &[Field::Token(event_id), Field::Raw(&target), Field::Text(value)],
                    mode,
                )
            }

            Self::Notification {
                event_id,
                method,
                recipient,
                template,
                data,
            } => encode_frame(
                tag,
                &[
                    Field::Token(event_id),
                    method_field(method, mode),
                    Field::Token(recipient),
                    Field::Token(template),
                    Field::Text(data),
                ],
                mode,
            ),
        }
    }
}

/// Notification methods are sent as-is on the legacy wire.
fn method_field(method: &str, mode: EscapeMode) -> Field<'_> {
    match mode {
        EscapeMode::FirstOccurrence => Field::Raw(method),
        EscapeMode::AllOccurrences => Field::Token(method),
    }
}
