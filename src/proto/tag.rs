//! Message tags: the two-letter code that opens every frame.
//!
//! The alphabet is fixed by the companion app, so it is modelled as a
//! closed enum and every routing decision is an exhaustive `match`.
//!
//! | Tag  | Direction | Purpose                        |
//! |------|-----------|--------------------------------|
//! | `it` | out       | handshake request              |
//! | `ir` | in        | handshake reply                |
//! | `ht` | out       | HTTP request                   |
//! | `hr` | in        | HTTP reply                     |
//! | `mp` | out       | MQTT publish                   |
//! | `ms` | out       | MQTT subscribe                 |
//! | `mr` | in        | MQTT message for a topic       |
//! | `lp` | out       | local publish                  |
//! | `ls` | out       | local subscribe                |
//! | `lr` | in        | local message for a topic      |
//! | `ct` | out       | notification request           |
//! | `cr` | in        | notification reply             |
//! | `at` | out       | dashboard publish request      |
//! | `ar` | in        | dashboard publish reply        |

use core::fmt;

/// Every tag the bridge and the companion exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageTag {
    InitRequest,
    InitReply,
    HttpRequest,
    HttpReply,
    MqttPublish,
    MqttSubscribe,
    MqttSubscribeReply,
    LocalPublish,
    LocalSubscribe,
    LocalSubscribeReply,
    NotificationRequest,
    NotificationReply,
    DashboardPublishRequest,
    DashboardPublishReply,
}

impl MessageTag {
    /// All tags, in table order.
    pub const ALL: [Self; 14] = [
        Self::InitRequest,
        Self::InitReply,
        Self::HttpRequest,
        Self::HttpReply,
        Self::MqttPublish,
        Self::MqttSubscribe,
        Self::MqttSubscribeReply,
        Self::LocalPublish,
        Self::LocalSubscribe,
        Self::LocalSubscribeReply,
        Self::NotificationRequest,
        Self::NotificationReply,
        Self::DashboardPublishRequest,
        Self::DashboardPublishReply,
    ];

    /// The on-wire code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InitRequest => "it",
            Self::InitReply => "ir",
            Self::HttpRequest => "ht",
            Self::HttpReply => "hr",
            Self::MqttPublish => "mp",
            Self::MqttSubscribe => "ms",
            Self::MqttSubscribeReply => "mr",
            Self::LocalPublish => "lp",
            Self::LocalSubscribe => "ls",
            Self::LocalSubscribeReply => "lr",
            Self::NotificationRequest => "ct",
            Self::NotificationReply => "cr",
            Self::DashboardPublishRequest => "at",
            Self::DashboardPublishReply => "ar",
        }
    }

    /// Look up a wire code.  Unknown codes yield `None`.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == code)
    }

    /// `true` for tags the companion sends to the device.
    pub const fn is_inbound(self) -> bool {
        matches!(
            self,
            Self::InitReply
                | Self::HttpReply
                | Self::MqttSubscribeReply
                | Self::LocalSubscribeReply
                | Self::NotificationReply
                | Self::DashboardPublishReply
        )
    }
}

impl fmt::Display for MessageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
