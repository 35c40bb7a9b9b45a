//! Transport-agnostic companion protocol.
//!
//! Line-oriented, colon-separated text frames exchanged with the
//! companion app over a UART-like link.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Protocol Stack                         │
//! │                                                            │
//! │  ┌───────────┐   ┌───────────┐   ┌──────────────────────┐ │
//! │  │ Transport │──▶│  Codec    │──▶│ Reply (typed frame)  │ │
//! │  │ (bytes)   │   │ (lines)   │   │  → bridge dispatcher │ │
//! │  └───────────┘   └───────────┘   └──────────────────────┘ │
//! │        ▲                                                   │
//! │        │         ┌───────────┐                             │
//! │        └─────────│ Request   │◀── bridge operations        │
//! │                  │ (encode)  │                             │
//! │                  └───────────┘                             │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod channels;
pub mod codec;
pub mod reply;
pub mod request;
pub mod tag;
pub mod transport;
