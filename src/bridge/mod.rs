//! Bridge core: session, routing and replay on top of the protocol.
//!
//! ```text
//!  LinkEvent ──▶ ┌──────────┐  Handshake  ┌──────────┐
//!                │ Dispatch │────────────▶│ Session  │──▶ InitSignal
//!                └────┬─────┘             └────┬─────┘
//!                     │ Result                 │ ReplayLedger
//!                     ▼                        ▼
//!                ┌──────────┐             ┌──────────┐
//!                │ Registry │             │  Ledger  │──▶ LinkTransport
//!                └──────────┘             └──────────┘
//! ```
//!
//! [`service::Bridge`] ties the pieces together and is the only type
//! most callers need.

pub mod dispatch;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod service;
pub mod session;

pub use events::{InitSignal, LinkEvent};
pub use service::Bridge;
pub use session::SessionState;
