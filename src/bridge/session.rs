//! Session state machine.
//!
//! ```text
//!                 connect / init            ir:<empty>
//!  Disconnected ─────────────────▶ Awaiting ───────────▶ Ready
//!       ▲                          Handshake                │
//!       │                              │ ir:<reason>        │
//!       │                              ▼                    │
//!       │                       HandshakeFailed             │
//!       │          disconnect (from any state)              │
//!       └───────────────────────────────────────────────────┘
//! ```
//!
//! The machine is pure: each input returns the [`Action`]s the bridge must
//! carry out, in order.  Inputs arriving before [`Session::start`] are
//! ignored, since no link listener exists yet at that point.

use core::fmt;

use log::info;

use super::events::InitSignal;

/// Connection/handshake status of the companion session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Disconnected,
    AwaitingHandshake,
    Ready,
    HandshakeFailed,
}

impl SessionState {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::AwaitingHandshake => "AwaitingHandshake",
            Self::Ready => "Ready",
            Self::HandshakeFailed => "HandshakeFailed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write the handshake request to the link.
    SendHandshake,
    /// Retransmit every subscription ledger record.
    ReplayLedger,
    /// Notify the init handler.
    Signal(InitSignal),
}

/// At most three actions result from a single input.
pub type Actions = heapless::Vec<Action, 3>;

pub struct Session {
    state: SessionState,
    started: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Disconnected,
            started: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// Begin the session.  A no-op while a handshake is pending or done.
    pub fn start(&mut self, link_connected: bool) -> Actions {
        let mut actions = Actions::new();
        if matches!(
            self.state,
            SessionState::AwaitingHandshake | SessionState::Ready
        ) {
            return actions;
        }

        self.started = true;
        push(&mut actions, Action::Signal(InitSignal::Loading));
        if link_connected {
            self.transition(SessionState::AwaitingHandshake);
            push(&mut actions, Action::SendHandshake);
        }
        actions
    }

    /// The link attached (or re-attached).
    pub fn on_connected(&mut self) -> Actions {
        let mut actions = Actions::new();
        if !self.started {
            return actions;
        }
        self.transition(SessionState::AwaitingHandshake);
        push(&mut actions, Action::SendHandshake);
        push(&mut actions, Action::Signal(InitSignal::Loading));
        actions
    }

    /// The companion answered the handshake.  An empty `error` is success.
    pub fn on_handshake_reply(&mut self, error: &str) -> Actions {
        let mut actions = Actions::new();
        if !self.started {
            return actions;
        }
        if error.is_empty() {
            self.transition(SessionState::Ready);
            push(&mut actions, Action::ReplayLedger);
            push(&mut actions, Action::Signal(InitSignal::Ready));
        } else {
            self.transition(SessionState::HandshakeFailed);
            push(
                &mut actions,
                Action::Signal(InitSignal::Failed(error.to_owned())),
            );
        }
        actions
    }

    /// The link dropped.  Reported regardless of the prior state.
    pub fn on_disconnected(&mut self) -> Actions {
        let mut actions = Actions::new();
        if !self.started {
            return actions;
        }
        self.transition(SessionState::Disconnected);
        push(&mut actions, Action::Signal(InitSignal::Disconnected));
        actions
    }

    fn transition(&mut self, next: SessionState) {
        if next != self.state {
            info!("session: {} -> {}", self.state, next);
        }
        self.state = next;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn push(actions: &mut Actions, action: Action) {
    // Capacity covers the longest transition above.
    let _ = actions.push(action);
}
