//! Bridge service: the explicit session object.
//!
//! [`Bridge`] owns the transport, callback registry, subscription ledger,
//! and session machine.  Callers drive it two ways: outbound operations
//! (`send_http_request`, `subscribe_topic`, ...) and inbound link events
//! (`handle_event`, or `pump` over a [`LinkQueue`]).  Both paths take
//! `&mut self`, so all shared state is mutated from one context.
//!
//! ```text
//!  caller ops ──▶ ┌──────────────────────────────┐ ──▶ LinkTransport
//!                 │            Bridge            │
//!  LinkEvent  ──▶ │ Session · Registry · Ledger  │ ──▶ InitHandler
//!                 └──────────────────────────────┘ ──▶ ResultHandlers
//! ```

use core::fmt;

use log::{Level, debug, log, warn};

use super::dispatch::{Routed, dispatch};
use super::events::{InitSignal, LinkEvent};
use super::ledger::SubscriptionLedger;
use super::registry::{CallbackRegistry, ResultHandler};
use super::session::{Action, Actions, Session, SessionState};
use crate::config::BridgeConfig;
use crate::error::{LinkError, Result};
use crate::proto::channels::LinkQueue;
use crate::proto::codec::{LineAssembler, strip};
use crate::proto::request::{HttpMethod, Request, Scope};
use crate::proto::transport::LinkTransport;

/// Receives every lifecycle signal.
pub type InitHandler = Box<dyn FnMut(&InitSignal)>;

// ───────────────────────────────────────────────────────────────
// Bridge
// ───────────────────────────────────────────────────────────────

pub struct Bridge<T: LinkTransport> {
    config: BridgeConfig,
    transport: T,
    registry: CallbackRegistry,
    ledger: SubscriptionLedger,
    session: Session,
    init_handler: Option<InitHandler>,
    assembler: LineAssembler,
}

impl<T: LinkTransport> Bridge<T> {
    /// Build a bridge over `transport`.
    ///
    /// Nothing is sent until [`init_session`](Self::init_session).
    pub fn new(transport: T, config: BridgeConfig) -> Self {
        let assembler = LineAssembler::with_limit(config.max_line_len);
        Self {
            config,
            transport,
            registry: CallbackRegistry::new(),
            ledger: SubscriptionLedger::new(),
            session: Session::new(),
            init_handler: None,
            assembler,
        }
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn ledger(&self) -> &SubscriptionLedger {
        &self.ledger
    }

    pub fn registry(&self) -> &CallbackRegistry {
        &self.registry
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Register (or replace) the lifecycle callback.
    pub fn set_init_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&InitSignal) + 'static,
    {
        self.init_handler = Some(Box::new(handler));
    }

    /// Start the session and, if the link is up, open the handshake.
    ///
    /// Repeated calls while a handshake is pending or complete do nothing.
    pub fn init_session(&mut self) -> Result<()> {
        let connected = self.transport.is_connected();
        let actions = self.session.start(connected);
        self.apply(actions)
    }

    // ── Inbound ───────────────────────────────────────────────

    /// Process one link event.  Inbound processing never fails; write
    /// errors during handshake or replay are logged.
    pub fn handle_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::Connected => self.on_connected(),
            LinkEvent::Disconnected => self.on_disconnected(),
            LinkEvent::Line(line) => self.handle_line(&line),
            LinkEvent::Bytes(bytes) => self.feed_bytes(&bytes),
        }
    }

    /// Drain every queued event.  Returns how many were handled.
    pub fn pump(&mut self, queue: &LinkQueue) -> usize {
        let mut handled = 0;
        while let Some(event) = queue.try_next() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    pub fn on_connected(&mut self) {
        let actions = self.session.on_connected();
        self.apply_logged(actions);
    }

    pub fn on_disconnected(&mut self) {
        self.assembler.reset();
        let actions = self.session.on_disconnected();
        self.apply_logged(actions);
    }

    /// Feed raw link bytes; every completed line is dispatched.
    pub fn feed_bytes(&mut self, data: &[u8]) {
        let mut lines = Vec::new();
        self.assembler.feed(data, &mut lines);
        for line in &lines {
            self.handle_line(line);
        }
    }

    /// Dispatch one already-delimited line.
    pub fn handle_line(&mut self, line: &str) {
        if !self.session.is_started() {
            debug!("bridge: session not started, ignoring {line:?}");
            return;
        }
        self.echo(format_args!("bridge: rx {line:?}"));

        if let Routed::Handshake { error } = dispatch(line, &mut self.registry) {
            let actions = self.session.on_handshake_reply(error);
            self.apply_logged(actions);
        }
    }

    // ── Outbound ──────────────────────────────────────────────

    /// Register (or replace) the reply handler for `event_id`.
    pub fn set_result_handler<F>(&mut self, event_id: &str, handler: F)
    where
        F: FnMut(i32, &str) + 'static,
    {
        let key = self.wire_key(event_id);
        self.registry.register(&key, Box::new(handler));
    }

    /// Ask the companion to perform an HTTP request.
    ///
    /// Silently does nothing unless a handler is registered for `event_id`.
    pub fn send_http_request(
        &mut self,
        event_id: &str,
        method: HttpMethod,
        url: &str,
        headers: &str,
        body: &str,
        path: &str,
    ) -> Result<()> {
        let key = self.wire_key(event_id);
        if !self.registry.contains(&key) {
            debug!("bridge: no handler for {key:?}, http request not sent");
            return Ok(());
        }
        self.send(&Request::Http {
            event_id,
            method,
            url,
            headers,
            body,
            path,
        })
    }

    /// Subscribe to `topic` and route its messages to `handler`.
    ///
    /// The frame is recorded for replay even if the write fails, so the
    /// subscription is restored on the next successful handshake.
    pub fn subscribe_topic<F>(&mut self, scope: Scope, topic: &str, handler: F) -> Result<()>
    where
        F: FnMut(i32, &str) + 'static,
    {
        let key = self.wire_key(topic);
        let handler: ResultHandler = Box::new(handler);
        self.registry.register(&key, handler);

        let line = Request::Subscribe { scope, topic }.encode(self.config.escape_mode);
        self.ledger.record(line.clone());
        self.transport.write_line(&line)?;
        Ok(())
    }

    /// Fire-and-forget publish.
    pub fn publish_message(&mut self, scope: Scope, topic: &str, message: &str) -> Result<()> {
        self.send(&Request::Publish {
            scope,
            topic,
            message,
        })
    }

    /// Push `value` to a dashboard feed.  The reply, if any, is routed to
    /// the handler registered under `event_id`.
    pub fn publish_dashboard_value(
        &mut self,
        event_id: &str,
        account: &str,
        key: &str,
        feed_key: &str,
        value: &str,
    ) -> Result<()> {
        self.send(&Request::DashboardPublish {
            event_id,
            account,
            key,
            feed_key,
            value,
        })
    }

    pub fn send_notification(
        &mut self,
        event_id: &str,
        method: &str,
        recipient: &str,
        template: &str,
        data: &str,
    ) -> Result<()> {
        self.send(&Request::Notification {
            event_id,
            method,
            recipient,
            template,
            data,
        })
    }

    // ── Internals ─────────────────────────────────────────────

    /// Key as it appears in reply frames.
    fn wire_key(&self, id: &str) -> String {
        strip(id, self.config.escape_mode).into_owned()
    }

    fn send(&mut self, request: &Request<'_>) -> Result<()> {
        let line = request.encode(self.config.escape_mode);
        self.transport.write_line(&line)?;
        Ok(())
    }

    /// The handshake goes out bare on packet links and as an ordinary
    /// line on byte streams, where the companion splits on `\n`.
    fn send_handshake(&mut self) -> core::result::Result<(), LinkError> {
        let line = Request::Init.encode(self.config.escape_mode);
        if self.transport.is_packet_framed() {
            self.transport.write_raw(&line)
        } else {
            self.transport.write_line(&line)
        }
    }

    /// Carry out transition actions in order.  Every action runs; the
    /// first write failure is returned.
    fn apply(&mut self, actions: Actions) -> Result<()> {
        let mut outcome = Ok(());
        for action in actions {
            match action {
                Action::SendHandshake => {
                    if let Err(e) = self.send_handshake() {
                        warn!("bridge: handshake write failed: {e}");
                        if outcome.is_ok() {
                            outcome = Err(e.into());
                        }
                    }
                }
                Action::ReplayLedger => self.replay_ledger(),
                Action::Signal(signal) => self.signal(&signal),
            }
        }
        outcome
    }

    fn apply_logged(&mut self, actions: Actions) {
        // Failures were already logged inside `apply`.
        let _ = self.apply(actions);
    }

    fn replay_ledger(&mut self) {
        let level = self.echo_level();
        for frame in self.ledger.iter() {
            log!(level, "bridge: replay {frame:?}");
            if let Err(e) = self.transport.write_line(frame) {
                warn!("bridge: replay of {frame:?} failed: {e}");
            }
        }
    }

    fn signal(&mut self, signal: &InitSignal) {
        self.echo(format_args!("bridge: init signal {signal}"));
        if let Some(handler) = self.init_handler.as_mut() {
            handler(signal);
        }
    }

    fn echo_level(&self) -> Level {
        if self.config.debug_echo {
            Level::Info
        } else {
            Level::Debug
        }
    }

    fn echo(&self, args: fmt::Arguments<'_>) {
        log!(self.echo_level(), "{args}");
    }
}
