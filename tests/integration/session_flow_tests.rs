//! Session lifecycle: handshake, replay, reconnect.

use rabitlink::LinkError;
use rabitlink::adapters::memory::MemoryLink;
use rabitlink::bridge::{Bridge, InitSignal, LinkEvent, SessionState};
use rabitlink::config::BridgeConfig;
use rabitlink::proto::codec::LineAssembler;
use rabitlink::proto::request::Scope;

use crate::mock_link::Harness;

// ── Handshake ────────────────────────────────────────────────

#[test]
fn init_on_live_link_sends_handshake_line() {
    let mut h = Harness::new(true);
    h.bridge.init_session().unwrap();

    assert_eq!(h.lines(), vec!["it".to_owned()]);
    assert_eq!(h.bridge.transport().wire(), b"it\n");
    assert_eq!(h.bridge.state(), SessionState::AwaitingHandshake);
    assert_eq!(*h.signals.borrow(), vec![InitSignal::Loading]);
}

#[test]
fn init_twice_when_ready_sends_nothing_more() {
    let mut h = Harness::ready();
    h.bridge.init_session().unwrap();
    h.bridge.init_session().unwrap();

    assert!(h.bridge.transport().wire().is_empty());
    assert!(h.signals.borrow().is_empty());
    assert_eq!(h.bridge.state(), SessionState::Ready);
}

#[test]
fn accepted_handshake_signals_ready() {
    let mut h = Harness::new(true);
    h.bridge.init_session().unwrap();
    h.bridge.feed_bytes(b"ir:\r\n");

    assert_eq!(h.bridge.state(), SessionState::Ready);
    assert_eq!(h.last_signal(), Some(InitSignal::Ready));
    assert!(h.last_signal().is_some_and(|s| s.is_ready()));
}

#[test]
fn rejected_handshake_reports_reason() {
    let mut h = Harness::new(true);
    h.bridge.init_session().unwrap();
    h.bridge.feed_bytes(b"ir:bad-auth\n");

    assert_eq!(h.bridge.state(), SessionState::HandshakeFailed);
    assert_eq!(h.last_signal(), Some(InitSignal::Failed("bad-auth".into())));
    assert_eq!(
        h.last_signal().as_ref().and_then(InitSignal::error),
        Some("bad-auth")
    );
}

#[test]
fn rejection_is_not_replayed() {
    let mut h = Harness::new(true);
    h.bridge
        .subscribe_topic(Scope::Mqtt, "a", |_, _| {})
        .unwrap();
    h.bridge.init_session().unwrap();
    h.clear();
    h.bridge.handle_line("ir:nope");
    assert!(h.lines().is_empty());
}

#[test]
fn init_after_rejection_retries_handshake() {
    let mut h = Harness::new(true);
    h.bridge.init_session().unwrap();
    h.bridge.handle_line("ir:busy");
    h.clear();

    h.bridge.init_session().unwrap();
    assert_eq!(h.lines(), vec!["it".to_owned()]);
    assert_eq!(h.bridge.state(), SessionState::AwaitingHandshake);
}

#[test]
fn companion_reads_handshake_as_its_own_line() {
    let mut h = Harness::new(true);
    h.bridge
        .subscribe_topic(Scope::Local, "rabitlink/ping", |_, _| {})
        .unwrap();
    h.bridge.init_session().unwrap();
    h.bridge.publish_message(Scope::Mqtt, "t", "m").unwrap();

    let mut asm = LineAssembler::new();
    let mut lines = Vec::new();
    asm.feed(h.bridge.transport().wire(), &mut lines);

    assert_eq!(lines, vec!["ls:rabitlink/ping", "it", "mp:t:m"]);
    assert_eq!(asm.pending(), 0);
}

#[test]
fn packet_link_gets_bare_handshake() {
    let mut link = MemoryLink::connected();
    link.set_packet_framed(true);
    let mut bridge = Bridge::new(link, BridgeConfig::default());
    bridge.init_session().unwrap();

    assert_eq!(bridge.transport().raw(), ["it".to_owned()]);
    assert_eq!(bridge.transport().wire(), b"it");
}

// ── Replay ───────────────────────────────────────────────────

#[test]
fn reconnect_replays_every_subscription_in_order() {
    let mut h = Harness::ready();
    let topics = ["sensors/temp", "sensors/hum", "cmd"];
    for (i, topic) in topics.iter().enumerate() {
        let scope = if i % 2 == 0 { Scope::Mqtt } else { Scope::Local };
        h.bridge.subscribe_topic(scope, topic, |_, _| {}).unwrap();
    }
    let original = h.lines();
    assert_eq!(original.len(), topics.len());

    h.bridge.handle_event(LinkEvent::Disconnected);
    h.bridge.handle_event(LinkEvent::Connected);
    h.clear();
    h.bridge.handle_line("ir:");

    assert_eq!(h.lines(), original);
    assert_eq!(h.last_signal(), Some(InitSignal::Ready));
}

#[test]
fn mqtt_subscription_replayed_verbatim() {
    let mut h = Harness::ready();
    h.bridge
        .subscribe_topic(Scope::Mqtt, "sensors/temp", |_, _| {})
        .unwrap();

    h.bridge.on_disconnected();
    h.bridge.on_connected();
    h.clear();
    h.bridge.handle_line("ir:");

    assert_eq!(h.bridge.transport().wire(), b"ms:sensors/temp\n");
}

#[test]
fn duplicate_subscriptions_replay_twice() {
    let mut h = Harness::ready();
    h.bridge.subscribe_topic(Scope::Local, "t", |_, _| {}).unwrap();
    h.bridge.subscribe_topic(Scope::Local, "t", |_, _| {}).unwrap();

    h.bridge.on_disconnected();
    h.bridge.on_connected();
    h.clear();
    h.bridge.handle_line("ir:");

    assert_eq!(h.lines(), vec!["ls:t".to_owned(), "ls:t".to_owned()]);
}

#[test]
fn replay_continues_past_write_failures() {
    let mut h = Harness::ready();
    h.bridge.subscribe_topic(Scope::Mqtt, "a", |_, _| {}).unwrap();
    h.bridge.on_disconnected();
    h.bridge.on_connected();

    h.bridge
        .transport_mut()
        .fail_writes(Some(LinkError::Io));
    h.bridge.handle_line("ir:");

    assert_eq!(h.bridge.state(), SessionState::Ready);
    assert_eq!(h.last_signal(), Some(InitSignal::Ready));
}

// ── Link loss ────────────────────────────────────────────────

#[test]
fn disconnect_signalled_from_every_state() {
    for setup in ["", "awaiting", "ready", "failed"] {
        let mut h = Harness::new(true);
        h.bridge.init_session().unwrap();
        match setup {
            "ready" => h.bridge.handle_line("ir:"),
            "failed" => h.bridge.handle_line("ir:x"),
            "" => h.bridge.on_disconnected(),
            _ => {}
        }
        h.bridge.on_disconnected();
        assert_eq!(h.last_signal(), Some(InitSignal::Disconnected), "{setup}");
        assert_eq!(h.bridge.state(), SessionState::Disconnected);
    }
}

#[test]
fn connect_before_init_is_ignored() {
    let mut h = Harness::new(false);
    h.bridge.handle_event(LinkEvent::Connected);
    h.bridge.handle_event(LinkEvent::Disconnected);

    assert!(h.bridge.transport().wire().is_empty());
    assert!(h.signals.borrow().is_empty());
}

#[test]
fn unplugged_init_then_connect_opens_handshake() {
    let mut h = Harness::new(false);
    h.bridge.init_session().unwrap();
    assert!(h.bridge.transport().wire().is_empty());
    assert_eq!(h.bridge.state(), SessionState::Disconnected);

    h.bridge.transport_mut().set_connected(true);
    h.bridge.handle_event(LinkEvent::Connected);

    assert_eq!(h.lines(), vec!["it".to_owned()]);
    assert_eq!(
        *h.signals.borrow(),
        vec![InitSignal::Loading, InitSignal::Loading]
    );
}
