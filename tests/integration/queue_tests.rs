//! Serialised delivery through `LinkQueue`.

use rabitlink::bridge::{InitSignal, LinkEvent, SessionState};
use rabitlink::proto::channels::LinkQueue;
use rabitlink::proto::request::HttpMethod;

use crate::mock_link::Harness;

static PRODUCER_QUEUE: LinkQueue = LinkQueue::new();

#[test]
fn pump_drives_full_session() {
    let queue = LinkQueue::new();
    let mut h = Harness::new(false);
    let (seen, handler) = Harness::results();
    h.bridge.set_result_handler("e1", handler);
    h.bridge.init_session().unwrap();

    h.bridge.transport_mut().set_connected(true);
    assert!(queue.post_connected());
    assert!(queue.post_line("ir:"));
    assert!(queue.post_bytes(b"hr:e1:2"));
    assert!(queue.post_bytes(b"00:ok\n"));

    assert_eq!(h.bridge.pump(&queue), 4);
    assert!(queue.is_empty());
    assert_eq!(h.bridge.state(), SessionState::Ready);
    assert_eq!(*seen.borrow(), vec![(200, "ok".to_owned())]);
    assert_eq!(h.lines(), vec!["it".to_owned()]);
}

#[test]
fn events_from_another_thread_are_processed_in_order() {
    let producer = std::thread::spawn(|| {
        PRODUCER_QUEUE.post_line("ir:");
        PRODUCER_QUEUE.post_bytes(b"hr:e1:201:first\nhr:e1:202:second\n");
        PRODUCER_QUEUE.post_disconnected();
    });
    producer.join().unwrap();

    let mut h = Harness::new(true);
    let (seen, handler) = Harness::results();
    h.bridge.set_result_handler("e1", handler);
    h.bridge.init_session().unwrap();

    let first = PRODUCER_QUEUE.next();
    assert_eq!(first, LinkEvent::Line("ir:".try_into().unwrap()));
    h.bridge.handle_event(first);
    h.bridge.pump(&PRODUCER_QUEUE);

    assert_eq!(
        *seen.borrow(),
        vec![(201, "first".to_owned()), (202, "second".to_owned())]
    );
    assert_eq!(
        *h.signals.borrow(),
        vec![InitSignal::Loading, InitSignal::Ready, InitSignal::Disconnected]
    );
}

#[test]
fn http_reply_via_queue_after_request() {
    let queue = LinkQueue::new();
    let mut h = Harness::ready();
    let (seen, handler) = Harness::results();
    h.bridge.set_result_handler("e7", handler);
    h.bridge
        .send_http_request("e7", HttpMethod::Delete, "http://x/1", "", "", "")
        .unwrap();
    assert_eq!(h.lines(), vec!["ht:e7:4:http//x/1:::".to_owned()]);

    queue.post_line("hr:e7:204:");
    h.bridge.pump(&queue);
    assert_eq!(*seen.borrow(), vec![(204, String::new())]);
}
