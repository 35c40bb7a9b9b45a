//! Test harness around [`MemoryLink`].
//!
//! Builds a bridge over an in-memory link and records every lifecycle
//! signal and handler invocation for later assertions.

use std::cell::RefCell;
use std::rc::Rc;

use rabitlink::adapters::memory::MemoryLink;
use rabitlink::bridge::{Bridge, InitSignal};
use rabitlink::config::BridgeConfig;

pub type Signals = Rc<RefCell<Vec<InitSignal>>>;
pub type Results = Rc<RefCell<Vec<(i32, String)>>>;

pub struct Harness {
    pub bridge: Bridge<MemoryLink>,
    pub signals: Signals,
}

#[allow(dead_code)]
impl Harness {
    pub fn new(connected: bool) -> Self {
        Self::with_config(connected, BridgeConfig::default())
    }

    pub fn with_config(connected: bool, config: BridgeConfig) -> Self {
        let mut link = MemoryLink::new();
        link.set_connected(connected);
        let mut bridge = Bridge::new(link, config);

        let signals: Signals = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&signals);
        bridge.set_init_handler(move |s| sink.borrow_mut().push(s.clone()));

        Self { bridge, signals }
    }

    /// Connected, initialised and handshaken; the wire is cleared.
    pub fn ready() -> Self {
        let mut h = Self::new(true);
        h.bridge.init_session().unwrap();
        h.bridge.handle_line("ir:");
        h.clear();
        h
    }

    /// A fresh recorder for result handlers.
    pub fn results() -> (Results, impl FnMut(i32, &str) + 'static) {
        let seen: Results = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handler = move |status: i32, payload: &str| {
            sink.borrow_mut().push((status, payload.to_owned()));
        };
        (seen, handler)
    }

    pub fn lines(&self) -> Vec<String> {
        self.bridge.transport().lines().to_vec()
    }

    pub fn raw(&self) -> Vec<String> {
        self.bridge.transport().raw().to_vec()
    }

    pub fn last_signal(&self) -> Option<InitSignal> {
        self.signals.borrow().last().cloned()
    }

    pub fn clear(&mut self) {
        self.bridge.transport_mut().clear();
        self.signals.borrow_mut().clear();
    }
}
