//! Callback registry: event id / topic → result handler.
//!
//! One handler per key, last writer wins.  Entries are never removed:
//! a request whose reply never arrives keeps its handler until the key is
//! registered again.

use std::collections::HashMap;

/// Receives `(status, payload)` for a reply routed to its key.
pub type ResultHandler = Box<dyn FnMut(i32, &str)>;

#[derive(Default)]
pub struct CallbackRegistry {
    handlers: HashMap<String, ResultHandler>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `key`.  Returns `true` if an earlier
    /// handler was replaced.
    pub fn register(&mut self, key: &str, handler: ResultHandler) -> bool {
        self.handlers.insert(key.to_owned(), handler).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    /// Invoke the handler for `key`.  Returns `false` when none exists.
    pub fn invoke(&mut self, key: &str, status: i32, payload: &str) -> bool {
        match self.handlers.get_mut(key) {
            Some(handler) => {
                handler(status, payload);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
