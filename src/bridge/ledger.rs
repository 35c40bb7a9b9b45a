//! Subscription ledger.
//!
//! Every subscribe frame ever sent, in emission order, exactly as it went
//! on the wire.  After a successful handshake the ledger is replayed so a
//! freshly attached companion rebuilds its routing table.  Re-subscribing
//! to a topic appends again; nothing is deduplicated.

#[derive(Debug, Default, Clone)]
pub struct SubscriptionLedger {
    records: Vec<String>,
}

impl SubscriptionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame that was just transmitted.
    pub fn record(&mut self, frame: String) {
        self.records.push(frame);
    }

    /// Frames in original order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
