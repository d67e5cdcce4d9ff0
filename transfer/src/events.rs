//! Module events.
//!
//! Events are observability only: emitting one never changes control flow.
//! Coordinators collect events in a local manager and hand them to the
//! caller's manager only when their unit of work commits.

use std::fmt;

pub const EVENT_TYPE_CONVERT_TRANSFER: &str = "convert_transfer";
pub const EVENT_TYPE_CONVERT_REFUND: &str = "convert_refund";
pub const EVENT_TYPE_CONVERT_RECEIVED: &str = "convert_received";
pub const EVENT_TYPE_TRANSFER: &str = "ibc_transfer";
pub const EVENT_TYPE_PACKET: &str = "fungible_token_packet";
pub const EVENT_TYPE_TIMEOUT: &str = "timeout";
pub const EVENT_TYPE_DENOM_TRACE: &str = "denomination_trace";

pub const ATTRIBUTE_KEY_MODULE: &str = "module";
pub const ATTRIBUTE_KEY_SENDER: &str = "sender";
pub const ATTRIBUTE_KEY_RECEIVER: &str = "receiver";
pub const ATTRIBUTE_KEY_DENOM: &str = "denom";
pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";
pub const ATTRIBUTE_KEY_SENT_AMOUNT: &str = "sent_amount";
pub const ATTRIBUTE_KEY_SENT_DENOM: &str = "sent_denom";
pub const ATTRIBUTE_KEY_CONVERT_AMOUNT: &str = "convert_amount";
pub const ATTRIBUTE_KEY_CONVERT_DENOM: &str = "convert_denom";
pub const ATTRIBUTE_KEY_REFUND_RECEIVER: &str = "refund_receiver";
pub const ATTRIBUTE_KEY_REFUND_DENOM: &str = "refund_denom";
pub const ATTRIBUTE_KEY_REFUND_AMOUNT: &str = "refund_amount";
pub const ATTRIBUTE_KEY_ACK_SUCCESS: &str = "success";
pub const ATTRIBUTE_KEY_ACK_ERROR: &str = "error";
pub const ATTRIBUTE_KEY_TRACE_HASH: &str = "trace_hash";

/// A typed event with ordered key/value attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
}

impl Event {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl fmt::Display) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// First value recorded under `key`.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, Default)]
pub struct EventManager {
    events: Vec<Event>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Append events from a committed child scope.
    pub fn extend(&mut self, other: EventManager) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Event> + 'a {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
