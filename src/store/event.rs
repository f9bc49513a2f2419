//! Event representation
//!
//! `NewEvent` is what a client hands to the store; `Event` is what the
//! store keeps once it has assigned an id. Events are immutable after ingest.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// Sample rate applied when the client does not send one
pub const DEFAULT_SAMPLERATE: f64 = 1.0;

/// System-assigned event identity.
///
/// Ids come from a single monotonically increasing sequence, so id order
/// is ingestion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(u64);

impl EventId {
    /// Wraps a raw sequence value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw sequence value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event submitted for ingestion, before an id is assigned
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub tag: String,
    pub ts: i64,
    pub samplerate: f64,
    pub data: HashMap<String, String>,
}

impl NewEvent {
    /// Creates an event with the default sample rate and no attributes
    pub fn new(tag: impl Into<String>, ts: i64) -> Self {
        Self {
            tag: tag.into(),
            ts,
            samplerate: DEFAULT_SAMPLERATE,
            data: HashMap::new(),
        }
    }

    /// Sets the sample rate
    pub fn with_samplerate(mut self, samplerate: f64) -> Self {
        self.samplerate = samplerate;
        self
    }

    /// Adds one attribute
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Validates the event as item `index` of a batch
    pub fn validate(&self, index: usize) -> StoreResult<()> {
        if self.tag.is_empty() {
            return Err(StoreError::invalid_event(index, "tag must not be empty"));
        }
        if !self.samplerate.is_finite() || self.samplerate < 1.0 {
            return Err(StoreError::invalid_event(
                index,
                format!("samplerate must be a number >= 1, got {}", self.samplerate),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            tag: self.tag,
            ts: self.ts,
            samplerate: self.samplerate,
            data: self.data,
        }
    }
}

/// An ingested event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub tag: String,
    pub ts: i64,
    /// "1 of `samplerate` such events was recorded"
    pub samplerate: f64,
    pub data: HashMap<String, String>,
}

impl Event {
    /// Returns the value of attribute `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}
