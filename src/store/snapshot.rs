//! Immutable store snapshot
//!
//! A snapshot is a stable view of the store: once obtained it never changes,
//! never contains a partially ingested batch and is unaffected by a later wipe.

use std::collections::HashMap;
use std::sync::Arc;

use super::event::Event;

/// Source of candidate events for query execution
pub trait EventSource {
    /// All events with the given tag, in ingestion order.
    /// An unknown tag yields an empty slice.
    fn events_for_tag(&self, tag: &str) -> &[Arc<Event>];
}

/// Tag-partitioned, immutable view of every ingested event
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    /// tag -> events in ingestion order
    partitions: HashMap<String, Arc<Vec<Arc<Event>>>>,
    /// Total events across partitions
    len: usize,
}

impl StoreSnapshot {
    /// Creates an empty snapshot
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns all events for `tag`, empty if the tag is unknown
    pub fn lookup(&self, tag: &str) -> &[Arc<Event>] {
        self.partitions
            .get(tag)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of events
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the snapshot holds no events
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct tags
    pub fn tag_count(&self) -> usize {
        self.partitions.len()
    }

    /// Appends `events` to their tag partitions.
    ///
    /// A partition is copied only when another snapshot still shares it.
    pub(crate) fn append(&mut self, events: Vec<Event>) {
        self.len += events.len();

        for event in events {
            let partition = self.partitions.entry(event.tag.clone()).or_default();
            Arc::make_mut(partition).push(Arc::new(event));
        }
    }
}

impl EventSource for StoreSnapshot {
    fn events_for_tag(&self, tag: &str) -> &[Arc<Event>] {
        self.lookup(tag)
    }
}
