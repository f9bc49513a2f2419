//! Event store
//!
//! Owns the current snapshot and the id sequence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::errors::{StoreError, StoreResult};
use super::event::{Event, EventId, NewEvent};
use super::snapshot::StoreSnapshot;

/// In-memory event store shared by ingest, query and reset
#[derive(Debug)]
pub struct EventStore {
    /// Current immutable state, swapped on every write
    current: RwLock<Arc<StoreSnapshot>>,
    /// Last id handed out. Only advanced while the snapshot write lock is held.
    last_id: AtomicU64,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(StoreSnapshot::empty())),
            last_id: AtomicU64::new(0),
        }
    }

    /// Ingests a batch of events.
    ///
    /// The batch is all-or-nothing: every event is validated before any id is
    /// assigned, and the whole batch is published under one write lock.
    /// Returns the assigned ids in batch order.
    pub fn ingest(&self, events: Vec<NewEvent>) -> StoreResult<Vec<EventId>> {
        for (index, event) in events.iter().enumerate() {
            event.validate(index)?;
        }

        if events.is_empty() {
            return Ok(Vec::new());
        }

        let mut current = self
            .current
            .write()
            .map_err(|_| StoreError::Internal("snapshot lock poisoned".into()))?;
        let last_id = self.last_id.load(Ordering::Acquire);

        let mut ids = Vec::with_capacity(events.len());
        let stored: Vec<Event> = events
            .into_iter()
            .enumerate()
            .map(|(offset, event)| {
                let id = EventId::new(last_id + offset as u64 + 1);
                ids.push(id);
                event.into_event(id)
            })
            .collect();

        // Copies only when a reader still holds the current snapshot
        Arc::make_mut(&mut *current).append(stored);
        self.last_id
            .store(last_id + ids.len() as u64, Ordering::Release);

        Ok(ids)
    }

    /// Returns the current snapshot.
    ///
    /// The read lock is held only while cloning the `Arc`.
    pub fn snapshot(&self) -> StoreResult<Arc<StoreSnapshot>> {
        self.current
            .read()
            .map(|current| Arc::clone(&*current))
            .map_err(|_| StoreError::Internal("snapshot lock poisoned".into()))
    }

    /// Returns all events with the given tag, in ingestion order.
    /// An unknown tag yields an empty list.
    pub fn lookup(&self, tag: &str) -> StoreResult<Vec<Arc<Event>>> {
        Ok(self.snapshot()?.lookup(tag).to_vec())
    }

    /// Removes every event. Returns the number of events removed.
    ///
    /// The id sequence is not reset; ids are never reused.
    pub fn wipe(&self) -> StoreResult<usize> {
        let mut current = self
            .current
            .write()
            .map_err(|_| StoreError::Internal("snapshot lock poisoned".into()))?;

        let removed = current.len();
        *current = Arc::new(StoreSnapshot::empty());
        Ok(removed)
    }

    /// Number of stored events
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.snapshot()?.len())
    }

    /// Returns true if the store holds no events
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
