//! Event Store subsystem for eventstore
//!
//! The store owns every ingested event, partitioned by tag. It is an
//! in-memory, append-only structure: events are never updated or deleted
//! individually, only a full wipe removes them.
//!
//! # Concurrency
//!
//! Readers never hold a live alias into state that a writer is appending to.
//! The store keeps an immutable [`StoreSnapshot`] behind an `Arc`:
//!
//! - `snapshot()` takes the read lock only long enough to clone the `Arc`
//! - `ingest()` builds the next snapshot inside a short exclusive section
//!   and swaps it in, so a batch becomes visible all at once or not at all
//! - `wipe()` swaps in an empty snapshot under the same exclusive section
//!
//! A query that already holds a snapshot keeps seeing it until it finishes.

mod errors;
mod event;
mod snapshot;
mod store;

pub use errors::{StoreError, StoreResult};
pub use event::{Event, EventId, NewEvent, DEFAULT_SAMPLERATE};
pub use snapshot::{EventSource, StoreSnapshot};
pub use store::EventStore;
