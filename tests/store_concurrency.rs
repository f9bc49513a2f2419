//! Store Concurrency Tests
//!
//! Tests for the store's visibility guarantees:
//! - A batch is visible in full or not at all
//! - Queries run against a stable snapshot
//! - Reset leaves nothing behind and ids keep increasing
//! - Reset is exclusive against concurrent writers and readers

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use eventstore::api::ApiHandler;
use eventstore::observability::MetricsRegistry;
use eventstore::query::{Operation, QuerySpec};
use eventstore::store::{EventStore, NewEvent};

// =============================================================================
// Helper Functions
// =============================================================================

const BATCH: usize = 10;

fn batch(writer: usize, round: usize) -> Vec<NewEvent> {
    (0..BATCH)
        .map(|i| {
            NewEvent::new("load", (round * BATCH + i) as i64)
                .with_attr("writer", writer.to_string())
                .with_attr("round", round.to_string())
        })
        .collect()
}

fn count(store: &EventStore, tag: &str) -> u64 {
    let metrics = MetricsRegistry::new();
    let response = ApiHandler::new(store, &metrics)
        .execute(vec![QuerySpec::new("c", tag)
            .with_operation(Operation::Count)
            .hide_data(true)])
        .unwrap();
    response.data[0].meta["count"]
}

// =============================================================================
// Visibility Tests
// =============================================================================

/// Readers never see a partial batch.
#[test]
fn test_batches_all_or_nothing_under_load() {
    let store = Arc::new(EventStore::new());
    let writers: Vec<_> = (0..4)
        .map(|writer| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..25 {
                    store.ingest(batch(writer, round)).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..50 {
                    assert_eq!(count(&store, "load") % BATCH as u64, 0);
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert_eq!(count(&store, "load"), 4 * 25 * BATCH as u64);
}

/// Ids are unique across concurrent writers.
#[test]
fn test_ids_unique_across_writers() {
    let store = Arc::new(EventStore::new());
    let handles: Vec<_> = (0..8)
        .map(|writer| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.ingest(batch(writer, 0)).unwrap())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id));
        }
    }
    assert_eq!(seen.len(), 8 * BATCH);
}

/// A snapshot taken before an ingest does not change.
#[test]
fn test_snapshot_is_stable() {
    let store = EventStore::new();
    store.ingest(batch(0, 0)).unwrap();

    let before = store.snapshot().unwrap();
    store.ingest(batch(0, 1)).unwrap();

    assert_eq!(before.len(), BATCH);
    assert_eq!(store.snapshot().unwrap().len(), 2 * BATCH);
}

// =============================================================================
// Reset Tests
// =============================================================================

/// After reset every tag is empty and new ids continue the sequence.
#[test]
fn test_reset_then_ingest() {
    let store = EventStore::new();
    let metrics = MetricsRegistry::new();
    let handler = ApiHandler::new(&store, &metrics);

    let first = handler.ingest_events(batch(0, 0)).unwrap();
    handler
        .ingest_events(vec![NewEvent::new("other", 1)])
        .unwrap();

    assert_eq!(handler.reset().unwrap().wiped, BATCH + 1);
    assert_eq!(count(&store, "load"), 0);
    assert_eq!(count(&store, "other"), 0);

    let next = handler.ingest_events(batch(0, 1)).unwrap();
    let last_before = first.ids.last().copied().unwrap();
    assert!(next.ids.iter().all(|id| *id > last_before));
}

/// Wipes racing with writers and readers never expose a half-cleared store.
#[test]
fn test_wipe_under_concurrent_load() {
    let store = Arc::new(EventStore::new());
    let done = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|writer| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..25 {
                    store.ingest(batch(writer, round)).unwrap();
                    store
                        .ingest(vec![NewEvent::new("other", round as i64); BATCH])
                        .unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    assert_eq!(count(&store, "load") % BATCH as u64, 0);
                    let snapshot = store.snapshot().unwrap();
                    assert_eq!(snapshot.len() % BATCH, 0);
                    assert_eq!(snapshot.lookup("other").len() % BATCH, 0);
                }
            })
        })
        .collect();

    let wiper = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for _ in 0..50 {
                assert_eq!(store.wipe().unwrap() % BATCH, 0);
                thread::yield_now();
            }
        })
    };

    for handle in writers.into_iter().chain(std::iter::once(wiper)) {
        handle.join().unwrap();
    }
    done.store(true, Ordering::Release);
    for handle in readers {
        handle.join().unwrap();
    }

    store.wipe().unwrap();
    assert_eq!(count(&store, "load"), 0);
    assert_eq!(count(&store, "other"), 0);
    assert!(store.is_empty().unwrap());
}
