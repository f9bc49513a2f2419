//! Metrics registry for eventstore
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start (a store wipe does not reset them)
//! - Thread-safe, lock-free

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Registry of operational counters shared by every request handler
///
/// Relaxed ordering: counters are independent and only ever read as a
/// best-effort snapshot.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Events accepted into the store
    events_ingested: AtomicU64,
    /// Accepted ingest batches
    ingest_batches: AtomicU64,
    /// Rejected ingest batches
    ingest_rejected: AtomicU64,
    /// Successful query requests
    queries_executed: AtomicU64,
    /// Result blocks produced across all query requests
    query_blocks: AtomicU64,
    /// Rejected query requests
    queries_rejected: AtomicU64,
    /// Store wipes
    store_wipes: AtomicU64,
    /// HTTP requests served, any status
    http_requests: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Ingest metrics

    /// Record one accepted batch of `events` events
    pub fn record_ingest(&self, events: u64) {
        self.ingest_batches.fetch_add(1, Ordering::Relaxed);
        self.events_ingested.fetch_add(events, Ordering::Relaxed);
    }

    pub fn increment_ingest_rejected(&self) {
        self.ingest_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Events accepted so far
    pub fn events_ingested(&self) -> u64 {
        self.events_ingested.load(Ordering::Relaxed)
    }

    // Query metrics

    /// Record one successful query request producing `blocks` blocks
    pub fn record_query(&self, blocks: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.query_blocks.fetch_add(blocks, Ordering::Relaxed);
    }

    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    // Reset and transport

    pub fn increment_store_wipes(&self) {
        self.store_wipes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_http_requests(&self) {
        self.http_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_ingested: self.events_ingested.load(Ordering::Relaxed),
            ingest_batches: self.ingest_batches.load(Ordering::Relaxed),
            ingest_rejected: self.ingest_rejected.load(Ordering::Relaxed),
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            query_blocks: self.query_blocks.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            store_wipes: self.store_wipes.load(Ordering::Relaxed),
            http_requests: self.http_requests.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub events_ingested: u64,
    pub ingest_batches: u64,
    pub ingest_rejected: u64,
    pub queries_executed: u64,
    pub query_blocks: u64,
    pub queries_rejected: u64,
    pub store_wipes: u64,
    pub http_requests: u64,
}
