//! Shared server state

use chrono::{DateTime, Utc};

use crate::api::ApiHandler;
use crate::observability::MetricsRegistry;
use crate::store::EventStore;

/// State shared by every handler: the one store instance and its counters
#[derive(Debug)]
pub struct AppState {
    pub store: EventStore,
    pub metrics: MetricsRegistry,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: EventStore::new(),
            metrics: MetricsRegistry::new(),
            started_at: Utc::now(),
        }
    }

    /// API handler borrowing this state
    pub fn handler(&self) -> ApiHandler<'_> {
        ApiHandler::new(&self.store, &self.metrics)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
