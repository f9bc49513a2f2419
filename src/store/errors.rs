//! # Store Errors
//!
//! Error types for the event store.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Event store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// An event in an ingest batch is malformed. The whole batch is rejected.
    #[error("event {index}: {reason}")]
    InvalidEvent { index: usize, reason: String },

    /// A store invariant was violated (e.g. a writer panicked mid-swap)
    #[error("store invariant violated: {0}")]
    Internal(String),
}

impl StoreError {
    /// Create an invalid event error for the item at `index`
    pub fn invalid_event(index: usize, reason: impl Into<String>) -> Self {
        StoreError::InvalidEvent {
            index,
            reason: reason.into(),
        }
    }
}
