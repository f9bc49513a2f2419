//! Aggregation operators
//!
//! Reducers computed over the filtered event set, before projection.
//! Each operator reports one integer under its operation name in `meta`.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::query::Operation;
use crate::store::Event;

/// Aggregation results of one QuerySpec: operation name -> value
pub type Meta = BTreeMap<String, u64>;

/// Applies one requested operation
pub struct AggregationOperator;

impl AggregationOperator {
    /// Applies `operation` to the matching events
    pub fn apply(operation: &Operation, events: &[Arc<Event>]) -> u64 {
        match operation {
            Operation::Count => Self::count(events),
            Operation::UniqueCount { key } => Self::unique_count(events, key),
        }
    }

    /// Applies every operation, later duplicates overwrite earlier ones
    pub fn apply_all(operations: &[Operation], events: &[Arc<Event>]) -> Meta {
        operations
            .iter()
            .map(|operation| (operation.name().to_string(), Self::apply(operation, events)))
            .collect()
    }

    /// Sampling-weighted count: `round(sum(1 / samplerate))`.
    ///
    /// Equals the number of events when every samplerate is 1.
    // TODO: check this weighting against real sampled traffic; only the
    // samplerate = 1 case has been confirmed end to end.
    pub fn count(events: &[Arc<Event>]) -> u64 {
        let weighted: f64 = events.iter().map(|event| 1.0 / event.samplerate).sum();
        weighted.round() as u64
    }

    /// Number of distinct values of `key`. Events without the key are skipped.
    pub fn unique_count(events: &[Arc<Event>], key: &str) -> u64 {
        events
            .iter()
            .filter_map(|event| event.get(key))
            .collect::<HashSet<&str>>()
            .len() as u64
    }
}
