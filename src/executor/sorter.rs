//! Result sorting for query execution
//!
//! Orders matching events by timestamp, deterministically.

use std::sync::Arc;

use crate::store::Event;

/// Sorts matching events
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts events by `ts` ascending.
    ///
    /// Ties keep ingestion order. The sort is stable and additionally breaks
    /// ties on the event id, which follows ingestion order.
    pub fn sort(events: &mut [Arc<Event>]) {
        events.sort_by(|a, b| a.ts.cmp(&b.ts).then_with(|| a.id.cmp(&b.id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{EventId, NewEvent};

    fn make_event(id: u64, ts: i64) -> Arc<Event> {
        Arc::new(NewEvent::new("tag", ts).into_event(EventId::new(id)))
    }

    fn ids(events: &[Arc<Event>]) -> Vec<u64> {
        events.iter().map(|e| e.id.get()).collect()
    }

    #[test]
    fn test_sort_ascending() {
        let mut events = vec![make_event(1, 30), make_event(2, 10), make_event(3, 20)];

        ResultSorter::sort(&mut events);

        assert_eq!(ids(&events), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_ties_keep_ingestion_order() {
        let mut events = vec![
            make_event(1, 25),
            make_event(2, 10),
            make_event(3, 25),
            make_event(4, 25),
        ];

        ResultSorter::sort(&mut events);

        assert_eq!(ids(&events), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_sort_negative_timestamps() {
        let mut events = vec![make_event(1, 0), make_event(2, -5)];

        ResultSorter::sort(&mut events);

        assert_eq!(ids(&events), vec![2, 1]);
    }
}
