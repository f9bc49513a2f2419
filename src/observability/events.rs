//! Observable lifecycle events for eventstore
//!
//! Events are explicit and typed. Each maps to one stable upper-case name
//! that appears as the `event` key of a log line.

use std::fmt;

/// Observable events in eventstore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    // Server lifecycle
    /// Server boot begins
    ServerStart,
    /// Listener bound, ready for requests
    ServerReady,
    /// Configuration loaded and validated
    ConfigLoaded,

    // Ingestion
    /// Batch appended to the store
    IngestComplete,
    /// Batch rejected, nothing stored
    IngestRejected,

    // Query
    /// Query request failed validation before execution
    QueryRejected,

    // Reset
    /// Store contents discarded
    StoreWiped,
    /// Store invariant violated (FATAL)
    StoreInvariantViolated,

    // Transport
    /// One HTTP request served
    HttpRequest,
}

impl LogEvent {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            LogEvent::ServerStart => "SERVER_START",
            LogEvent::ServerReady => "SERVER_READY",
            LogEvent::ConfigLoaded => "CONFIG_LOADED",

            LogEvent::IngestComplete => "INGEST_COMPLETE",
            LogEvent::IngestRejected => "INGEST_REJECTED",

            LogEvent::QueryRejected => "QUERY_REJECTED",

            LogEvent::StoreWiped => "STORE_WIPED",
            LogEvent::StoreInvariantViolated => "STORE_INVARIANT_VIOLATED",

            LogEvent::HttpRequest => "HTTP_REQUEST",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, LogEvent::StoreInvariantViolated)
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_events_have_string_representation() {
        let events = [
            LogEvent::ServerStart,
            LogEvent::ServerReady,
            LogEvent::ConfigLoaded,
            LogEvent::IngestComplete,
            LogEvent::IngestRejected,
            LogEvent::QueryRejected,
            LogEvent::StoreWiped,
            LogEvent::StoreInvariantViolated,
            LogEvent::HttpRequest,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(LogEvent::StoreInvariantViolated.is_fatal());
        assert!(!LogEvent::IngestRejected.is_fatal());
        assert!(!LogEvent::QueryRejected.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", LogEvent::StoreWiped), "STORE_WIPED");
        assert_eq!(format!("{}", LogEvent::HttpRequest), "HTTP_REQUEST");
    }
}
