//! Observability subsystem for eventstore
//!
//! - Structured logging (JSON lines)
//! - Atomic counters
//! - Lifecycle event names
//!
//! Observability is read-only: it never changes the outcome of a request
//! and a failed log write is dropped.
//!
//! ```ignore
//! use eventstore::observability::{log_event_with_fields, LogEvent, MetricsRegistry};
//!
//! log_event_with_fields(LogEvent::IngestComplete, &[("count", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_ingest(42);
//! ```

mod events;
mod logger;
mod metrics;
mod scope;

pub use events::LogEvent;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
pub fn log_event(event: LogEvent) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields. Fatal events are logged at FATAL.
pub fn log_event_with_fields(event: LogEvent, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

/// Fresh request id for correlating the log lines of one request
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
