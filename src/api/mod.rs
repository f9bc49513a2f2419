//! API Layer for eventstore
//!
//! Transport-independent entry points for the three core operations.
//!
//! # Supported Operations
//!
//! - ingest: append a batch of events, all-or-nothing
//! - query: run a batch of QuerySpecs against one snapshot
//! - reset: discard every event (debug affordance only)
//!
//! Subsystem errors are passed through with their position intact and a
//! stable code attached.

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult, Severity};
pub use handler::ApiHandler;
pub use request::{IngestRequest, QueryRequest};
pub use response::{ErrorResponse, IngestResponse, ResetResponse};
