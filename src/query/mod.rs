//! Query subsystem for eventstore
//!
//! Decodes QuerySpecs into a typed AST and plans them for execution.
//!
//! # Validation
//!
//! Everything that can make a request fail is checked here, before the
//! executor scans a single event:
//!
//! - malformed spec shape (missing tag, uniqueCount without key)
//! - unknown filter or operation type
//! - regex patterns that do not compile
//!
//! Any failure rejects the whole request.

mod ast;
mod errors;
mod planner;
mod projection;

pub use ast::{Operation, Predicate, QuerySpec, RawFilter, RawOperation, RawQuerySpec};
pub use errors::{OperatorKind, QueryError, QueryResult};
pub use planner::{CompiledPredicate, Matcher, QueryPlan, QueryPlanner};
pub use projection::{KeyProjection, KeyProjectionBuilder};
