//! Query Executor subsystem for eventstore
//!
//! The executor consumes query plans and produces deterministic results.
//!
//! # Execution Flow (strict order)
//!
//! 1. Select candidate events by tag
//! 2. Filter events strictly according to predicates (AND)
//! 3. Sort by timestamp, stable on ingestion order
//! 4. Compute aggregations over the filtered set
//! 5. Project rows (filter keys first, then requested keys)
//! 6. Assemble blocks in request order
//!
//! Execution cannot fail: every request-level error is raised while planning.

mod aggregation;
mod assembler;
mod executor;
mod filters;
mod result;
mod sorter;

pub use aggregation::{AggregationOperator, Meta};
pub use assembler::ResultAssembler;
pub use executor::QueryExecutor;
pub use filters::PredicateFilter;
pub use result::{DataEntry, QueryResponse, ResultBlock, ResultRow};
pub use sorter::ResultSorter;
