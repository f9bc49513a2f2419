//! eventstore - an in-memory tagged event store
//!
//! Clients ingest batches of tagged, timestamped events carrying string
//! attributes and a sample rate, then issue batched queries that filter,
//! project and aggregate them.
//!
//! Layers, leaves first: `store` owns the events, `query` turns requests into
//! validated plans, `executor` runs plans against one snapshot, `api` exposes
//! ingest / query / reset, and `http_server` / `cli` are the transports.

pub mod api;
pub mod cli;
pub mod executor;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod store;
