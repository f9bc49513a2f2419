//! # eventstore HTTP Server Module
//!
//! Thin axum transport over the API layer.
//!
//! # Endpoints
//!
//! - `POST /events` - Ingest a batch of events
//! - `POST /query` - Run a batch of QuerySpecs
//! - `POST /debug?wipe=true` - Discard every event (when enabled)
//! - `GET /health` - Health check
//! - `GET /metrics` - Counter snapshot

pub mod config;
pub mod errors;
pub mod event_routes;
pub mod observability_routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use errors::HttpError;
pub use server::HttpServer;
pub use state::AppState;
