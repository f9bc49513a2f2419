//! Event HTTP Routes
//!
//! `POST /events`, `POST /query` and the `POST /debug?wipe=true` affordance.
//! Bodies are taken as raw text and decoded by the API layer, so decode
//! failures carry the offending item's position.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use crate::api::{IngestResponse, ResetResponse};
use crate::executor::QueryResponse;

use super::errors::HttpError;
use super::state::AppState;

/// Query string of the debug route
#[derive(Debug, Deserialize)]
pub struct DebugParams {
    #[serde(default)]
    pub wipe: Option<String>,
}

/// Ingest and query routes
pub fn event_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/events", post(ingest_handler))
        .route("/query", post(query_handler))
        .with_state(state)
}

/// Store reset route
pub fn debug_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/debug", post(debug_handler))
        .with_state(state)
}

async fn ingest_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<IngestResponse>, HttpError> {
    Ok(Json(state.handler().ingest(&body)?))
}

async fn query_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<QueryResponse>, HttpError> {
    Ok(Json(state.handler().query(&body)?))
}

async fn debug_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DebugParams>,
) -> Result<Json<ResetResponse>, HttpError> {
    if params.wipe.as_deref() != Some("true") {
        return Err(HttpError::BadRequest("wipe=true is required".into()));
    }
    Ok(Json(state.handler().reset()?))
}
