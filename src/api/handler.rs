//! API Handler for eventstore
//!
//! Exposes the three core operations (ingest, query, reset) over a borrowed
//! store. Every call gets its own request id, which tags all of its log lines.

use crate::executor::{QueryExecutor, QueryResponse, ResultBlock};
use crate::observability::{
    log_event_with_fields, new_request_id, LogEvent, Logger, MetricsRegistry, ObservationScope,
};
use crate::query::{QueryPlanner, QuerySpec};
use crate::store::{EventId, EventStore, NewEvent};

use super::errors::{ApiError, ApiResult};
use super::request::{IngestRequest, QueryRequest};
use super::response::{IngestResponse, ResetResponse};

/// API handler over one explicitly owned store.
///
/// The handler holds no lock of its own; all synchronization happens inside
/// `EventStore`, so concurrent handlers only contend at the store boundary.
pub struct ApiHandler<'a> {
    store: &'a EventStore,
    metrics: &'a MetricsRegistry,
}

impl<'a> ApiHandler<'a> {
    /// Create a new API handler
    pub fn new(store: &'a EventStore, metrics: &'a MetricsRegistry) -> Self {
        Self { store, metrics }
    }

    /// Handle a raw JSON ingest body
    pub fn ingest(&self, body: &str) -> ApiResult<IngestResponse> {
        let request_id = new_request_id();
        let result = IngestRequest::parse(body).and_then(|req| self.store_events(req.events));
        self.finish_ingest(&request_id, result)
    }

    /// Ingest already decoded events
    pub fn ingest_events(&self, events: Vec<NewEvent>) -> ApiResult<IngestResponse> {
        let request_id = new_request_id();
        let result = self.store_events(events);
        self.finish_ingest(&request_id, result)
    }

    /// Handle a raw JSON query body
    pub fn query(&self, body: &str) -> ApiResult<QueryResponse> {
        let request_id = new_request_id();
        let specs = QueryRequest::parse(body).map(|req| req.specs);
        self.run_query(&request_id, specs)
    }

    /// Execute already decoded QuerySpecs
    pub fn execute(&self, specs: Vec<QuerySpec>) -> ApiResult<QueryResponse> {
        let request_id = new_request_id();
        self.run_query(&request_id, Ok(specs))
    }

    /// Discard every stored event. Returns how many were removed.
    pub fn reset(&self) -> ApiResult<ResetResponse> {
        let request_id = new_request_id();

        match self.store.wipe() {
            Ok(wiped) => {
                self.metrics.increment_store_wipes();
                log_event_with_fields(
                    LogEvent::StoreWiped,
                    &[("request_id", &request_id), ("wiped", &wiped.to_string())],
                );
                Ok(ResetResponse { wiped })
            }
            Err(err) => {
                let err = ApiError::from(err);
                self.log_rejection(LogEvent::StoreWiped, &request_id, &err);
                Err(err)
            }
        }
    }

    fn store_events(&self, events: Vec<NewEvent>) -> ApiResult<Vec<EventId>> {
        Ok(self.store.ingest(events)?)
    }

    fn finish_ingest(
        &self,
        request_id: &str,
        result: ApiResult<Vec<EventId>>,
    ) -> ApiResult<IngestResponse> {
        match result {
            Ok(ids) => {
                self.metrics.record_ingest(ids.len() as u64);
                log_event_with_fields(
                    LogEvent::IngestComplete,
                    &[("count", &ids.len().to_string()), ("request_id", request_id)],
                );
                Ok(IngestResponse::new(ids))
            }
            Err(err) => {
                self.metrics.increment_ingest_rejected();
                self.log_rejection(LogEvent::IngestRejected, request_id, &err);
                Err(err)
            }
        }
    }

    /// Plans every spec before executing any, then runs them all against one
    /// snapshot.
    fn run_query(
        &self,
        request_id: &str,
        specs: ApiResult<Vec<QuerySpec>>,
    ) -> ApiResult<QueryResponse> {
        let planned = specs.and_then(|specs| Ok(QueryPlanner::plan_all(&specs)?));
        let plans = match planned {
            Ok(plans) => plans,
            Err(err) => {
                self.metrics.increment_queries_rejected();
                self.log_rejection(LogEvent::QueryRejected, request_id, &err);
                return Err(err);
            }
        };

        let blocks = plans.len().to_string();
        let scope =
            ObservationScope::with_fields("QUERY", &[("request_id", request_id), ("blocks", &blocks)]);

        let snapshot = match self.store.snapshot() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                let err = ApiError::from(err);
                scope.fail_fatal(err.message());
                return Err(err);
            }
        };

        let response = QueryExecutor::new(snapshot.as_ref()).execute_all(&plans);
        self.metrics.record_query(plans.len() as u64);

        let rows: usize = response.data.iter().map(ResultBlock::len).sum();
        scope.complete_with_fields(&[("rows", &rows.to_string())]);
        Ok(response)
    }

    fn log_rejection(&self, event: LogEvent, request_id: &str, err: &ApiError) {
        let fields = [
            ("code", err.code().code()),
            ("reason", err.message()),
            ("request_id", request_id),
        ];
        if err.is_fatal() {
            log_event_with_fields(LogEvent::StoreInvariantViolated, &fields);
        } else {
            Logger::warn(event.as_str(), &fields);
        }
    }
}
