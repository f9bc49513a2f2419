//! API request types
//!
//! JSON request parsing for ingest and query. Bodies are decoded item by
//! item so a malformed entry is reported with its position.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::query::{QueryError, QuerySpec, RawQuerySpec};
use crate::store::{NewEvent, StoreError, DEFAULT_SAMPLERATE};

use super::errors::{ApiError, ApiResult};

/// Ingest request: `{"events": [...]}`
#[derive(Debug, Clone, PartialEq)]
pub struct IngestRequest {
    pub events: Vec<NewEvent>,
}

/// Query request: `{"data": [QuerySpec, ...]}`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub specs: Vec<QuerySpec>,
}

#[derive(Debug, Deserialize)]
struct RawIngestBody {
    events: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawQueryBody {
    data: Vec<Value>,
}

/// Event as it appears on the wire
#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    ts: Option<i64>,
    #[serde(default)]
    samplerate: Option<f64>,
    #[serde(default)]
    data: Option<HashMap<String, String>>,
}

impl RawEvent {
    fn into_new_event(self, index: usize) -> Result<NewEvent, StoreError> {
        let tag = self
            .tag
            .ok_or_else(|| StoreError::invalid_event(index, "missing tag"))?;
        let ts = self
            .ts
            .ok_or_else(|| StoreError::invalid_event(index, "missing ts"))?;

        Ok(NewEvent {
            tag,
            ts,
            samplerate: self.samplerate.unwrap_or(DEFAULT_SAMPLERATE),
            data: self.data.unwrap_or_default(),
        })
    }
}

impl IngestRequest {
    /// Parse an ingest request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let body: RawIngestBody = serde_json::from_str(json)
            .map_err(|e| ApiError::validation(format!("invalid ingest body: {}", e)))?;
        Self::from_values(body.events)
    }

    /// Decode each item into a `NewEvent`. Range checks are left to the store.
    pub fn from_values(items: Vec<Value>) -> ApiResult<Self> {
        let events = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<RawEvent>(item)
                    .map_err(|e| StoreError::invalid_event(index, e.to_string()))
                    .and_then(|raw| raw.into_new_event(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { events })
    }
}

impl QueryRequest {
    /// Parse a query request from a JSON string
    pub fn parse(json: &str) -> ApiResult<Self> {
        let body: RawQueryBody = serde_json::from_str(json)
            .map_err(|e| ApiError::validation(format!("invalid query body: {}", e)))?;
        Self::from_values(body.data)
    }

    /// Decode each item into a `QuerySpec`, failing on the first bad one
    pub fn from_values(items: Vec<Value>) -> ApiResult<Self> {
        let specs = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<RawQuerySpec>(item)
                    .map_err(|e| QueryError::validation(index, e.to_string()))
                    .and_then(|raw| QuerySpec::from_raw(raw, index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { specs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorCode;
    use crate::query::{Operation, Predicate};

    #[test]
    fn test_parse_ingest() {
        let req = IngestRequest::parse(
            r#"{"events": [
                {"tag": "tag1", "ts": 1001, "data": {"dim1": "foo"}},
                {"tag": "tag1", "ts": 1002, "samplerate": 4}
            ]}"#,
        )
        .unwrap();

        assert_eq!(req.events.len(), 2);
        assert_eq!(req.events[0], NewEvent::new("tag1", 1001).with_attr("dim1", "foo"));
        assert_eq!(req.events[1].samplerate, 4.0);
        assert!(req.events[1].data.is_empty());
    }

    #[test]
    fn test_ingest_missing_tag_names_position() {
        let err = IngestRequest::parse(
            r#"{"events": [{"tag": "a", "ts": 1}, {"ts": 2}]}"#,
        )
        .unwrap_err();

        assert_eq!(err.code(), ApiErrorCode::EventstoreValidationError);
        assert_eq!(err.message(), "event 1: missing tag");
    }

    #[test]
    fn test_ingest_wrong_types_rejected() {
        let err = IngestRequest::parse(
            r#"{"events": [{"tag": "a", "ts": "soon"}]}"#,
        )
        .unwrap_err();
        assert!(err.message().starts_with("event 0:"));

        let err = IngestRequest::parse(
            r#"{"events": [{"tag": "a", "ts": 1, "data": {"n": 5}}]}"#,
        )
        .unwrap_err();
        assert!(err.message().starts_with("event 0:"));
    }

    #[test]
    fn test_ingest_body_shape() {
        assert!(IngestRequest::parse("not json").is_err());
        assert!(IngestRequest::parse(r#"{"data": []}"#).is_err());
        assert!(IngestRequest::parse(r#"{"events": []}"#).unwrap().events.is_empty());
    }

    #[test]
    fn test_parse_query() {
        let req = QueryRequest::parse(
            r#"{"data": [{
                "name": "test",
                "tag": "tag1",
                "keys": ["dim1"],
                "filters": [{"type": "eq", "key": "dim1", "value": "foo"}],
                "operations": [{"type": "count"}],
                "hideData": true
            }]}"#,
        )
        .unwrap();

        let expected = QuerySpec::new("test", "tag1")
            .with_keys(["dim1"])
            .with_filter(Predicate::eq("dim1", "foo"))
            .with_operation(Operation::Count)
            .hide_data(true);
        assert_eq!(req.specs, vec![expected]);
    }

    #[test]
    fn test_query_unknown_operator() {
        let err = QueryRequest::parse(
            r#"{"data": [
                {"tag": "t"},
                {"tag": "t", "operations": [{"type": "sum"}]}
            ]}"#,
        )
        .unwrap_err();

        assert_eq!(err.code(), ApiErrorCode::EventstoreUnknownOperator);
        assert_eq!(err.message(), "query 1: unknown operation type 'sum'");
    }

    #[test]
    fn test_query_malformed_spec() {
        let err = QueryRequest::parse(r#"{"data": [{"tag": "t", "keys": "dim1"}]}"#).unwrap_err();
        assert_eq!(err.code(), ApiErrorCode::EventstoreValidationError);
        assert!(err.message().starts_with("query 0:"));

        let err = QueryRequest::parse(r#"{"data": [{"name": "no tag"}]}"#).unwrap_err();
        assert_eq!(err.message(), "query 0: missing tag");
    }
}
