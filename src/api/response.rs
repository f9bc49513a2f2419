//! API response types

use serde::{Deserialize, Serialize};

use crate::store::EventId;

use super::errors::ApiError;

/// Response to an accepted ingest batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    pub ingested: usize,
    /// Assigned ids, in batch order
    pub ids: Vec<EventId>,
}

impl IngestResponse {
    pub fn new(ids: Vec<EventId>) -> Self {
        Self {
            ingested: ids.len(),
            ids,
        }
    }
}

/// Response to a reset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Number of events removed
    pub wiped: usize,
}

/// Error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    /// Create from an API error
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: "error".to_string(),
            code: err.code().code().to_string(),
            message: err.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingest_response() {
        let resp = IngestResponse::new(vec![EventId::new(1), EventId::new(2)]);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({"ingested": 2, "ids": [1, 2]})
        );
    }

    #[test]
    fn test_error_response() {
        let err = ApiError::validation("event 0: missing tag");
        let resp = ErrorResponse::from_error(&err);
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({
                "status": "error",
                "code": "EVENTSTORE_VALIDATION_ERROR",
                "message": "event 0: missing tag"
            })
        );
    }
}
