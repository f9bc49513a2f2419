//! API error types
//!
//! API errors are pass-through: they keep the subsystem's message (with the
//! offending item's position) and attach a stable code and severity.

use std::fmt;

use crate::query::QueryError;
use crate::store::StoreError;

/// API error severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Request rejected, store unchanged
    Error,
    /// Store invariant broken
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Malformed event, QuerySpec or request body
    EventstoreValidationError,
    /// Unrecognized filter or operation type
    EventstoreUnknownOperator,
    /// Regex filter does not compile
    EventstoreInvalidPattern,
    /// Store invariant violation
    EventstoreInternalError,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::EventstoreValidationError => "EVENTSTORE_VALIDATION_ERROR",
            ApiErrorCode::EventstoreUnknownOperator => "EVENTSTORE_UNKNOWN_OPERATOR",
            ApiErrorCode::EventstoreInvalidPattern => "EVENTSTORE_INVALID_PATTERN",
            ApiErrorCode::EventstoreInternalError => "EVENTSTORE_INTERNAL_ERROR",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            ApiErrorCode::EventstoreInternalError => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// API error with preserved subsystem error information
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    code: ApiErrorCode,
    message: String,
}

impl ApiError {
    fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a validation error for a malformed request body
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::EventstoreValidationError, reason)
    }

    /// Create an internal error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::EventstoreInternalError, reason)
    }

    /// Create from a store error (pass-through)
    pub fn from_store_error(err: StoreError) -> Self {
        let code = match err {
            StoreError::InvalidEvent { .. } => ApiErrorCode::EventstoreValidationError,
            StoreError::Internal(_) => ApiErrorCode::EventstoreInternalError,
        };
        Self::new(code, err.to_string())
    }

    /// Create from a query error (pass-through)
    pub fn from_query_error(err: QueryError) -> Self {
        let code = match err {
            QueryError::Validation { .. } => ApiErrorCode::EventstoreValidationError,
            QueryError::UnknownOperator { .. } => ApiErrorCode::EventstoreUnknownOperator,
            QueryError::InvalidPattern { .. } => ApiErrorCode::EventstoreInvalidPattern,
        };
        Self::new(code, err.to_string())
    }

    /// Returns the error code
    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns whether this is a fatal error
    pub fn is_fatal(&self) -> bool {
        matches!(self.severity(), Severity::Fatal)
    }

    /// Returns whether the caller's input caused this error
    pub fn is_client_error(&self) -> bool {
        !self.is_fatal()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::from_store_error(err)
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::from_query_error(err)
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = ApiError::validation("missing field `events`");
        assert_eq!(err.code().code(), "EVENTSTORE_VALIDATION_ERROR");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_store_error_pass_through() {
        let err = ApiError::from_store_error(StoreError::invalid_event(2, "tag must not be empty"));
        assert_eq!(err.code(), ApiErrorCode::EventstoreValidationError);
        assert_eq!(err.message(), "event 2: tag must not be empty");

        let err = ApiError::from_store_error(StoreError::Internal("lock poisoned".into()));
        assert_eq!(err.code(), ApiErrorCode::EventstoreInternalError);
        assert!(err.is_fatal());
    }

    #[test]
    fn test_query_error_pass_through() {
        let err = ApiError::from_query_error(QueryError::unknown_filter(1, "lt"));
        assert_eq!(err.code().code(), "EVENTSTORE_UNKNOWN_OPERATOR");
        assert_eq!(err.message(), "query 1: unknown filter type 'lt'");

        let err = ApiError::from_query_error(QueryError::invalid_pattern(0, "(", "unclosed group"));
        assert_eq!(err.code(), ApiErrorCode::EventstoreInvalidPattern);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::internal("snapshot lock poisoned");
        assert_eq!(
            err.to_string(),
            "[FATAL] EVENTSTORE_INTERNAL_ERROR: snapshot lock poisoned"
        );
    }
}
