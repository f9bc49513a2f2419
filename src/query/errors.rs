//! # Query Errors
//!
//! Validation failures raised while turning a request into query plans.
//! Every variant carries the position of the offending QuerySpec in the
//! request; any of them fails the whole request.

use std::fmt;

use thiserror::Error;

/// Result type for query validation and planning
pub type QueryResult<T> = Result<T, QueryError>;

/// Which operator family an unknown type name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Filter,
    Operation,
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Filter => write!(f, "filter"),
            OperatorKind::Operation => write!(f, "operation"),
        }
    }
}

/// Query validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// Malformed QuerySpec shape
    #[error("query {index}: {reason}")]
    Validation { index: usize, reason: String },

    /// Unrecognized filter or operation type
    #[error("query {index}: unknown {kind} type '{name}'")]
    UnknownOperator {
        index: usize,
        kind: OperatorKind,
        name: String,
    },

    /// Regex filter value does not compile
    #[error("query {index}: invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },
}

impl QueryError {
    /// Create a validation error for the QuerySpec at `index`
    pub fn validation(index: usize, reason: impl Into<String>) -> Self {
        QueryError::Validation {
            index,
            reason: reason.into(),
        }
    }

    /// Create an unknown filter type error
    pub fn unknown_filter(index: usize, name: impl Into<String>) -> Self {
        QueryError::UnknownOperator {
            index,
            kind: OperatorKind::Filter,
            name: name.into(),
        }
    }

    /// Create an unknown operation type error
    pub fn unknown_operation(index: usize, name: impl Into<String>) -> Self {
        QueryError::UnknownOperator {
            index,
            kind: OperatorKind::Operation,
            name: name.into(),
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(
        index: usize,
        pattern: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QueryError::InvalidPattern {
            index,
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    /// Position of the offending QuerySpec
    pub fn index(&self) -> usize {
        match self {
            QueryError::Validation { index, .. }
            | QueryError::UnknownOperator { index, .. }
            | QueryError::InvalidPattern { index, .. } => *index,
        }
    }
}
