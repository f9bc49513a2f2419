//! Result types for query execution

use serde::{Deserialize, Serialize};

use super::aggregation::Meta;
use crate::store::{Event, EventId};

/// One projected attribute of a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    pub key: String,
    pub value: String,
}

impl DataEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A single event in the result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: EventId,
    pub ts: i64,
    pub tag: String,
    /// Projected attributes, in projection order
    pub data: Vec<DataEntry>,
}

impl ResultRow {
    /// Builds a row from an event and its projected attributes
    pub fn new(event: &Event, data: Vec<DataEntry>) -> Self {
        Self {
            id: event.id,
            ts: event.ts,
            tag: event.tag.clone(),
            data,
        }
    }

    /// Projected attribute names, in order
    pub fn keys(&self) -> Vec<&str> {
        self.data.iter().map(|entry| entry.key.as_str()).collect()
    }
}

/// Result of one QuerySpec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBlock {
    /// QuerySpec label
    pub name: String,
    /// Aggregations, empty when none were requested
    pub meta: Meta,
    /// Rows in ts order, empty when hideData was set
    pub result: Vec<ResultRow>,
}

impl ResultBlock {
    /// Returns true if the block carries no rows
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    /// Returns the number of rows
    pub fn len(&self) -> usize {
        self.result.len()
    }
}

/// Response to a query request: one block per QuerySpec, in request order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<ResultBlock>,
}
