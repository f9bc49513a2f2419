//! Query AST
//!
//! Typed representation of one QuerySpec, plus the loose wire shapes it is
//! decoded from. Filter and operation types are closed enums: an unknown
//! type name is rejected here, before any event is looked at.

use serde::Deserialize;

use super::errors::{QueryError, QueryResult};

/// A single filter condition on one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `data[key] == value`, exact and case-sensitive
    Eq { key: String, value: String },
    /// `pattern` found anywhere within `data[key]`
    Regex { key: String, pattern: String },
}

impl Predicate {
    /// Create an equality predicate
    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Predicate::Eq {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a regex predicate
    pub fn regex(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Predicate::Regex {
            key: key.into(),
            pattern: pattern.into(),
        }
    }

    /// Attribute the predicate reads
    pub fn key(&self) -> &str {
        match self {
            Predicate::Eq { key, .. } | Predicate::Regex { key, .. } => key,
        }
    }

    /// Wire name of the predicate type
    pub fn type_name(&self) -> &'static str {
        match self {
            Predicate::Eq { .. } => "eq",
            Predicate::Regex { .. } => "regex",
        }
    }
}

/// An aggregation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Sampling-weighted number of matching events
    Count,
    /// Distinct values of `data[key]` among matching events
    UniqueCount { key: String },
}

impl Operation {
    /// Create a uniqueCount operation
    pub fn unique_count(key: impl Into<String>) -> Self {
        Operation::UniqueCount { key: key.into() }
    }

    /// Name under which the result appears in `meta`
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Count => "count",
            Operation::UniqueCount { .. } => "uniqueCount",
        }
    }
}

/// One named filter + projection + aggregation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    /// Label echoed back in the result block
    pub name: String,
    /// Partition selector
    pub tag: String,
    /// Attributes to project, in order
    pub keys: Vec<String>,
    /// Filters, combined with AND
    pub filters: Vec<Predicate>,
    /// Aggregations computed over the filtered set
    pub operations: Vec<Operation>,
    /// Suppress row output, still compute `meta`
    pub hide_data: bool,
}

impl QuerySpec {
    /// Creates a spec that matches every event of `tag`
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            keys: Vec::new(),
            filters: Vec::new(),
            operations: Vec::new(),
            hide_data: false,
        }
    }

    /// Sets the projected keys
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a filter
    pub fn with_filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// Adds an operation
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Sets hideData
    pub fn hide_data(mut self, hide: bool) -> Self {
        self.hide_data = hide;
        self
    }

    /// Decodes the wire shape of the QuerySpec at position `index`
    pub fn from_raw(raw: RawQuerySpec, index: usize) -> QueryResult<Self> {
        let tag = raw
            .tag
            .ok_or_else(|| QueryError::validation(index, "missing tag"))?;

        let filters = raw
            .filters
            .into_iter()
            .map(|filter| filter.into_predicate(index))
            .collect::<QueryResult<Vec<_>>>()?;

        let operations = raw
            .operations
            .into_iter()
            .map(|operation| operation.into_operation(index))
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(Self {
            name: raw.name,
            tag,
            keys: raw.keys,
            filters,
            operations,
            hide_data: raw.hide_data,
        })
    }
}

/// QuerySpec as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuerySpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub filters: Vec<RawFilter>,
    #[serde(default)]
    pub operations: Vec<RawOperation>,
    #[serde(default)]
    pub hide_data: bool,
}

/// Filter as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub key: String,
    pub value: String,
}

impl RawFilter {
    fn into_predicate(self, index: usize) -> QueryResult<Predicate> {
        match self.kind.as_str() {
            "eq" => Ok(Predicate::eq(self.key, self.value)),
            "regex" => Ok(Predicate::regex(self.key, self.value)),
            other => Err(QueryError::unknown_filter(index, other)),
        }
    }
}

/// Operation as it appears on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct RawOperation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub key: Option<String>,
}

impl RawOperation {
    fn into_operation(self, index: usize) -> QueryResult<Operation> {
        match self.kind.as_str() {
            "count" => Ok(Operation::Count),
            "uniqueCount" => match self.key {
                Some(key) if !key.is_empty() => Ok(Operation::unique_count(key)),
                _ => Err(QueryError::validation(
                    index,
                    "uniqueCount requires a key",
                )),
            },
            other => Err(QueryError::unknown_operation(index, other)),
        }
    }
}
