//! Query planner
//!
//! Turns a validated [`QuerySpec`] into an executable [`QueryPlan`]:
//! regex patterns are compiled once per spec and the projection key order
//! is fixed up front. Planning is the last point at which a request can be
//! rejected; execution itself cannot fail.

use regex::Regex;

use super::ast::{Operation, Predicate, QuerySpec};
use super::errors::{QueryError, QueryResult};
use super::projection::KeyProjection;

/// How a compiled predicate tests an attribute value
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact string equality
    Eq(String),
    /// Unanchored, case-sensitive search
    Regex(Regex),
}

impl Matcher {
    /// Tests one attribute value
    pub fn is_match(&self, value: &str) -> bool {
        match self {
            Matcher::Eq(expected) => value == expected,
            Matcher::Regex(regex) => regex.is_match(value),
        }
    }
}

/// A predicate ready for evaluation
#[derive(Debug, Clone)]
pub struct CompiledPredicate {
    /// Attribute the predicate reads
    pub key: String,
    /// Value test
    pub matcher: Matcher,
}

impl CompiledPredicate {
    /// Compiles one predicate of the QuerySpec at `index`
    pub fn compile(predicate: &Predicate, index: usize) -> QueryResult<Self> {
        let matcher = match predicate {
            Predicate::Eq { value, .. } => Matcher::Eq(value.clone()),
            Predicate::Regex { pattern, .. } => Regex::new(pattern)
                .map(Matcher::Regex)
                .map_err(|e| QueryError::invalid_pattern(index, pattern, e.to_string()))?,
        };

        Ok(Self {
            key: predicate.key().to_string(),
            matcher,
        })
    }
}

/// Executable form of one QuerySpec
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Label echoed back in the result block
    pub name: String,
    /// Partition selector
    pub tag: String,
    /// Filters, combined with AND
    pub predicates: Vec<CompiledPredicate>,
    /// Row attribute order
    pub projection: KeyProjection,
    /// Aggregations over the filtered set
    pub operations: Vec<Operation>,
    /// Suppress rows
    pub hide_data: bool,
}

/// Stateless planner
pub struct QueryPlanner;

impl QueryPlanner {
    /// Plans the QuerySpec at position `index` of a request
    pub fn plan(spec: &QuerySpec, index: usize) -> QueryResult<QueryPlan> {
        let predicates = spec
            .filters
            .iter()
            .map(|predicate| CompiledPredicate::compile(predicate, index))
            .collect::<QueryResult<Vec<_>>>()?;

        let projection = KeyProjection::for_query(
            spec.filters.iter().map(Predicate::key),
            spec.keys.iter().map(String::as_str),
        );

        Ok(QueryPlan {
            name: spec.name.clone(),
            tag: spec.tag.clone(),
            predicates,
            projection,
            operations: spec.operations.clone(),
            hide_data: spec.hide_data,
        })
    }

    /// Plans every QuerySpec of a request.
    ///
    /// Fails on the first invalid spec, so nothing runs unless all of them
    /// are valid.
    pub fn plan_all(specs: &[QuerySpec]) -> QueryResult<Vec<QueryPlan>> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| Self::plan(spec, index))
            .collect()
    }
}
