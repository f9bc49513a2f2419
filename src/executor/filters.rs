//! Predicate filtering for query execution
//!
//! Evaluates compiled predicates against an event's attributes.
//! No coercion: values are compared as strings.

use std::collections::HashMap;

use crate::query::CompiledPredicate;

/// Evaluates predicates against event data
pub struct PredicateFilter;

impl PredicateFilter {
    /// Checks if the data matches all predicates.
    ///
    /// An empty predicate list matches everything.
    pub fn matches(data: &HashMap<String, String>, predicates: &[CompiledPredicate]) -> bool {
        // All predicates must match (AND semantics)
        predicates
            .iter()
            .all(|pred| Self::evaluate(pred, data))
    }

    /// Checks if the data matches a single predicate
    pub fn evaluate(predicate: &CompiledPredicate, data: &HashMap<String, String>) -> bool {
        match data.get(&predicate.key) {
            Some(value) => predicate.matcher.is_match(value),
            None => false, // Missing key = no match
        }
    }
}
