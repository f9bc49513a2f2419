//! Query executor for eventstore
//!
//! Executes query plans against an event source, producing deterministic results.
//!
//! Execution flow (strict order):
//! 1. Select candidate events by tag (unknown tag = empty set)
//! 2. Keep events for which every predicate holds
//! 3. Sort survivors by ts ascending, ties in ingestion order
//! 4. Compute aggregations over the survivors
//! 5. Project survivors into rows, unless hideData is set

use std::sync::Arc;

use crate::query::QueryPlan;
use crate::store::{Event, EventSource};

use super::aggregation::AggregationOperator;
use super::assembler::ResultAssembler;
use super::filters::PredicateFilter;
use super::result::{DataEntry, QueryResponse, ResultBlock, ResultRow};
use super::sorter::ResultSorter;

/// Query executor that processes plans against one consistent event source
pub struct QueryExecutor<'a, S: EventSource> {
    source: &'a S,
}

impl<'a, S: EventSource> QueryExecutor<'a, S> {
    /// Creates a new executor
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Executes one plan.
    ///
    /// Same plan + same source = same block.
    pub fn execute(&self, plan: &QueryPlan) -> ResultBlock {
        // Steps 1-2: select by tag and filter
        let mut survivors: Vec<Arc<Event>> = self
            .source
            .events_for_tag(&plan.tag)
            .iter()
            .filter(|event| PredicateFilter::matches(&event.data, &plan.predicates))
            .cloned()
            .collect();

        // Step 3: order
        ResultSorter::sort(&mut survivors);

        // Step 4: aggregate over the filtered set
        let meta = AggregationOperator::apply_all(&plan.operations, &survivors);

        // Step 5: project
        let result = if plan.hide_data {
            Vec::new()
        } else {
            survivors
                .iter()
                .map(|event| {
                    let data = plan
                        .projection
                        .project(&event.data)
                        .map(|(key, value)| DataEntry::new(key, value))
                        .collect();
                    ResultRow::new(event, data)
                })
                .collect()
        };

        ResultBlock {
            name: plan.name.clone(),
            meta,
            result,
        }
    }

    /// Executes every plan independently and assembles the response
    pub fn execute_all(&self, plans: &[QueryPlan]) -> QueryResponse {
        ResultAssembler::assemble(plans.iter().map(|plan| self.execute(plan)))
    }
}
