//! Result assembly
//!
//! Packages per-QuerySpec blocks into the request's response, in request order.

use super::result::{QueryResponse, ResultBlock};

/// Stateless result assembler
pub struct ResultAssembler;

impl ResultAssembler {
    /// Concatenates blocks in the order given
    pub fn assemble<I>(blocks: I) -> QueryResponse
    where
        I: IntoIterator<Item = ResultBlock>,
    {
        QueryResponse {
            data: blocks.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Meta;

    fn block(name: &str) -> ResultBlock {
        ResultBlock {
            name: name.into(),
            meta: Meta::new(),
            result: Vec::new(),
        }
    }

    #[test]
    fn test_preserves_order() {
        let response = ResultAssembler::assemble(vec![block("b"), block("a"), block("c")]);
        let names: Vec<_> = response.data.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_empty_request() {
        let response = ResultAssembler::assemble(Vec::new());
        assert!(response.data.is_empty());
    }
}
