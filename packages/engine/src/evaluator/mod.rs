//! Query evaluation
//!
//! An [`Evaluator`] walks a [`QueryAst`] against a borrowed document. Every
//! segment maps the current node list to the next one; the filter
//! sub-language recurses back into the selector evaluator for embedded
//! `$`/`@` queries. Evaluation never fails: semantic problems go to the
//! diagnostic sink and a fallback value is used.

mod comparison;
mod filter;
mod selectors;
mod slice;

pub use comparison::{compare, values_equal};
pub use slice::slice_indices;

use serde_json::Value;

use crate::ast::{Anchor, QueryAst, Segment};
use crate::diagnostics::DiagnosticSink;
use crate::type_system::FunctionRegistry;
use crate::value::NodeList;

/// Evaluates queries with a given registry, reporting to a given sink
#[derive(Clone, Copy)]
pub struct Evaluator<'r> {
    registry: &'r FunctionRegistry,
    sink: &'r dyn DiagnosticSink,
}

impl<'r> Evaluator<'r> {
    #[must_use]
    pub fn new(registry: &'r FunctionRegistry, sink: &'r dyn DiagnosticSink) -> Self {
        Self { registry, sink }
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &'r FunctionRegistry {
        self.registry
    }

    #[inline]
    #[must_use]
    pub fn sink(&self) -> &'r dyn DiagnosticSink {
        self.sink
    }

    /// Run a top-level query; both `$` and `@` start from `[document]`
    pub fn apply_query<'a>(&self, query: &QueryAst, document: &'a Value) -> NodeList<'a> {
        let start = NodeList::singleton(document);
        let nodes = self.eval_query(query, document, &start);
        tracing::trace!(
            target: "jpt::evaluator",
            query = %query,
            selected = nodes.len(),
            "query applied"
        );
        nodes
    }

    /// Run a query from `root` (for `$`) or `current` (for `@`)
    pub fn eval_query<'a>(&self, query: &QueryAst, root: &'a Value, current: &NodeList<'a>) -> NodeList<'a> {
        let start = match query.anchor {
            Anchor::Root => NodeList::singleton(root),
            Anchor::Current => current.clone(),
        };
        self.eval_segments(&query.segments, start, root)
    }

    /// Left fold over `segments`: the output of one segment is the input of the next
    pub fn eval_segments<'a>(&self, segments: &[Segment], nodes: NodeList<'a>, root: &'a Value) -> NodeList<'a> {
        segments
            .iter()
            .fold(nodes, |nodes, segment| self.select(segment, &nodes, root))
    }
}

impl std::fmt::Debug for Evaluator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("registry", self.registry)
            .finish_non_exhaustive()
    }
}
