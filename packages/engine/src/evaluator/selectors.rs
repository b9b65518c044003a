//! Per-segment selection
//!
//! Selecting over a node list is the concatenation of selecting over each
//! node, so every selector is written against a single node and pushes its
//! slots (present nodes or the absent sentinel) into a shared buffer.

use serde_json::Value;

use super::Evaluator;
use super::slice::slice_indices;
use crate::ast::{FilterExpr, Segment};
use crate::value::{Node, NodeList, children};

impl Evaluator<'_> {
    /// Apply one segment to every node of `nodes`; absent slots are stripped
    pub(crate) fn select<'a>(&self, segment: &Segment, nodes: &NodeList<'a>, root: &'a Value) -> NodeList<'a> {
        let mut slots = Vec::with_capacity(nodes.len());
        for &node in nodes {
            self.select_node(segment, node, root, &mut slots);
        }
        NodeList::from_slots(slots)
    }

    fn select_node<'a>(&self, segment: &Segment, node: &'a Value, root: &'a Value, out: &mut Vec<Node<'a>>) {
        match segment {
            Segment::Index(index) => {
                if let Value::Array(items) = node {
                    out.push(index_slot(items, *index));
                }
            }
            Segment::Key(key) => {
                if let Value::Object(members) = node {
                    out.push(Node::from_lookup(members.get(key)));
                }
            }
            Segment::Union(selectors) => {
                for selector in selectors {
                    self.select_node(selector, node, root, out);
                }
            }
            Segment::Wildcard => out.extend(children(node).map(Node::Present)),
            Segment::Descendant(inner) => {
                let mut found = Vec::new();
                containers(node, &mut found);
                for container in found {
                    self.select_node(inner, container, root, out);
                }
            }
            Segment::Slice { start, end, step } => {
                if let Value::Array(items) = node {
                    out.extend(
                        slice_indices(items.len(), *start, *end, *step)
                            .into_iter()
                            .map(|i| Node::from_lookup(items.get(i))),
                    );
                }
            }
            Segment::Filter(expr) => self.filter_children(expr, node, root, out),
        }
    }

    fn filter_children<'a>(&self, expr: &FilterExpr, node: &'a Value, root: &'a Value, out: &mut Vec<Node<'a>>) {
        for child in children(node) {
            let current = NodeList::singleton(child);
            if self.eval_expr(expr, root, &current).to_logical() {
                out.push(Node::Present(child));
            }
        }
    }
}

/// Array element at `index`, counting from the end when negative
fn index_slot(items: &[Value], index: i64) -> Node<'_> {
    let resolved = if index < 0 {
        i64::try_from(items.len())
            .ok()
            .and_then(|len| len.checked_add(index))
    } else {
        Some(index)
    };
    Node::from_lookup(
        resolved
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| items.get(i)),
    )
}

/// `value` itself when it is a container, then every container below it, in pre-order
fn containers<'a>(value: &'a Value, out: &mut Vec<&'a Value>) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        if matches!(value, Value::Array(_) | Value::Object(_)) {
            out.push(value);
            let start = pending.len();
            pending.extend(children(value));
            pending[start..].reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ast::{CompareOp, QueryAst};
    use crate::diagnostics::IgnoreSink;
    use crate::type_system::FunctionRegistry;

    fn select(segment: Segment, doc: &Value) -> Vec<Value> {
        let registry = FunctionRegistry::new();
        let evaluator = Evaluator::new(&registry, &IgnoreSink);
        evaluator
            .select(&segment, &NodeList::singleton(doc), doc)
            .to_values()
    }

    #[test]
    fn index_counts_from_either_end() {
        let doc = json!(["a", "b", "c"]);
        assert_eq!(select(Segment::Index(0), &doc), vec![json!("a")]);
        assert_eq!(select(Segment::Index(-1), &doc), vec![json!("c")]);
        assert_eq!(select(Segment::Index(-3), &doc), vec![json!("a")]);
        assert!(select(Segment::Index(3), &doc).is_empty());
        assert!(select(Segment::Index(-4), &doc).is_empty());
        assert!(select(Segment::Index(i64::MIN), &doc).is_empty());
        assert!(select(Segment::Index(0), &json!({"0": 1})).is_empty());
    }

    #[test]
    fn key_on_objects_only() {
        assert_eq!(select(Segment::key("a"), &json!({"a": null})), vec![json!(null)]);
        assert!(select(Segment::key("b"), &json!({"a": 1})).is_empty());
        assert!(select(Segment::key("a"), &json!(["a"])).is_empty());
    }

    #[test]
    fn union_keeps_order_and_duplicates() {
        let doc = json!({"a": 1, "b": 2});
        let union = Segment::Union(vec![Segment::key("b"), Segment::key("a"), Segment::key("b")]);
        assert_eq!(select(union, &doc), vec![json!(2), json!(1), json!(2)]);

        let pair = Segment::Union(vec![Segment::key("a"), Segment::key("b")]);
        assert_eq!(select(pair, &doc), vec![json!(1), json!(2)]);
    }

    #[test]
    fn wildcard_children() {
        assert_eq!(select(Segment::Wildcard, &json!({"x": 1, "y": [2]})), vec![json!(1), json!([2])]);
        assert!(select(Segment::Wildcard, &json!("scalar")).is_empty());
    }

    #[test]
    fn descendant_wildcard_is_preorder() {
        let doc = json!({"a": [1, {"b": 2}]});
        assert_eq!(
            select(Segment::descendant(Segment::Wildcard), &doc),
            vec![json!([1, {"b": 2}]), json!(1), json!({"b": 2}), json!(2)]
        );
    }

    #[test]
    fn descendant_key_visits_nested_matches() {
        let doc = json!({"k": 1, "o": {"k": 2, "p": [{"k": 3}]}});
        assert_eq!(
            select(Segment::descendant(Segment::key("k")), &doc),
            vec![json!(1), json!(2), json!(3)]
        );
    }

    #[test]
    fn descendant_handles_deep_nesting() {
        let depth = 20_000;
        let mut doc = json!({"k": 1});
        for _ in 0..depth {
            doc = Value::Array(vec![doc]);
        }
        assert_eq!(select(Segment::descendant(Segment::key("k")), &doc), vec![json!(1)]);

        let registry = FunctionRegistry::new();
        let evaluator = Evaluator::new(&registry, &IgnoreSink);
        let all = evaluator.select(&Segment::descendant(Segment::Wildcard), &NodeList::singleton(&doc), &doc);
        assert_eq!(all.len(), depth + 1);
        drop(all);

        // Unnest by hand; the derived drop would recurse once per level.
        while let Value::Array(mut items) = doc {
            match items.pop() {
                Some(inner) => doc = inner,
                None => break,
            }
        }
    }

    #[test]
    fn filter_keeps_matching_children() {
        let doc = json!([{"n": 1}, {"n": 5}, {"m": 9}]);
        let filter = Segment::Filter(FilterExpr::compare(
            CompareOp::Gt,
            FilterExpr::current(vec![Segment::key("n")]),
            FilterExpr::literal(2),
        ));
        assert_eq!(select(filter, &doc), vec![json!({"n": 5})]);

        let existence = Segment::Filter(FilterExpr::Query(QueryAst::current(vec![Segment::key("m")])));
        assert_eq!(select(existence, &doc), vec![json!({"m": 9})]);
    }

    #[test]
    fn slice_on_arrays_only() {
        let doc = json!([1, 2, 3]);
        assert_eq!(
            select(Segment::slice(Some(-1), None, Some(-1)), &doc),
            vec![json!(3), json!(2), json!(1)]
        );
        assert!(select(Segment::slice(None, None, None), &json!({"a": 1})).is_empty());
    }
}
