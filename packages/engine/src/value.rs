//! JSON value model seen by the evaluator
//!
//! Documents are plain `serde_json::Value` trees (built with `preserve_order`,
//! so object members keep insertion order). The evaluator never copies or
//! mutates them: node lists hold borrowed references, and lookups that find
//! nothing produce the [`Node::Absent`] sentinel, which is stripped before a
//! [`NodeList`] is handed back.

use std::ops::Deref;

pub use serde_json::Value;

/// One slot produced by a selector: a borrowed node, or the absent sentinel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// A node borrowed from the document
    Present(&'a Value),
    /// The lookup found nothing
    Absent,
}

impl<'a> Node<'a> {
    /// Wrap the result of a map or array lookup
    #[inline]
    #[must_use]
    pub fn from_lookup(found: Option<&'a Value>) -> Self {
        found.map_or(Node::Absent, Node::Present)
    }

    /// The borrowed node, if any
    #[inline]
    #[must_use]
    pub fn present(self) -> Option<&'a Value> {
        match self {
            Node::Present(value) => Some(value),
            Node::Absent => None,
        }
    }
}

/// Ordered list of nodes borrowed from a document
///
/// Duplicates are allowed (a union of overlapping selectors keeps both hits).
/// A `NodeList` never contains the absent sentinel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeList<'a> {
    nodes: Vec<&'a Value>,
}

impl<'a> NodeList<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// A list holding exactly one node
    #[must_use]
    pub fn singleton(value: &'a Value) -> Self {
        Self { nodes: vec![value] }
    }

    /// Build a list from selector slots, dropping every [`Node::Absent`]
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Node<'a>>,
    {
        Self {
            nodes: slots.into_iter().filter_map(Node::present).collect(),
        }
    }

    #[inline]
    pub fn push(&mut self, value: &'a Value) {
        self.nodes.push(value);
    }

    /// The only node, when the list has exactly one
    #[inline]
    #[must_use]
    pub fn single(&self) -> Option<&'a Value> {
        match self.nodes.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[&'a Value] {
        &self.nodes
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<&'a Value> {
        self.nodes
    }

    /// Deep copies of the selected nodes, detached from the document
    #[must_use]
    pub fn to_values(&self) -> Vec<Value> {
        self.nodes.iter().map(|value| (*value).clone()).collect()
    }
}

impl<'a> Deref for NodeList<'a> {
    type Target = [&'a Value];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl<'a> From<Vec<&'a Value>> for NodeList<'a> {
    fn from(nodes: Vec<&'a Value>) -> Self {
        Self { nodes }
    }
}

impl<'a> FromIterator<&'a Value> for NodeList<'a> {
    fn from_iter<I: IntoIterator<Item = &'a Value>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<&'a Value> for NodeList<'a> {
    fn extend<I: IntoIterator<Item = &'a Value>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = &'a Value;
    type IntoIter = std::vec::IntoIter<&'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, 'l> IntoIterator for &'l NodeList<'a> {
    type Item = &'l &'a Value;
    type IntoIter = std::slice::Iter<'l, &'a Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// A filter operand after coercion to a single value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    /// No value: empty or multi-node list, missing member, or `length` of a non-container
    Absent,
    /// A value borrowed from the document
    Node(&'a Value),
    /// A value produced by the query itself (literal or function result)
    Owned(Value),
}

impl Scalar<'_> {
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Scalar::Absent => None,
            Scalar::Node(value) => Some(value),
            Scalar::Owned(value) => Some(value),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Scalar::Absent)
    }

    /// Detach from the document
    #[must_use]
    pub fn into_owned(self) -> Option<Value> {
        match self {
            Scalar::Absent => None,
            Scalar::Node(value) => Some(value.clone()),
            Scalar::Owned(value) => Some(value),
        }
    }
}

/// Immediate children of a node: array elements in order, object values in
/// insertion order, nothing for scalars.
pub fn children(value: &Value) -> impl Iterator<Item = &Value> {
    let (elements, members) = match value {
        Value::Array(items) => (Some(items.iter()), None),
        Value::Object(map) => (None, Some(map.values())),
        _ => (None, None),
    };
    elements
        .into_iter()
        .flatten()
        .chain(members.into_iter().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_slots_drops_absent() {
        let a = json!(1);
        let b = json!("x");
        let list = NodeList::from_slots([Node::Present(&a), Node::Absent, Node::Present(&b)]);
        assert_eq!(list.to_values(), vec![json!(1), json!("x")]);
    }

    #[test]
    fn children_follow_insertion_order() {
        let doc = json!({"z": 1, "a": 2, "m": 3});
        let values: Vec<_> = children(&doc).cloned().collect();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(children(&json!(7)).count(), 0);
    }

    #[test]
    fn single_requires_exactly_one() {
        let a = json!(1);
        assert_eq!(NodeList::singleton(&a).single(), Some(&a));
        assert_eq!(NodeList::new().single(), None);
        assert_eq!(NodeList::from(vec![&a, &a]).single(), None);
    }
}
