//! Tagged-tuple JSON form of the AST
//!
//! External parsers hand queries over as JSON arrays whose first element is a
//! tag: `["$", "store", 0, ["wild"]]`, `["filt", ["==", ["@", "a"], 1]]`.
//! Bare integers are index segments, bare strings are key segments, and
//! inside a filter any bare scalar is a literal.

use serde_json::{Value, json};

use super::{Anchor, CompareOp, FilterExpr, QueryAst, Segment};
use crate::error::AstError;

impl QueryAst {
    /// Convert the tagged-tuple form into a typed tree
    ///
    /// # Errors
    ///
    /// Returns [`AstError`] naming the first fragment that does not fit the grammar.
    pub fn from_tagged(tagged: &Value) -> Result<Self, AstError> {
        let items = tagged
            .as_array()
            .ok_or_else(|| AstError::MalformedQuery(tagged.to_string()))?;
        let anchor = match items.first().and_then(Value::as_str) {
            Some("$") => Anchor::Root,
            Some("@") => Anchor::Current,
            _ => return Err(AstError::MalformedQuery(tagged.to_string())),
        };
        let segments = items[1..]
            .iter()
            .map(segment_from_tagged)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QueryAst::new(anchor, segments))
    }

    /// Render the tree in tagged-tuple form
    #[must_use]
    pub fn to_tagged(&self) -> Value {
        let mut items = Vec::with_capacity(self.segments.len() + 1);
        items.push(Value::from(self.anchor.symbol()));
        items.extend(self.segments.iter().map(Segment::to_tagged));
        Value::Array(items)
    }
}

impl Segment {
    /// Render one segment in tagged-tuple form
    #[must_use]
    pub fn to_tagged(&self) -> Value {
        match self {
            Segment::Index(index) => json!(index),
            Segment::Key(name) => json!(name),
            Segment::Union(selectors) => {
                let mut items = vec![json!("u")];
                items.extend(selectors.iter().map(Segment::to_tagged));
                Value::Array(items)
            }
            Segment::Wildcard => json!(["wild"]),
            Segment::Descendant(inner) => json!(["desc", inner.to_tagged()]),
            Segment::Slice { start, end, step } => json!(["slice", start, end, step]),
            Segment::Filter(expr) => json!(["filt", expr.to_tagged()]),
        }
    }
}

impl FilterExpr {
    /// Convert a tagged-tuple filter expression
    ///
    /// # Errors
    ///
    /// Returns [`AstError`] for unknown tags, wrong operand counts, or non-scalar literals.
    pub fn from_tagged(tagged: &Value) -> Result<Self, AstError> {
        let items = match tagged {
            Value::Array(items) => items,
            Value::Object(_) => return Err(AstError::MalformedExpression(tagged.to_string())),
            scalar => return Ok(FilterExpr::Literal(scalar.clone())),
        };
        let malformed = || AstError::MalformedExpression(tagged.to_string());
        let tag = items.first().and_then(Value::as_str).ok_or_else(malformed)?;
        let operands = &items[1..];

        match (tag, operands) {
            ("$" | "@", _) => QueryAst::from_tagged(tagged).map(FilterExpr::Query),
            ("and", [lhs, rhs]) => Ok(FilterExpr::and(
                FilterExpr::from_tagged(lhs)?,
                FilterExpr::from_tagged(rhs)?,
            )),
            ("or", [lhs, rhs]) => Ok(FilterExpr::or(
                FilterExpr::from_tagged(lhs)?,
                FilterExpr::from_tagged(rhs)?,
            )),
            ("not", [inner]) => Ok(FilterExpr::not(FilterExpr::from_tagged(inner)?)),
            ("func", [name, args @ ..]) => {
                let name = name.as_str().ok_or_else(malformed)?;
                let args = args
                    .iter()
                    .map(FilterExpr::from_tagged)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FilterExpr::call(name, args))
            }
            (symbol, [lhs, rhs]) => {
                let op = CompareOp::from_symbol(symbol).ok_or_else(malformed)?;
                Ok(FilterExpr::compare(
                    op,
                    FilterExpr::from_tagged(lhs)?,
                    FilterExpr::from_tagged(rhs)?,
                ))
            }
            _ => Err(malformed()),
        }
    }

    /// Render the expression in tagged-tuple form
    #[must_use]
    pub fn to_tagged(&self) -> Value {
        match self {
            FilterExpr::Query(query) => query.to_tagged(),
            FilterExpr::Compare { op, lhs, rhs } => {
                json!([op.symbol(), lhs.to_tagged(), rhs.to_tagged()])
            }
            FilterExpr::And(lhs, rhs) => json!(["and", lhs.to_tagged(), rhs.to_tagged()]),
            FilterExpr::Or(lhs, rhs) => json!(["or", lhs.to_tagged(), rhs.to_tagged()]),
            FilterExpr::Not(inner) => json!(["not", inner.to_tagged()]),
            FilterExpr::FuncCall { name, args } => {
                let mut items = vec![json!("func"), json!(name)];
                items.extend(args.iter().map(FilterExpr::to_tagged));
                Value::Array(items)
            }
            FilterExpr::Literal(value) => value.clone(),
        }
    }
}

fn segment_from_tagged(tagged: &Value) -> Result<Segment, AstError> {
    let malformed = || AstError::MalformedSegment(tagged.to_string());
    match tagged {
        Value::String(name) => Ok(Segment::Key(name.clone())),
        Value::Number(number) => number.as_i64().map(Segment::Index).ok_or_else(malformed),
        Value::Array(items) => {
            let tag = items.first().and_then(Value::as_str).ok_or_else(malformed)?;
            match (tag, &items[1..]) {
                ("wild", []) => Ok(Segment::Wildcard),
                ("u", selectors) => selectors
                    .iter()
                    .map(segment_from_tagged)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Segment::Union),
                ("desc", [inner]) => segment_from_tagged(inner).map(Segment::descendant),
                ("slice", [start, end, step]) => Ok(Segment::Slice {
                    start: optional_int(start).ok_or_else(malformed)?,
                    end: optional_int(end).ok_or_else(malformed)?,
                    step: optional_int(step).ok_or_else(malformed)?,
                }),
                ("filt", [expr]) => FilterExpr::from_tagged(expr).map(Segment::Filter),
                _ => Err(malformed()),
            }
        }
        _ => Err(malformed()),
    }
}

/// `null` is an omitted bound; anything other than an integer is rejected
fn optional_int(value: &Value) -> Option<Option<i64>> {
    match value {
        Value::Null => Some(None),
        other => other.as_i64().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_nested_filter() {
        let tagged = json!(["$", "store", ["desc", ["wild"]], ["filt", ["and",
            [">=", ["func", "length", ["@", "name"]], 3],
            ["not", ["@", "hidden"]]
        ]]]);
        let ast = QueryAst::from_tagged(&tagged).unwrap();
        assert_eq!(ast.segments.len(), 3);
        assert_eq!(ast.segments[0], Segment::key("store"));
        assert_eq!(ast.segments[1], Segment::descendant(Segment::Wildcard));
        assert_eq!(
            ast.segments[2],
            Segment::Filter(FilterExpr::and(
                FilterExpr::compare(
                    CompareOp::Ge,
                    FilterExpr::call("length", vec![FilterExpr::current(vec![Segment::key("name")])]),
                    FilterExpr::literal(3),
                ),
                FilterExpr::not(FilterExpr::current(vec![Segment::key("hidden")])),
            ))
        );
        assert_eq!(ast.to_tagged(), tagged);
    }

    #[test]
    fn slice_bounds_accept_null() {
        let ast = QueryAst::from_tagged(&json!(["$", ["slice", null, -1, null], ["u", 0, "a"]])).unwrap();
        assert_eq!(ast.segments[0], Segment::slice(None, Some(-1), None));
        assert_eq!(
            ast.segments[1],
            Segment::Union(vec![Segment::Index(0), Segment::key("a")])
        );
    }

    #[test]
    fn rejects_malformed_fragments() {
        assert!(matches!(
            QueryAst::from_tagged(&json!(["#", "a"])),
            Err(AstError::MalformedQuery(_))
        ));
        assert!(matches!(
            QueryAst::from_tagged(&json!(["$", 1.5])),
            Err(AstError::MalformedSegment(_))
        ));
        assert!(matches!(
            QueryAst::from_tagged(&json!(["$", ["filt", ["=~", 1, 2]]])),
            Err(AstError::MalformedExpression(_))
        ));
        assert!(matches!(
            QueryAst::from_tagged(&json!(["$", ["filt", {"a": 1}]])),
            Err(AstError::MalformedExpression(_))
        ));
    }
}
