//! Query abstract syntax tree
//!
//! A query is an anchor (`$` or `@`) followed by segments. Filter segments
//! carry a [`FilterExpr`], whose `Query` variant nests a full [`QueryAst`],
//! so path selectors and filter predicates share one vocabulary.
//!
//! Every node is plain owned data: `Clone` is a full structural copy with no
//! shared substructure.

mod display;
mod tagged;

use serde_json::Value;

/// Where a query starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// `$`, the document root
    Root,
    /// `@`, the node under test inside a filter
    Current,
}

impl Anchor {
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Anchor::Root => "$",
            Anchor::Current => "@",
        }
    }
}

/// A parsed query: an anchor and the segments applied to it in order
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAst {
    pub anchor: Anchor,
    pub segments: Vec<Segment>,
}

impl QueryAst {
    #[must_use]
    pub fn new(anchor: Anchor, segments: Vec<Segment>) -> Self {
        Self { anchor, segments }
    }

    /// `$` followed by `segments`
    #[must_use]
    pub fn root(segments: Vec<Segment>) -> Self {
        Self::new(Anchor::Root, segments)
    }

    /// `@` followed by `segments`
    #[must_use]
    pub fn current(segments: Vec<Segment>) -> Self {
        Self::new(Anchor::Current, segments)
    }

    /// True when the query can select at most one node (only key and index segments)
    #[must_use]
    pub fn is_singular(&self) -> bool {
        self.segments
            .iter()
            .all(|segment| matches!(segment, Segment::Key(_) | Segment::Index(_)))
    }
}

/// One step of a path query
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Array element; negative values count from the end
    Index(i64),
    /// Object member
    Key(String),
    /// Several selectors applied to the same node, results concatenated in order
    Union(Vec<Segment>),
    /// All immediate children
    Wildcard,
    /// Apply the inner selector to the node and every container below it
    Descendant(Box<Segment>),
    /// Array slice `[start:end:step]`
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// Children for which the expression holds
    Filter(FilterExpr),
}

impl Segment {
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        Segment::Key(name.into())
    }

    #[must_use]
    pub fn descendant(inner: Segment) -> Self {
        Segment::Descendant(Box::new(inner))
    }

    #[must_use]
    pub fn slice(start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Self {
        Segment::Slice { start, end, step }
    }
}

/// Comparison operators of the filter language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub const ALL: [CompareOp; 6] = [
        CompareOp::Eq,
        CompareOp::Ne,
        CompareOp::Lt,
        CompareOp::Gt,
        CompareOp::Le,
        CompareOp::Ge,
    ];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

/// Filter expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Embedded `$...` or `@...` query, typed as a node list
    Query(QueryAst),
    Compare {
        op: CompareOp,
        lhs: Box<FilterExpr>,
        rhs: Box<FilterExpr>,
    },
    And(Box<FilterExpr>, Box<FilterExpr>),
    Or(Box<FilterExpr>, Box<FilterExpr>),
    Not(Box<FilterExpr>),
    FuncCall {
        name: String,
        args: Vec<FilterExpr>,
    },
    /// String, number, boolean or null
    Literal(Value),
}

impl FilterExpr {
    #[must_use]
    pub fn compare(op: CompareOp, lhs: FilterExpr, rhs: FilterExpr) -> Self {
        FilterExpr::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn and(lhs: FilterExpr, rhs: FilterExpr) -> Self {
        FilterExpr::And(Box::new(lhs), Box::new(rhs))
    }

    #[must_use]
    pub fn or(lhs: FilterExpr, rhs: FilterExpr) -> Self {
        FilterExpr::Or(Box::new(lhs), Box::new(rhs))
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(inner: FilterExpr) -> Self {
        FilterExpr::Not(Box::new(inner))
    }

    #[must_use]
    pub fn call(name: impl Into<String>, args: Vec<FilterExpr>) -> Self {
        FilterExpr::FuncCall {
            name: name.into(),
            args,
        }
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        FilterExpr::Literal(value.into())
    }

    #[must_use]
    pub fn current(segments: Vec<Segment>) -> Self {
        FilterExpr::Query(QueryAst::current(segments))
    }

    #[must_use]
    pub fn root(segments: Vec<Segment>) -> Self {
        FilterExpr::Query(QueryAst::root(segments))
    }
}
