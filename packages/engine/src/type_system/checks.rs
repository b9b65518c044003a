//! Static (declared) types of filter expressions
//!
//! These checks never evaluate anything and never fail: a mismatch is
//! reported to the sink and the caller decides what to do with it.

use super::core::FunctionType;
use super::registry::FunctionRegistry;
use crate::ast::{FilterExpr, QueryAst, Segment};
use crate::diagnostics::{Diagnostic, DiagnosticSink};

impl FunctionRegistry {
    /// Type of `expr` without evaluating it
    ///
    /// Literals are `value`, embedded queries `nodes`, comparisons and boolean
    /// operators `logical`. A call has its declared return type even when the
    /// argument count is wrong (an arity diagnostic is reported); when the count
    /// matches, each argument is checked against its parameter type. An unknown
    /// function has no type.
    pub fn declared_type(&self, expr: &FilterExpr, sink: &dyn DiagnosticSink) -> Option<FunctionType> {
        match expr {
            FilterExpr::Literal(_) => Some(FunctionType::Value),
            FilterExpr::Query(_) => Some(FunctionType::Nodes),
            FilterExpr::Compare { .. } | FilterExpr::And(..) | FilterExpr::Or(..) | FilterExpr::Not(_) => {
                Some(FunctionType::Logical)
            }
            FilterExpr::FuncCall { name, args } => {
                let Some(signature) = self.signature(name) else {
                    sink.report(Diagnostic::UnknownFunction {
                        function: name.clone(),
                    });
                    return None;
                };
                if signature.arity() == args.len() {
                    let context = expr.to_string();
                    for (arg, parameter) in args.iter().zip(&signature.parameter_types) {
                        self.declared_as_in(arg, *parameter, Some(context.as_str()), sink);
                    }
                } else {
                    sink.report(Diagnostic::ArityMismatch {
                        function: name.clone(),
                        expected: signature.arity(),
                        found: args.len(),
                    });
                }
                Some(signature.return_type)
            }
        }
    }

    /// Whether `expr` may be used where `required` is expected
    ///
    /// Equal types match and `nodes` converts to `value` or `logical`; anything
    /// else is reported as a type mismatch and yields `false`.
    pub fn declared_as(&self, expr: &FilterExpr, required: FunctionType, sink: &dyn DiagnosticSink) -> bool {
        self.declared_as_in(expr, required, None, sink)
    }

    fn declared_as_in(
        &self,
        expr: &FilterExpr,
        required: FunctionType,
        context: Option<&str>,
        sink: &dyn DiagnosticSink,
    ) -> bool {
        let declared = self.declared_type(expr, sink);
        match (declared, required) {
            (Some(a), b) if a == b => true,
            (Some(FunctionType::Nodes), FunctionType::Value | FunctionType::Logical) => true,
            _ => {
                sink.report(Diagnostic::TypeMismatch {
                    expression: expr.to_string(),
                    declared,
                    required,
                    context: context.map(str::to_string),
                });
                false
            }
        }
    }

    /// Check every filter of `query`, including filters of nested queries
    pub fn check_query(&self, query: &QueryAst, sink: &dyn DiagnosticSink) {
        for segment in &query.segments {
            self.check_segment(segment, sink);
        }
    }

    /// Check the expression of one filter selector, used where a test is expected
    pub fn check_filter(&self, expr: &FilterExpr, sink: &dyn DiagnosticSink) {
        self.check_test(expr, sink);
    }

    fn check_segment(&self, segment: &Segment, sink: &dyn DiagnosticSink) {
        match segment {
            Segment::Filter(expr) => self.check_test(expr, sink),
            Segment::Union(selectors) => {
                for selector in selectors {
                    self.check_segment(selector, sink);
                }
            }
            Segment::Descendant(inner) => self.check_segment(inner, sink),
            Segment::Index(_) | Segment::Key(_) | Segment::Wildcard | Segment::Slice { .. } => {}
        }
    }

    /// `expr` sits where a test (logical) is expected
    fn check_test(&self, expr: &FilterExpr, sink: &dyn DiagnosticSink) {
        match expr {
            FilterExpr::And(lhs, rhs) | FilterExpr::Or(lhs, rhs) => {
                self.check_test(lhs, sink);
                self.check_test(rhs, sink);
            }
            FilterExpr::Not(inner) => self.check_test(inner, sink),
            FilterExpr::Compare { lhs, rhs, .. } => {
                self.check_comparable(lhs, sink);
                self.check_comparable(rhs, sink);
            }
            FilterExpr::Query(query) => self.check_query(query, sink),
            FilterExpr::FuncCall { args, .. } => {
                self.declared_as(expr, FunctionType::Logical, sink);
                self.check_nested(args, sink);
            }
            FilterExpr::Literal(_) => {
                self.declared_as(expr, FunctionType::Logical, sink);
            }
        }
    }

    /// `expr` is a comparison operand, where a value is expected
    fn check_comparable(&self, expr: &FilterExpr, sink: &dyn DiagnosticSink) {
        match expr {
            FilterExpr::FuncCall { args, .. } => {
                self.declared_as(expr, FunctionType::Value, sink);
                self.check_nested(args, sink);
            }
            FilterExpr::Query(query) => self.check_query(query, sink),
            FilterExpr::Literal(_) => {}
            other => {
                self.declared_as(other, FunctionType::Value, sink);
            }
        }
    }

    /// Filters inside queries passed as function arguments
    fn check_nested(&self, args: &[FilterExpr], sink: &dyn DiagnosticSink) {
        for arg in args {
            match arg {
                FilterExpr::Query(query) => self.check_query(query, sink),
                FilterExpr::FuncCall { args, .. } => self.check_nested(args, sink),
                _ => {}
            }
        }
    }
}
