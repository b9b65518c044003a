//! Filter expression evaluation

use serde_json::Value;

use super::Evaluator;
use super::comparison::compare;
use crate::ast::FilterExpr;
use crate::type_system::Typed;
use crate::value::{NodeList, Scalar};

impl Evaluator<'_> {
    /// Evaluate `expr` with `root` as `$` and `current` as `@`
    ///
    /// Both operands of `&&` and `||` are always evaluated, so diagnostics
    /// from either side are reported regardless of the outcome.
    pub fn eval_expr<'a>(&self, expr: &FilterExpr, root: &'a Value, current: &NodeList<'a>) -> Typed<'a> {
        match expr {
            FilterExpr::Query(query) => Typed::Nodes(self.eval_query(query, root, current)),
            FilterExpr::Compare { op, lhs, rhs } => {
                let lhs = self.eval_expr(lhs, root, current).into_scalar();
                let rhs = self.eval_expr(rhs, root, current).into_scalar();
                Typed::Logical(compare(*op, &lhs, &rhs))
            }
            FilterExpr::And(lhs, rhs) => {
                let lhs = self.eval_expr(lhs, root, current).to_logical();
                let rhs = self.eval_expr(rhs, root, current).to_logical();
                Typed::Logical(lhs && rhs)
            }
            FilterExpr::Or(lhs, rhs) => {
                let lhs = self.eval_expr(lhs, root, current).to_logical();
                let rhs = self.eval_expr(rhs, root, current).to_logical();
                Typed::Logical(lhs || rhs)
            }
            FilterExpr::Not(inner) => Typed::Logical(!self.eval_expr(inner, root, current).to_logical()),
            FilterExpr::FuncCall { name, args } => self.call_function(name, args, root, current),
            FilterExpr::Literal(value) => Typed::Value(Scalar::Owned(value.clone())),
        }
    }
}
