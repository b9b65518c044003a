//! Coercion of typed results
//!
//! A typed result is consumed either as a test (`to_logical`) or as a
//! comparison / function operand (`into_scalar`).

use super::core::Typed;
use crate::value::Scalar;

impl<'a> Typed<'a> {
    /// Logical reading: a node list is true when non-empty, a logical is
    /// itself. A value has no logical reading and counts as false.
    #[must_use]
    pub fn to_logical(&self) -> bool {
        match self {
            Typed::Nodes(nodes) => !nodes.is_empty(),
            Typed::Logical(flag) => *flag,
            Typed::Value(scalar) => {
                tracing::debug!(
                    target: "jpt::evaluator",
                    ?scalar,
                    "value used as a test expression, treated as false"
                );
                false
            }
        }
    }

    /// Scalar reading: a node list yields its only node (absent unless it has
    /// exactly one), a value is itself, a logical has no scalar reading.
    #[must_use]
    pub fn into_scalar(self) -> Scalar<'a> {
        match self {
            Typed::Nodes(nodes) => nodes.single().map_or(Scalar::Absent, Scalar::Node),
            Typed::Value(scalar) => scalar,
            Typed::Logical(_) => Scalar::Absent,
        }
    }
}
