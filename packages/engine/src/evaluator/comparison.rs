//! Comparison semantics of the filter language
//!
//! `>` and `>=` are `<` and `<=` with the operands swapped. Equality is
//! structural, with numbers compared by value (`1 == 1.0`) and objects
//! compared without regard to member order. Ordering only exists between
//! two numbers or two strings. The absent value equals nothing, not even
//! another absent value.

use serde_json::{Number, Value};

use crate::ast::CompareOp;
use crate::value::Scalar;

/// Apply `op` to two coerced operands
#[must_use]
pub fn compare(op: CompareOp, lhs: &Scalar<'_>, rhs: &Scalar<'_>) -> bool {
    match op {
        CompareOp::Eq => scalars_equal(lhs, rhs),
        CompareOp::Ne => !scalars_equal(lhs, rhs),
        CompareOp::Lt => less_than(lhs, rhs),
        CompareOp::Le => scalars_equal(lhs, rhs) || less_than(lhs, rhs),
        CompareOp::Gt => less_than(rhs, lhs),
        CompareOp::Ge => scalars_equal(rhs, lhs) || less_than(rhs, lhs),
    }
}

fn scalars_equal(lhs: &Scalar<'_>, rhs: &Scalar<'_>) -> bool {
    match (lhs.as_value(), rhs.as_value()) {
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

fn less_than(lhs: &Scalar<'_>, rhs: &Scalar<'_>) -> bool {
    match (lhs.as_value(), rhs.as_value()) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => number_less(a, b),
        (Some(Value::String(a)), Some(Value::String(b))) => a < b,
        _ => false,
    }
}

/// Structural JSON equality
#[must_use]
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => number_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| values_equal(x, y)))
        }
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        _ => false,
    }
}

fn number_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn number_less(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x < y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x < y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x < y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn owned(value: Value) -> Scalar<'static> {
        Scalar::Owned(value)
    }

    #[test]
    fn greater_than_swaps_operands() {
        assert!(compare(CompareOp::Gt, &owned(json!(3)), &owned(json!(2))));
        assert!(!compare(CompareOp::Gt, &owned(json!(2)), &owned(json!(2))));
        assert!(compare(CompareOp::Ge, &owned(json!(2)), &owned(json!(2))));
        assert!(!compare(CompareOp::Le, &owned(json!("b")), &owned(json!("a"))));
        assert!(compare(CompareOp::Lt, &owned(json!("a")), &owned(json!("b"))));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(compare(CompareOp::Eq, &owned(json!(1)), &owned(json!(1.0))));
        assert!(compare(CompareOp::Lt, &owned(json!(-1)), &owned(json!(0.5))));
        assert!(compare(CompareOp::Lt, &owned(json!(u64::MAX - 1)), &owned(json!(u64::MAX))));
    }

    #[test]
    fn structural_equality() {
        assert!(values_equal(&json!({"a": 1, "b": [1, 2]}), &json!({"b": [1.0, 2], "a": 1})));
        assert!(!values_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!values_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!values_equal(&json!(null), &json!(false)));
        assert!(!values_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn ordering_needs_matching_types() {
        for op in [CompareOp::Lt, CompareOp::Le, CompareOp::Gt, CompareOp::Ge] {
            assert!(!compare(op, &owned(json!(1)), &owned(json!("2"))));
            assert!(!compare(op, &owned(json!([1])), &owned(json!([2]))));
            assert!(!compare(op, &owned(json!(true)), &owned(json!(false))));
        }
        assert!(compare(CompareOp::Le, &owned(json!(null)), &owned(json!(null))));
    }

    #[test]
    fn absent_equals_nothing() {
        let absent = Scalar::Absent;
        assert!(!compare(CompareOp::Eq, &absent, &Scalar::Absent));
        assert!(compare(CompareOp::Ne, &absent, &Scalar::Absent));
        assert!(!compare(CompareOp::Eq, &absent, &owned(json!(null))));
        assert!(compare(CompareOp::Ne, &owned(json!(1)), &absent));
        assert!(!compare(CompareOp::Le, &absent, &Scalar::Absent));
    }

    #[test]
    fn borrowed_and_owned_values_compare_alike() {
        let doc = json!({"x": "a"});
        assert!(compare(CompareOp::Eq, &Scalar::Node(&doc["x"]), &owned(json!("a"))));
    }
}
