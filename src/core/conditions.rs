//! Condition evaluation for automation rules.
//!
//! Pure and deterministic: no side effects, never panics on malformed
//! operands. Comparisons that cannot be made (missing field, non-numeric
//! operand) fail closed and evaluate to false rather than erroring.

use serde_json::Value;

use crate::domain::{Condition, Operator, Payload};

/// Test a set of conditions against an event payload.
///
/// Returns true iff every condition is satisfied. An empty condition list
/// vacuously satisfies, so a rule with no conditions always fires for its
/// event type.
pub fn evaluate(conditions: &[Condition], payload: &Payload) -> bool {
    conditions.iter().all(|c| evaluate_one(c, payload))
}

fn evaluate_one(condition: &Condition, payload: &Payload) -> bool {
    let actual = payload.get(&condition.field);

    match condition.operator {
        // Strict equality, no coercion. A missing field never equals anything.
        Operator::Equals => actual == Some(&condition.value),
        Operator::NotEquals => actual != Some(&condition.value),

        Operator::GreaterThan => match (actual.and_then(as_number), as_number(&condition.value)) {
            (Some(lhs), Some(rhs)) => lhs > rhs,
            _ => false,
        },
        Operator::LessThan => match (actual.and_then(as_number), as_number(&condition.value)) {
            (Some(lhs), Some(rhs)) => lhs < rhs,
            _ => false,
        },

        Operator::Contains => match (actual.and_then(as_text), as_text(&condition.value)) {
            (Some(haystack), Some(needle)) => haystack.contains(&needle),
            _ => false,
        },
    }
}

/// Numeric coercion: JSON numbers and numeric strings qualify.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String coercion for substring tests; only scalars qualify.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
