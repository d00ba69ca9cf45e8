use std::cmp::Ordering;

use crate::engine::trace::ConditionFailure;
use crate::engine::value::Value;
use crate::ir::condition::Operator;
use crate::validate::{CompiledCondition, CompiledRule, ValidatedFacts};

/// Outcome of matching one rule against the fact lookup.
pub(crate) enum RuleMatch<'a> {
    /// Every condition held; carries the observed value for each condition.
    Fired(Vec<(&'a CompiledCondition, &'a Value)>),
    /// The condition at `index` failed.
    Failed { index: usize, reason: ConditionFailure },
}

/// Match a rule's conditions in order, stopping at the first that fails.
pub(crate) fn match_rule<'a>(
    rule: &'a CompiledRule,
    facts: &'a ValidatedFacts,
) -> RuleMatch<'a> {
    let mut satisfied = Vec::with_capacity(rule.conditions.len());
    for (index, condition) in rule.conditions.iter().enumerate() {
        let Some(actual) = facts.get(&condition.key) else {
            return RuleMatch::Failed {
                index,
                reason: ConditionFailure::MissingFact,
            };
        };
        if !condition_holds(condition.operator, actual, &condition.expected) {
            return RuleMatch::Failed {
                index,
                reason: ConditionFailure::NotSatisfied,
            };
        }
        satisfied.push((condition, actual));
    }
    RuleMatch::Fired(satisfied)
}

/// Apply `operator` to an observed fact value and an expected value.
pub(crate) fn condition_holds(operator: Operator, actual: &Value, expected: &Value) -> bool {
    match operator {
        Operator::Eq => values_equal(actual, expected),
        Operator::Ne => !values_equal(actual, expected),
        Operator::Gt => compare_numeric(actual, expected, Ordering::is_gt),
        Operator::Lt => compare_numeric(actual, expected, Ordering::is_lt),
        Operator::Ge => compare_numeric(actual, expected, Ordering::is_ge),
        Operator::Le => compare_numeric(actual, expected, Ordering::is_le),
        Operator::In => match expected {
            Value::List(items) => items.iter().any(|item| values_equal(actual, item)),
            _ => false,
        },
    }
}

/// Type-sensitive equality. Integers and floats compare numerically, with the
/// same exact comparison the ordering operators use; any other cross-type pair
/// is unequal.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        _ => compare_numeric(left, right, Ordering::is_eq),
    }
}

/// Numeric ordering. A non-numeric side never satisfies the comparison.
fn compare_numeric(left: &Value, right: &Value, predicate: fn(Ordering) -> bool) -> bool {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return predicate(a.cmp(b));
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).is_some_and(predicate),
        _ => false,
    }
}
