use std::collections::HashSet;

use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::value::{Value, ValueKind};
use crate::error::{RuleError, RuleErrorKind};
use crate::ir::condition::{Condition, Operator};
use crate::ir::rule::{Conclusion, Rule};

/// A condition whose operator has been resolved and type-checked.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    /// The fact key this condition reads.
    pub key: String,
    /// The resolved operator.
    pub operator: Operator,
    /// The expected value, or list of values for [`Operator::In`].
    pub expected: Value,
}

/// A rule that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRule {
    /// Unique rule identifier.
    pub id: String,
    /// Optional human-readable purpose.
    pub description: Option<String>,
    /// Non-empty, type-checked conditions.
    pub conditions: Vec<CompiledCondition>,
    /// Non-empty conclusion.
    pub conclusion: Conclusion,
    /// Ordering hint; `None` ranks as `0`.
    pub priority: Option<i32>,
}

/// A rule collection that passed validation, in declaration order.
///
/// Only constructible through [`validate_rules`] or [`validate_rules_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRules {
    rules: Vec<CompiledRule>,
}

impl ValidatedRules {
    /// The compiled rules in declaration order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Look up a rule by id.
    pub fn rule_by_id(&self, id: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompiledRule> {
        self.rules.iter()
    }
}

/// Validate a rule collection, failing on the first violation.
///
/// Rules are checked in declaration order. Within a rule the order is: id
/// present, id unique, at least one condition, each condition's operator
/// supported and compatible with its expected value, conclusion present.
pub fn validate_rules(rules: &[Rule], config: &EngineConfig) -> Result<ValidatedRules, RuleError> {
    let mut seen = HashSet::with_capacity(rules.len());
    let mut compiled = Vec::with_capacity(rules.len());
    for rule in rules {
        match compile_rule(rule, config, &mut seen) {
            Ok(rule) => compiled.push(rule),
            Err(mut errors) => return Err(errors.swap_remove(0)),
        }
    }
    debug!(rules_count = compiled.len(), "rules validated");
    Ok(ValidatedRules { rules: compiled })
}

/// Validate a rule collection, reporting every violation.
pub fn validate_rules_all(
    rules: &[Rule],
    config: &EngineConfig,
) -> Result<ValidatedRules, Vec<RuleError>> {
    let mut seen = HashSet::with_capacity(rules.len());
    let mut compiled = Vec::with_capacity(rules.len());
    let mut errors = Vec::new();
    for rule in rules {
        match compile_rule(rule, config, &mut seen) {
            Ok(rule) => compiled.push(rule),
            Err(rule_errors) => errors.extend(rule_errors),
        }
    }
    if errors.is_empty() {
        debug!(rules_count = compiled.len(), "rules validated");
        Ok(ValidatedRules { rules: compiled })
    } else {
        Err(errors)
    }
}

/// Check one rule and compile it. Returns every violation found in the rule,
/// in check order, so the caller can keep the first or all of them.
fn compile_rule<'a>(
    rule: &'a Rule,
    config: &EngineConfig,
    seen: &mut HashSet<&'a str>,
) -> Result<CompiledRule, Vec<RuleError>> {
    let mut errors = Vec::new();

    if rule.id.trim().is_empty() {
        errors.push(RuleError::new(&rule.id, RuleErrorKind::EmptyId));
    } else if !seen.insert(rule.id.as_str()) {
        errors.push(RuleError::new(&rule.id, RuleErrorKind::DuplicateId));
    }

    if rule.conditions.is_empty() {
        errors.push(RuleError::new(&rule.id, RuleErrorKind::EmptyConditions));
    }

    let mut conditions = Vec::with_capacity(rule.conditions.len());
    for (index, condition) in rule.conditions.iter().enumerate() {
        match compile_condition(condition, config) {
            Ok(compiled) => conditions.push(compiled),
            Err(reason) => errors.push(RuleError::at_condition(&rule.id, index, reason)),
        }
    }

    if rule.conclusion.is_empty() {
        errors.push(RuleError::new(&rule.id, RuleErrorKind::EmptyConclusion));
    }

    if !errors.is_empty() {
        for err in &errors {
            debug!(rule = %err.rule_id, reason = err.reason.as_str(), "rule rejected");
        }
        return Err(errors);
    }

    Ok(CompiledRule {
        id: rule.id.clone(),
        description: rule.description.clone(),
        conditions,
        conclusion: rule.conclusion.clone(),
        priority: rule.priority,
    })
}

fn compile_condition(
    condition: &Condition,
    config: &EngineConfig,
) -> Result<CompiledCondition, RuleErrorKind> {
    let operator = Operator::from_symbol(&condition.operator)
        .filter(|op| config.supports(*op))
        .ok_or(RuleErrorKind::UnsupportedOperator)?;

    if !operand_compatible(operator, &condition.expected) {
        return Err(RuleErrorKind::TypeMismatch);
    }

    Ok(CompiledCondition {
        key: condition.key.clone(),
        operator,
        expected: condition.expected.clone(),
    })
}

/// Ordering operators take a number; equality takes any scalar; membership
/// takes a non-empty list of scalars.
fn operand_compatible(operator: Operator, expected: &Value) -> bool {
    if operator.is_ordering() {
        return expected.kind() == Some(ValueKind::Number);
    }
    match (operator, expected) {
        (Operator::In, Value::List(items)) => {
            !items.is_empty() && items.iter().all(Value::is_scalar)
        }
        (Operator::In, _) => false,
        _ => expected.is_scalar(),
    }
}
