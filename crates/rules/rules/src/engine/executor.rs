use std::cmp::Reverse;

use tracing::{debug, instrument};

use crate::config::EngineConfig;
use crate::engine::eval::{RuleMatch, match_rule};
use crate::engine::result::{EvaluationResult, ExplanationEntry, SatisfiedCondition};
use crate::engine::trace::{RuleTraceEntry, RuleTraceResult};
use crate::error::{EngineError, FactError, RuleError};
use crate::ir::fact::Fact;
use crate::ir::rule::Rule;
use crate::validate::{
    ValidatedFacts, ValidatedRules, validate_facts as check_facts, validate_rules as check_rules,
};

/// Evaluate validated rules against validated facts.
///
/// Single forward pass: conclusions never become new facts. A condition on a
/// key with no supplied fact is a non-match, not an error. Fired rules are
/// reported by priority (higher first, absent counts as `0`), ties keeping
/// declaration order.
#[instrument(skip_all, fields(facts_count = facts.len(), rules_count = rules.len()))]
pub fn evaluate_rules(facts: &ValidatedFacts, rules: &ValidatedRules) -> EvaluationResult {
    let mut fired = Vec::new();
    let mut trace = Vec::with_capacity(rules.len());

    for rule in rules.iter() {
        let mut entry = RuleTraceEntry {
            rule_id: rule.id.clone(),
            priority: rule.priority,
            description: rule.description.clone(),
            result: RuleTraceResult::Matched,
            failed_condition: None,
            failed_condition_display: None,
            failure: None,
        };

        match match_rule(rule, facts) {
            RuleMatch::Fired(satisfied) => {
                debug!(rule = %rule.id, "rule fired");
                let satisfied = satisfied
                    .into_iter()
                    .map(|(condition, observed)| SatisfiedCondition {
                        key: condition.key.clone(),
                        operator: condition.operator,
                        expected: condition.expected.clone(),
                        observed: observed.clone(),
                    })
                    .collect();
                fired.push((
                    rule.priority.unwrap_or(0),
                    ExplanationEntry {
                        rule_id: rule.id.clone(),
                        conclusion: rule.conclusion.clone(),
                        satisfied,
                    },
                ));
            }
            RuleMatch::Failed { index, reason } => {
                let condition = &rule.conditions[index];
                debug!(
                    rule = %rule.id,
                    condition = index,
                    key = %condition.key,
                    ?reason,
                    "rule did not fire"
                );
                entry.result = RuleTraceResult::NotMatched;
                entry.failed_condition = Some(index);
                entry.failed_condition_display = Some(format!(
                    "{} {} {}",
                    condition.key, condition.operator, condition.expected
                ));
                entry.failure = Some(reason);
            }
        }

        trace.push(entry);
    }

    // `sort_by_key` is stable, so equal priorities keep declaration order.
    fired.sort_by_key(|(priority, _)| Reverse(*priority));

    debug!(fired_count = fired.len(), "evaluation complete");
    EvaluationResult::new(fired.into_iter().map(|(_, entry)| entry).collect(), trace)
}

/// Validates and evaluates facts and rules under one [`EngineConfig`].
///
/// Holds no mutable state; a single engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    config: EngineConfig,
}

impl RuleEngine {
    /// Create a new rule engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Return the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate a fact collection against this engine's configuration.
    pub fn validate_facts(&self, facts: &[Fact]) -> Result<ValidatedFacts, FactError> {
        check_facts(facts, &self.config)
    }

    /// Validate a rule collection against this engine's configuration.
    pub fn validate_rules(&self, rules: &[Rule]) -> Result<ValidatedRules, RuleError> {
        check_rules(rules, &self.config)
    }

    /// Evaluate validated inputs. Equivalent to [`evaluate_rules`].
    pub fn evaluate(&self, facts: &ValidatedFacts, rules: &ValidatedRules) -> EvaluationResult {
        evaluate_rules(facts, rules)
    }

    /// Validate both collections, then evaluate.
    ///
    /// Facts are validated first; either failure is returned unmodified and
    /// no evaluation takes place.
    pub fn run(&self, facts: &[Fact], rules: &[Rule]) -> Result<EvaluationResult, EngineError> {
        let facts = self.validate_facts(facts)?;
        let rules = self.validate_rules(rules)?;
        Ok(self.evaluate(&facts, &rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::trace::ConditionFailure;
    use crate::engine::value::Value;
    use crate::error::{FactErrorKind, RuleErrorKind};
    use crate::ir::condition::Condition;
    use crate::ir::rule::Conclusion;

    fn run(facts: &[Fact], rules: &[Rule]) -> EvaluationResult {
        RuleEngine::default().run(facts, rules).unwrap()
    }

    fn rule(id: &str, key: &str, op: &str, expected: impl Into<Value>) -> Rule {
        Rule::new(id, vec![Condition::new(key, op, expected)], format!("{id} conclusion"))
    }

    #[test]
    fn no_rule_fires() {
        let result = run(&[Fact::new("age", 50)], &[rule("R1", "age", ">", 65)]);
        assert!(result.fired_rules().is_empty());
        assert!(result.conclusions().is_empty());
        assert!(result.explanation().is_empty());
        assert_eq!(
            result.render_explanation(),
            "No applicable rule matched the supplied facts."
        );
    }

    #[test]
    fn positive_match_with_explanation() {
        let facts = vec![Fact::new("age", 70), Fact::new("has_diabetes", true)];
        let rules = vec![Rule::new(
            "R1",
            vec![
                Condition::new("age", ">=", 65),
                Condition::new("has_diabetes", "==", true),
            ],
            "screen for retinopathy",
        )];
        let result = run(&facts, &rules);

        assert_eq!(result.fired_rules(), ["R1".to_owned()]);
        assert_eq!(
            result.conclusions(),
            [Conclusion::from("screen for retinopathy")]
        );
        let text = result.render_explanation();
        assert!(text.contains("age >= 65, observed age=70"));
        assert!(text.contains("has_diabetes == true, observed has_diabetes=true"));
    }

    #[test]
    fn missing_fact_is_a_non_match() {
        let result = run(&[Fact::new("age", 70)], &[rule("R1", "egfr", "<", 60)]);
        assert!(result.is_empty());
        assert_eq!(result.trace()[0].result, RuleTraceResult::NotMatched);
        assert_eq!(result.trace()[0].failure, Some(ConditionFailure::MissingFact));
    }

    #[test]
    fn and_semantics() {
        let rules = vec![Rule::new(
            "R1",
            vec![Condition::new("a", "==", true), Condition::new("b", "==", true)],
            "both",
        )];
        for (a, b, fires) in [
            (true, true, true),
            (true, false, false),
            (false, true, false),
            (false, false, false),
        ] {
            let facts = vec![Fact::new("a", a), Fact::new("b", b)];
            assert_eq!(!run(&facts, &rules).is_empty(), fires, "a={a} b={b}");
        }
    }

    #[test]
    fn priority_orders_fired_rules() {
        let facts = vec![Fact::new("age", 70)];
        let rules = vec![
            rule("low", "age", ">", 18).with_priority(5),
            rule("high", "age", ">", 18).with_priority(10),
        ];
        let result = run(&facts, &rules);
        assert_eq!(result.fired_rules(), ["high".to_owned(), "low".to_owned()]);
        assert_eq!(result.conclusions()[0], Conclusion::from("high conclusion"));
    }

    #[test]
    fn equal_or_absent_priorities_keep_declaration_order() {
        let facts = vec![Fact::new("age", 70)];
        let rules = vec![
            rule("c", "age", ">", 18),
            rule("a", "age", ">", 18).with_priority(0),
            rule("b", "age", ">", 18),
            rule("neg", "age", ">", 18).with_priority(-1),
        ];
        let result = run(&facts, &rules);
        assert_eq!(
            result.fired_rules(),
            ["c".to_owned(), "a".to_owned(), "b".to_owned(), "neg".to_owned()]
        );
    }

    #[test]
    fn trace_covers_every_rule_in_declaration_order() {
        let facts = vec![Fact::new("age", 70), Fact::new("sex", "male")];
        let rules = vec![
            rule("R1", "sex", "==", "female"),
            rule("R2", "age", ">", 65).with_priority(1),
        ];
        let result = run(&facts, &rules);
        let trace = result.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].rule_id, "R1");
        assert_eq!(trace[0].failure, Some(ConditionFailure::NotSatisfied));
        assert_eq!(
            trace[0].failed_condition_display.as_deref(),
            Some("sex == female")
        );
        assert_eq!(trace[1].result, RuleTraceResult::Matched);
        assert_eq!(trace[1].failed_condition, None);
    }

    #[test]
    fn numeric_looking_string_does_not_equal_number() {
        let result = run(&[Fact::new("code", "5")], &[rule("R1", "code", "==", 5)]);
        assert!(result.is_empty());
    }

    #[test]
    fn ordering_against_non_numeric_fact_does_not_fire() {
        let result = run(&[Fact::new("age", "seventy")], &[rule("R1", "age", ">", 65)]);
        assert!(result.is_empty());
    }

    #[test]
    fn membership_fires() {
        let result = run(
            &[Fact::new("icd", "E11")],
            &[rule("R1", "icd", "in", vec!["E10", "E11"])],
        );
        assert_eq!(result.fired_rules(), ["R1".to_owned()]);
        assert!(result.render_explanation().contains("icd in [E10, E11], observed icd=E11"));
    }

    #[test]
    fn run_reports_fact_errors_before_rule_errors() {
        let facts = vec![Fact::new("age", 1), Fact::new("age", 2)];
        let rules = vec![Rule::new("R1", vec![], "refer")];
        let err = RuleEngine::default().run(&facts, &rules).unwrap_err();
        assert!(matches!(err, EngineError::Facts(e) if e.reason == FactErrorKind::DuplicateKey));
    }

    #[test]
    fn run_reports_type_mismatch_without_evaluating() {
        let facts = vec![Fact::new("has_diabetes", true)];
        let rules = vec![rule("R1", "has_diabetes", ">", true)];
        let err = RuleEngine::default().run(&facts, &rules).unwrap_err();
        assert!(matches!(err, EngineError::Rules(e) if e.reason == RuleErrorKind::TypeMismatch));
    }

    #[test]
    fn engine_config_is_applied() {
        let engine = RuleEngine::new(EngineConfig::default().with_required_fact("age"));
        let err = engine.run(&[], &[rule("R1", "age", ">", 65)]).unwrap_err();
        assert!(
            matches!(err, EngineError::Facts(e) if e.reason == FactErrorKind::MissingRequired)
        );
    }

    #[test]
    fn evaluation_is_deterministic() {
        let facts = vec![
            Fact::new("age", 70),
            Fact::new("bp", 150),
            Fact::new("smoker", true),
        ];
        let rules = vec![
            rule("R1", "age", ">", 65).with_priority(2),
            rule("R2", "bp", ">=", 140).with_priority(2),
            rule("R3", "smoker", "==", true).with_priority(7),
            rule("R4", "bmi", ">", 30),
        ];
        let first = run(&facts, &rules);
        for _ in 0..10 {
            assert_eq!(run(&facts, &rules), first);
        }
        assert_eq!(first.fired_rules(), ["R3".to_owned(), "R1".to_owned(), "R2".to_owned()]);
    }
}
