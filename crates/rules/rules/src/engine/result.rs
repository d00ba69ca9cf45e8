use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::trace::RuleTraceEntry;
use crate::engine::value::Value;
use crate::ir::condition::Operator;
use crate::ir::rule::Conclusion;

/// Explanation rendered when no rule fired.
pub const NO_MATCH_EXPLANATION: &str = "No applicable rule matched the supplied facts.";

/// A condition of a fired rule together with the fact value that satisfied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatisfiedCondition {
    /// The fact key.
    pub key: String,
    /// The operator that was applied.
    pub operator: Operator,
    /// The expected value from the rule.
    pub expected: Value,
    /// The observed fact value.
    pub observed: Value,
}

impl fmt::Display for SatisfiedCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{key} {op} {expected}, observed {key}={observed}",
            key = self.key,
            op = self.operator,
            expected = self.expected,
            observed = self.observed,
        )
    }
}

/// Why one fired rule matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationEntry {
    /// Id of the fired rule.
    pub rule_id: String,
    /// The rule's conclusion.
    pub conclusion: Conclusion,
    /// Every condition of the rule, in rule order, with its observed value.
    pub satisfied: Vec<SatisfiedCondition>,
}

/// Renders as
/// `<rule_id> fired: <conclusion> (because <key> <op> <expected>, observed <key>=<actual>; ...)`.
impl fmt::Display for ExplanationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fired: {} (because ", self.rule_id, self.conclusion)?;
        for (i, condition) in self.satisfied.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{condition}")?;
        }
        f.write_str(")")
    }
}

/// The outcome of one evaluation call.
///
/// `fired_rules`, `conclusions` and `explanation` are index-aligned and
/// ordered by priority (descending), then declaration order. `explanation_text`
/// is the rendered explanation, [`NO_MATCH_EXPLANATION`] when nothing fired.
/// `trace` has one entry per evaluated rule in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    fired_rules: Vec<String>,
    conclusions: Vec<Conclusion>,
    explanation: Vec<ExplanationEntry>,
    explanation_text: String,
    trace: Vec<RuleTraceEntry>,
}

impl EvaluationResult {
    /// Build a result from explanation entries that are already in fired order.
    pub(crate) fn new(explanation: Vec<ExplanationEntry>, trace: Vec<RuleTraceEntry>) -> Self {
        let explanation_text = if explanation.is_empty() {
            NO_MATCH_EXPLANATION.to_owned()
        } else {
            explanation
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")
        };
        Self {
            fired_rules: explanation.iter().map(|e| e.rule_id.clone()).collect(),
            conclusions: explanation.iter().map(|e| e.conclusion.clone()).collect(),
            explanation,
            explanation_text,
            trace,
        }
    }

    /// Ids of the rules that fired, in report order.
    pub fn fired_rules(&self) -> &[String] {
        &self.fired_rules
    }

    /// Conclusions of the fired rules, aligned with [`Self::fired_rules`].
    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    /// One explanation entry per fired rule, aligned with [`Self::fired_rules`].
    pub fn explanation(&self) -> &[ExplanationEntry] {
        &self.explanation
    }

    /// Per-rule outcomes in declaration order, including rules that did not fire.
    pub fn trace(&self) -> &[RuleTraceEntry] {
        &self.trace
    }

    /// Returns `true` if no rule fired.
    pub fn is_empty(&self) -> bool {
        self.fired_rules.is_empty()
    }

    /// The explanation as text, one line per fired rule, or
    /// [`NO_MATCH_EXPLANATION`] when nothing fired.
    pub fn explanation_text(&self) -> &str {
        &self.explanation_text
    }

    /// Owned copy of [`Self::explanation_text`].
    pub fn render_explanation(&self) -> String {
        self.explanation_text.clone()
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.explanation_text)
    }
}
