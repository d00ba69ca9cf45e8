use serde::{Deserialize, Serialize};

/// Result of evaluating a single rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleTraceResult {
    /// Every condition held and the rule fired.
    Matched,
    /// At least one condition did not hold.
    NotMatched,
}

impl RuleTraceResult {
    /// Return the `snake_case` string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::NotMatched => "not_matched",
        }
    }
}

/// Why a rule's first failing condition did not hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionFailure {
    /// No fact with the condition's key was supplied.
    MissingFact,
    /// The fact was supplied but the comparison was false.
    NotSatisfied,
}

impl ConditionFailure {
    /// Return the `snake_case` string representation (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingFact => "missing_fact",
            Self::NotSatisfied => "not_satisfied",
        }
    }
}

/// Trace entry for a single rule evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleTraceEntry {
    /// Id of the rule.
    pub rule_id: String,
    /// Rule priority, if one was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Optional rule description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Result of evaluating this rule.
    pub result: RuleTraceResult,
    /// Zero-based index of the first condition that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_condition: Option<usize>,
    /// Human-readable form of the failed condition, e.g. `"age > 65"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_condition_display: Option<String>,
    /// Why the failed condition did not hold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<ConditionFailure>,
}
