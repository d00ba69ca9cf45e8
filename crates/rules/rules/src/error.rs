use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a fact was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactErrorKind {
    /// The key is empty or only whitespace.
    EmptyKey,
    /// Another fact in the same collection already uses this key.
    DuplicateKey,
    /// The value is not a boolean, a finite number, or a string.
    UnsupportedType,
    /// The key collides with a name reserved by the engine configuration.
    ReservedKey,
    /// A fact the engine configuration requires is absent.
    MissingRequired,
}

impl FactErrorKind {
    /// Return the `snake_case` reason code (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyKey => "empty_key",
            Self::DuplicateKey => "duplicate_key",
            Self::UnsupportedType => "unsupported_type",
            Self::ReservedKey => "reserved_key",
            Self::MissingRequired => "missing_required",
        }
    }
}

impl fmt::Display for FactErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyKey => "key is empty",
            Self::DuplicateKey => "key appears more than once",
            Self::UnsupportedType => "value is not a boolean, number, or string",
            Self::ReservedKey => "key is reserved",
            Self::MissingRequired => "required fact is missing",
        })
    }
}

/// A fact collection failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("invalid fact '{key}': {reason}")]
pub struct FactError {
    /// The offending key (may be empty for `EmptyKey`).
    pub key: String,
    /// The reason code.
    pub reason: FactErrorKind,
}

impl FactError {
    pub(crate) fn new(key: impl Into<String>, reason: FactErrorKind) -> Self {
        Self {
            key: key.into(),
            reason,
        }
    }
}

/// Why a rule was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleErrorKind {
    /// The rule id is empty or only whitespace.
    EmptyId,
    /// Another rule in the same collection already uses this id.
    DuplicateId,
    /// The rule has no conditions.
    EmptyConditions,
    /// A condition uses an operator outside the configured set.
    UnsupportedOperator,
    /// A condition's expected value cannot be compared under its operator.
    TypeMismatch,
    /// The conclusion is blank.
    EmptyConclusion,
}

impl RuleErrorKind {
    /// Return the `snake_case` reason code (matches serde serialization).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmptyId => "empty_id",
            Self::DuplicateId => "duplicate_id",
            Self::EmptyConditions => "empty_conditions",
            Self::UnsupportedOperator => "unsupported_operator",
            Self::TypeMismatch => "type_mismatch",
            Self::EmptyConclusion => "empty_conclusion",
        }
    }
}

impl fmt::Display for RuleErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyId => "id is empty",
            Self::DuplicateId => "id appears more than once",
            Self::EmptyConditions => "rule has no conditions",
            Self::UnsupportedOperator => "operator is not supported",
            Self::TypeMismatch => "operator cannot compare the expected value",
            Self::EmptyConclusion => "conclusion is empty",
        })
    }
}

/// A rule collection failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error(
    "invalid rule '{rule_id}'{}: {reason}",
    .condition.map(|i| format!(" (condition {i})")).unwrap_or_default()
)]
pub struct RuleError {
    /// The offending rule id.
    pub rule_id: String,
    /// Zero-based index of the offending condition, for condition-level reasons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<usize>,
    /// The reason code.
    pub reason: RuleErrorKind,
}

impl RuleError {
    pub(crate) fn new(rule_id: impl Into<String>, reason: RuleErrorKind) -> Self {
        Self {
            rule_id: rule_id.into(),
            condition: None,
            reason,
        }
    }

    pub(crate) fn at_condition(
        rule_id: impl Into<String>,
        index: usize,
        reason: RuleErrorKind,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            condition: Some(index),
            reason,
        }
    }
}

/// Either input collection failed validation in [`RuleEngine::run`](crate::RuleEngine::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The facts were rejected.
    #[error(transparent)]
    Facts(#[from] FactError),
    /// The rules were rejected.
    #[error(transparent)]
    Rules(#[from] RuleError),
}

/// Errors raised while decoding facts or rules from an external encoding.
#[derive(Debug, Error)]
pub enum FrontendError {
    /// The document could not be read or decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fact_error_display() {
        let err = FactError::new("age", FactErrorKind::DuplicateKey);
        assert_eq!(
            err.to_string(),
            "invalid fact 'age': key appears more than once"
        );
    }

    #[test]
    fn rule_error_display() {
        let err = RuleError::new("R1", RuleErrorKind::EmptyConditions);
        assert_eq!(err.to_string(), "invalid rule 'R1': rule has no conditions");

        let err = RuleError::at_condition("R1", 1, RuleErrorKind::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "invalid rule 'R1' (condition 1): operator cannot compare the expected value"
        );
    }

    #[test]
    fn reason_codes_match_serde() {
        for kind in [
            FactErrorKind::EmptyKey,
            FactErrorKind::DuplicateKey,
            FactErrorKind::UnsupportedType,
            FactErrorKind::ReservedKey,
            FactErrorKind::MissingRequired,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        for kind in [
            RuleErrorKind::EmptyId,
            RuleErrorKind::DuplicateId,
            RuleErrorKind::EmptyConditions,
            RuleErrorKind::UnsupportedOperator,
            RuleErrorKind::TypeMismatch,
            RuleErrorKind::EmptyConclusion,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn engine_error_is_transparent() {
        let err = EngineError::from(FactError::new("", FactErrorKind::EmptyKey));
        assert_eq!(err.to_string(), "invalid fact '': key is empty");
    }
}
