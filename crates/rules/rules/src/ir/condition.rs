use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::value::Value;

/// Comparison operators a condition may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal.
    #[serde(rename = "==")]
    Eq,
    /// Not equal.
    #[serde(rename = "!=")]
    Ne,
    /// Greater than.
    #[serde(rename = ">")]
    Gt,
    /// Less than.
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal.
    #[serde(rename = ">=")]
    Ge,
    /// Less than or equal.
    #[serde(rename = "<=")]
    Le,
    /// Membership test (value in set).
    #[serde(rename = "in")]
    In,
}

impl Operator {
    /// Every operator the engine knows how to apply.
    pub const ALL: [Self; 7] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Lt,
        Self::Ge,
        Self::Le,
        Self::In,
    ];

    /// Resolve an authored operator symbol or its word alias.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "==" | "eq" => Some(Self::Eq),
            "!=" | "ne" => Some(Self::Ne),
            ">" | "gt" => Some(Self::Gt),
            "<" | "lt" => Some(Self::Lt),
            ">=" | "ge" | "gte" => Some(Self::Ge),
            "<=" | "le" | "lte" => Some(Self::Le),
            "in" | "in_list" => Some(Self::In),
            _ => None,
        }
    }

    /// The canonical symbol used in explanations.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::In => "in",
        }
    }

    /// Returns `true` for `>`, `<`, `>=` and `<=`.
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Ge | Self::Le)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One comparison between a fact's value and an expected value.
///
/// The operator is kept as authored so that an unknown symbol can be reported
/// by the rule validator instead of failing while the rule is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The fact key this condition reads.
    pub key: String,
    /// The operator symbol (`==`, `!=`, `>`, `<`, `>=`, `<=`, `in`, or a word alias).
    #[serde(alias = "op")]
    pub operator: String,
    /// The value (or, for `in`, the list of values) to compare against.
    #[serde(alias = "value")]
    pub expected: Value,
}

impl Condition {
    /// Create a new condition.
    pub fn new(
        key: impl Into<String>,
        operator: impl Into<String>,
        expected: impl Into<Value>,
    ) -> Self {
        Self {
            key: key.into(),
            operator: operator.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.operator, self.expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_and_aliases_resolve() {
        assert_eq!(Operator::from_symbol(">="), Some(Operator::Ge));
        assert_eq!(Operator::from_symbol("gte"), Some(Operator::Ge));
        assert_eq!(Operator::from_symbol(" == "), Some(Operator::Eq));
        assert_eq!(Operator::from_symbol("in_list"), Some(Operator::In));
        assert_eq!(Operator::from_symbol("~="), None);
        assert_eq!(Operator::from_symbol("contains"), None);
    }

    #[test]
    fn every_operator_round_trips_its_symbol() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn ordering_operators() {
        assert!(Operator::Gt.is_ordering());
        assert!(Operator::Le.is_ordering());
        assert!(!Operator::Eq.is_ordering());
        assert!(!Operator::In.is_ordering());
    }

    #[test]
    fn operator_serde_uses_symbols() {
        assert_eq!(serde_json::to_string(&Operator::Ge).unwrap(), "\">=\"");
        let op: Operator = serde_json::from_str("\"in\"").unwrap();
        assert_eq!(op, Operator::In);
    }

    #[test]
    fn condition_accepts_short_field_names() {
        let cond: Condition =
            serde_json::from_str(r#"{"key": "age", "op": ">=", "value": 65}"#).unwrap();
        assert_eq!(cond, Condition::new("age", ">=", 65));
        assert_eq!(cond.to_string(), "age >= 65");
    }
}
