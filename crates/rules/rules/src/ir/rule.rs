use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// What a rule concludes when it fires.
///
/// Either free text (`"screen for retinopathy"`) or a structured
/// recommendation payload such as `{"alert": "possible_hypertension"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Conclusion {
    /// A plain-text finding or action.
    Text(String),
    /// A structured recommendation payload.
    Recommendation(serde_json::Map<String, serde_json::Value>),
}

impl Conclusion {
    /// Returns `true` for blank text or an empty payload.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Recommendation(payload) => payload.is_empty(),
        }
    }
}

impl Default for Conclusion {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            // Map keys are sorted, so the rendering is stable.
            Self::Recommendation(payload) => {
                let json = serde_json::Value::Object(payload.clone());
                write!(f, "{json}")
            }
        }
    }
}

impl From<&str> for Conclusion {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Conclusion {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Conclusion {
    fn from(payload: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Recommendation(payload)
    }
}

/// A named set of AND-combined conditions plus a conclusion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule identifier.
    pub id: String,
    /// Optional human-readable purpose of the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Conditions that must all hold for the rule to fire.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// The finding or action reported when the rule fires.
    #[serde(default)]
    pub conclusion: Conclusion,
    /// Ordering hint for firing reports. Higher values are reported first;
    /// `None` ranks as `0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl Rule {
    /// Create a new rule with the given id, conditions, and conclusion.
    ///
    /// Defaults to no priority and no description.
    pub fn new(
        id: impl Into<String>,
        conditions: Vec<Condition>,
        conclusion: impl Into<Conclusion>,
    ) -> Self {
        Self {
            id: id.into(),
            description: None,
            conditions,
            conclusion: conclusion.into(),
            priority: None,
        }
    }

    /// Set the priority of this rule.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the description of this rule.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a condition to this rule.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_construction() {
        let rule = Rule::new(
            "retinopathy-screen",
            vec![Condition::new("age", ">=", 65)],
            "screen for retinopathy",
        )
        .with_condition(Condition::new("has_diabetes", "==", true))
        .with_priority(10)
        .with_description("Annual eye exam for older diabetics");

        assert_eq!(rule.id, "retinopathy-screen");
        assert_eq!(rule.conditions.len(), 2);
        assert_eq!(rule.priority, Some(10));
        assert_eq!(
            rule.description.as_deref(),
            Some("Annual eye exam for older diabetics")
        );
    }

    #[test]
    fn conclusion_emptiness() {
        assert!(Conclusion::from("").is_empty());
        assert!(Conclusion::from("   ").is_empty());
        assert!(!Conclusion::from("refer").is_empty());
        assert!(Conclusion::Recommendation(serde_json::Map::new()).is_empty());
    }

    #[test]
    fn structured_conclusion_displays_sorted_json() {
        let serde_json::Value::Object(payload) =
            serde_json::json!({"priority": "medium", "alert": "possible_hypertension"})
        else {
            panic!("expected object");
        };
        let conclusion = Conclusion::from(payload);
        assert_eq!(
            conclusion.to_string(),
            r#"{"alert":"possible_hypertension","priority":"medium"}"#
        );
    }

    #[test]
    fn rule_deserializes_with_defaults() {
        let rule: Rule = serde_json::from_str(r#"{"id": "R1"}"#).unwrap();
        assert_eq!(rule.id, "R1");
        assert!(rule.conditions.is_empty());
        assert!(rule.conclusion.is_empty());
        assert!(rule.priority.is_none());
    }

    #[test]
    fn rule_serde_accepts_structured_conclusion() {
        let rule: Rule = serde_json::from_str(
            r#"{
                "id": "bp_high",
                "conditions": [{"key": "systolic_bp", "operator": ">=", "expected": 140}],
                "conclusion": {"alert": "high_bp"}
            }"#,
        )
        .unwrap();
        assert!(matches!(rule.conclusion, Conclusion::Recommendation(_)));
    }
}
