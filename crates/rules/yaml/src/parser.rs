//! Serde shapes of the YAML documents.
//!
//! Fields that the validators check (conditions, conclusion) default to empty
//! so that a missing field is reported with a reason code and a rule id instead
//! of a parse error.

use cdss_rules::Conclusion;
use serde::Deserialize;

/// Top-level rule document: `rules: [...]`.
#[derive(Debug, Deserialize)]
pub(crate) struct YamlRuleFile {
    #[serde(default)]
    pub rules: Vec<YamlRule>,
}

/// A single rule entry.
#[derive(Debug, Deserialize)]
pub(crate) struct YamlRule {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub conditions: Vec<YamlCondition>,
    #[serde(default)]
    pub conclusion: Option<Conclusion>,
}

/// `{ key: age, op: ">=", value: 65 }`
#[derive(Debug, Deserialize)]
pub(crate) struct YamlCondition {
    pub key: String,
    #[serde(alias = "operator")]
    pub op: String,
    #[serde(alias = "expected", default)]
    pub value: serde_json::Value,
}

/// Top-level fact document: `facts: {...}` or `facts: [...]`.
#[derive(Debug, Deserialize)]
pub(crate) struct YamlFactFile {
    #[serde(default)]
    pub facts: Option<YamlFacts>,
}

/// Facts as a mapping (`age: 70`) or as a list of entries. The list form can
/// carry repeated keys, which the mapping form cannot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum YamlFacts {
    List(Vec<YamlFact>),
    Map(serde_yaml_ng::Mapping),
}

/// `{ key: age, value: 70 }`
#[derive(Debug, Deserialize)]
pub(crate) struct YamlFact {
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}
