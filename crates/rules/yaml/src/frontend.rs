use std::path::Path;

use cdss_rules::{Condition, Fact, FrontendError, Rule, RuleFrontend, Value};

use crate::parser::{YamlFactFile, YamlFacts, YamlRule, YamlRuleFile};

/// A [`RuleFrontend`] that decodes YAML fact and rule documents.
///
/// JSON is a subset of YAML, so `.json` documents are accepted as well.
pub struct YamlFrontend;

impl RuleFrontend for YamlFrontend {
    fn extensions(&self) -> &[&str] {
        &["yaml", "yml", "json"]
    }

    fn parse_rules(&self, content: &str) -> Result<Vec<Rule>, FrontendError> {
        let file: YamlRuleFile = serde_yaml_ng::from_str(content)
            .map_err(|e| FrontendError::Parse(format!("YAML parse error: {e}")))?;

        Ok(file.rules.into_iter().map(compile_rule).collect())
    }

    fn parse_facts(&self, content: &str) -> Result<Vec<Fact>, FrontendError> {
        let file: YamlFactFile = serde_yaml_ng::from_str(content)
            .map_err(|e| FrontendError::Parse(format!("YAML parse error: {e}")))?;

        compile_facts(file.facts)
    }

    fn parse_rules_file(&self, path: &Path) -> Result<Vec<Rule>, FrontendError> {
        let content = read(path)?;
        let file: YamlRuleFile = serde_yaml_ng::from_str(&content).map_err(|e| {
            FrontendError::Parse(format!("YAML parse error in {}: {e}", path.display()))
        })?;

        Ok(file.rules.into_iter().map(compile_rule).collect())
    }

    fn parse_facts_file(&self, path: &Path) -> Result<Vec<Fact>, FrontendError> {
        let content = read(path)?;
        let file: YamlFactFile = serde_yaml_ng::from_str(&content).map_err(|e| {
            FrontendError::Parse(format!("YAML parse error in {}: {e}", path.display()))
        })?;

        compile_facts(file.facts)
    }
}

fn read(path: &Path) -> Result<String, FrontendError> {
    std::fs::read_to_string(path)
        .map_err(|e| FrontendError::Parse(format!("cannot read {}: {e}", path.display())))
}

/// Compile a single `YamlRule` into a `Rule`.
fn compile_rule(yaml: YamlRule) -> Rule {
    let conditions = yaml
        .conditions
        .into_iter()
        .map(|c| Condition::new(c.key, c.op, Value::from_json(c.value)))
        .collect();

    Rule {
        id: yaml.id,
        description: yaml.description,
        conditions,
        conclusion: yaml.conclusion.unwrap_or_default(),
        priority: yaml.priority,
    }
}

/// Compile the `facts` section into a list of facts, keeping document order.
fn compile_facts(facts: Option<YamlFacts>) -> Result<Vec<Fact>, FrontendError> {
    match facts {
        None => Ok(Vec::new()),
        Some(YamlFacts::List(entries)) => Ok(entries
            .into_iter()
            .map(|entry| Fact::from_json(entry.key, entry.value))
            .collect()),
        Some(YamlFacts::Map(mapping)) => mapping
            .into_iter()
            .map(|(key, value)| {
                let serde_yaml_ng::Value::String(key) = key else {
                    return Err(FrontendError::Parse(format!(
                        "fact keys must be strings, got {key:?}"
                    )));
                };
                let value = serde_json::to_value(value).map_err(|e| {
                    FrontendError::Parse(format!("cannot convert fact '{key}': {e}"))
                })?;
                Ok(Fact::from_json(key, value))
            })
            .collect(),
    }
}
