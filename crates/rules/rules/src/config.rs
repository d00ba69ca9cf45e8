use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ir::condition::Operator;

/// Immutable settings shared by the validators and the evaluator.
///
/// Deserializes with defaults for every missing field, so an empty TOML
/// document yields [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Operators rules may use. Defaults to every operator in [`Operator::ALL`].
    pub operators: BTreeSet<Operator>,
    /// Fact keys callers may not supply.
    pub reserved_keys: BTreeSet<String>,
    /// Fact keys that must be present for a fact collection to validate.
    pub required_facts: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            operators: Operator::ALL.into_iter().collect(),
            reserved_keys: BTreeSet::new(),
            required_facts: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Create a config with every operator enabled and no key restrictions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the supported operators to the given set.
    #[must_use]
    pub fn with_operators(mut self, operators: impl IntoIterator<Item = Operator>) -> Self {
        self.operators = operators.into_iter().collect();
        self
    }

    /// Reserve a fact key.
    #[must_use]
    pub fn with_reserved_key(mut self, key: impl Into<String>) -> Self {
        self.reserved_keys.insert(key.into());
        self
    }

    /// Require a fact key to be present.
    #[must_use]
    pub fn with_required_fact(mut self, key: impl Into<String>) -> Self {
        self.required_facts.push(key.into());
        self
    }

    /// Returns `true` if rules may use `op`.
    pub fn supports(&self, op: Operator) -> bool {
        self.operators.contains(&op)
    }

    /// Returns `true` if `key` is reserved.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys.contains(key)
    }
}
