use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::value::Value;
use crate::error::{FactError, FactErrorKind};
use crate::ir::fact::Fact;

/// A fact collection that passed validation, indexed by key.
///
/// Only constructible through [`validate_facts`] or [`validate_facts_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFacts {
    facts: Vec<Fact>,
    index: HashMap<String, usize>,
}

impl ValidatedFacts {
    /// The facts in input order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Look up a fact value by key in constant time.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.facts[i].value)
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Returns `true` if there are no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterate over the facts in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.facts.iter()
    }
}

/// Validate a fact collection, failing on the first violation.
///
/// Checks run in this order: key non-empty and unique, value type supported,
/// key not reserved, required keys present.
pub fn validate_facts(facts: &[Fact], config: &EngineConfig) -> Result<ValidatedFacts, FactError> {
    match check(facts, config, true).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(accept(facts)),
    }
}

/// Validate a fact collection, reporting every violation.
pub fn validate_facts_all(
    facts: &[Fact],
    config: &EngineConfig,
) -> Result<ValidatedFacts, Vec<FactError>> {
    let errors = check(facts, config, false);
    if errors.is_empty() {
        Ok(accept(facts))
    } else {
        Err(errors)
    }
}

fn accept(facts: &[Fact]) -> ValidatedFacts {
    debug!(facts_count = facts.len(), "facts validated");
    // Keys are unique once validation passed.
    let index = facts
        .iter()
        .enumerate()
        .map(|(i, fact)| (fact.key.clone(), i))
        .collect();
    ValidatedFacts {
        facts: facts.to_vec(),
        index,
    }
}

fn check(facts: &[Fact], config: &EngineConfig, fail_fast: bool) -> Vec<FactError> {
    let mut errors = Vec::new();
    let mut report = |err: FactError| {
        debug!(key = %err.key, reason = err.reason.as_str(), "fact rejected");
        errors.push(err);
        fail_fast
    };

    let mut seen: HashSet<&str> = HashSet::with_capacity(facts.len());
    for fact in facts {
        let violation = if fact.key.trim().is_empty() {
            Some(FactErrorKind::EmptyKey)
        } else if !seen.insert(fact.key.as_str()) {
            Some(FactErrorKind::DuplicateKey)
        } else {
            None
        };
        if let Some(reason) = violation
            && report(FactError::new(&fact.key, reason))
        {
            return errors;
        }
    }

    for fact in facts {
        if !fact.value.is_scalar()
            && report(FactError::new(&fact.key, FactErrorKind::UnsupportedType))
        {
            return errors;
        }
    }

    for fact in facts {
        if config.is_reserved(&fact.key)
            && report(FactError::new(&fact.key, FactErrorKind::ReservedKey))
        {
            return errors;
        }
    }

    for required in &config.required_facts {
        if !seen.contains(required.as_str())
            && report(FactError::new(required, FactErrorKind::MissingRequired))
        {
            return errors;
        }
    }

    errors
}
