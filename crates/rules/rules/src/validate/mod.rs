//! Structural and type validation of facts and rules.
//!
//! Both validators are pure. The fail-fast entry points return the first
//! violation; the `_all` variants return every violation for diagnostic UIs.

mod facts;
mod rules;

pub use facts::{ValidatedFacts, validate_facts, validate_facts_all};
pub use rules::{
    CompiledCondition, CompiledRule, ValidatedRules, validate_rules, validate_rules_all,
};
