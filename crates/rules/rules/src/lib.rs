//! Clinical rule evaluation: fact and rule validation, single-pass rule
//! matching, and deterministic explanations of why each rule fired.
//!
//! ```
//! use cdss_rules::{Condition, EngineConfig, Fact, Rule, evaluate_rules, validate_facts, validate_rules};
//!
//! let config = EngineConfig::default();
//! let facts = validate_facts(&[Fact::new("age", 70), Fact::new("has_diabetes", true)], &config)?;
//! let rules = validate_rules(
//!     &[Rule::new(
//!         "R1",
//!         vec![
//!             Condition::new("age", ">=", 65),
//!             Condition::new("has_diabetes", "==", true),
//!         ],
//!         "screen for retinopathy",
//!     )],
//!     &config,
//! )?;
//!
//! let result = evaluate_rules(&facts, &rules);
//! assert_eq!(result.fired_rules(), ["R1".to_owned()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod ir;
pub mod validate;

pub use config::EngineConfig;
pub use engine::trace::{ConditionFailure, RuleTraceEntry, RuleTraceResult};
pub use engine::value::{Value, ValueKind};
pub use engine::{
    EvaluationResult, ExplanationEntry, NO_MATCH_EXPLANATION, RuleEngine, SatisfiedCondition,
    evaluate_rules,
};
pub use error::{EngineError, FactError, FactErrorKind, FrontendError, RuleError, RuleErrorKind};
pub use frontend::RuleFrontend;
pub use ir::condition::{Condition, Operator};
pub use ir::fact::{Fact, facts_from_json};
pub use ir::rule::{Conclusion, Rule};
pub use validate::{
    CompiledCondition, CompiledRule, ValidatedFacts, ValidatedRules, validate_facts,
    validate_facts_all, validate_rules, validate_rules_all,
};
