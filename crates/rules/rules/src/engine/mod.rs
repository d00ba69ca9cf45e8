mod eval;
pub mod executor;
pub mod result;
pub mod trace;
pub mod value;

pub use executor::{RuleEngine, evaluate_rules};
pub use result::{EvaluationResult, ExplanationEntry, NO_MATCH_EXPLANATION, SatisfiedCondition};
