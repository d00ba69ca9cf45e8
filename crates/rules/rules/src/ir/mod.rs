pub mod condition;
pub mod fact;
pub mod rule;
