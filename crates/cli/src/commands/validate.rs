use cdss_rules::{
    EngineConfig, Fact, FactError, Rule, RuleError, validate_facts, validate_facts_all,
    validate_rules, validate_rules_all,
};
use clap::Args;
use serde::Serialize;

use super::Inputs;
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Report every violation instead of stopping at the first.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub valid: bool,
    pub facts_count: usize,
    pub rules_count: usize,
    pub fact_errors: Vec<FactError>,
    pub rule_errors: Vec<RuleError>,
}

/// Validate facts and rules independently. Without `all`, each side reports
/// at most its first violation.
pub fn build_report(facts: &[Fact], rules: &[Rule], config: &EngineConfig, all: bool) -> Report {
    let (fact_errors, rule_errors) = if all {
        (
            validate_facts_all(facts, config).err().unwrap_or_default(),
            validate_rules_all(rules, config).err().unwrap_or_default(),
        )
    } else {
        (
            validate_facts(facts, config).err().into_iter().collect(),
            validate_rules(rules, config).err().into_iter().collect(),
        )
    };

    Report {
        valid: fact_errors.is_empty() && rule_errors.is_empty(),
        facts_count: facts.len(),
        rules_count: rules.len(),
        fact_errors,
        rule_errors,
    }
}

pub fn render_text(report: &Report) -> String {
    let mut lines = Vec::new();
    if report.valid {
        lines.push(format!(
            "OK: {} fact(s), {} rule(s).",
            report.facts_count, report.rules_count
        ));
    }
    for e in &report.fact_errors {
        lines.push(format!("  [{}] {e}", e.reason.as_str()));
    }
    for e in &report.rule_errors {
        lines.push(format!("  [{}] {e}", e.reason.as_str()));
    }
    lines.join("\n")
}

pub fn run(config: &EngineConfig, args: &ValidateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (facts, rules) = args.inputs.load()?;
    let report = build_report(&facts, &rules, config, args.all);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => println!("{}", render_text(&report)),
    }

    if !report.valid {
        std::process::exit(1);
    }
    Ok(())
}
