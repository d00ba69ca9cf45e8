use std::fmt::Write as _;

use cdss_rules::{EngineConfig, EvaluationResult, RuleEngine};
use clap::Args;

use super::Inputs;
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub inputs: Inputs,

    /// Also print the per-rule trace, including rules that did not fire.
    #[arg(long)]
    pub trace: bool,
}

pub fn run(config: EngineConfig, args: &EvaluateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let (facts, rules) = args.inputs.load()?;
    let engine = RuleEngine::new(config);

    let result = match engine.run(&facts, &rules) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Validation failed: {e}");
            std::process::exit(1);
        }
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Text => println!("{}", render_text(&result, args.trace)),
    }
    Ok(())
}

pub fn render_text(result: &EvaluationResult, trace: bool) -> String {
    let mut out = format!("{} rule(s) fired.\n", result.fired_rules().len());
    for (id, conclusion) in result.fired_rules().iter().zip(result.conclusions()) {
        let _ = writeln!(out, "  {id}: {conclusion}");
    }
    let _ = write!(out, "\n{}", result.explanation_text());

    if trace {
        out.push_str("\n\nTrace:");
        for entry in result.trace() {
            let _ = write!(
                out,
                "\n  [{result}] {id} (priority {priority})",
                result = entry.result.as_str(),
                id = entry.rule_id,
                priority = entry.priority.unwrap_or(0),
            );
            if let (Some(condition), Some(failure)) =
                (&entry.failed_condition_display, entry.failure)
            {
                let _ = write!(out, " at {condition}: {}", failure.as_str());
            }
        }
    }
    out
}
