pub mod evaluate;
pub mod validate;

use std::path::{Path, PathBuf};

use cdss_rules::{Fact, Rule, RuleFrontend};
use cdss_rules_yaml::YamlFrontend;
use clap::Args;

/// Input documents shared by every command.
#[derive(Args, Debug)]
pub struct Inputs {
    /// Fact document (YAML or JSON).
    #[arg(long)]
    pub facts: PathBuf,

    /// Rule document (YAML or JSON).
    #[arg(long)]
    pub rules: PathBuf,
}

impl Inputs {
    pub fn load(&self) -> anyhow::Result<(Vec<Fact>, Vec<Rule>)> {
        let frontend = YamlFrontend;
        ensure_handled(&frontend, &self.facts)?;
        ensure_handled(&frontend, &self.rules)?;

        let facts = frontend.parse_facts_file(&self.facts)?;
        let rules = frontend.parse_rules_file(&self.rules)?;
        tracing::debug!(
            facts_count = facts.len(),
            rules_count = rules.len(),
            "loaded input documents"
        );
        Ok((facts, rules))
    }
}

fn ensure_handled(frontend: &impl RuleFrontend, path: &Path) -> anyhow::Result<()> {
    if frontend.handles(path) {
        Ok(())
    } else {
        anyhow::bail!(
            "unsupported file type: {} (expected one of: {})",
            path.display(),
            frontend.extensions().join(", ")
        )
    }
}
