//! cdss CLI
//!
//! Validates fact and rule documents and evaluates them with the clinical
//! rule engine.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// cdss: validate and evaluate clinical decision rules.
#[derive(Parser, Debug)]
#[command(name = "cdss", version, about)]
struct Cli {
    /// Engine configuration file (TOML).
    #[arg(long, env = "CDSS_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate facts and rules, then evaluate the rules.
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Validate facts and rules without evaluating.
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine_config = config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Evaluate(args) => commands::evaluate::run(engine_config, &args, &cli.format),
        Command::Validate(args) => commands::validate::run(&engine_config, &args, &cli.format),
    }
}
