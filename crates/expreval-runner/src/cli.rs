use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "expreval-runner")]
#[command(about = "Compile boolean expressions and evaluate them against JSON documents")]
pub struct Cli {
    /// Runner configuration file (YAML or JSON).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Expression store file; overrides `store.path` from the configuration.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Print the serialized tree of an expression.
    Parse(ParseCommand),
    /// Evaluate an expression once, without storing it.
    Check(CheckCommand),
    /// Compile and store an expression under a name.
    Save(SaveCommand),
    /// Evaluate a stored expression.
    Evaluate(EvaluateCommand),
    /// List stored expressions.
    List,
    /// Delete a stored expression.
    Remove(RemoveCommand),
}

#[derive(Debug, Clone, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
#[group(required = true, multiple = false)]
pub struct DocumentArgs {
    /// JSON document file, or `-` for stdin.
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Inline JSON document.
    #[arg(long)]
    pub json: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ParseCommand {
    #[arg(long)]
    pub expr: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct CheckCommand {
    #[arg(long)]
    pub expr: String,
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SaveCommand {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub value: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct EvaluateCommand {
    #[arg(long)]
    pub id: u64,
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RemoveCommand {
    #[arg(long)]
    pub id: u64,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
