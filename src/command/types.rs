use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::shared::response::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "spin_facts")]
#[command(about = "Build and check the hourly spin/purchase fact table", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $SPIN_FACTS_CONFIG, then ./config)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Recompute the fact table from both exports and replace the stored one
    Run(InputArgs),
    /// Check the stored table against the given exports without rewriting it
    Validate(InputArgs),
    /// Print the stored table
    Show(ShowArgs),
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct InputArgs {
    /// Spins export (JSON array or JSON lines)
    #[arg(long)]
    pub spins: PathBuf,

    /// Purchases export (JSON array or JSON lines)
    #[arg(long)]
    pub purchases: PathBuf,

    /// Store directory, overriding [store].dir
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub store: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Maximum number of rows to display (0 = unlimited)
    #[arg(short, long, default_value = "0")]
    pub limit: usize,
}
