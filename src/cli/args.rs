//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{completions::CompletionsArgs, rollup::RollupArgs};

#[derive(Parser)]
#[command(name = "stockroll")]
#[command(author, version, about = "Raw-stock rollup for manufacturing quotes")]
#[command(
    long_about = "Walks a quote's part/routing/material hierarchy on the quoting service and totals the raw stock needed per material shape and size class."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Roll up raw-stock totals for one quote
    Rollup(RollupArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report with a totals table
    #[default]
    Table,
    /// JSON report (for programming)
    Json,
}
