//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Veracity CLI - Assess the factual claims in a text.
#[derive(Debug, Parser)]
#[command(name = "veracity")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "text")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable report (default)
    Text,
    /// Full structured result as JSON
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the claim-assessment pipeline over a text
    Analyze(AnalyzeArgs),

    /// Print the default configuration as TOML
    DefaultConfig,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Input file path, or "-" to read from stdin
    pub input: String,

    /// Configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Configuration preset
    #[arg(long, value_enum, conflicts_with = "config")]
    pub preset: Option<PresetArg>,

    /// Ollama endpoint; omit for deterministic offline mode
    #[arg(long, env = "VERACITY_OLLAMA_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Model served by the completion endpoint
    #[arg(long, default_value = "llama3")]
    pub model: String,

    /// HTTP JSON search endpoint; omit for offline mode
    #[arg(long, env = "VERACITY_SEARCH_ENDPOINT")]
    pub search_endpoint: Option<String>,
}

/// Configuration preset argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Fewer iterations and debate rounds
    Fast,
    /// More evidence and debate before settling
    Thorough,
}
