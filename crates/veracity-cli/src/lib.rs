//! Veracity CLI library.
//!
//! Argument parsing, capability selection, and output formatting for the
//! `veracity` binary. The pipeline itself lives in `veracity-pipeline`; this
//! crate only reads input, wires providers, and renders the result.

pub mod cli;
pub mod error;
pub mod output;
pub mod providers;

pub use cli::{AnalyzeArgs, Cli, CliFormat, Command, PresetArg};
pub use error::{CliError, Result};
pub use output::Formatter;
