//! Error types for the Verdict Generator
//!
//! Runtime problems (provider failures, timeouts, budget exhaustion,
//! cancellation) never surface as errors here; the generator degrades them
//! into explicit verdict statuses. Only configuration problems fail.

use thiserror::Error;

/// Errors that can occur setting up verdict generation
#[derive(Error, Debug)]
pub enum VerdictError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
