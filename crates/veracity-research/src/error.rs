//! Error types for the Researcher

use thiserror::Error;
use veracity_domain::BudgetExhausted;

/// Errors that can occur during evidence research
#[derive(Error, Debug)]
pub enum ResearchError {
    /// Search capability error after retries were exhausted
    #[error("search error: {0}")]
    Search(String),

    /// Reliability lookup error
    #[error("reliability lookup error: {0}")]
    Reliability(String),

    /// External call budget exhausted before any evidence was found
    #[error(transparent)]
    Budget(#[from] BudgetExhausted),

    /// Search call timed out past the retry budget
    #[error("search timed out")]
    Timeout,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
