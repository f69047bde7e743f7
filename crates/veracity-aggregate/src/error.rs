//! Error types for the Aggregator

use thiserror::Error;

/// Errors that can occur during aggregation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregateError {
    /// Extraction marked an implausibly large share of claims as central
    #[error("centrality violation: {central} of {total} claims marked central (limit {limit})")]
    CentralityViolation {
        /// Claims marked central
        central: usize,
        /// Total claims considered
        total: usize,
        /// The effective limit that was exceeded
        limit: usize,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
