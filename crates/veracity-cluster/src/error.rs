//! Error types for the Clusterer

use thiserror::Error;

/// Errors that can occur during boundary clustering
#[derive(Error, Debug)]
pub enum ClusterError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
