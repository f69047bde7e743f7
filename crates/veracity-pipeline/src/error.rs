//! Error types for the pipeline

use thiserror::Error;
use veracity_aggregate::AggregateError;
use veracity_cluster::ClusterError;
use veracity_extractor::ExtractorError;
use veracity_verdict::VerdictError;

/// Errors that fail an analysis job outright
///
/// Per-claim failures never surface here; they degrade into warnings and
/// partial verdicts. Only extraction-level and configuration problems abort
/// a job.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Claim extraction failed
    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    /// Boundary clustering failed
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// Verdict generation setup failed
    #[error(transparent)]
    Verdict(#[from] VerdictError),

    /// Aggregation failed
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
