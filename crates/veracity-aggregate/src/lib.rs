//! Veracity Aggregator - stage 5 of the assessment pipeline
//!
//! Rolls completed claim verdicts up into per-boundary assessments and one
//! overall assessment. Contribution weight combines claim role, verdict
//! confidence and a near-duplicate discount so one underlying fact phrased as
//! several claims cannot dominate. Gate 4 (the publication gate) downgrades
//! verdicts resting on thin, unreliable or contested evidence to `flagged` or
//! `insufficient_evidence` instead of hiding the weakness.
//!
//! Aggregation is a pure function of its inputs: re-running it over the same
//! verdicts always produces the same assessments.

#![warn(missing_docs)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod gate;
pub mod weight;

pub use aggregator::{validate_centrality, Aggregator};
pub use config::AggregatorConfig;
pub use error::AggregateError;
