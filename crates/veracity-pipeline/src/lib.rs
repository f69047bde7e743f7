//! Veracity Pipeline - the five-stage claim assessment orchestrator
//!
//! Wires the stages together: extraction (with Gate 1), per-claim evidence
//! research, boundary clustering, debate-based verdict generation, and
//! aggregation (with Gate 4). Research and verdict generation run
//! concurrently across claims under a configured limit; extraction and
//! clustering are single-pass per job.
//!
//! The pipeline is a background batch job. It supports cooperative
//! cancellation and a hard external-call budget; both degrade the result to
//! whatever partial verdicts exist rather than failing the job.

#![warn(missing_docs)]

pub mod capabilities;
pub mod config;
pub mod error;
pub mod pipeline;

pub use capabilities::Capabilities;
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::Pipeline;
