//! Veracity Extractor - stage 1 of the assessment pipeline
//!
//! Decomposes normalized input text into atomic, independently verifiable
//! claims and applies Gate 1 (claim validation): claims that are primarily
//! opinion, future predictions, or lack concrete specificity are retained for
//! transparency but flagged `passed_gate1 = false` and excluded from the
//! research and verdict stages.
//!
//! Question-form inputs are canonicalized to statements before extraction so
//! downstream clustering and verdicts are invariant to input phrasing.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod normalize;
pub mod prompt;
pub mod types;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use gate::Gate1Outcome;
pub use types::Extraction;
