//! Veracity Researcher - stage 2 of the assessment pipeline
//!
//! For each claim that passed Gate 1, iteratively issues search queries
//! (always including at least one contrarian query that seeks contradicting
//! evidence), extracts and classifies evidence statements, deduplicates
//! near-identical items, flags syndicated copies as derivative, and stops on
//! a marginal-gain rule or the iteration/call budget.
//!
//! A claim ending with fewer than the minimum evidence count is marked
//! `insufficient_evidence` and is barred from a confident verdict downstream.

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod dedup;
pub mod error;
pub mod queries;
pub mod researcher;
pub mod types;

pub use config::ResearchConfig;
pub use error::ResearchError;
pub use researcher::Researcher;
pub use types::ClaimResearch;
