//! Veracity Boundary Clusterer - stage 3 of the assessment pipeline
//!
//! Groups claims into analysis boundaries (distinct contexts such as
//! different events, methodologies or timeframes) using dimensions that are
//! grounded in retrieved evidence, not surface text similarity. Claims with
//! no distinguishing signal land in a single default boundary. A configured
//! cap on boundary count is enforced by merging the closest boundaries by
//! evidence-category similarity; claims are never dropped.

#![warn(missing_docs)]

pub mod clusterer;
pub mod config;
pub mod error;
pub mod signature;

pub use clusterer::{Clusterer, Clustering};
pub use config::ClusterConfig;
pub use error::ClusterError;
