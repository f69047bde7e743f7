//! Veracity Verdict Generator - stage 4 of the assessment pipeline
//!
//! Runs a three-role debate over one claim and its evidence: an advocate
//! proposes a truth percentage, a challenger argues the opposing direction
//! over the same evidence, and a reconciler produces the final verdict. Wide
//! disagreement loops challenge/reconcile up to a rounds budget and, if it
//! persists, multiplicatively discounts the final confidence instead of
//! hiding the instability.
//!
//! Claims marked insufficient by research never receive a numeric verdict;
//! provider and schema failures degrade to explicit low-confidence or failed
//! verdicts so the aggregator always has something to work with.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod generator;
pub mod position;
pub mod prompt;
pub mod state;

pub use config::VerdictConfig;
pub use error::VerdictError;
pub use generator::{DebateOutcome, VerdictGenerator};
pub use state::{Debate, DebateState};
