//! Veracity Domain Layer
//!
//! This crate contains the core data model for the claim-assessment pipeline.
//! It defines the entities that flow between the five stages (extraction,
//! research, clustering, verdict generation, aggregation) and the capability
//! traits the pipeline consumes from the outside world.
//!
//! ## Key Concepts
//!
//! - **AtomicClaim**: a single independently verifiable assertion, tagged by
//!   the Gate 1 validation check
//! - **EvidenceItem**: an extracted evidence statement with stance and
//!   derivative tracking
//! - **AnalysisBoundary**: a distinct analytical context claims are grouped
//!   into (event, methodology, timeframe)
//! - **ClaimVerdict**: the debate-produced truth percentage and confidence
//!   for one claim
//! - **Score / SevenPointLabel**: calibrated 0-100 truth scale and its
//!   seven-point rendering
//!
//! ## Architecture
//!
//! Entities are created once per analysis job by the stage that owns them and
//! are immutable afterwards; boundary and overall assessments are pure
//! recomputations over immutable claim verdicts. Capability implementations
//! (LLM completion, search, reliability lookup) live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod claim;
pub mod evidence;
pub mod ids;
pub mod job;
pub mod result;
pub mod score;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use boundary::AnalysisBoundary;
pub use claim::{AtomicClaim, ClaimRole};
pub use evidence::{EvidenceCategory, EvidenceItem, EvidenceLink, Source, Stance};
pub use ids::{BoundaryId, ClaimId, EvidenceId, SourceId};
pub use job::{BudgetExhausted, BudgetTracker, CancelToken};
pub use result::{AnalysisResult, AnalysisWarning, WarningStage};
pub use score::{Score, SevenPointLabel};
pub use traits::{
    CapabilityError, CompletionCapability, DateScope, ReliabilityLookup, SearchCapability,
    SearchHit, SearchQuery, SourceReliability,
};
pub use verdict::{
    BoundaryAssessment, ClaimVerdict, OverallAssessment, QualityGateStatus, VerdictStatus,
};
