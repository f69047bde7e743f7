//! Evidence items, sources and claim-evidence links
//!
//! Evidence is created by the research stage and never mutated afterwards.
//! Claims and evidence are many-to-many via [`EvidenceLink`].

use crate::ids::{ClaimId, EvidenceId, SourceId};
use serde::{Deserialize, Serialize};

/// Category of an evidence statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    /// Direct factual reporting of the claimed matter
    DirectEvidence,
    /// Statute, regulation or court ruling text
    LegalProvision,
    /// Quoted statement from a named expert
    ExpertQuote,
    /// Numeric or statistical finding
    Statistic,
    /// Description of an event
    Event,
    /// Published criticism or rebuttal
    Criticism,
}

impl EvidenceCategory {
    /// All categories, in a fixed order (used for similarity histograms)
    pub const ALL: [EvidenceCategory; 6] = [
        EvidenceCategory::DirectEvidence,
        EvidenceCategory::LegalProvision,
        EvidenceCategory::ExpertQuote,
        EvidenceCategory::Statistic,
        EvidenceCategory::Event,
        EvidenceCategory::Criticism,
    ];

    /// Get the canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceCategory::DirectEvidence => "direct_evidence",
            EvidenceCategory::LegalProvision => "legal_provision",
            EvidenceCategory::ExpertQuote => "expert_quote",
            EvidenceCategory::Statistic => "statistic",
            EvidenceCategory::Event => "event",
            EvidenceCategory::Criticism => "criticism",
        }
    }

    /// Index into [`EvidenceCategory::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }
}

/// Stance of an evidence item toward the claim it is linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    /// Evidence supports the claim as phrased
    Supporting,
    /// Evidence contradicts the claim as phrased
    Opposing,
    /// Evidence is relevant but does not take a side
    Neutral,
}

/// A retrieved evidence statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Unique identifier
    pub id: EvidenceId,

    /// The extracted statement text
    pub statement: String,

    /// Category of the statement
    pub category: EvidenceCategory,

    /// Source the statement was retrieved from
    pub source_id: SourceId,

    /// Stance toward the researched claim
    pub stance: Stance,

    /// How much the item should count toward a verdict, [0.0, 1.0]
    ///
    /// Combines source reliability with category weight; derivative items are
    /// discounted.
    pub probative_value: f64,

    /// True if this is a syndicated/copied restatement of another retrieved
    /// source
    pub is_derivative: bool,

    /// Unix seconds when the item was retrieved
    pub retrieved_at: u64,
}

/// A source of evidence (publication, site, document)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    /// Unique identifier
    pub id: SourceId,

    /// Canonical URL
    pub url: String,

    /// Reliability score [0.0, 1.0] from the external reliability service
    pub reliability_score: f64,

    /// Source type (e.g. "news", "government", "blog")
    pub source_type: String,
}

/// A claim-evidence association with stance
///
/// Evidence is many-to-many with claims; the same item can support one claim
/// and oppose another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceLink {
    /// The linked claim
    pub claim_id: ClaimId,

    /// The linked evidence item
    pub evidence_id: EvidenceId,

    /// Stance of the evidence toward this specific claim
    pub stance: Stance,
}
