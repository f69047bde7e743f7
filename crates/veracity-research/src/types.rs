//! Research output types

use veracity_domain::{
    AnalysisWarning, ClaimId, EvidenceItem, EvidenceLink, Source,
};

/// Everything research produced for one claim
///
/// The claim itself is never mutated; insufficiency is carried here and the
/// verdict stage reads it.
#[derive(Debug, Clone)]
pub struct ClaimResearch {
    /// The claim this research belongs to
    pub claim_id: ClaimId,

    /// Retrieved evidence items, deduplicated
    pub evidence: Vec<EvidenceItem>,

    /// Claim-evidence links with per-claim stance
    pub links: Vec<EvidenceLink>,

    /// Sources the evidence came from (unique per claim)
    pub sources: Vec<Source>,

    /// True when fewer unique items than the configured minimum were found
    pub insufficient_evidence: bool,

    /// Number of search queries issued
    pub queries_issued: u32,

    /// Non-fatal problems encountered while researching
    pub warnings: Vec<AnalysisWarning>,
}

impl ClaimResearch {
    /// Count of supporting links
    pub fn supporting_count(&self) -> usize {
        self.links
            .iter()
            .filter(|l| l.stance == veracity_domain::Stance::Supporting)
            .count()
    }

    /// Count of opposing links
    pub fn opposing_count(&self) -> usize {
        self.links
            .iter()
            .filter(|l| l.stance == veracity_domain::Stance::Opposing)
            .count()
    }
}
