//! Claim verdicts and derived assessments

use crate::ids::{BoundaryId, ClaimId, EvidenceId};
use crate::score::{Score, SevenPointLabel};
use serde::{Deserialize, Serialize};

/// Terminal state of a claim's verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    /// The debate produced a numeric truth percentage
    Scored,
    /// Too little evidence to score; no percentage is emitted
    InsufficientEvidence,
    /// Provider failures exhausted the retry budget; excluded from aggregation
    Failed,
}

/// The debate-produced verdict for one claim
///
/// Produced once by the verdict stage and never revised except by an explicit
/// re-debate round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    /// The assessed claim
    pub claim_id: ClaimId,

    /// Terminal state
    pub status: VerdictStatus,

    /// Truth percentage; `None` when status is not [`VerdictStatus::Scored`]
    pub truth_percentage: Option<Score>,

    /// Confidence in the truth percentage
    pub confidence: Score,

    /// Evidence cited as supporting
    pub supporting_evidence_ids: Vec<EvidenceId>,

    /// Evidence cited as opposing
    pub opposing_evidence_ids: Vec<EvidenceId>,

    /// Debate rounds consumed (advocate + each challenge/reconcile pass)
    pub debate_rounds_used: u32,

    /// Reconciler's reasoning summary
    pub reasoning: String,
}

impl ClaimVerdict {
    /// A verdict for a claim whose evidence fell below the minimum
    pub fn insufficient_evidence(claim_id: ClaimId) -> Self {
        Self {
            claim_id,
            status: VerdictStatus::InsufficientEvidence,
            truth_percentage: None,
            confidence: Score::MIN,
            supporting_evidence_ids: Vec::new(),
            opposing_evidence_ids: Vec::new(),
            debate_rounds_used: 0,
            reasoning: "insufficient evidence to assess".to_string(),
        }
    }

    /// A verdict for a claim whose external calls failed past the retry budget
    pub fn failed(claim_id: ClaimId, reason: impl Into<String>) -> Self {
        Self {
            claim_id,
            status: VerdictStatus::Failed,
            truth_percentage: None,
            confidence: Score::MIN,
            supporting_evidence_ids: Vec::new(),
            opposing_evidence_ids: Vec::new(),
            debate_rounds_used: 0,
            reasoning: reason.into(),
        }
    }

    /// Whether the verdict carries a usable numeric score
    pub fn is_scored(&self) -> bool {
        self.status == VerdictStatus::Scored && self.truth_percentage.is_some()
    }

    /// Seven-point label, when scored
    pub fn label(&self) -> Option<SevenPointLabel> {
        self.truth_percentage.map(SevenPointLabel::from_score)
    }
}

/// Result of the publication quality gate (Gate 4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGateStatus {
    /// Verdict rests on enough agreeing, reliable evidence
    Publishable,
    /// Published with an explicit low-confidence banner
    Flagged,
    /// No percentage is emitted
    InsufficientEvidence,
}

/// Derived assessment for one analysis boundary
///
/// Recomputed whenever any contributing verdict changes; a pure function of
/// the verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryAssessment {
    /// The assessed boundary
    pub boundary_id: BoundaryId,

    /// Weighted truth percentage; `None` under insufficient evidence
    pub truth_percentage: Option<Score>,

    /// Aggregate confidence
    pub confidence: Score,

    /// Quality gate outcome for this boundary
    pub quality_gate: QualityGateStatus,

    /// Claims that contributed weight to the score
    pub contributing_claim_ids: Vec<ClaimId>,
}

impl BoundaryAssessment {
    /// Seven-point label, when a percentage was emitted
    pub fn label(&self) -> Option<SevenPointLabel> {
        self.truth_percentage.map(SevenPointLabel::from_score)
    }
}

/// The single top-level assessment for the whole input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// Weighted truth percentage across boundaries; `None` under insufficient
    /// evidence
    pub truth_percentage: Option<Score>,

    /// Aggregate confidence
    pub confidence: Score,

    /// Seven-point label derived from the truth percentage
    pub seven_point_label: Option<SevenPointLabel>,

    /// Publication gate outcome
    pub quality_gate_status: QualityGateStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_evidence_verdict_has_no_score() {
        let v = ClaimVerdict::insufficient_evidence(ClaimId::new());
        assert_eq!(v.status, VerdictStatus::InsufficientEvidence);
        assert!(v.truth_percentage.is_none());
        assert_eq!(v.confidence, Score::MIN);
        assert!(!v.is_scored());
    }

    #[test]
    fn test_failed_verdict_records_reason() {
        let v = ClaimVerdict::failed(ClaimId::new(), "provider timeout");
        assert_eq!(v.status, VerdictStatus::Failed);
        assert!(v.reasoning.contains("timeout"));
        assert!(!v.is_scored());
    }

    #[test]
    fn test_label_follows_truth_percentage() {
        let mut v = ClaimVerdict::insufficient_evidence(ClaimId::new());
        v.status = VerdictStatus::Scored;
        v.truth_percentage = Some(Score::new(90));
        assert_eq!(v.label(), Some(SevenPointLabel::True));
    }
}
