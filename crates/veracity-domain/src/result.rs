//! The result contract exposed to callers of the pipeline

use crate::boundary::AnalysisBoundary;
use crate::claim::AtomicClaim;
use crate::evidence::{EvidenceItem, EvidenceLink, Source};
use crate::verdict::{BoundaryAssessment, ClaimVerdict, OverallAssessment};
use serde::{Deserialize, Serialize};

/// Pipeline stage a warning originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningStage {
    /// Claim extraction / Gate 1
    Extraction,
    /// Evidence research
    Research,
    /// Boundary clustering
    Clustering,
    /// Debate / verdict generation
    Verdict,
    /// Aggregation / Gate 4
    Aggregation,
}

/// A degraded-path event recorded for transparency
///
/// Exclusions and fallbacks must be visible in the result, never silently
/// upgraded into a clean verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    /// Stage that recorded the warning
    pub stage: WarningStage,

    /// What happened
    pub message: String,
}

impl AnalysisWarning {
    /// Create a warning
    pub fn new(stage: WarningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// The full structured result of one analysis job
///
/// Contains every entity the pipeline produced; the seven-point label is
/// always derivable from `truth_percentage` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// All extracted claims, including those that failed Gate 1
    pub claims: Vec<AtomicClaim>,

    /// All retrieved evidence items
    pub evidence: Vec<EvidenceItem>,

    /// Claim-evidence associations
    pub evidence_links: Vec<EvidenceLink>,

    /// Sources evidence was retrieved from
    pub sources: Vec<Source>,

    /// Analysis boundaries
    pub boundaries: Vec<AnalysisBoundary>,

    /// Per-claim verdicts
    pub verdicts: Vec<ClaimVerdict>,

    /// Per-boundary assessments
    pub boundary_assessments: Vec<BoundaryAssessment>,

    /// The overall assessment
    pub overall: OverallAssessment,

    /// Degraded-path events recorded during the job
    pub warnings: Vec<AnalysisWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::Score;
    use crate::verdict::QualityGateStatus;

    #[test]
    fn test_result_serializes() {
        let result = AnalysisResult {
            claims: Vec::new(),
            evidence: Vec::new(),
            evidence_links: Vec::new(),
            sources: Vec::new(),
            boundaries: Vec::new(),
            verdicts: Vec::new(),
            boundary_assessments: Vec::new(),
            overall: OverallAssessment {
                truth_percentage: Some(Score::new(50)),
                confidence: Score::new(10),
                seven_point_label: Some(crate::SevenPointLabel::Unverified),
                quality_gate_status: QualityGateStatus::Flagged,
            },
            warnings: vec![AnalysisWarning::new(
                WarningStage::Research,
                "claim excluded after provider failures",
            )],
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"quality_gate_status\":\"flagged\""));
        assert!(json.contains("UNVERIFIED"));

        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
