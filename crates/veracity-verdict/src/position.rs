//! Structured debate positions parsed from LLM output

use serde::{Deserialize, Serialize};

/// One role's position on a claim
///
/// Evidence is referenced by index into the numbered list shown in the
/// prompt; out-of-range indices are discarded during sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebatePosition {
    /// Proposed truth percentage [0, 100]
    pub truth_percentage: u8,

    /// Confidence in the proposal [0, 100]
    pub confidence: u8,

    /// Indices of evidence cited as supporting
    #[serde(default)]
    pub supporting_evidence: Vec<usize>,

    /// Indices of evidence cited as opposing
    #[serde(default)]
    pub opposing_evidence: Vec<usize>,

    /// The role's reasoning summary
    #[serde(default)]
    pub reasoning: String,
}

impl DebatePosition {
    /// Clamp scores and discard evidence indices outside the shown list
    pub fn sanitized(mut self, evidence_count: usize) -> Self {
        self.truth_percentage = self.truth_percentage.min(100);
        self.confidence = self.confidence.min(100);
        self.supporting_evidence.retain(|&i| i < evidence_count);
        self.opposing_evidence.retain(|&i| i < evidence_count);
        self.supporting_evidence.dedup();
        self.opposing_evidence.dedup();
        self
    }

    /// Absolute truth-percentage spread between two positions
    pub fn spread(&self, other: &DebatePosition) -> u8 {
        self.truth_percentage.abs_diff(other.truth_percentage)
    }
}

/// JSON schema description sent alongside every debate prompt
pub fn position_schema() -> &'static str {
    r#"{"truth_percentage": "integer 0-100", "confidence": "integer 0-100", "supporting_evidence": "[evidence index, ...]", "opposing_evidence": "[evidence index, ...]", "reasoning": "string"}"#
}
