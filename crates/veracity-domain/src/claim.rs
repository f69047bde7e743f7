//! Atomic claims - the unit of assessment
//!
//! A claim is a single independently verifiable assertion extracted from the
//! input text. Claims are immutable after extraction; the only later addition
//! is the boundary assignment recorded by the clustering stage.

use crate::ids::{BoundaryId, ClaimId};
use serde::{Deserialize, Serialize};

/// Structural role of a claim within the input
///
/// Attribution, source and timing claims describe who-said-it rather than
/// what-is-true; they are excluded from being treated as central downstream
/// and carry near-zero aggregation weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimRole {
    /// A substantive factual assertion
    Core,
    /// Who said or reported something
    Attribution,
    /// Where a statement originated
    Source,
    /// When something was said or happened
    Timing,
}

impl ClaimRole {
    /// Parse from the snake_case string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "core" => Some(ClaimRole::Core),
            "attribution" => Some(ClaimRole::Attribution),
            "source" => Some(ClaimRole::Source),
            "timing" => Some(ClaimRole::Timing),
            _ => None,
        }
    }

    /// Get the canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimRole::Core => "core",
            ClaimRole::Attribution => "attribution",
            ClaimRole::Source => "source",
            ClaimRole::Timing => "timing",
        }
    }

    /// Whether this role may carry the central-claim marker
    pub fn may_be_central(&self) -> bool {
        matches!(self, ClaimRole::Core)
    }
}

/// An atomic claim extracted from the input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicClaim {
    /// Unique identifier
    pub id: ClaimId,

    /// The verifiable assertion, phrased as a canonical statement
    pub text: String,

    /// Structural role within the input
    pub role: ClaimRole,

    /// How concrete the claim is (names, numbers, dates, locations), [0.0, 1.0]
    pub specificity_score: f64,

    /// How much hedging/opinion language the claim carries, [0.0, 1.0]
    pub opinion_score: f64,

    /// Whether the claim passed Gate 1 (claim validation)
    ///
    /// Failed claims are retained for transparency but excluded from the
    /// research and verdict stages.
    pub passed_gate1: bool,

    /// Whether extraction marked this claim as central to the input
    pub central: bool,

    /// Whether the claim is sensitive to recency (date-scoped research)
    pub recency_sensitive: bool,

    /// Boundary assignment, added by the clustering stage
    ///
    /// `None` only before clustering has run; an unassigned claim after
    /// clustering is an invariant violation.
    pub boundary_id: Option<BoundaryId>,
}

impl AtomicClaim {
    /// Whether this claim should proceed to research and verdict generation
    pub fn is_assessable(&self) -> bool {
        self.passed_gate1
    }

    /// Return a copy with the boundary assignment recorded
    pub fn with_boundary(&self, boundary_id: BoundaryId) -> Self {
        Self {
            boundary_id: Some(boundary_id),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(role: ClaimRole, passed: bool) -> AtomicClaim {
        AtomicClaim {
            id: ClaimId::new(),
            text: "The reservoir level fell 40% between 2021 and 2023".to_string(),
            role,
            specificity_score: 0.8,
            opinion_score: 0.1,
            passed_gate1: passed,
            central: role == ClaimRole::Core,
            recency_sensitive: false,
            boundary_id: None,
        }
    }

    #[test]
    fn test_role_roundtrip() {
        for role in [
            ClaimRole::Core,
            ClaimRole::Attribution,
            ClaimRole::Source,
            ClaimRole::Timing,
        ] {
            assert_eq!(ClaimRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(ClaimRole::parse("editorial"), None);
    }

    #[test]
    fn test_only_core_may_be_central() {
        assert!(ClaimRole::Core.may_be_central());
        assert!(!ClaimRole::Attribution.may_be_central());
        assert!(!ClaimRole::Source.may_be_central());
        assert!(!ClaimRole::Timing.may_be_central());
    }

    #[test]
    fn test_gate1_controls_assessability() {
        assert!(claim(ClaimRole::Core, true).is_assessable());
        assert!(!claim(ClaimRole::Core, false).is_assessable());
    }

    #[test]
    fn test_with_boundary_preserves_fields() {
        let c = claim(ClaimRole::Core, true);
        let b = BoundaryId::new();
        let assigned = c.with_boundary(b);

        assert_eq!(assigned.boundary_id, Some(b));
        assert_eq!(assigned.id, c.id);
        assert_eq!(assigned.text, c.text);
    }
}
