//! Request and response types for extraction

use serde::{Deserialize, Serialize};
use veracity_domain::{AnalysisWarning, AtomicClaim};

/// Result of an extraction run
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Canonicalized input text the claims were extracted from
    pub normalized_input: String,

    /// Extracted claims, in input order, including Gate 1 failures
    pub claims: Vec<AtomicClaim>,

    /// Degraded-path events during extraction
    pub warnings: Vec<AnalysisWarning>,
}

impl Extraction {
    /// Claims that passed Gate 1 and proceed to research
    pub fn assessable(&self) -> impl Iterator<Item = &AtomicClaim> {
        self.claims.iter().filter(|c| c.is_assessable())
    }

    /// Number of claims that passed Gate 1
    pub fn assessable_count(&self) -> usize {
        self.assessable().count()
    }
}

/// A claim candidate as returned by the LLM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ClaimCandidate {
    pub text: String,
    pub role: String,
    #[serde(default)]
    pub central: bool,
}

impl ClaimCandidate {
    /// Validate that the candidate is usable
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("text is empty".to_string());
        }
        if veracity_domain::ClaimRole::parse(&self.role).is_none() {
            return Err(format!("unknown role '{}'", self.role));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_valid() {
        let c = ClaimCandidate {
            text: "Acme seized the port".to_string(),
            role: "core".to_string(),
            central: true,
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_candidate_empty_text() {
        let c = ClaimCandidate {
            text: "  ".to_string(),
            role: "core".to_string(),
            central: false,
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_candidate_unknown_role() {
        let c = ClaimCandidate {
            text: "Acme seized the port".to_string(),
            role: "editorial".to_string(),
            central: false,
        };
        assert!(c.validate().is_err());
    }
}
