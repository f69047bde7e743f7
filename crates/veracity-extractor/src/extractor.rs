//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::gate;
use crate::normalize::{normalize_input, split_sentences};
use crate::prompt::PromptBuilder;
use crate::types::{ClaimCandidate, Extraction};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use veracity_domain::{
    AnalysisWarning, AtomicClaim, CapabilityError, ClaimId, ClaimRole, CompletionCapability,
    WarningStage,
};
use veracity_llm::repair::complete_structured;

/// The Extractor decomposes input text into gated atomic claims
pub struct Extractor {
    completion: Arc<dyn CompletionCapability>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create a new Extractor
    pub fn new(completion: Arc<dyn CompletionCapability>, config: ExtractorConfig) -> Self {
        Self { completion, config }
    }

    /// Extract claims from input text
    ///
    /// The input is normalized (whitespace collapsed, question forms
    /// canonicalized to statements) before the LLM sees it. Structured-output
    /// violations degrade to a sentence-split fallback with a recorded
    /// warning; an input with no extractable assertions returns
    /// [`ExtractorError::NoVerifiableClaims`].
    pub async fn extract(&self, input: &str) -> Result<Extraction, ExtractorError> {
        if input.len() > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(
                input.len(),
                self.config.max_text_length,
            ));
        }

        let normalized = normalize_input(input);
        if normalized.is_empty() {
            return Err(ExtractorError::NoVerifiableClaims);
        }

        info!(chars = normalized.len(), "starting claim extraction");

        let mut warnings = Vec::new();
        let candidates = match self.extract_candidates(&normalized).await {
            Ok(candidates) => candidates,
            Err(ExtractorError::InvalidFormat(msg)) => {
                // Structured output exhausted its repair budget; degrade to
                // sentence heuristics rather than failing the job
                warn!(error = %msg, "extraction degraded to sentence fallback");
                warnings.push(AnalysisWarning::new(
                    WarningStage::Extraction,
                    format!("structured extraction failed, used sentence fallback: {}", msg),
                ));
                fallback_candidates(&normalized)
            }
            Err(e) => return Err(e),
        };

        debug!(count = candidates.len(), "claim candidates parsed");

        let reference_year = current_year();
        let mut claims = Vec::new();
        for candidate in candidates.into_iter().take(self.config.max_claims) {
            if let Err(reason) = candidate.validate() {
                warn!(reason = %reason, "dropping malformed claim candidate");
                warnings.push(AnalysisWarning::new(
                    WarningStage::Extraction,
                    format!("dropped malformed candidate: {}", reason),
                ));
                continue;
            }

            let role = ClaimRole::parse(&candidate.role).unwrap_or(ClaimRole::Core);
            let outcome = gate::evaluate(&candidate.text, &self.config);

            claims.push(AtomicClaim {
                id: ClaimId::new(),
                text: candidate.text.trim().to_string(),
                role,
                specificity_score: outcome.specificity_score,
                opinion_score: outcome.opinion_score,
                passed_gate1: outcome.passed,
                // Attribution/source/timing claims are structurally barred
                // from centrality regardless of what the model said
                central: candidate.central && role.may_be_central(),
                recency_sensitive: gate::recency_sensitive(&candidate.text, reference_year),
                boundary_id: None,
            });
        }

        if claims.is_empty() {
            return Err(ExtractorError::NoVerifiableClaims);
        }

        let passed = claims.iter().filter(|c| c.passed_gate1).count();
        info!(
            total = claims.len(),
            passed_gate1 = passed,
            "extraction complete"
        );

        Ok(Extraction {
            normalized_input: normalized,
            claims,
            warnings,
        })
    }

    async fn extract_candidates(
        &self,
        normalized: &str,
    ) -> Result<Vec<ClaimCandidate>, ExtractorError> {
        let prompt = PromptBuilder::new(normalized.to_string(), self.config.max_claims).build();

        let result = timeout(
            self.config.extraction_timeout(),
            complete_structured::<Vec<ClaimCandidate>>(
                self.completion.as_ref(),
                &prompt,
                PromptBuilder::schema(),
                self.config.max_tokens,
                self.config.max_schema_repairs,
            ),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?;

        match result {
            Ok(candidates) => Ok(candidates),
            Err(CapabilityError::Schema(msg)) => Err(ExtractorError::InvalidFormat(msg)),
            Err(e) => Err(ExtractorError::Completion(e.to_string())),
        }
    }
}

/// Sentence-split fallback used when structured extraction fails
fn fallback_candidates(normalized: &str) -> Vec<ClaimCandidate> {
    split_sentences(normalized)
        .into_iter()
        .filter(|s| s.split_whitespace().count() >= 4)
        .map(|s| ClaimCandidate {
            text: s.trim_end_matches(['.', '!']).to_string(),
            role: "core".to_string(),
            central: false,
        })
        .collect()
}

fn current_year() -> u32 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    // Mean tropical year; close enough for a two-year recency window
    1970 + (secs / 31_556_952) as u32
}
