//! The five-stage analysis job

use crate::capabilities::Capabilities;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use veracity_aggregate::{validate_centrality, AggregateError, Aggregator};
use veracity_cluster::Clusterer;
use veracity_domain::{
    AnalysisResult, AnalysisWarning, AtomicClaim, BudgetTracker, CancelToken, ClaimId,
    ClaimVerdict, EvidenceId, EvidenceItem, EvidenceLink, Source, WarningStage,
};
use veracity_extractor::{Extraction, Extractor};
use veracity_research::{ClaimResearch, Researcher};
use veracity_verdict::VerdictGenerator;

/// Orchestrates one analysis job across the five stages
pub struct Pipeline {
    capabilities: Capabilities,
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline after validating the whole configuration
    pub fn new(capabilities: Capabilities, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            capabilities,
            config,
        })
    }

    /// Run the full analysis over one input text
    ///
    /// Cancellation and budget exhaustion degrade per-claim work to partial
    /// results; the job still aggregates and returns whatever completed.
    pub async fn analyze(
        &self,
        input: &str,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult, PipelineError> {
        let budget = BudgetTracker::new(self.config.job.max_external_calls);
        let mut warnings = Vec::new();

        let extraction = self
            .extract_with_centrality(input, &budget, &mut warnings)
            .await?;
        warnings.extend(extraction.warnings);
        let claims = extraction.claims;
        info!(claims = claims.len(), "Extraction stage done");

        let research = self
            .research_all(&claims, &budget, cancel, &mut warnings)
            .await;
        info!(
            evidence = research.evidence.len(),
            sources = research.sources.len(),
            "Research stage done"
        );

        let clusterer = Clusterer::new(self.config.cluster.clone())?;
        let clustering = clusterer.cluster(&claims, &research.evidence, &research.links);
        let claims = clustering.claims;
        let boundaries = clustering.boundaries;

        let generator = Arc::new(VerdictGenerator::new(
            self.capabilities.completion.clone(),
            self.config.verdict.clone(),
        )?);
        let verdicts = self
            .debate_all(generator, &claims, &research, &budget, cancel, &mut warnings)
            .await;
        info!(verdicts = verdicts.len(), "Verdict stage done");

        let aggregator = Aggregator::new(self.config.aggregator.clone())?;
        let (boundary_assessments, overall) = aggregator.assess(
            &claims,
            &boundaries,
            &verdicts,
            &research.evidence,
            &research.links,
            &research.sources,
        );

        Ok(AnalysisResult {
            claims,
            evidence: research.evidence,
            evidence_links: research.links,
            sources: research.sources,
            boundaries,
            verdicts,
            boundary_assessments,
            overall,
            warnings,
        })
    }

    /// Extraction plus the centrality discipline
    ///
    /// A violation triggers bounded re-extraction; if the violation persists,
    /// excess central markers are cleared (earliest claims keep theirs) with
    /// a recorded warning instead of aggregating implausible output.
    async fn extract_with_centrality(
        &self,
        input: &str,
        budget: &BudgetTracker,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> Result<Extraction, PipelineError> {
        let extractor = Extractor::new(
            self.capabilities.completion.clone(),
            self.config.extractor.clone(),
        );

        // The ceiling is validated nonzero, so the first charge holds
        budget.charge().ok();
        let mut extraction = extractor.extract(input).await?;
        let mut attempt = 0u32;
        loop {
            match validate_centrality(&extraction.claims, &self.config.aggregator) {
                Ok(()) => return Ok(extraction),
                Err(e @ AggregateError::CentralityViolation { limit, .. }) => {
                    if attempt < self.config.job.max_reextractions && budget.charge().is_ok() {
                        warn!(error = %e, attempt, "Centrality violation, re-extracting");
                        warnings.push(AnalysisWarning::new(
                            WarningStage::Extraction,
                            format!("re-extracting after centrality violation: {}", e),
                        ));
                        attempt += 1;
                        extraction = extractor.extract(input).await?;
                    } else {
                        warn!(error = %e, "Centrality violation persisted, demoting markers");
                        warnings.push(AnalysisWarning::new(
                            WarningStage::Extraction,
                            format!("centrality violation persisted, demoted markers: {}", e),
                        ));
                        return Ok(demote_excess_central(extraction, limit));
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Stage 2 across claims, bounded by the concurrency limit
    async fn research_all(
        &self,
        claims: &[AtomicClaim],
        budget: &BudgetTracker,
        cancel: &CancelToken,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> ResearchOutput {
        let researcher = Arc::new(Researcher::new(
            self.capabilities.search.clone(),
            self.capabilities.reliability.clone(),
            self.config.research.clone(),
        ));
        let semaphore = Arc::new(Semaphore::new(self.config.job.concurrency));
        let mut tasks = JoinSet::new();

        for claim in claims.iter().filter(|c| c.is_assessable()).cloned() {
            let researcher = researcher.clone();
            let semaphore = semaphore.clone();
            let budget = budget.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let result = researcher.research(&claim, &[], &budget, &cancel).await;
                (claim.id, result)
            });
        }

        let mut by_claim: HashMap<ClaimId, ClaimResearch> = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((claim_id, Ok(research))) => {
                    by_claim.insert(claim_id, research);
                }
                Ok((claim_id, Err(e))) => {
                    warn!(claim_id = %claim_id, error = %e, "Research failed, claim excluded");
                    warnings.push(AnalysisWarning::new(
                        WarningStage::Research,
                        format!("research failed for claim {}: {}", claim_id, e),
                    ));
                }
                Err(e) => {
                    warnings.push(AnalysisWarning::new(
                        WarningStage::Research,
                        format!("research task aborted: {}", e),
                    ));
                }
            }
        }

        // Flatten in claim order so the result is deterministic
        let mut output = ResearchOutput::default();
        for claim in claims.iter().filter(|c| c.is_assessable()) {
            match by_claim.remove(&claim.id) {
                Some(research) => {
                    output
                        .insufficient
                        .insert(claim.id, research.insufficient_evidence);
                    output.evidence.extend(research.evidence);
                    output.links.extend(research.links);
                    output.sources.extend(research.sources);
                    warnings.extend(research.warnings);
                }
                None => {
                    output.insufficient.insert(claim.id, true);
                }
            }
        }
        output
    }

    /// Stage 4 across claims, bounded by the concurrency limit
    async fn debate_all(
        &self,
        generator: Arc<VerdictGenerator>,
        claims: &[AtomicClaim],
        research: &ResearchOutput,
        budget: &BudgetTracker,
        cancel: &CancelToken,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> Vec<ClaimVerdict> {
        let semaphore = Arc::new(Semaphore::new(self.config.job.concurrency));
        let evidence_by_id: HashMap<EvidenceId, &EvidenceItem> =
            research.evidence.iter().map(|e| (e.id, e)).collect();
        let mut tasks = JoinSet::new();

        for claim in claims.iter().filter(|c| c.is_assessable()).cloned() {
            let claim_evidence: Vec<EvidenceItem> = research
                .links
                .iter()
                .filter(|l| l.claim_id == claim.id)
                .filter_map(|l| evidence_by_id.get(&l.evidence_id).copied().cloned())
                .collect();
            let insufficient = research.insufficient.get(&claim.id).copied().unwrap_or(true);
            let generator = generator.clone();
            let semaphore = semaphore.clone();
            let budget = budget.clone();
            let cancel = cancel.clone();
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                let outcome = generator
                    .generate(&claim, &claim_evidence, insufficient, &budget, &cancel)
                    .await;
                (claim.id, outcome)
            });
        }

        let mut by_claim = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((claim_id, outcome)) => {
                    warnings.extend(outcome.warnings);
                    by_claim.insert(claim_id, outcome.verdict);
                }
                Err(e) => {
                    warnings.push(AnalysisWarning::new(
                        WarningStage::Verdict,
                        format!("debate task aborted: {}", e),
                    ));
                }
            }
        }

        claims
            .iter()
            .filter(|c| c.is_assessable())
            .filter_map(|c| by_claim.remove(&c.id))
            .collect()
    }
}

/// Clear central markers past the limit, earliest claims keeping theirs
fn demote_excess_central(mut extraction: Extraction, limit: usize) -> Extraction {
    let mut kept = 0usize;
    for claim in &mut extraction.claims {
        if claim.central {
            if kept < limit {
                kept += 1;
            } else {
                claim.central = false;
            }
        }
    }
    extraction
}

/// Everything stage 2 produced across claims
#[derive(Default)]
struct ResearchOutput {
    insufficient: HashMap<ClaimId, bool>,
    evidence: Vec<EvidenceItem>,
    links: Vec<EvidenceLink>,
    sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{QualityGateStatus, Score, SevenPointLabel};
    use veracity_llm::{MockCompletion, MockSearch, StaticReliability};

    fn extraction_json(claims: &[(&str, bool)]) -> String {
        let entries: Vec<String> = claims
            .iter()
            .map(|(text, central)| {
                format!(
                    r#"{{"text": "{}", "role": "core", "central": {}}}"#,
                    text, central
                )
            })
            .collect();
        format!("[{}]", entries.join(","))
    }

    fn position_json(truth: u8, confidence: u8) -> String {
        format!(
            r#"{{"truth_percentage": {}, "confidence": {}, "supporting_evidence": [0, 1], "opposing_evidence": [], "reasoning": "weighed the reporting"}}"#,
            truth, confidence
        )
    }

    fn debate_keyed(mock: &MockCompletion, truth: u8) {
        mock.add_keyed("Role: advocate.", position_json(truth, 80));
        mock.add_keyed("Role: challenger.", position_json(truth.saturating_sub(5), 75));
        mock.add_keyed("Role: reconciler.", position_json(truth, 85));
    }

    fn search_with_coverage() -> MockSearch {
        let search = MockSearch::new();
        search.add_hit(
            "https://example.org/report",
            "Acme seized the Port of Dover in 2021",
        );
        search.add_hit(
            "https://registry.example.net/filing",
            "Officials confirmed Acme seized the Port of Dover",
        );
        search
    }

    fn pipeline(completion: MockCompletion, search: MockSearch) -> Pipeline {
        let capabilities = Capabilities::new(
            Arc::new(completion),
            Arc::new(search),
            Arc::new(StaticReliability::default()),
        );
        Pipeline::new(capabilities, PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_scored_result() {
        let completion =
            MockCompletion::new(extraction_json(&[("Acme seized the Port of Dover in 2021", true)]));
        debate_keyed(&completion, 82);
        let p = pipeline(completion, search_with_coverage());

        let result = p
            .analyze("Acme seized the Port of Dover in 2021.", &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(result.claims.len(), 1);
        assert!(result.claims[0].passed_gate1);
        assert!(result.claims[0].boundary_id.is_some());
        assert_eq!(result.verdicts.len(), 1);
        assert_eq!(result.verdicts[0].truth_percentage, Some(Score::new(82)));
        assert_eq!(result.overall.truth_percentage, Some(Score::new(82)));
        assert_eq!(result.overall.seven_point_label, Some(SevenPointLabel::MostlyTrue));
        assert_eq!(result.overall.quality_gate_status, QualityGateStatus::Publishable);
        assert!(result.evidence.len() >= 2);
        assert!(!result.evidence_links.is_empty());
    }

    #[tokio::test]
    async fn test_question_and_statement_agree() {
        let build = || {
            let completion = MockCompletion::new(extraction_json(&[(
                "Acme seized the Port of Dover in 2021",
                true,
            )]));
            debate_keyed(&completion, 82);
            pipeline(completion, search_with_coverage())
        };

        let statement = build()
            .analyze("Acme seized the Port of Dover in 2021.", &CancelToken::new())
            .await
            .unwrap();
        let question = build()
            .analyze(
                "Is it true that Acme seized the Port of Dover in 2021?",
                &CancelToken::new(),
            )
            .await
            .unwrap();

        let texts = |r: &AnalysisResult| -> Vec<String> {
            r.claims.iter().map(|c| c.text.clone()).collect()
        };
        assert_eq!(texts(&statement), texts(&question));
        assert_eq!(statement.boundaries.len(), question.boundaries.len());

        let spread = statement
            .overall
            .truth_percentage
            .unwrap()
            .spread(question.overall.truth_percentage.unwrap());
        assert!(spread <= 5, "spread was {}", spread);
    }

    #[tokio::test]
    async fn test_cancelled_job_degrades_not_fails() {
        let completion =
            MockCompletion::new(extraction_json(&[("Acme seized the Port of Dover in 2021", true)]));
        debate_keyed(&completion, 82);
        let p = pipeline(completion, search_with_coverage());

        let cancel = CancelToken::new();
        cancel.cancel();
        let result = p
            .analyze("Acme seized the Port of Dover in 2021.", &cancel)
            .await
            .unwrap();

        assert_eq!(
            result.overall.quality_gate_status,
            QualityGateStatus::InsufficientEvidence
        );
        assert!(result.overall.truth_percentage.is_none());
    }

    #[tokio::test]
    async fn test_centrality_violation_triggers_reextraction() {
        let completion = MockCompletion::new("{}");
        // First extraction marks every claim central; the retry is plausible
        completion.push_response(extraction_json(&[
            ("The levy passed with sixty votes", true),
            ("The levy took effect in January", true),
            ("Turnout reached forty percent", true),
            ("The county certified the result", true),
            ("Ballots were recounted twice", true),
            ("Observers reported no irregularities", true),
            ("The margin was nineteen votes", true),
        ]));
        completion.push_response(extraction_json(&[
            ("The levy passed with sixty votes", true),
            ("The levy took effect in January", false),
            ("Turnout reached forty percent", false),
            ("The county certified the result", false),
            ("Ballots were recounted twice", false),
            ("Observers reported no irregularities", false),
            ("The margin was nineteen votes", false),
        ]));
        let p = pipeline(completion, MockSearch::new());

        let result = p
            .analyze("The levy passed with sixty votes.", &CancelToken::new())
            .await
            .unwrap();

        let central = result.claims.iter().filter(|c| c.central).count();
        assert_eq!(central, 1);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("centrality")));
    }

    #[tokio::test]
    async fn test_budget_ceiling_degrades_to_insufficient() {
        let completion =
            MockCompletion::new(extraction_json(&[("Acme seized the Port of Dover in 2021", true)]));
        debate_keyed(&completion, 82);
        let capabilities = Capabilities::new(
            Arc::new(completion),
            Arc::new(search_with_coverage()),
            Arc::new(StaticReliability::default()),
        );
        let mut config = PipelineConfig::default();
        config.job.max_external_calls = 2;
        let p = Pipeline::new(capabilities, config).unwrap();

        let result = p
            .analyze("Acme seized the Port of Dover in 2021.", &CancelToken::new())
            .await
            .unwrap();

        // One call went to extraction, one to search; nothing more ran
        assert!(result
            .warnings
            .iter()
            .any(|w| w.message.contains("budget")));
        assert_eq!(
            result.overall.quality_gate_status,
            QualityGateStatus::InsufficientEvidence
        );
    }

    #[tokio::test]
    async fn test_empty_input_is_an_error() {
        let p = pipeline(MockCompletion::new("[]"), MockSearch::new());
        let result = p.analyze("   ", &CancelToken::new()).await;
        assert!(matches!(
            result,
            Err(PipelineError::Extraction(
                veracity_extractor::ExtractorError::NoVerifiableClaims
            ))
        ));
    }
}
