//! Debate-driven verdict generation for a single claim

use crate::config::VerdictConfig;
use crate::error::VerdictError;
use crate::position::{self, DebatePosition};
use crate::prompt;
use crate::state::{Debate, DebateState};
use std::sync::Arc;
use tracing::{debug, info, warn};
use veracity_domain::{
    AnalysisWarning, AtomicClaim, BudgetTracker, CancelToken, CapabilityError, ClaimVerdict,
    CompletionCapability, EvidenceItem, Score, VerdictStatus, WarningStage,
};
use veracity_llm::repair::complete_structured;

/// A finished debate: the verdict plus any degradation warnings
#[derive(Debug, Clone)]
pub struct DebateOutcome {
    /// The verdict, always present in some status
    pub verdict: ClaimVerdict,

    /// Non-fatal problems encountered during the debate
    pub warnings: Vec<AnalysisWarning>,
}

/// Generates claim verdicts through the advocate/challenger/reconciler debate
pub struct VerdictGenerator {
    completion: Arc<dyn CompletionCapability>,
    config: VerdictConfig,
}

/// Why a debate ended before reconciling
enum Interrupt {
    Cancelled,
    BudgetExhausted,
    Schema(String),
    Provider(String),
}

impl VerdictGenerator {
    /// Create a new generator
    pub fn new(
        completion: Arc<dyn CompletionCapability>,
        config: VerdictConfig,
    ) -> Result<Self, VerdictError> {
        config.validate().map_err(VerdictError::Config)?;
        Ok(Self { completion, config })
    }

    /// Debate one claim to a verdict
    ///
    /// Never fails the job: insufficiency, provider failures, schema
    /// exhaustion, budget exhaustion and cancellation all produce an explicit
    /// verdict status so aggregation can proceed over whatever completed.
    pub async fn generate(
        &self,
        claim: &AtomicClaim,
        evidence: &[EvidenceItem],
        insufficient_evidence: bool,
        budget: &BudgetTracker,
        cancel: &CancelToken,
    ) -> DebateOutcome {
        if insufficient_evidence || evidence.len() < self.config.min_evidence_count {
            debug!(claim_id = %claim.id, items = evidence.len(), "Skipping debate, insufficient evidence");
            return DebateOutcome {
                verdict: ClaimVerdict::insufficient_evidence(claim.id),
                warnings: Vec::new(),
            };
        }

        info!(claim_id = %claim.id, items = evidence.len(), "Starting debate");
        let mut warnings = Vec::new();
        let mut debate = Debate::new(self.config.max_rounds, self.config.spread_threshold);
        let mut advocate: Option<DebatePosition> = None;
        let mut challenger: Option<DebatePosition> = None;
        let mut reconciled: Option<DebatePosition> = None;
        let mut last_spread = 0u8;
        let mut interrupt: Option<Interrupt> = None;

        while debate.state() != DebateState::Done {
            if cancel.is_cancelled() {
                interrupt = Some(Interrupt::Cancelled);
                debate.finish();
                break;
            }
            if budget.charge().is_err() {
                interrupt = Some(Interrupt::BudgetExhausted);
                debate.finish();
                break;
            }

            let text = match debate.state() {
                DebateState::Advocate => prompt::advocate(&claim.text, evidence),
                DebateState::Challenge => prompt::challenge(
                    &claim.text,
                    evidence,
                    reconciled.as_ref().or(advocate.as_ref()).unwrap_or(&DEFAULT_POSITION),
                ),
                DebateState::Reconcile => prompt::reconcile(
                    &claim.text,
                    evidence,
                    advocate.as_ref().unwrap_or(&DEFAULT_POSITION),
                    challenger.as_ref().unwrap_or(&DEFAULT_POSITION),
                ),
                DebateState::Done => break,
            };

            let result = tokio::time::timeout(
                self.config.completion_timeout(),
                complete_structured::<DebatePosition>(
                    self.completion.as_ref(),
                    &text,
                    position::position_schema(),
                    self.config.max_tokens,
                    self.config.max_schema_repairs,
                ),
            )
            .await;

            let position = match result {
                Ok(Ok(p)) => p.sanitized(evidence.len()),
                Ok(Err(CapabilityError::Schema(e))) => {
                    interrupt = Some(Interrupt::Schema(e));
                    debate.finish();
                    break;
                }
                Ok(Err(e)) => {
                    interrupt = Some(Interrupt::Provider(e.to_string()));
                    debate.finish();
                    break;
                }
                Err(_) => {
                    interrupt = Some(Interrupt::Provider("completion timed out".to_string()));
                    debate.finish();
                    break;
                }
            };

            match debate.state() {
                DebateState::Advocate => {
                    advocate = Some(position);
                    debate.advocated();
                }
                DebateState::Challenge => {
                    challenger = Some(position);
                    debate.challenged();
                }
                DebateState::Reconcile => {
                    last_spread = match (&advocate, &challenger) {
                        (Some(a), Some(c)) => a.spread(c),
                        _ => 0,
                    };
                    reconciled = Some(position);
                    debate.reconciled(last_spread);
                }
                DebateState::Done => break,
            }
        }

        self.settle(
            claim,
            evidence,
            debate.rounds(),
            advocate,
            reconciled,
            last_spread,
            interrupt,
            &mut warnings,
        )
    }

    /// Turn whatever the debate produced into a verdict
    #[allow(clippy::too_many_arguments)]
    fn settle(
        &self,
        claim: &AtomicClaim,
        evidence: &[EvidenceItem],
        rounds: u32,
        advocate: Option<DebatePosition>,
        reconciled: Option<DebatePosition>,
        spread: u8,
        interrupt: Option<Interrupt>,
        warnings: &mut Vec<AnalysisWarning>,
    ) -> DebateOutcome {
        let mut push = |message: String| {
            warnings.push(AnalysisWarning::new(WarningStage::Verdict, message));
        };

        let verdict = match (interrupt, reconciled, advocate) {
            (None, Some(position), _) => {
                let mut confidence = Score::new(position.confidence);
                if spread > self.config.unstable_spread {
                    confidence = confidence.discounted(self.config.unstable_discount);
                    debug!(
                        claim_id = %claim.id,
                        spread,
                        "Unstable debate, discounting confidence"
                    );
                }
                self.scored(claim, evidence, position, confidence, rounds)
            }
            (Some(Interrupt::Schema(e)), _, _) => {
                warn!(claim_id = %claim.id, error = %e, "Schema repairs exhausted, degrading");
                push(format!("debate output invalid for claim {}: {}", claim.id, e));
                ClaimVerdict {
                    claim_id: claim.id,
                    status: VerdictStatus::Scored,
                    truth_percentage: Some(Score::new(50)),
                    confidence: Score::MIN,
                    supporting_evidence_ids: Vec::new(),
                    opposing_evidence_ids: Vec::new(),
                    debate_rounds_used: rounds,
                    reasoning: "structured debate output unavailable".to_string(),
                }
            }
            (Some(cause), maybe_reconciled, maybe_advocate) => {
                let reason = match &cause {
                    Interrupt::Cancelled => "debate cancelled".to_string(),
                    Interrupt::BudgetExhausted => "external call budget exhausted".to_string(),
                    Interrupt::Provider(e) => format!("provider failure: {}", e),
                    Interrupt::Schema(_) => unreachable!(),
                };
                push(format!("claim {}: {}", claim.id, reason));

                // Best partial result: a position from an earlier phase,
                // confidence discounted because no reconciliation happened
                match maybe_reconciled.or(maybe_advocate) {
                    Some(position) => {
                        let confidence =
                            Score::new(position.confidence).discounted(self.config.unstable_discount);
                        self.scored(claim, evidence, position, confidence, rounds)
                    }
                    None => ClaimVerdict::failed(claim.id, reason),
                }
            }
            (None, None, _) => ClaimVerdict::failed(claim.id, "debate produced no position"),
        };

        info!(
            claim_id = %claim.id,
            status = ?verdict.status,
            truth = ?verdict.truth_percentage,
            rounds = verdict.debate_rounds_used,
            "Debate settled"
        );
        DebateOutcome {
            verdict,
            warnings: std::mem::take(warnings),
        }
    }

    fn scored(
        &self,
        claim: &AtomicClaim,
        evidence: &[EvidenceItem],
        position: DebatePosition,
        confidence: Score,
        rounds: u32,
    ) -> ClaimVerdict {
        let ids = |indices: &[usize]| {
            indices
                .iter()
                .filter_map(|&i| evidence.get(i).map(|e| e.id))
                .collect()
        };
        ClaimVerdict {
            claim_id: claim.id,
            status: VerdictStatus::Scored,
            truth_percentage: Some(Score::new(position.truth_percentage)),
            confidence,
            supporting_evidence_ids: ids(&position.supporting_evidence),
            opposing_evidence_ids: ids(&position.opposing_evidence),
            debate_rounds_used: rounds,
            reasoning: position.reasoning,
        }
    }
}

/// Placeholder position used only to render prompts when a phase is somehow
/// reached out of order
static DEFAULT_POSITION: DebatePosition = DebatePosition {
    truth_percentage: 50,
    confidence: 0,
    supporting_evidence: Vec::new(),
    opposing_evidence: Vec::new(),
    reasoning: String::new(),
};

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{ClaimId, ClaimRole, EvidenceCategory, EvidenceId, SourceId, Stance};
    use veracity_llm::MockCompletion;

    fn claim(text: &str) -> AtomicClaim {
        AtomicClaim {
            id: ClaimId::new(),
            text: text.to_string(),
            role: ClaimRole::Core,
            specificity_score: 0.8,
            opinion_score: 0.0,
            passed_gate1: true,
            central: true,
            recency_sensitive: false,
            boundary_id: None,
        }
    }

    fn item(statement: &str, stance: Stance) -> EvidenceItem {
        EvidenceItem {
            id: EvidenceId::new(),
            statement: statement.to_string(),
            category: EvidenceCategory::DirectEvidence,
            source_id: SourceId::new(),
            stance,
            probative_value: 0.9,
            is_derivative: false,
            retrieved_at: 0,
        }
    }

    fn evidence_pair() -> Vec<EvidenceItem> {
        vec![
            item("The filing confirms the seizure", Stance::Supporting),
            item("A spokesperson disputed the account", Stance::Opposing),
        ]
    }

    fn position_json(truth: u8, confidence: u8) -> String {
        format!(
            r#"{{"truth_percentage": {}, "confidence": {}, "supporting_evidence": [0], "opposing_evidence": [1], "reasoning": "weighed the filing"}}"#,
            truth, confidence
        )
    }

    fn generator(mock: &MockCompletion) -> VerdictGenerator {
        VerdictGenerator::new(Arc::new(mock.clone()), VerdictConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_insufficient_evidence_override() {
        let mock = MockCompletion::new(position_json(90, 90));
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                true,
                &BudgetTracker::new(100),
                &CancelToken::new(),
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::InsufficientEvidence);
        assert!(outcome.verdict.truth_percentage.is_none());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_single_evidence_item_is_insufficient() {
        let mock = MockCompletion::new(position_json(90, 90));
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &[item("The filing confirms the seizure", Stance::Supporting)],
                false,
                &BudgetTracker::new(100),
                &CancelToken::new(),
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::InsufficientEvidence);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_converged_debate_uses_reconciled_position() {
        let mock = MockCompletion::new("{}");
        mock.add_keyed("Role: advocate.", position_json(80, 75));
        mock.add_keyed("Role: challenger.", position_json(72, 70));
        mock.add_keyed("Role: reconciler.", position_json(76, 82));
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                false,
                &BudgetTracker::new(100),
                &CancelToken::new(),
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::Scored);
        assert_eq!(outcome.verdict.truth_percentage, Some(Score::new(76)));
        assert_eq!(outcome.verdict.confidence, Score::new(82));
        assert_eq!(outcome.verdict.debate_rounds_used, 2);
        assert_eq!(outcome.verdict.supporting_evidence_ids.len(), 1);
        assert_eq!(outcome.verdict.opposing_evidence_ids.len(), 1);
        // advocate + challenger + reconciler
        assert_eq!(mock.call_count(), 3);
        assert!(outcome.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_wide_spread_loops_and_discounts_confidence() {
        let mock = MockCompletion::new("{}");
        mock.add_keyed("Role: advocate.", position_json(90, 80));
        mock.add_keyed("Role: challenger.", position_json(20, 80));
        mock.add_keyed("Role: reconciler.", position_json(55, 80));
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                false,
                &BudgetTracker::new(100),
                &CancelToken::new(),
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::Scored);
        // Spread 70 > 30, so confidence 80 is discounted by 0.4
        assert_eq!(outcome.verdict.confidence, Score::new(32));
        // Hard rounds ceiling of 3: advocate plus two challenge/reconcile passes
        assert_eq!(outcome.verdict.debate_rounds_used, 3);
        assert_eq!(mock.call_count(), 5);
    }

    #[tokio::test]
    async fn test_schema_failure_degrades_to_unverified() {
        let mock = MockCompletion::new("this is not json");
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                false,
                &BudgetTracker::new(100),
                &CancelToken::new(),
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::Scored);
        assert_eq!(outcome.verdict.truth_percentage, Some(Score::new(50)));
        assert_eq!(outcome.verdict.confidence, Score::MIN);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_budget_exhaustion_degrades_to_partial() {
        let mock = MockCompletion::new("{}");
        mock.add_keyed("Role: advocate.", position_json(85, 80));
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                false,
                &BudgetTracker::new(1),
                &CancelToken::new(),
            )
            .await;

        // Advocate ran; the challenge charge failed
        assert_eq!(outcome.verdict.status, VerdictStatus::Scored);
        assert_eq!(outcome.verdict.truth_percentage, Some(Score::new(85)));
        assert_eq!(outcome.verdict.confidence, Score::new(32));
        assert!(outcome.warnings.iter().any(|w| w.message.contains("budget")));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_fails_cleanly() {
        let mock = MockCompletion::new(position_json(90, 90));
        let g = generator(&mock);
        let cancel = CancelToken::new();
        cancel.cancel();

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                false,
                &BudgetTracker::new(100),
                &cancel,
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::Failed);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_without_position_fails() {
        let mock = MockCompletion::new("{}");
        mock.fail_on("Role: advocate.");
        let g = generator(&mock);

        let outcome = g
            .generate(
                &claim("Acme seized the port"),
                &evidence_pair(),
                false,
                &BudgetTracker::new(100),
                &CancelToken::new(),
            )
            .await;

        assert_eq!(outcome.verdict.status, VerdictStatus::Failed);
        assert!(outcome.verdict.reasoning.contains("provider"));
    }
}
