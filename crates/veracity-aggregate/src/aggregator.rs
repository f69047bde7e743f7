//! Boundary and overall verdict roll-up

use crate::config::AggregatorConfig;
use crate::error::AggregateError;
use crate::gate;
use crate::weight;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use veracity_domain::{
    AnalysisBoundary, AtomicClaim, BoundaryAssessment, ClaimId, ClaimVerdict, EvidenceId,
    EvidenceItem, EvidenceLink, OverallAssessment, QualityGateStatus, Score, SevenPointLabel,
    Source, SourceId,
};

/// Rolls claim verdicts up into boundary and overall assessments
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(config: AggregatorConfig) -> Result<Self, AggregateError> {
        config.validate().map_err(AggregateError::Config)?;
        Ok(Self { config })
    }

    /// Compute one assessment per boundary plus the overall assessment
    ///
    /// Pure and order-independent over the verdicts: commutative inputs and
    /// repeated runs produce identical output.
    pub fn assess(
        &self,
        claims: &[AtomicClaim],
        boundaries: &[AnalysisBoundary],
        verdicts: &[ClaimVerdict],
        evidence: &[EvidenceItem],
        links: &[EvidenceLink],
        sources: &[Source],
    ) -> (Vec<BoundaryAssessment>, OverallAssessment) {
        let claim_by_id: HashMap<ClaimId, &AtomicClaim> =
            claims.iter().map(|c| (c.id, c)).collect();
        let verdict_by_claim: HashMap<ClaimId, &ClaimVerdict> =
            verdicts.iter().map(|v| (v.claim_id, v)).collect();
        let evidence_by_id: HashMap<EvidenceId, &EvidenceItem> =
            evidence.iter().map(|e| (e.id, e)).collect();
        let source_by_id: HashMap<SourceId, &Source> = sources.iter().map(|s| (s.id, s)).collect();

        let mut evidence_ids: HashMap<ClaimId, HashSet<EvidenceId>> = HashMap::new();
        for link in links {
            evidence_ids.entry(link.claim_id).or_default().insert(link.evidence_id);
        }

        let mut assessments = Vec::with_capacity(boundaries.len());
        let mut evidence_behind: Vec<usize> = Vec::with_capacity(boundaries.len());

        for boundary in boundaries {
            let pairs: Vec<(&AtomicClaim, &ClaimVerdict)> = boundary
                .claim_ids
                .iter()
                .filter_map(|id| {
                    let claim = claim_by_id.get(id)?;
                    let verdict = verdict_by_claim.get(id)?;
                    verdict.is_scored().then_some((*claim, *verdict))
                })
                .collect();

            let (assessment, items) = self.assess_boundary(
                boundary,
                &pairs,
                &evidence_ids,
                &evidence_by_id,
                &source_by_id,
            );
            evidence_behind.push(items);
            assessments.push(assessment);
        }

        let overall = self.assess_overall(&assessments, &evidence_behind);
        info!(
            boundaries = assessments.len(),
            overall_truth = ?overall.truth_percentage,
            overall_gate = ?overall.quality_gate_status,
            "Aggregation complete"
        );
        (assessments, overall)
    }

    fn assess_boundary(
        &self,
        boundary: &AnalysisBoundary,
        pairs: &[(&AtomicClaim, &ClaimVerdict)],
        evidence_ids: &HashMap<ClaimId, HashSet<EvidenceId>>,
        evidence_by_id: &HashMap<EvidenceId, &EvidenceItem>,
        source_by_id: &HashMap<SourceId, &Source>,
    ) -> (BoundaryAssessment, usize) {
        if pairs.is_empty() {
            debug!(boundary_id = %boundary.id, "No scored verdicts in boundary");
            return (
                BoundaryAssessment {
                    boundary_id: boundary.id,
                    truth_percentage: None,
                    confidence: Score::MIN,
                    quality_gate: QualityGateStatus::InsufficientEvidence,
                    contributing_claim_ids: Vec::new(),
                },
                0,
            );
        }

        let weights = weight::claim_weights(pairs, evidence_ids, &self.config);
        let total: f64 = weights.values().sum();

        let (mut truth_acc, mut confidence_acc) = (0.0f64, 0.0f64);
        for (claim, verdict) in pairs {
            let w = weights.get(&claim.id).copied().unwrap_or(0.0);
            // is_scored() guarantees the percentage is present
            let truth = verdict.truth_percentage.unwrap_or(Score::MIN);
            truth_acc += w * f64::from(truth.value());
            confidence_acc += w * f64::from(verdict.confidence.value());
        }

        let (truth, confidence) = if total > 0.0 {
            (
                Score::from_percent(truth_acc / total),
                Score::from_percent(confidence_acc / total),
            )
        } else {
            (Score::new(50), Score::MIN)
        };

        // Unique evidence behind the contributing claims drives Gate 4
        let mut seen = HashSet::new();
        let items: Vec<&EvidenceItem> = pairs
            .iter()
            .filter_map(|(claim, _)| evidence_ids.get(&claim.id))
            .flatten()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| evidence_by_id.get(id).copied())
            .collect();

        let quality_gate = gate::evaluate(&items, source_by_id, &self.config);
        let truth_percentage = match quality_gate {
            QualityGateStatus::InsufficientEvidence => None,
            _ => Some(truth),
        };

        (
            BoundaryAssessment {
                boundary_id: boundary.id,
                truth_percentage,
                confidence,
                quality_gate,
                contributing_claim_ids: pairs.iter().map(|(c, _)| c.id).collect(),
            },
            items.len(),
        )
    }

    /// Evidence-count-weighted roll-up across scored boundaries
    fn assess_overall(
        &self,
        assessments: &[BoundaryAssessment],
        evidence_behind: &[usize],
    ) -> OverallAssessment {
        let scored: Vec<(usize, &BoundaryAssessment)> = assessments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.truth_percentage.is_some())
            .map(|(i, a)| (i, a))
            .collect();

        if scored.is_empty() {
            return OverallAssessment {
                truth_percentage: None,
                confidence: Score::MIN,
                seven_point_label: None,
                quality_gate_status: QualityGateStatus::InsufficientEvidence,
            };
        }

        let (mut truth_acc, mut confidence_acc, mut total) = (0.0f64, 0.0f64, 0.0f64);
        for (i, a) in &scored {
            let w = (evidence_behind[*i] as f64).max(1.0);
            // truth_percentage checked Some above
            let truth = a.truth_percentage.unwrap_or(Score::MIN);
            truth_acc += w * f64::from(truth.value());
            confidence_acc += w * f64::from(a.confidence.value());
            total += w;
        }

        let truth = Score::from_percent(truth_acc / total);
        let quality_gate_status = if scored
            .iter()
            .any(|(_, a)| a.quality_gate == QualityGateStatus::Flagged)
        {
            QualityGateStatus::Flagged
        } else {
            QualityGateStatus::Publishable
        };

        OverallAssessment {
            truth_percentage: Some(truth),
            confidence: Score::from_percent(confidence_acc / total),
            seven_point_label: Some(SevenPointLabel::from_score(truth)),
            quality_gate_status,
        }
    }
}

/// Reject extraction output that marks an implausible share of claims central
///
/// The effective limit is the lesser of the absolute cap and the configured
/// fraction of the claim count (at least one). The pipeline responds to a
/// violation with a bounded re-extraction rather than aggregating as-is.
pub fn validate_centrality(
    claims: &[AtomicClaim],
    config: &AggregatorConfig,
) -> Result<(), AggregateError> {
    let total = claims.len();
    let central = claims.iter().filter(|c| c.central).count();
    let fraction_limit = ((total as f64) * config.max_central_fraction).floor() as usize;
    let limit = config.max_central_claims.min(fraction_limit.max(1));

    if central > limit {
        return Err(AggregateError::CentralityViolation {
            central,
            total,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use veracity_domain::{ClaimRole, EvidenceCategory, Stance, VerdictStatus};

    fn claim(text: &str, central: bool) -> AtomicClaim {
        AtomicClaim {
            id: ClaimId::new(),
            text: text.to_string(),
            role: ClaimRole::Core,
            specificity_score: 0.8,
            opinion_score: 0.0,
            passed_gate1: true,
            central,
            recency_sensitive: false,
            boundary_id: None,
        }
    }

    fn verdict(claim_id: ClaimId, truth: u8, confidence: u8) -> ClaimVerdict {
        ClaimVerdict {
            claim_id,
            status: VerdictStatus::Scored,
            truth_percentage: Some(Score::new(truth)),
            confidence: Score::new(confidence),
            supporting_evidence_ids: Vec::new(),
            opposing_evidence_ids: Vec::new(),
            debate_rounds_used: 2,
            reasoning: String::new(),
        }
    }

    struct Fixture {
        claims: Vec<AtomicClaim>,
        boundaries: Vec<AnalysisBoundary>,
        verdicts: Vec<ClaimVerdict>,
        evidence: Vec<EvidenceItem>,
        links: Vec<EvidenceLink>,
        sources: Vec<Source>,
    }

    /// One boundary, distinct claims, solid supporting evidence
    fn fixture(truths: &[(u8, u8)]) -> Fixture {
        let texts = [
            "Acme seized the Port of Dover",
            "Reservoir water levels fell forty percent",
            "The levy passed with sixty votes",
        ];
        let source = Source {
            id: SourceId::new(),
            url: "https://example.org".to_string(),
            reliability_score: 0.8,
            source_type: "news".to_string(),
        };

        let mut f = Fixture {
            claims: Vec::new(),
            boundaries: vec![AnalysisBoundary::new("general")],
            verdicts: Vec::new(),
            evidence: Vec::new(),
            links: Vec::new(),
            sources: vec![source.clone()],
        };

        for (i, &(truth, confidence)) in truths.iter().enumerate() {
            let c = claim(texts[i % texts.len()], false);
            f.boundaries[0].claim_ids.push(c.id);
            f.verdicts.push(verdict(c.id, truth, confidence));
            for _ in 0..2 {
                let e = EvidenceItem {
                    id: EvidenceId::new(),
                    statement: format!("evidence for claim {}", i),
                    category: EvidenceCategory::DirectEvidence,
                    source_id: source.id,
                    stance: Stance::Supporting,
                    probative_value: 0.8,
                    is_derivative: false,
                    retrieved_at: 0,
                };
                f.links.push(EvidenceLink {
                    claim_id: c.id,
                    evidence_id: e.id,
                    stance: Stance::Supporting,
                });
                f.evidence.push(e);
            }
            f.claims.push(c);
        }
        f
    }

    fn aggregator() -> Aggregator {
        Aggregator::new(AggregatorConfig::default()).unwrap()
    }

    #[test]
    fn test_equal_weights_average() {
        let f = fixture(&[(80, 80), (40, 80)]);
        let (boundaries, overall) = aggregator().assess(
            &f.claims,
            &f.boundaries,
            &f.verdicts,
            &f.evidence,
            &f.links,
            &f.sources,
        );

        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].truth_percentage, Some(Score::new(60)));
        assert_eq!(boundaries[0].quality_gate, QualityGateStatus::Publishable);
        assert_eq!(overall.truth_percentage, Some(Score::new(60)));
        assert_eq!(overall.seven_point_label, Some(SevenPointLabel::LeaningTrue));
    }

    #[test]
    fn test_low_confidence_downweighted() {
        let f = fixture(&[(90, 90), (10, 10)]);
        let (boundaries, _) = aggregator().assess(
            &f.claims,
            &f.boundaries,
            &f.verdicts,
            &f.evidence,
            &f.links,
            &f.sources,
        );

        // The 90%-confidence verdict dominates the mean
        let truth = boundaries[0].truth_percentage.unwrap().value();
        assert!(truth > 70, "truth was {}", truth);
    }

    #[test]
    fn test_no_scored_verdicts_is_insufficient() {
        let mut f = fixture(&[(80, 80)]);
        f.verdicts = vec![ClaimVerdict::insufficient_evidence(f.claims[0].id)];

        let (boundaries, overall) = aggregator().assess(
            &f.claims,
            &f.boundaries,
            &f.verdicts,
            &f.evidence,
            &f.links,
            &f.sources,
        );

        assert!(boundaries[0].truth_percentage.is_none());
        assert_eq!(
            boundaries[0].quality_gate,
            QualityGateStatus::InsufficientEvidence
        );
        assert!(overall.truth_percentage.is_none());
        assert!(overall.seven_point_label.is_none());
    }

    #[test]
    fn test_duplicate_phrasings_do_not_dominate() {
        // One distinct claim scoring 20 next to three phrasings of one
        // 90-scoring fact; the phrasings must not cast three full votes.
        let duplicate_texts = [
            "Acme seized the Port of Dover",
            "The Port of Dover was seized by Acme",
            "Acme seized the Port of Dover yesterday",
        ];
        let mut f = fixture(&[(20, 80)]);
        for text in duplicate_texts {
            let c = claim(text, false);
            f.boundaries[0].claim_ids.push(c.id);
            f.verdicts.push(verdict(c.id, 90, 80));
            f.claims.push(c);
        }

        let (boundaries, _) = aggregator().assess(
            &f.claims,
            &f.boundaries,
            &f.verdicts,
            &f.evidence,
            &f.links,
            &f.sources,
        );

        // Full-weight duplicates would give (20 + 3*90)/4 = 72.5; the cap
        // keeps the result below that
        let truth = boundaries[0].truth_percentage.unwrap().value();
        assert!(truth < 70, "truth was {}", truth);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let f = fixture(&[(80, 80), (55, 60), (30, 90)]);
        let a = aggregator();

        let first = a.assess(&f.claims, &f.boundaries, &f.verdicts, &f.evidence, &f.links, &f.sources);
        let second = a.assess(&f.claims, &f.boundaries, &f.verdicts, &f.evidence, &f.links, &f.sources);

        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_verdict_order_does_not_matter() {
        let f = fixture(&[(80, 80), (55, 60), (30, 90)]);
        let a = aggregator();

        let forward = a.assess(&f.claims, &f.boundaries, &f.verdicts, &f.evidence, &f.links, &f.sources);
        let mut reversed_verdicts = f.verdicts.clone();
        reversed_verdicts.reverse();
        let backward = a.assess(&f.claims, &f.boundaries, &reversed_verdicts, &f.evidence, &f.links, &f.sources);

        assert_eq!(forward.0, backward.0);
        assert_eq!(forward.1, backward.1);
    }

    #[test]
    fn test_centrality_discipline() {
        let config = AggregatorConfig::default();
        let mut claims: Vec<AtomicClaim> =
            (0..6).map(|i| claim(&format!("claim {}", i), false)).collect();
        assert!(validate_centrality(&claims, &config).is_ok());

        for c in claims.iter_mut().take(2) {
            c.central = true;
        }
        assert!(validate_centrality(&claims, &config).is_ok());

        for c in claims.iter_mut() {
            c.central = true;
        }
        let err = validate_centrality(&claims, &config).unwrap_err();
        assert!(matches!(err, AggregateError::CentralityViolation { central: 6, .. }));
    }

    #[test]
    fn test_single_central_claim_always_allowed() {
        let config = AggregatorConfig::default();
        let claims = vec![claim("the one claim", true)];
        assert!(validate_centrality(&claims, &config).is_ok());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn aggregate_truth_always_in_range(
                scores in proptest::collection::vec((0u8..=100, 0u8..=100), 1..6)
            ) {
                let f = fixture(&scores);
                let (boundaries, overall) = aggregator().assess(
                    &f.claims, &f.boundaries, &f.verdicts, &f.evidence, &f.links, &f.sources,
                );

                for b in &boundaries {
                    if let Some(t) = b.truth_percentage {
                        prop_assert!(t.value() <= 100);
                    }
                }
                if let (Some(t), Some(label)) = (overall.truth_percentage, overall.seven_point_label) {
                    prop_assert_eq!(label, SevenPointLabel::from_score(t));
                }
            }

            #[test]
            fn aggregation_deterministic(
                scores in proptest::collection::vec((0u8..=100, 1u8..=100), 1..5)
            ) {
                let f = fixture(&scores);
                let a = aggregator();
                let first = a.assess(&f.claims, &f.boundaries, &f.verdicts, &f.evidence, &f.links, &f.sources);
                let second = a.assess(&f.claims, &f.boundaries, &f.verdicts, &f.evidence, &f.links, &f.sources);
                prop_assert_eq!(first.0, second.0);
                prop_assert_eq!(first.1, second.1);
            }
        }
    }
}
