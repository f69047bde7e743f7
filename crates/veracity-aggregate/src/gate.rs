//! Gate 4 - the publication quality gate
//!
//! A verdict is publishable only when it rests on enough evidence, from
//! reliable-enough sources, that mostly agrees. Anything weaker is published
//! flagged or withheld as insufficient, never silently presented as solid.

use crate::config::AggregatorConfig;
use std::collections::HashMap;
use tracing::debug;
use veracity_domain::{EvidenceItem, QualityGateStatus, Source, SourceId, Stance};

/// Evaluate the gate over the evidence behind one assessment
pub fn evaluate(
    evidence: &[&EvidenceItem],
    sources: &HashMap<SourceId, &Source>,
    config: &AggregatorConfig,
) -> QualityGateStatus {
    if evidence.len() < config.min_evidence_count {
        debug!(items = evidence.len(), "Gate 4: insufficient evidence");
        return QualityGateStatus::InsufficientEvidence;
    }

    let mean_reliability = evidence
        .iter()
        .map(|e| {
            sources
                .get(&e.source_id)
                .map(|s| s.reliability_score)
                .unwrap_or(0.5)
        })
        .sum::<f64>()
        / evidence.len() as f64;

    if mean_reliability < config.min_mean_reliability {
        debug!(mean_reliability, "Gate 4: source reliability below floor");
        return QualityGateStatus::Flagged;
    }

    if agreement_ratio(evidence) < config.min_agreement_ratio {
        debug!("Gate 4: evidence is contested");
        return QualityGateStatus::Flagged;
    }

    QualityGateStatus::Publishable
}

/// Share of non-neutral evidence on the majority side
///
/// All-neutral evidence counts as full agreement; the reliability and count
/// checks still apply.
pub fn agreement_ratio(evidence: &[&EvidenceItem]) -> f64 {
    let supporting = evidence.iter().filter(|e| e.stance == Stance::Supporting).count();
    let opposing = evidence.iter().filter(|e| e.stance == Stance::Opposing).count();
    let total = supporting + opposing;
    if total == 0 {
        return 1.0;
    }
    supporting.max(opposing) as f64 / total as f64
}
