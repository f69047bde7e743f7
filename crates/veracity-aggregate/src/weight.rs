//! Claim contribution weights: role, confidence, and duplicate discounts
//!
//! One underlying fact phrased as several claims must not multiply its vote.
//! Near-duplicate claims inside a boundary (by text or by cited evidence
//! overlap) form a group whose combined weight is capped at a multiple of its
//! heaviest member; members are scaled down proportionally.

use crate::config::AggregatorConfig;
use std::collections::{HashMap, HashSet};
use veracity_domain::{AtomicClaim, ClaimId, ClaimRole, ClaimVerdict, EvidenceId};

/// Weight contributed by a claim's structural role
pub fn role_weight(role: ClaimRole, config: &AggregatorConfig) -> f64 {
    match role {
        ClaimRole::Core => config.core_weight,
        ClaimRole::Attribution | ClaimRole::Source | ClaimRole::Timing => {
            config.support_role_weight
        }
    }
}

/// Final per-claim weights for one boundary's scored claims
///
/// `evidence_ids` maps each claim to the evidence linked to it; it drives the
/// evidence-overlap half of duplicate detection.
pub fn claim_weights(
    pairs: &[(&AtomicClaim, &ClaimVerdict)],
    evidence_ids: &HashMap<ClaimId, HashSet<EvidenceId>>,
    config: &AggregatorConfig,
) -> HashMap<ClaimId, f64> {
    let base: Vec<f64> = pairs
        .iter()
        .map(|(claim, verdict)| {
            role_weight(claim.role, config) * verdict.confidence.as_fraction()
        })
        .collect();

    let groups = duplicate_groups(pairs, evidence_ids, config);

    let mut weights = HashMap::new();
    for group in groups {
        let sum: f64 = group.iter().map(|&i| base[i]).sum();
        let heaviest = group.iter().map(|&i| base[i]).fold(0.0f64, f64::max);
        let cap = heaviest * config.duplicate_group_cap;
        let scale = if sum > cap && sum > 0.0 { cap / sum } else { 1.0 };

        for &i in &group {
            weights.insert(pairs[i].0.id, base[i] * scale);
        }
    }
    weights
}

/// Indices of `pairs` grouped into near-duplicate sets (singletons included)
fn duplicate_groups(
    pairs: &[(&AtomicClaim, &ClaimVerdict)],
    evidence_ids: &HashMap<ClaimId, HashSet<EvidenceId>>,
    config: &AggregatorConfig,
) -> Vec<Vec<usize>> {
    let n = pairs.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut Vec<usize>, mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for a in 0..n {
        for b in (a + 1)..n {
            if is_near_duplicate(pairs[a].0, pairs[b].0, evidence_ids, config) {
                let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
                if ra != rb {
                    let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
                    parent[hi] = lo;
                }
            }
        }
    }

    let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        by_root.entry(root).or_default().push(i);
    }
    let mut groups: Vec<Vec<usize>> = by_root.into_values().collect();
    groups.sort_by_key(|g| g[0]);
    groups
}

fn is_near_duplicate(
    a: &AtomicClaim,
    b: &AtomicClaim,
    evidence_ids: &HashMap<ClaimId, HashSet<EvidenceId>>,
    config: &AggregatorConfig,
) -> bool {
    if text_jaccard(&a.text, &b.text) >= config.duplicate_text_threshold {
        return true;
    }
    match (evidence_ids.get(&a.id), evidence_ids.get(&b.id)) {
        (Some(ea), Some(eb)) if !ea.is_empty() && !eb.is_empty() => {
            let intersection = ea.intersection(eb).count() as f64;
            let union = ea.union(eb).count() as f64;
            intersection / union >= config.duplicate_evidence_threshold
        }
        _ => false,
    }
}

fn text_jaccard(a: &str, b: &str) -> f64 {
    let tokens = |s: &str| -> HashSet<String> {
        s.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    };
    let (sa, sb) = (tokens(a), tokens(b));
    if sa.is_empty() && sb.is_empty() {
        return 1.0;
    }
    let intersection = sa.intersection(&sb).count() as f64;
    let union = sa.union(&sb).count() as f64;
    intersection / union
}
