//! Boundary clustering with cap enforcement

use crate::config::ClusterConfig;
use crate::error::ClusterError;
use crate::signature::{self, DimensionValue};
use std::collections::HashMap;
use tracing::{debug, info};
use veracity_domain::{AnalysisBoundary, AtomicClaim, ClaimId, EvidenceItem, EvidenceLink};

/// The clustering stage's output: boundaries plus the claims with their
/// boundary assignment recorded
#[derive(Debug, Clone)]
pub struct Clustering {
    /// The analysis boundaries, a disjoint cover of all claims
    pub boundaries: Vec<AnalysisBoundary>,

    /// The input claims with `boundary_id` set
    pub claims: Vec<AtomicClaim>,
}

/// Groups claims into analysis boundaries
pub struct Clusterer {
    config: ClusterConfig,
}

impl Clusterer {
    /// Create a new clusterer
    pub fn new(config: ClusterConfig) -> Result<Self, ClusterError> {
        config.validate().map_err(ClusterError::Config)?;
        Ok(Self { config })
    }

    /// Partition claims into boundaries
    ///
    /// Claims sharing an evidence-confirmed dimension value are grouped;
    /// claims with no signal go to a single default boundary. If candidates
    /// exceed the cap, the closest pair by evidence-category similarity is
    /// merged until the cap holds. Every input claim ends up in exactly one
    /// boundary.
    pub fn cluster(
        &self,
        claims: &[AtomicClaim],
        evidence: &[EvidenceItem],
        links: &[EvidenceLink],
    ) -> Clustering {
        let evidence_by_claim = index_evidence(evidence, links);

        // Union claims that share any confirmed (dimension, value) pair
        let mut groups = DisjointSets::new(claims.len());
        let mut dims_per_claim: Vec<Vec<DimensionValue>> = Vec::with_capacity(claims.len());
        let mut first_claim_with: HashMap<DimensionValue, usize> = HashMap::new();

        for (i, claim) in claims.iter().enumerate() {
            let items = evidence_by_claim
                .get(&claim.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let dims = signature::claim_dimensions(&claim.text, items);
            for dim in &dims {
                match first_claim_with.get(dim) {
                    Some(&j) => groups.union(i, j),
                    None => {
                        first_claim_with.insert(dim.clone(), i);
                    }
                }
            }
            dims_per_claim.push(dims);
        }

        let mut candidates = self.collect_candidates(claims, &dims_per_claim, &groups);
        debug!(candidates = candidates.len(), "Candidate boundaries formed");

        self.enforce_cap(&mut candidates, claims, &evidence_by_claim);

        let boundaries = materialize(candidates, claims, &dims_per_claim);
        let assigned: Vec<AtomicClaim> = claims
            .iter()
            .map(|c| {
                // Built as a disjoint cover, so the owner always exists
                let owner = boundaries
                    .iter()
                    .find(|b| b.owns(c.id))
                    .map(|b| b.id)
                    .unwrap_or(boundaries[0].id);
                c.with_boundary(owner)
            })
            .collect();

        info!(
            boundaries = boundaries.len(),
            claims = assigned.len(),
            "Clustering complete"
        );
        Clustering {
            boundaries,
            claims: assigned,
        }
    }

    /// Candidate groups as claim-index lists, signalless claims pooled into
    /// a trailing default group
    fn collect_candidates(
        &self,
        claims: &[AtomicClaim],
        dims_per_claim: &[Vec<DimensionValue>],
        groups: &DisjointSets,
    ) -> Vec<Vec<usize>> {
        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut default_group: Vec<usize> = Vec::new();

        for i in 0..claims.len() {
            if dims_per_claim[i].is_empty() {
                default_group.push(i);
            } else {
                by_root.entry(groups.find(i)).or_default().push(i);
            }
        }

        // Deterministic order: by the first claim's position in the input
        let mut candidates: Vec<Vec<usize>> = by_root.into_values().collect();
        candidates.sort_by_key(|members| members[0]);

        // Undersized groups have too little signal to stand alone
        let min = self.config.min_claims_per_boundary;
        let (kept, undersized): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|m| m.len() >= min);
        let mut candidates = kept;
        for members in undersized {
            default_group.extend(members);
        }
        default_group.sort_unstable();

        if !default_group.is_empty() || candidates.is_empty() {
            candidates.push(default_group);
        }
        candidates
    }

    /// Merge closest candidate pairs until the cap is satisfied
    fn enforce_cap(
        &self,
        candidates: &mut Vec<Vec<usize>>,
        claims: &[AtomicClaim],
        evidence_by_claim: &HashMap<ClaimId, Vec<&EvidenceItem>>,
    ) {
        while candidates.len() > self.config.max_boundaries {
            let histograms: Vec<_> = candidates
                .iter()
                .map(|members| group_histogram(members, claims, evidence_by_claim))
                .collect();

            // Highest similarity wins; ties resolve to the earliest pair
            let mut best = (0usize, 1usize);
            let mut best_sim = f64::NEG_INFINITY;
            for a in 0..candidates.len() {
                for b in (a + 1)..candidates.len() {
                    let sim = signature::cosine(&histograms[a], &histograms[b]);
                    if sim > best_sim {
                        best_sim = sim;
                        best = (a, b);
                    }
                }
            }

            let (a, b) = best;
            debug!(a, b, similarity = best_sim, "Merging boundaries to satisfy cap");
            let absorbed = candidates.remove(b);
            candidates[a].extend(absorbed);
            candidates[a].sort_unstable();
        }
    }
}

/// Per-claim evidence lookup built from the link table
fn index_evidence<'a>(
    evidence: &'a [EvidenceItem],
    links: &[EvidenceLink],
) -> HashMap<ClaimId, Vec<&'a EvidenceItem>> {
    let by_id: HashMap<_, _> = evidence.iter().map(|e| (e.id, e)).collect();
    let mut out: HashMap<ClaimId, Vec<&EvidenceItem>> = HashMap::new();
    for link in links {
        if let Some(item) = by_id.get(&link.evidence_id) {
            out.entry(link.claim_id).or_default().push(item);
        }
    }
    out
}

fn group_histogram(
    members: &[usize],
    claims: &[AtomicClaim],
    evidence_by_claim: &HashMap<ClaimId, Vec<&EvidenceItem>>,
) -> [f64; veracity_domain::EvidenceCategory::ALL.len()] {
    let items: Vec<&EvidenceItem> = members
        .iter()
        .filter_map(|&i| evidence_by_claim.get(&claims[i].id))
        .flatten()
        .copied()
        .collect();
    signature::category_histogram(&items)
}

/// Turn index groups into labelled boundaries
fn materialize(
    candidates: Vec<Vec<usize>>,
    claims: &[AtomicClaim],
    dims_per_claim: &[Vec<DimensionValue>],
) -> Vec<AnalysisBoundary> {
    candidates
        .into_iter()
        .map(|members| {
            // Dimensions shared by every member label the boundary
            let shared: Vec<&DimensionValue> = match members.first() {
                Some(&first) => dims_per_claim[first]
                    .iter()
                    .filter(|d| members.iter().all(|&i| dims_per_claim[i].contains(d)))
                    .collect(),
                None => Vec::new(),
            };

            let label = if shared.is_empty() {
                "general".to_string()
            } else {
                shared
                    .iter()
                    .map(|d| format!("{}={}", d.dimension, d.value))
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            let mut boundary = AnalysisBoundary::new(label);
            for dim in shared {
                boundary
                    .metadata
                    .insert(dim.dimension.as_str().to_string(), dim.value.clone());
            }
            boundary.claim_ids = members.iter().map(|&i| claims[i].id).collect();
            boundary
        })
        .collect()
}

/// Union-find over claim indices
struct DisjointSets {
    parent: Vec<std::cell::Cell<usize>>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).map(std::cell::Cell::new).collect(),
        }
    }

    fn find(&self, mut i: usize) -> usize {
        while self.parent[i].get() != i {
            let grandparent = self.parent[self.parent[i].get()].get();
            self.parent[i].set(grandparent);
            i = grandparent;
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            // Lower root wins so grouping is order-independent
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi].set(lo);
        }
    }
}
