//! Analysis boundaries - distinct analytical contexts
//!
//! When an input implies more than one line of assessment (two legal
//! proceedings, two measurement methodologies, two timeframes), claims are
//! grouped into boundaries and each boundary gets its own assessment.

use crate::ids::{BoundaryId, ClaimId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A distinct analytical context owning a disjoint subset of claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBoundary {
    /// Unique identifier
    pub id: BoundaryId,

    /// Human-readable label (e.g. "2021 proceedings", "survey methodology")
    pub label: String,

    /// Distinguishing dimensions, e.g. {"timeframe": "2021"} or
    /// {"methodology": "survey"}
    ///
    /// A `BTreeMap` keeps serialization deterministic.
    pub metadata: BTreeMap<String, String>,

    /// Claims owned by this boundary
    pub claim_ids: Vec<ClaimId>,
}

impl AnalysisBoundary {
    /// Create a boundary with a label and no metadata
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: BoundaryId::new(),
            label: label.into(),
            metadata: BTreeMap::new(),
            claim_ids: Vec::new(),
        }
    }

    /// Add a distinguishing metadata dimension
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the boundary owns the given claim
    pub fn owns(&self, claim_id: ClaimId) -> bool {
        self.claim_ids.contains(&claim_id)
    }
}

/// Check that every claim is assigned to exactly one boundary
///
/// Returns the ids of unassigned claims and of claims assigned to more than
/// one boundary. Both lists empty means the partition invariant holds.
pub fn partition_violations(
    claim_ids: &[ClaimId],
    boundaries: &[AnalysisBoundary],
) -> (Vec<ClaimId>, Vec<ClaimId>) {
    let mut unassigned = Vec::new();
    let mut multiply_assigned = Vec::new();

    for &claim_id in claim_ids {
        let owners = boundaries.iter().filter(|b| b.owns(claim_id)).count();
        match owners {
            0 => unassigned.push(claim_id),
            1 => {}
            _ => multiply_assigned.push(claim_id),
        }
    }

    (unassigned, multiply_assigned)
}
