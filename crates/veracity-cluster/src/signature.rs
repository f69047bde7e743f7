//! Context signatures: the evidence-grounded dimensions a claim carries
//!
//! A dimension only counts when it appears in both the claim text and at
//! least one retrieved evidence statement for that claim. Surface similarity
//! between claim texts is never used as a grouping signal on its own.

use std::fmt;
use veracity_domain::{EvidenceCategory, EvidenceItem};

const METHODOLOGY_TERMS: &[&str] = &[
    "survey", "poll", "census", "model", "simulation", "satellite", "measurement", "trial",
    "study", "audit", "sampling",
];

const JURISDICTION_TERMS: &[&str] = &[
    "federal",
    "state",
    "county",
    "municipal",
    "provincial",
    "national",
    "supreme court",
    "district court",
    "appeals court",
    "tribunal",
];

/// A distinguishing metadata dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// Distinct timeframe (a year)
    Timeframe,
    /// Distinct measurement or analysis methodology
    Methodology,
    /// Distinct legal or administrative jurisdiction
    Jurisdiction,
}

impl Dimension {
    /// Get the canonical string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Timeframe => "timeframe",
            Dimension::Methodology => "methodology",
            Dimension::Jurisdiction => "jurisdiction",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete (dimension, value) pair, e.g. `timeframe=2021`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DimensionValue {
    /// The dimension kind
    pub dimension: Dimension,
    /// The observed value
    pub value: String,
}

/// The evidence-grounded dimensions of one claim
///
/// Candidates come from the claim text; each is confirmed only if some
/// evidence statement for the claim mentions the same value. A claim with no
/// evidence has no signal.
pub fn claim_dimensions(claim_text: &str, evidence: &[&EvidenceItem]) -> Vec<DimensionValue> {
    let claim_lower = claim_text.to_lowercase();
    let evidence_lower: Vec<String> =
        evidence.iter().map(|e| e.statement.to_lowercase()).collect();
    let confirmed = |value: &str| evidence_lower.iter().any(|s| s.contains(value));

    let mut out = Vec::new();

    for year in years_in(&claim_lower) {
        if confirmed(&year) {
            out.push(DimensionValue {
                dimension: Dimension::Timeframe,
                value: year,
            });
        }
    }
    for term in METHODOLOGY_TERMS {
        if claim_lower.contains(term) && confirmed(term) {
            out.push(DimensionValue {
                dimension: Dimension::Methodology,
                value: term.to_string(),
            });
        }
    }
    for term in JURISDICTION_TERMS {
        if claim_lower.contains(term) && confirmed(term) {
            out.push(DimensionValue {
                dimension: Dimension::Jurisdiction,
                value: term.to_string(),
            });
        }
    }

    out.sort();
    out.dedup();
    out
}

/// Normalized evidence-category histogram for a set of evidence items
pub fn category_histogram(evidence: &[&EvidenceItem]) -> [f64; EvidenceCategory::ALL.len()] {
    let mut counts = [0.0f64; EvidenceCategory::ALL.len()];
    for item in evidence {
        counts[item.category.index()] += 1.0;
    }
    let total: f64 = counts.iter().sum();
    if total > 0.0 {
        for c in &mut counts {
            *c /= total;
        }
    }
    counts
}

/// Cosine similarity of two histograms; empty histograms compare as 1.0
pub fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 && norm_b == 0.0 {
        return 1.0;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Four-digit years in plausible range, in order of appearance
fn years_in(text: &str) -> Vec<String> {
    let mut years = Vec::new();
    for token in text.split(|c: char| !c.is_ascii_digit()) {
        if token.len() == 4 {
            if let Ok(n) = token.parse::<u32>() {
                if (1900..2100).contains(&n) && !years.contains(&token.to_string()) {
                    years.push(token.to_string());
                }
            }
        }
    }
    years
}
