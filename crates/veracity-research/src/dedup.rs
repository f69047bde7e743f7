//! Near-duplicate detection for evidence statements
//!
//! Textually near-identical statements from the same source are dropped;
//! the same statement from a different source is kept but flagged as a
//! syndicated (derivative) copy so it cannot double-count in a verdict.

use crate::queries::tokenize;
use std::collections::HashSet;

/// Token-set Jaccard similarity of two texts
pub fn jaccard(a: &str, b: &str) -> f64 {
    let set_a: HashSet<String> = tokenize(a).into_iter().collect();
    let set_b: HashSet<String> = tokenize(b).into_iter().collect();

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }

    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;
    intersection / union
}

/// Whether two statements are near-duplicates at the given threshold
pub fn near_duplicate(a: &str, b: &str, threshold: f64) -> bool {
    jaccard(a, b) >= threshold
}

/// Canonical form used for exact-duplicate comparison
pub fn normalize_statement(text: &str) -> String {
    tokenize(text).join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_statements() {
        assert_eq!(jaccard("Acme seized the port", "Acme seized the port"), 1.0);
    }

    #[test]
    fn test_syndicated_rewrite_is_near_duplicate() {
        let original = "Acme Corp seized the Port of Dover on Tuesday";
        let syndicated = "Acme Corp seized the Port of Dover on Tuesday.";
        assert!(near_duplicate(original, syndicated, 0.75));
    }

    #[test]
    fn test_different_statements_are_not() {
        let a = "Acme Corp seized the Port of Dover";
        let b = "Water levels in the reservoir fell forty percent";
        assert!(!near_duplicate(a, b, 0.75));
    }

    #[test]
    fn test_partial_overlap_below_threshold() {
        let a = "Acme Corp seized the Port of Dover in March";
        let b = "Acme Corp denied any wrongdoing in the port case";
        assert!(jaccard(a, b) < 0.5);
    }

    #[test]
    fn test_normalize_statement() {
        assert_eq!(
            normalize_statement("Acme—Corp  seized; the PORT!"),
            "acme corp seized the port"
        );
    }
}
