//! Evidence classification: category, stance and probative value
//!
//! Classification is lexical and deterministic. Stance is always computed
//! against the claim exactly as phrased; comparative claims keep their
//! direction, so "A is greater than B" with evidence that B is greater
//! classifies as opposing, never as support for the inverted form.

use crate::dedup::jaccard;
use crate::queries::tokenize;
use std::collections::HashSet;
use veracity_domain::{EvidenceCategory, Stance};

const REFUTATION_MARKERS: &[&str] = &[
    "no evidence",
    "not true",
    "denied",
    "denies",
    "refuted",
    "refutes",
    "debunked",
    "false",
    "incorrect",
    "disputed",
    "disputes",
    "contrary to",
    "never happened",
    "retracted",
];

const CRITICISM_MARKERS: &[&str] = &["criticiz", "criticis", "condemn", "objection", "backlash"];

const LEGAL_MARKERS: &[&str] = &[
    "statute", "regulation", "court", "ruling", "tribunal", "section", "article", "act of",
    "pursuant",
];

const QUOTE_MARKERS: &[&str] = &[
    "according to",
    "said",
    "stated",
    "told reporters",
    "professor",
    "analyst",
    "researcher",
];

const EVENT_MARKERS: &[&str] = &[
    "occurred", "happened", "took place", "seized", "signed", "announced", "launched", "erupted",
    "collapsed",
];

const COMPARATIVE_WORDS: &[&str] = &[
    "greater", "larger", "higher", "bigger", "better", "more", "smaller", "lower", "less", "worse",
];

/// Classify an evidence statement's category
pub fn classify_category(statement: &str) -> EvidenceCategory {
    let lower = statement.to_lowercase();

    if LEGAL_MARKERS.iter().any(|m| lower.contains(m)) {
        return EvidenceCategory::LegalProvision;
    }
    if CRITICISM_MARKERS.iter().any(|m| lower.contains(m)) {
        return EvidenceCategory::Criticism;
    }
    if QUOTE_MARKERS.iter().any(|m| lower.contains(m)) {
        return EvidenceCategory::ExpertQuote;
    }
    if lower.contains('%')
        || lower.contains(" percent")
        || lower.split_whitespace().filter(|w| w.chars().all(|c| c.is_ascii_digit())).count() >= 2
    {
        return EvidenceCategory::Statistic;
    }
    if EVENT_MARKERS.iter().any(|m| lower.contains(m)) {
        return EvidenceCategory::Event;
    }

    EvidenceCategory::DirectEvidence
}

/// Classify a statement's stance toward a claim
pub fn classify_stance(claim_text: &str, statement: &str) -> Stance {
    let overlap = jaccard(claim_text, statement);
    let lower = statement.to_lowercase();

    // Swapped comparative direction is opposition even when every token
    // overlaps
    if let (Some(claim_cmp), Some(statement_cmp)) =
        (comparative_sides(claim_text), comparative_sides(statement))
    {
        if sides_swapped(&claim_cmp, &statement_cmp) {
            return Stance::Opposing;
        }
    }

    let refutes = REFUTATION_MARKERS.iter().any(|m| lower.contains(m));
    if refutes && overlap >= 0.1 {
        return Stance::Opposing;
    }

    if overlap >= 0.25 {
        Stance::Supporting
    } else {
        Stance::Neutral
    }
}

/// Probative value of an item toward a verdict, [0.0, 1.0]
///
/// Combines source reliability with a category weight; derivative copies are
/// heavily discounted so syndication cannot double-count.
pub fn probative_value(
    reliability: f64,
    category: EvidenceCategory,
    is_derivative: bool,
) -> f64 {
    let category_weight = match category {
        EvidenceCategory::LegalProvision => 1.0,
        EvidenceCategory::Statistic => 0.95,
        EvidenceCategory::DirectEvidence => 0.9,
        EvidenceCategory::Event => 0.85,
        EvidenceCategory::ExpertQuote => 0.8,
        EvidenceCategory::Criticism => 0.75,
    };
    let derivative_factor = if is_derivative { 0.3 } else { 1.0 };

    (reliability.clamp(0.0, 1.0) * category_weight * derivative_factor).clamp(0.0, 1.0)
}

/// The (left, right) token sets of a comparative "X <cmp> than Y" pattern
fn comparative_sides(text: &str) -> Option<(HashSet<String>, HashSet<String>)> {
    let tokens = tokenize(text);
    let than_pos = tokens.iter().position(|t| t == "than")?;
    let cmp_pos = tokens[..than_pos]
        .iter()
        .rposition(|t| COMPARATIVE_WORDS.contains(&t.as_str()))?;

    let left: HashSet<String> = tokens[..cmp_pos].iter().cloned().collect();
    let right: HashSet<String> = tokens[than_pos + 1..].iter().cloned().collect();
    if left.is_empty() || right.is_empty() {
        return None;
    }
    Some((left, right))
}

fn sides_swapped(
    claim: &(HashSet<String>, HashSet<String>),
    statement: &(HashSet<String>, HashSet<String>),
) -> bool {
    let left_moved_right = claim.0.intersection(&statement.1).next().is_some();
    let right_moved_left = claim.1.intersection(&statement.0).next().is_some();
    let left_stayed = claim.0.intersection(&statement.0).next().is_some();

    left_moved_right && right_moved_left && !left_stayed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_legal() {
        assert_eq!(
            classify_category("The tribunal ruling cited section 12 of the act"),
            EvidenceCategory::LegalProvision
        );
    }

    #[test]
    fn test_category_statistic() {
        assert_eq!(
            classify_category("Output fell 14% year over year"),
            EvidenceCategory::Statistic
        );
    }

    #[test]
    fn test_category_expert_quote() {
        assert_eq!(
            classify_category("According to Prof. Lindqvist the data is sound"),
            EvidenceCategory::ExpertQuote
        );
    }

    #[test]
    fn test_category_criticism() {
        assert_eq!(
            classify_category("Watchdog groups criticized the methodology"),
            EvidenceCategory::Criticism
        );
    }

    #[test]
    fn test_category_event() {
        assert_eq!(
            classify_category("The merger took place on 3 March"),
            EvidenceCategory::Event
        );
    }

    #[test]
    fn test_stance_supporting() {
        let stance = classify_stance(
            "Acme seized the Port of Dover in 2021",
            "Acme seized the Port of Dover in March 2021",
        );
        assert_eq!(stance, Stance::Supporting);
    }

    #[test]
    fn test_stance_opposing_on_refutation() {
        let stance = classify_stance(
            "Acme seized the Port of Dover in 2021",
            "Officials said there is no evidence Acme seized the Port of Dover",
        );
        assert_eq!(stance, Stance::Opposing);
    }

    #[test]
    fn test_stance_neutral_on_unrelated() {
        let stance = classify_stance(
            "Acme seized the Port of Dover in 2021",
            "Rainfall totals broke records across the region",
        );
        assert_eq!(stance, Stance::Neutral);
    }

    #[test]
    fn test_comparative_direction_preserved() {
        // Evidence asserting the swapped comparative opposes the claim as
        // phrased; it must not read as support for the inverted form
        let stance = classify_stance(
            "The Alpha reactor output is greater than the Beta reactor output",
            "Measurements show the Beta reactor output is greater than the Alpha reactor output",
        );
        assert_eq!(stance, Stance::Opposing);
    }

    #[test]
    fn test_comparative_same_direction_supports() {
        let stance = classify_stance(
            "Alpha output is greater than Beta output",
            "Alpha output is greater than Beta output this quarter",
        );
        assert_eq!(stance, Stance::Supporting);
    }

    #[test]
    fn test_probative_value_derivative_discount() {
        let fresh = probative_value(0.8, EvidenceCategory::DirectEvidence, false);
        let copy = probative_value(0.8, EvidenceCategory::DirectEvidence, true);
        assert!(copy < fresh);
        assert!((copy - fresh * 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_probative_value_bounded() {
        assert!(probative_value(1.5, EvidenceCategory::LegalProvision, false) <= 1.0);
        assert!(probative_value(-0.5, EvidenceCategory::Criticism, true) >= 0.0);
    }
}
