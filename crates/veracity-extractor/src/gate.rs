//! Gate 1 - claim validation
//!
//! A claim fails Gate 1 if it is primarily opinion (hedging-language score
//! above threshold), a future prediction, or lacks concrete specificity (no
//! names, numbers, dates or locations). Scoring is lexical and deterministic;
//! the thresholds live in [`crate::ExtractorConfig`].

use crate::config::ExtractorConfig;

const HEDGING_TERMS: &[&str] = &[
    "i think",
    "i believe",
    "i feel",
    "in my opinion",
    "probably",
    "perhaps",
    "maybe",
    "arguably",
    "seems",
    "likely",
    "possibly",
    "should be",
    "might",
];

const OPINION_TERMS: &[&str] = &[
    "best",
    "worst",
    "greatest",
    "terrible",
    "awful",
    "wonderful",
    "beautiful",
    "ugly",
    "mistake",
    "disgrace",
    "overrated",
    "underrated",
];

const FUTURE_MARKERS: &[&str] = &[
    "will ",
    "going to",
    "is expected to",
    "are expected to",
    "is projected to",
    "forecast to",
    "by the end of",
];

const TEMPORAL_RECENCY_TERMS: &[&str] = &[
    "yesterday",
    "today",
    "this week",
    "this month",
    "this year",
    "last week",
    "last month",
    "recently",
    "just announced",
    "breaking",
    "ongoing",
    "current",
];

const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Reason a claim failed Gate 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate1Failure {
    /// Hedging/opinion language dominates
    Opinion,
    /// The claim asserts something about the future
    FuturePrediction,
    /// No names, numbers, dates or locations to verify against
    NotSpecific,
}

/// Result of Gate 1 evaluation for one claim text
#[derive(Debug, Clone)]
pub struct Gate1Outcome {
    /// Opinion/hedging score [0.0, 1.0]
    pub opinion_score: f64,

    /// Specificity score [0.0, 1.0]
    pub specificity_score: f64,

    /// Whether the claim passed
    pub passed: bool,

    /// Failure reasons, empty when passed
    pub failures: Vec<Gate1Failure>,
}

/// Evaluate Gate 1 for a claim text
pub fn evaluate(text: &str, config: &ExtractorConfig) -> Gate1Outcome {
    let opinion = opinion_score(text);
    let specificity = specificity_score(text);

    let mut failures = Vec::new();
    if opinion > config.opinion_threshold {
        failures.push(Gate1Failure::Opinion);
    }
    if is_future_prediction(text) {
        failures.push(Gate1Failure::FuturePrediction);
    }
    if specificity < config.specificity_threshold {
        failures.push(Gate1Failure::NotSpecific);
    }

    Gate1Outcome {
        opinion_score: opinion,
        specificity_score: specificity,
        passed: failures.is_empty(),
        failures,
    }
}

/// Score hedging/opinion language in [0.0, 1.0]
///
/// Each hedge or judgment term adds weight; first-person hedges weigh double
/// since they mark the whole sentence as opinion.
pub fn opinion_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let word_count = lower.split_whitespace().count().max(1) as f64;

    let mut hits = 0.0;
    for term in HEDGING_TERMS {
        if lower.contains(term) {
            hits += if term.starts_with("i ") || term.starts_with("in my") {
                2.0
            } else {
                1.0
            };
        }
    }
    for term in OPINION_TERMS {
        if word_boundary_contains(&lower, term) {
            hits += 1.0;
        }
    }

    // Three weighted hits in a ten-word sentence saturate the score
    (hits * 3.0 / word_count).clamp(0.0, 1.0)
}

/// Score concrete specificity in [0.0, 1.0]
///
/// Counts verifiable anchors: digits, proper nouns, months, units.
pub fn specificity_score(text: &str) -> f64 {
    let mut anchors = 0.0;

    if text.chars().any(|c| c.is_ascii_digit()) {
        anchors += 1.0;
    }

    // Capitalized words past the first token approximate proper nouns
    let proper_nouns = text
        .split_whitespace()
        .skip(1)
        .filter(|w| w.chars().next().is_some_and(|c| c.is_uppercase()))
        .count();
    anchors += (proper_nouns as f64 * 0.5).min(1.5);

    let lower = text.to_lowercase();
    if MONTHS.iter().any(|m| word_boundary_contains(&lower, m)) {
        anchors += 0.5;
    }
    if lower.contains('%') || lower.contains('$') || lower.contains(" percent") {
        anchors += 0.5;
    }

    (anchors / 3.0).clamp(0.0, 1.0)
}

/// Whether the claim asserts a future outcome
pub fn is_future_prediction(text: &str) -> bool {
    let lower = text.to_lowercase();
    FUTURE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Whether the claim is recency-sensitive and should get date-scoped queries
///
/// Detection is generic (temporal keywords, years close to the reference
/// year), never keyed to named entities.
pub fn recency_sensitive(text: &str, reference_year: u32) -> bool {
    let lower = text.to_lowercase();

    if TEMPORAL_RECENCY_TERMS
        .iter()
        .any(|t| word_boundary_contains(&lower, t) || lower.contains(t))
    {
        return true;
    }

    // Explicit years within two of the reference year
    for token in lower.split(|c: char| !c.is_ascii_digit()) {
        if token.len() == 4 {
            if let Ok(year) = token.parse::<u32>() {
                if year.abs_diff(reference_year) <= 2 && year >= 1900 {
                    return true;
                }
            }
        }
    }

    false
}

fn word_boundary_contains(haystack: &str, needle: &str) -> bool {
    haystack
        .split(|c: char| !c.is_alphanumeric())
        .any(|w| w == needle)
        || haystack.contains(&format!(" {} ", needle))
}
