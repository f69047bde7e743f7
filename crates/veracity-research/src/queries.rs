//! Search query generation
//!
//! Every claim gets an initial query plus at least one contrarian query that
//! inverts the claim's polarity, so the evidence pool is never one-sided by
//! construction.

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "of", "in", "on", "at",
    "to", "for", "and", "or", "but", "with", "by", "from", "that", "this", "these", "those", "it",
    "its", "as", "has", "have", "had", "did", "does", "do", "not", "than",
];

const CONTRARIAN_TERMS: &[&str] = &["criticism", "disputed", "debunked"];

const REFINEMENT_OPPOSING_TERMS: &[&str] = &["evidence against", "fact check", "refuted"];

const REFINEMENT_SUPPORTING_TERMS: &[&str] = &["confirmed", "official report", "verified"];

/// Lowercase alphanumeric tokens of a text
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Content keywords of a claim, in order, deduplicated, capped at `limit`
pub fn keywords(text: &str, limit: usize) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .filter(|t| seen.insert(t.clone()))
        .take(limit)
        .collect()
}

/// The initial query for a claim
pub fn initial_query(claim_text: &str) -> String {
    keywords(claim_text, 8).join(" ")
}

/// A contrarian query: the claim's keywords plus polarity-inverting terms
///
/// If the claim asserts "X is good" this surfaces "X problems/criticism"
/// style results.
pub fn contrarian_query(claim_text: &str) -> String {
    let mut parts = keywords(claim_text, 6);
    parts.extend(CONTRARIAN_TERMS.iter().map(|t| t.to_string()));
    parts.join(" ")
}

/// A refinement query for later iterations, targeting the stance the pool
/// is missing
pub fn refinement_query(claim_text: &str, iteration: u32, missing_opposing: bool) -> String {
    let mut parts = keywords(claim_text, 6);
    let extra = if missing_opposing {
        REFINEMENT_OPPOSING_TERMS
    } else {
        REFINEMENT_SUPPORTING_TERMS
    };
    // Rotate through variants so repeated iterations do not repeat queries
    let pick = extra[(iteration as usize) % extra.len()];
    parts.push(pick.to_string());
    parts.join(" ")
}
