//! Input normalization
//!
//! Boundary detection and verdicts must be invariant to whether the input was
//! phrased as a question or a statement, so every question-form sentence is
//! canonicalized to a statement before extraction. This is a correctness
//! property, not cosmetics.

const BE_AUXILIARIES: &[&str] = &["is", "are", "was", "were"];
const DO_AUXILIARIES: &[&str] = &["do", "does", "did"];
const MODAL_AUXILIARIES: &[&str] = &["has", "have", "had", "can", "could", "will", "would"];

/// Normalize input text: collapse whitespace and canonicalize question-form
/// sentences into statements
pub fn normalize_input(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    split_sentences(&collapsed)
        .into_iter()
        .map(|s| canonicalize_sentence(&s))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split text into sentences on terminal punctuation, keeping the terminator
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            let trimmed = current.trim().to_string();
            if !trimmed.is_empty() {
                sentences.push(trimmed);
            }
            current.clear();
        }
    }

    let trailing = current.trim();
    if !trailing.is_empty() {
        sentences.push(trailing.to_string());
    }

    sentences
}

/// Canonicalize one sentence; non-questions pass through unchanged
fn canonicalize_sentence(sentence: &str) -> String {
    let trimmed = sentence.trim();
    if !trimmed.ends_with('?') {
        return trimmed.to_string();
    }

    let body = trimmed.trim_end_matches('?').trim();
    let statement = question_to_statement(body);
    if statement.is_empty() {
        return String::new();
    }

    let mut out = capitalize_first(&statement);
    out.push('.');
    out
}

/// Rewrite an interrogative word order into declarative order
///
/// Heuristic, not a parser: handles the scaffolding patterns that matter for
/// claim equivalence ("Is it true that C", "Is X Y", "Did X Y"). Sentences it
/// does not recognize are returned with only the question mark stripped.
fn question_to_statement(body: &str) -> String {
    let words: Vec<&str> = body.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }

    let first = words[0].to_lowercase();
    let lower_body = body.to_lowercase();

    // "Is it true that C" / "Is it the case that C" -> "C"
    for prefix in [
        "is it true that ",
        "is it the case that ",
        "is it correct that ",
    ] {
        if lower_body.starts_with(prefix) {
            return body[prefix.len()..].trim().to_string();
        }
    }

    // "Is X Y" -> "X is Y" (auxiliary moved before the predicate tail)
    if BE_AUXILIARIES.contains(&first.as_str()) && words.len() >= 3 {
        let aux = &first;
        let rest = &words[1..];
        let (subject, predicate) = rest.split_at(rest.len() - 1);
        return format!("{} {} {}", subject.join(" "), aux, predicate.join(" "));
    }

    // "Did X Y" -> "X Y" (tense marker dropped; lexical content preserved)
    if DO_AUXILIARIES.contains(&first.as_str()) && words.len() >= 3 {
        return words[1..].join(" ");
    }

    // "Has X Y" -> "X has Y"
    if MODAL_AUXILIARIES.contains(&first.as_str()) && words.len() >= 3 {
        return format!("{} {} {}", words[1], first, words[2..].join(" "));
    }

    body.to_string()
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
