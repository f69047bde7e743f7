//! Structured-output parsing with bounded repair retries
//!
//! LLM output that fails schema validation is retried with a repair prompt up
//! to a configured number of attempts; callers then degrade to a safe default
//! rather than loop unbounded.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use veracity_domain::{CapabilityError, CompletionCapability};

/// Extract JSON from a completion, tolerating markdown code fences
///
/// LLMs sometimes wrap JSON in ```json blocks despite instructions.
pub fn extract_json(response: &str) -> Result<String, CapabilityError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(CapabilityError::Schema("empty code block".to_string()));
        }
        // Skip the opening fence and a trailing fence if present
        let end = if lines.last().map(|l| l.trim().starts_with("```")) == Some(true) {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Complete a prompt and parse the result as `T`, repairing on violation
///
/// On a schema violation the model is re-prompted with the parse error and
/// its previous output, up to `max_repairs` additional attempts. Provider
/// errors are returned immediately (retry/backoff is the transport's job).
pub async fn complete_structured<T: DeserializeOwned>(
    completion: &dyn CompletionCapability,
    prompt: &str,
    schema: &str,
    max_tokens: u32,
    max_repairs: u32,
) -> Result<T, CapabilityError> {
    let mut current_prompt = prompt.to_string();
    let mut last_error = String::new();

    for attempt in 0..=max_repairs {
        let raw = completion
            .complete(&current_prompt, schema, max_tokens)
            .await?;

        let json = match extract_json(&raw) {
            Ok(json) => json,
            Err(e) => {
                last_error = e.to_string();
                current_prompt = repair_prompt(prompt, &raw, &last_error);
                continue;
            }
        };

        match serde_json::from_str::<T>(&json) {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempt, "structured output recovered after repair");
                }
                return Ok(value);
            }
            Err(e) => {
                last_error = e.to_string();
                warn!(attempt, error = %last_error, "structured output failed validation");
                current_prompt = repair_prompt(prompt, &raw, &last_error);
            }
        }
    }

    Err(CapabilityError::Schema(format!(
        "output failed validation after {} repair attempts: {}",
        max_repairs, last_error
    )))
}

fn repair_prompt(original: &str, bad_output: &str, error: &str) -> String {
    format!(
        "{}\n\nYour previous output was not valid:\n{}\n\nError: {}\n\n\
         Return ONLY corrected JSON matching the requested format.",
        original, bad_output, error
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockCompletion;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        value: u32,
    }

    #[test]
    fn test_extract_plain_json() {
        let json = r#"{"value": 1}"#;
        assert_eq!(extract_json(json).unwrap(), json);
    }

    #[test]
    fn test_extract_fenced_json() {
        let response = "```json\n{\"value\": 1}\n```";
        assert_eq!(extract_json(response).unwrap().trim(), r#"{"value": 1}"#);
    }

    #[test]
    fn test_extract_fence_without_language() {
        let response = "```\n{\"value\": 2}\n```";
        assert!(extract_json(response).unwrap().contains("value"));
    }

    #[tokio::test]
    async fn test_parses_first_try() {
        let mock = MockCompletion::new(r#"{"value": 7}"#);
        let parsed: Sample = complete_structured(&mock, "prompt", "{}", 64, 2)
            .await
            .unwrap();
        assert_eq!(parsed, Sample { value: 7 });
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_repairs_after_bad_output() {
        let mock = MockCompletion::new("unused");
        mock.push_response("this is not json");
        mock.push_response(r#"{"value": 3}"#);

        let parsed: Sample = complete_structured(&mock, "prompt", "{}", 64, 2)
            .await
            .unwrap();
        assert_eq!(parsed.value, 3);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let mock = MockCompletion::new("still not json");

        let result: Result<Sample, _> = complete_structured(&mock, "prompt", "{}", 64, 2).await;
        assert!(matches!(result, Err(CapabilityError::Schema(_))));
        // Initial attempt plus two repairs
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_provider_error_not_repaired() {
        let mock = MockCompletion::default();
        mock.fail_on("prompt");

        let result: Result<Sample, _> = complete_structured(&mock, "prompt", "{}", 64, 3).await;
        assert!(matches!(result, Err(CapabilityError::Provider(_))));
        assert_eq!(mock.call_count(), 1);
    }
}
