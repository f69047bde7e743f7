//! Ollama completion adapter
//!
//! Integrates with Ollama's local LLM API for privacy and cost control.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use veracity_domain::{CapabilityError, CompletionCapability};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for LLM requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama-backed completion capability
pub struct OllamaCompletion {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    /// Ollama JSON mode: constrain output to valid JSON
    format: &'static str,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    num_predict: u32,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaCompletion {
    /// Create a new Ollama completion capability
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g. "http://localhost:11434")
    /// - `model`: model to use (e.g. "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a capability against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, CapabilityError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format: "json",
            options: OllamaOptions {
                num_predict: max_tokens,
            },
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(body) => Ok(body.response),
                            Err(e) => Err(CapabilityError::Schema(format!(
                                "failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(CapabilityError::Unavailable(self.model.clone()));
                    } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(CapabilityError::RateLimited);
                    } else {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "unknown error".to_string());
                        last_error = Some(CapabilityError::Provider(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) if e.is_timeout() => {
                    last_error = Some(CapabilityError::Timeout);
                }
                Err(e) => {
                    last_error = Some(CapabilityError::Provider(format!("request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| CapabilityError::Provider("max retries exceeded".to_string())))
    }
}

#[async_trait]
impl CompletionCapability for OllamaCompletion {
    async fn complete(
        &self,
        prompt: &str,
        schema: &str,
        max_tokens: u32,
    ) -> Result<String, CapabilityError> {
        // The schema is embedded in the prompt; Ollama's JSON mode constrains
        // the shape but callers still validate via the repair loop.
        let full_prompt = format!("{}\n\nRespond with JSON matching:\n{}", prompt, schema);
        self.generate(&full_prompt, max_tokens).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let cap = OllamaCompletion::new("http://localhost:11434", "llama3");
        assert_eq!(cap.endpoint, "http://localhost:11434");
        assert_eq!(cap.model, "llama3");
        assert_eq!(cap.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_default_endpoint() {
        let cap = OllamaCompletion::default_endpoint("mistral");
        assert_eq!(cap.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cap.model, "mistral");
    }

    #[test]
    fn test_with_max_retries() {
        let cap = OllamaCompletion::new("http://localhost:11434", "llama3").with_max_retries(5);
        assert_eq!(cap.max_retries, 5);
    }

    #[tokio::test]
    async fn test_error_on_unreachable_endpoint() {
        let cap = OllamaCompletion::new("http://localhost:1", "llama3").with_max_retries(1);

        let result = cap.complete("test", "{}", 64).await;
        assert!(result.is_err());
    }

    // Integration test (requires running Ollama)
    #[tokio::test]
    #[ignore]
    async fn test_generate_integration() {
        let cap = OllamaCompletion::default_endpoint("llama3");
        let result = cap.complete("Return an empty JSON object", "{}", 64).await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}
