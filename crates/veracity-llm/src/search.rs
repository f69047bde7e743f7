//! HTTP JSON search adapter
//!
//! Speaks to any self-hosted search endpoint that accepts a JSON query and
//! returns a JSON result list (SearXNG-style). Real provider integrations
//! stay behind the one capability trait; this adapter covers the common
//! self-hosted case.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use veracity_domain::{CapabilityError, SearchCapability, SearchHit, SearchQuery};

/// Default timeout for search requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Search capability backed by an HTTP JSON endpoint
pub struct HttpSearch {
    endpoint: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<u64>,
}

#[derive(Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    published_at: Option<u64>,
}

impl HttpSearch {
    /// Create a search capability against the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            endpoint: endpoint.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn run_query(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, CapabilityError> {
        let request_body = SearchRequest {
            q: &query.text,
            after: query.date_scope.map(|s| s.after),
        };

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&self.endpoint)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return match response.json::<SearchResponse>().await {
                            Ok(body) => Ok(body
                                .results
                                .into_iter()
                                .map(|r| SearchHit {
                                    url: r.url,
                                    snippet: r.content,
                                    published_at: r.published_at,
                                })
                                .collect()),
                            Err(e) => Err(CapabilityError::Schema(format!(
                                "failed to parse response: {}",
                                e
                            ))),
                        };
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
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| CapabilityError::Provider("max retries exceeded".to_string())))
    }
}

#[async_trait]
impl SearchCapability for HttpSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, CapabilityError> {
        self.run_query(query).await
    }
}
