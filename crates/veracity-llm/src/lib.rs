//! Veracity Capability Layer
//!
//! Pluggable implementations of the capability traits the pipeline consumes:
//! LLM completion, web search, and source reliability lookup.
//!
//! # Providers
//!
//! - [`MockCompletion`] / [`MockSearch`] / [`StaticReliability`]: deterministic
//!   mocks for testing and offline runs
//! - [`OllamaCompletion`]: local Ollama API integration
//! - [`HttpSearch`]: self-hosted JSON search endpoint adapter
//! - [`CachedReliability`]: read-many cache in front of another lookup
//!
//! # Structured output
//!
//! [`repair::complete_structured`] wraps any completion capability with
//! fence-tolerant JSON extraction and a bounded repair-retry loop for schema
//! violations.

#![warn(missing_docs)]

pub mod ollama;
pub mod reliability;
pub mod repair;
pub mod search;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use veracity_domain::{
    CapabilityError, CompletionCapability, SearchCapability, SearchHit, SearchQuery,
};

pub use ollama::OllamaCompletion;
pub use reliability::{CachedReliability, StaticReliability};
pub use search::HttpSearch;

/// Deterministic completion capability for tests and offline runs
///
/// Responses can be scripted three ways, checked in order:
/// 1. a FIFO queue consumed one response per call,
/// 2. substring-keyed responses matched against the prompt,
/// 3. a fixed default.
///
/// # Examples
///
/// ```
/// use veracity_llm::MockCompletion;
///
/// let mock = MockCompletion::new("{}");
/// mock.add_keyed("advocate", r#"{"truth_percentage": 80}"#);
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockCompletion {
    default_response: String,
    queue: Arc<Mutex<VecDeque<String>>>,
    keyed: Arc<Mutex<Vec<(String, String)>>>,
    errors: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockCompletion {
    /// Create a mock returning a fixed response for every prompt
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            keyed: Arc::new(Mutex::new(Vec::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a response consumed by the next unmatched call
    pub fn push_response(&self, response: impl Into<String>) {
        self.queue.lock().unwrap().push_back(response.into());
    }

    /// Add a response returned when the prompt contains `key`
    pub fn add_keyed(&self, key: impl Into<String>, response: impl Into<String>) {
        self.keyed.lock().unwrap().push((key.into(), response.into()));
    }

    /// Return a provider error when the prompt contains `key`
    pub fn fail_on(&self, key: impl Into<String>) {
        self.errors.lock().unwrap().push(key.into());
    }

    /// Number of completion calls made
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new("{}")
    }
}

#[async_trait]
impl CompletionCapability for MockCompletion {
    async fn complete(
        &self,
        prompt: &str,
        _schema: &str,
        _max_tokens: u32,
    ) -> Result<String, CapabilityError> {
        *self.call_count.lock().unwrap() += 1;

        for key in self.errors.lock().unwrap().iter() {
            if prompt.contains(key.as_str()) {
                return Err(CapabilityError::Provider("mock failure".to_string()));
            }
        }

        for (key, response) in self.keyed.lock().unwrap().iter() {
            if prompt.contains(key.as_str()) {
                return Ok(response.clone());
            }
        }

        if let Some(next) = self.queue.lock().unwrap().pop_front() {
            return Ok(next);
        }

        Ok(self.default_response.clone())
    }
}

/// Deterministic search capability for tests and offline runs
///
/// Hits can be registered globally or keyed on a query substring. Every query
/// received is recorded so tests can assert on contrarian tagging and date
/// scoping.
#[derive(Debug, Clone, Default)]
pub struct MockSearch {
    hits: Arc<Mutex<Vec<SearchHit>>>,
    keyed: Arc<Mutex<Vec<(String, Vec<SearchHit>)>>>,
    queries: Arc<Mutex<Vec<SearchQuery>>>,
}

impl MockSearch {
    /// Create an empty mock (every query returns no hits)
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hit returned for every query
    pub fn add_hit(&self, url: impl Into<String>, snippet: impl Into<String>) {
        self.hits.lock().unwrap().push(SearchHit {
            url: url.into(),
            snippet: snippet.into(),
            published_at: None,
        });
    }

    /// Register hits returned only when the query text contains `key`
    pub fn add_keyed_hits(&self, key: impl Into<String>, hits: Vec<SearchHit>) {
        self.keyed.lock().unwrap().push((key.into(), hits));
    }

    /// All queries received so far
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of queries that were tagged contrarian
    pub fn contrarian_query_count(&self) -> usize {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.contrarian)
            .count()
    }
}

#[async_trait]
impl SearchCapability for MockSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, CapabilityError> {
        self.queries.lock().unwrap().push(query.clone());

        let mut results = Vec::new();
        for (key, hits) in self.keyed.lock().unwrap().iter() {
            if query.text.contains(key.as_str()) {
                results.extend(hits.iter().cloned());
            }
        }
        results.extend(self.hits.lock().unwrap().iter().cloned());
        Ok(results)
    }
}
