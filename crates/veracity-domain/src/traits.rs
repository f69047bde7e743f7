//! Capability traits for external interactions
//!
//! These traits define the boundaries between pipeline logic and the outside
//! world (LLM completion, web search, source reliability). Implementations
//! live in other crates; stages hold `Arc<dyn ...>` handles selected at job
//! start, never branching on a concrete provider inside business logic.

use crate::ids::SourceId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by capability implementations
#[derive(Error, Debug, Clone)]
pub enum CapabilityError {
    /// Output failed schema validation (recoverable via repair retry)
    #[error("schema validation failed: {0}")]
    Schema(String),

    /// Network or provider communication failure
    #[error("provider error: {0}")]
    Provider(String),

    /// Provider signalled rate limiting
    #[error("rate limit exceeded")]
    RateLimited,

    /// The call did not complete within its deadline
    #[error("capability call timed out")]
    Timeout,

    /// Requested model/endpoint is not available
    #[error("capability unavailable: {0}")]
    Unavailable(String),
}

impl CapabilityError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CapabilityError::Provider(_) | CapabilityError::RateLimited | CapabilityError::Timeout
        )
    }
}

/// Language-model completion capability
///
/// `schema` is a JSON description of the expected output shape; callers parse
/// the returned text and drive bounded repair retries on violation.
#[async_trait]
pub trait CompletionCapability: Send + Sync {
    /// Generate a completion for the prompt
    async fn complete(
        &self,
        prompt: &str,
        schema: &str,
        max_tokens: u32,
    ) -> Result<String, CapabilityError>;
}

/// Date scoping for recency-sensitive queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateScope {
    /// Earliest acceptable publication time (unix seconds)
    pub after: u64,
}

/// A search request
///
/// Contrarian queries are a tagged request on the one interface, not a
/// separate capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Query text
    pub text: String,

    /// Optional recency scope
    pub date_scope: Option<DateScope>,

    /// True when this query seeks evidence contradicting a claim
    pub contrarian: bool,
}

impl SearchQuery {
    /// A plain query with no scoping
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            date_scope: None,
            contrarian: false,
        }
    }

    /// Tag the query as contrarian
    pub fn contrarian(mut self) -> Self {
        self.contrarian = true;
        self
    }

    /// Scope the query to recent results
    pub fn scoped_after(mut self, after: u64) -> Self {
        self.date_scope = Some(DateScope { after });
        self
    }
}

/// One search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result URL
    pub url: String,

    /// Snippet text
    pub snippet: String,

    /// Publication time, unix seconds, when known
    pub published_at: Option<u64>,
}

/// Web search capability
#[async_trait]
pub trait SearchCapability: Send + Sync {
    /// Execute a search query
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>, CapabilityError>;
}

/// Reliability data for a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceReliability {
    /// Reliability score [0.0, 1.0]
    pub score: f64,

    /// Source type (e.g. "news", "government", "blog")
    pub source_type: String,
}

/// Source reliability lookup
///
/// Read-only from the pipeline's perspective; scores are maintained by an
/// external background process. Implementations must tolerate concurrent
/// reads during parallel research.
pub trait ReliabilityLookup: Send + Sync {
    /// Look up the reliability of a source
    fn get_reliability(&self, source_id: SourceId) -> Result<SourceReliability, CapabilityError>;
}
