//! Capability selection for a CLI run.
//!
//! With no endpoints configured the run is fully offline and deterministic:
//! mock providers return no hits and extraction degrades to its sentence
//! fallback, so every claim surfaces as insufficient evidence.

use std::sync::Arc;
use veracity_domain::{CompletionCapability, SearchCapability};
use veracity_llm::{HttpSearch, MockCompletion, MockSearch, OllamaCompletion, StaticReliability};
use veracity_pipeline::Capabilities;

/// Build the capability bundle from CLI arguments.
pub fn build_capabilities(
    endpoint: Option<&str>,
    model: &str,
    search_endpoint: Option<&str>,
) -> Capabilities {
    let completion: Arc<dyn CompletionCapability> = match endpoint {
        Some(url) => Arc::new(OllamaCompletion::new(url, model)),
        None => Arc::new(MockCompletion::default()),
    };

    let search: Arc<dyn SearchCapability> = match search_endpoint {
        Some(url) => Arc::new(HttpSearch::new(url)),
        None => Arc::new(MockSearch::new()),
    };

    Capabilities::new(completion, search, Arc::new(StaticReliability::default()))
}
