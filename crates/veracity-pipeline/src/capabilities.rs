//! The external capability bundle a job runs against
//!
//! Selected once at job start; stages receive shared handles and never branch
//! on concrete providers.

use std::sync::Arc;
use veracity_domain::{CompletionCapability, ReliabilityLookup, SearchCapability};

/// Shared handles to the three external capabilities
#[derive(Clone)]
pub struct Capabilities {
    /// Language-model completion
    pub completion: Arc<dyn CompletionCapability>,

    /// Web search
    pub search: Arc<dyn SearchCapability>,

    /// Source reliability lookup
    pub reliability: Arc<dyn ReliabilityLookup>,
}

impl Capabilities {
    /// Bundle the three capabilities
    pub fn new(
        completion: Arc<dyn CompletionCapability>,
        search: Arc<dyn SearchCapability>,
        reliability: Arc<dyn ReliabilityLookup>,
    ) -> Self {
        Self {
            completion,
            search,
            reliability,
        }
    }
}
