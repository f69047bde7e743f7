//! Source reliability lookup implementations
//!
//! The pipeline only reads reliability scores; writes happen in an external
//! background process. The cache must tolerate concurrent reads during
//! parallel research.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use veracity_domain::{CapabilityError, ReliabilityLookup, SourceId, SourceReliability};

/// In-memory reliability table with a fallback default
///
/// Used in tests and offline runs, and as the backing store behind
/// [`CachedReliability`] in integration setups.
#[derive(Debug, Clone)]
pub struct StaticReliability {
    scores: Arc<RwLock<HashMap<SourceId, SourceReliability>>>,
    default_score: f64,
}

impl StaticReliability {
    /// Create a table where unknown sources get `default_score`
    pub fn new(default_score: f64) -> Self {
        Self {
            scores: Arc::new(RwLock::new(HashMap::new())),
            default_score: default_score.clamp(0.0, 1.0),
        }
    }

    /// Register a reliability score for a source
    pub fn set(&self, source_id: SourceId, score: f64, source_type: impl Into<String>) {
        self.scores.write().unwrap_or_else(|e| e.into_inner()).insert(
            source_id,
            SourceReliability {
                score: score.clamp(0.0, 1.0),
                source_type: source_type.into(),
            },
        );
    }
}

impl Default for StaticReliability {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl ReliabilityLookup for StaticReliability {
    fn get_reliability(&self, source_id: SourceId) -> Result<SourceReliability, CapabilityError> {
        let scores = self.scores.read().unwrap_or_else(|e| e.into_inner());
        Ok(scores.get(&source_id).cloned().unwrap_or(SourceReliability {
            score: self.default_score,
            source_type: "unknown".to_string(),
        }))
    }
}

/// Read-through cache in front of another reliability lookup
///
/// Parallel research tasks hit the same handful of sources repeatedly; the
/// cache keeps those lookups off the backing service.
pub struct CachedReliability<L: ReliabilityLookup> {
    inner: L,
    cache: RwLock<HashMap<SourceId, SourceReliability>>,
}

impl<L: ReliabilityLookup> CachedReliability<L> {
    /// Wrap a lookup with a cache
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<L: ReliabilityLookup> ReliabilityLookup for CachedReliability<L> {
    fn get_reliability(&self, source_id: SourceId) -> Result<SourceReliability, CapabilityError> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(hit) = cache.get(&source_id) {
                return Ok(hit.clone());
            }
        }

        let fetched = self.inner.get_reliability(source_id)?;
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(source_id, fetched.clone());
        Ok(fetched)
    }
}
