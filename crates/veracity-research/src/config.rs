//! Configuration for the Researcher

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for evidence research
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Maximum research iterations per claim
    pub max_iterations: u32,

    /// Minimum evidence items for a claim to be assessable
    pub min_evidence_count: usize,

    /// Stop iterating when an iteration adds fewer new unique items than this
    pub min_marginal_gain: usize,

    /// Token-Jaccard similarity above which two statements are near-duplicates
    pub duplicate_threshold: f64,

    /// Date-scope window for recency-sensitive claims (days)
    pub recent_window_days: u64,

    /// Maximum results consumed per query
    pub max_results_per_query: usize,

    /// Timeout for a single search call (seconds)
    pub search_timeout_secs: u64,

    /// Retry attempts for failed search calls
    pub retry_attempts: u32,

    /// Base backoff between retries (milliseconds, doubled per attempt)
    pub retry_backoff_ms: u64,
}

impl ResearchConfig {
    /// Get the search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be greater than 0".to_string());
        }
        if self.min_evidence_count == 0 {
            return Err("min_evidence_count must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.duplicate_threshold) {
            return Err("duplicate_threshold must be in [0.0, 1.0]".to_string());
        }
        if self.search_timeout_secs == 0 {
            return Err("search_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 3,
            min_evidence_count: 2,
            min_marginal_gain: 1,
            duplicate_threshold: 0.75,
            recent_window_days: 90,
            max_results_per_query: 8,
            search_timeout_secs: 30,
            retry_attempts: 3,
            retry_backoff_ms: 500,
        }
    }
}

impl ResearchConfig {
    /// Fast preset: one pass, smaller result sets
    pub fn fast() -> Self {
        Self {
            max_iterations: 1,
            max_results_per_query: 4,
            retry_attempts: 2,
            ..Self::default()
        }
    }

    /// Thorough preset: more iterations and results
    pub fn thorough() -> Self {
        Self {
            max_iterations: 5,
            max_results_per_query: 12,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ResearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ResearchConfig::fast().validate().is_ok());
        assert!(ResearchConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_invalid() {
        let config = ResearchConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ResearchConfig::default();
        let parsed = ResearchConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config.max_iterations, parsed.max_iterations);
        assert_eq!(config.duplicate_threshold, parsed.duplicate_threshold);
    }
}
