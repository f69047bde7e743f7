//! Configuration for the Verdict Generator

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for debate-based verdict generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictConfig {
    /// Maximum debate rounds (the advocate pass plus each challenge/reconcile
    /// pass)
    pub max_rounds: u32,

    /// Advocate/challenger spread above which another round is debated
    pub spread_threshold: u8,

    /// Final spread above which the verdict is considered unstable
    pub unstable_spread: u8,

    /// Multiplicative confidence discount applied to unstable verdicts
    pub unstable_discount: f64,

    /// Minimum evidence items required to attempt a numeric verdict
    pub min_evidence_count: usize,

    /// Timeout for a single completion call (seconds)
    pub completion_timeout_secs: u64,

    /// Repair attempts for structured-output violations
    pub max_schema_repairs: u32,

    /// Token ceiling per completion call
    pub max_tokens: u32,
}

impl VerdictConfig {
    /// Get the completion timeout as a Duration
    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rounds == 0 {
            return Err("max_rounds must be greater than 0".to_string());
        }
        if self.spread_threshold > 100 || self.unstable_spread > 100 {
            return Err("spread thresholds must be in [0, 100]".to_string());
        }
        if !(0.0..=1.0).contains(&self.unstable_discount) {
            return Err("unstable_discount must be in [0.0, 1.0]".to_string());
        }
        if self.completion_timeout_secs == 0 {
            return Err("completion_timeout_secs must be greater than 0".to_string());
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

    /// Fast preset: a single advocate/challenge/reconcile pass
    pub fn fast() -> Self {
        Self {
            max_rounds: 2,
            max_tokens: 512,
            ..Self::default()
        }
    }

    /// Thorough preset: more rounds before settling
    pub fn thorough() -> Self {
        Self {
            max_rounds: 5,
            ..Self::default()
        }
    }
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            max_rounds: 3,
            spread_threshold: 15,
            unstable_spread: 30,
            unstable_discount: 0.4,
            min_evidence_count: 2,
            completion_timeout_secs: 120,
            max_schema_repairs: 2,
            max_tokens: 1024,
        }
    }
}
