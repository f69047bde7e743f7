//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for claim extraction and Gate 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum claims to extract from one input
    pub max_claims: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,

    /// Repair attempts for structured-output violations
    pub max_schema_repairs: u32,

    /// Maximum tokens for the extraction completion
    pub max_tokens: u32,

    /// Gate 1: opinion/hedging score above this fails the claim
    pub opinion_threshold: f64,

    /// Gate 1: specificity score below this fails the claim
    pub specificity_threshold: f64,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_claims == 0 {
            return Err("max_claims must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.opinion_threshold) {
            return Err("opinion_threshold must be in [0.0, 1.0]".to_string());
        }
        if !(0.0..=1.0).contains(&self.specificity_threshold) {
            return Err("specificity_threshold must be in [0.0, 1.0]".to_string());
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

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            max_claims: 20,
            extraction_timeout_secs: 120,
            max_schema_repairs: 2,
            max_tokens: 2_048,
            opinion_threshold: 0.5,
            specificity_threshold: 0.2,
        }
    }
}

impl ExtractorConfig {
    /// Fast preset: shorter timeouts, fewer claims
    pub fn fast() -> Self {
        Self {
            max_text_length: 20_000,
            max_claims: 8,
            extraction_timeout_secs: 60,
            max_schema_repairs: 1,
            max_tokens: 1_024,
            ..Self::default()
        }
    }

    /// Thorough preset: longer timeouts, more claims
    pub fn thorough() -> Self {
        Self {
            max_text_length: 100_000,
            max_claims: 40,
            extraction_timeout_secs: 300,
            max_schema_repairs: 3,
            max_tokens: 4_096,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ExtractorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ExtractorConfig::fast().validate().is_ok());
        assert!(ExtractorConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_invalid_max_text_length() {
        let config = ExtractorConfig {
            max_text_length: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_opinion_threshold() {
        let config = ExtractorConfig {
            opinion_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ExtractorConfig::default();
        let toml_str = config.to_toml().unwrap();
        let parsed = ExtractorConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.max_text_length, parsed.max_text_length);
        assert_eq!(config.max_claims, parsed.max_claims);
        assert_eq!(config.opinion_threshold, parsed.opinion_threshold);
    }
}
