//! Configuration for the Clusterer

use serde::{Deserialize, Serialize};

/// Configuration for boundary clustering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum number of boundaries per job (candidates above this are merged)
    pub max_boundaries: usize,

    /// Minimum claims sharing a dimension before it forms its own boundary
    pub min_claims_per_boundary: usize,
}

impl ClusterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_boundaries == 0 {
            return Err("max_boundaries must be greater than 0".to_string());
        }
        if self.min_claims_per_boundary == 0 {
            return Err("min_claims_per_boundary must be greater than 0".to_string());
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

    /// Fast preset: a single default boundary only
    pub fn fast() -> Self {
        Self {
            max_boundaries: 1,
            ..Self::default()
        }
    }

    /// Thorough preset: more boundaries allowed before merging
    pub fn thorough() -> Self {
        Self {
            max_boundaries: 6,
            ..Self::default()
        }
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            max_boundaries: 3,
            min_claims_per_boundary: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ClusterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ClusterConfig::fast().validate().is_ok());
        assert!(ClusterConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_zero_cap_invalid() {
        let config = ClusterConfig {
            max_boundaries: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ClusterConfig::default();
        let parsed = ClusterConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config.max_boundaries, parsed.max_boundaries);
    }
}
