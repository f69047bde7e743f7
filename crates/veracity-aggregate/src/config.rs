//! Configuration for the Aggregator

use serde::{Deserialize, Serialize};

/// Configuration for verdict aggregation and the publication gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Weight of a core claim
    pub core_weight: f64,

    /// Weight of attribution/source/timing claims (near zero by design intent)
    pub support_role_weight: f64,

    /// Text similarity above which two claims in a boundary are near-duplicates
    pub duplicate_text_threshold: f64,

    /// Cited-evidence overlap above which two claims are near-duplicates
    pub duplicate_evidence_threshold: f64,

    /// A duplicate group's combined weight is capped at this multiple of its
    /// heaviest member
    pub duplicate_group_cap: f64,

    /// Gate 4: minimum evidence items behind a publishable verdict
    pub min_evidence_count: usize,

    /// Gate 4: minimum mean source reliability behind a publishable verdict
    pub min_mean_reliability: f64,

    /// Gate 4: minimum evidence-agreement ratio behind a publishable verdict
    pub min_agreement_ratio: f64,

    /// Maximum claims per boundary that may be marked central
    pub max_central_claims: usize,

    /// Maximum fraction of all claims that may be marked central
    pub max_central_fraction: f64,
}

impl AggregatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.core_weight <= 0.0 {
            return Err("core_weight must be greater than 0".to_string());
        }
        if self.support_role_weight < 0.0 || self.support_role_weight > self.core_weight {
            return Err("support_role_weight must be in [0, core_weight]".to_string());
        }
        for (name, v) in [
            ("duplicate_text_threshold", self.duplicate_text_threshold),
            (
                "duplicate_evidence_threshold",
                self.duplicate_evidence_threshold,
            ),
            ("min_mean_reliability", self.min_mean_reliability),
            ("min_agreement_ratio", self.min_agreement_ratio),
            ("max_central_fraction", self.max_central_fraction),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("{} must be in [0.0, 1.0]", name));
            }
        }
        if self.duplicate_group_cap < 1.0 {
            return Err("duplicate_group_cap must be at least 1.0".to_string());
        }
        if self.max_central_claims == 0 {
            return Err("max_central_claims must be greater than 0".to_string());
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

    /// Fast preset: looser publication gate
    pub fn fast() -> Self {
        Self {
            min_evidence_count: 1,
            min_mean_reliability: 0.3,
            ..Self::default()
        }
    }

    /// Thorough preset: stricter publication gate
    pub fn thorough() -> Self {
        Self {
            min_evidence_count: 3,
            min_mean_reliability: 0.5,
            min_agreement_ratio: 0.7,
            ..Self::default()
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            core_weight: 1.0,
            support_role_weight: 0.05,
            duplicate_text_threshold: 0.6,
            duplicate_evidence_threshold: 0.5,
            duplicate_group_cap: 1.5,
            min_evidence_count: 2,
            min_mean_reliability: 0.4,
            min_agreement_ratio: 0.6,
            max_central_claims: 3,
            max_central_fraction: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(AggregatorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(AggregatorConfig::fast().validate().is_ok());
        assert!(AggregatorConfig::thorough().validate().is_ok());
    }

    #[test]
    fn test_cap_below_one_invalid() {
        let config = AggregatorConfig {
            duplicate_group_cap: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_support_weight_above_core_invalid() {
        let config = AggregatorConfig {
            support_role_weight: 2.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AggregatorConfig::default();
        let parsed = AggregatorConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config.duplicate_group_cap, parsed.duplicate_group_cap);
        assert_eq!(config.min_agreement_ratio, parsed.min_agreement_ratio);
    }
}
