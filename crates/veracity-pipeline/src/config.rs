//! Pipeline-wide configuration aggregating the per-stage configs

use serde::{Deserialize, Serialize};
use veracity_aggregate::AggregatorConfig;
use veracity_cluster::ClusterConfig;
use veracity_extractor::ExtractorConfig;
use veracity_research::ResearchConfig;
use veracity_verdict::VerdictConfig;

/// Immutable configuration for one analysis job
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PipelineConfig {
    /// Claim extraction and Gate 1
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Evidence research
    #[serde(default)]
    pub research: ResearchConfig,

    /// Boundary clustering
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// Debate-based verdict generation
    #[serde(default)]
    pub verdict: VerdictConfig,

    /// Aggregation and Gate 4
    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// Job-level knobs
    #[serde(default)]
    pub job: JobConfig,
}

/// Job-level limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Concurrent per-claim research/verdict tasks
    pub concurrency: usize,

    /// Hard ceiling on external calls (completions + searches) per job
    pub max_external_calls: u32,

    /// Re-extraction attempts after a centrality violation
    pub max_reextractions: u32,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_external_calls: 200,
            max_reextractions: 1,
        }
    }
}

impl PipelineConfig {
    /// Validate every stage config
    pub fn validate(&self) -> Result<(), String> {
        self.extractor.validate()?;
        self.research.validate()?;
        self.cluster.validate()?;
        self.verdict.validate()?;
        self.aggregator.validate()?;
        if self.job.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.job.max_external_calls == 0 {
            return Err("max_external_calls must be greater than 0".to_string());
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

    /// Fast preset: fewer iterations and rounds throughout
    pub fn fast() -> Self {
        Self {
            extractor: ExtractorConfig::fast(),
            research: ResearchConfig::fast(),
            cluster: ClusterConfig::fast(),
            verdict: VerdictConfig::fast(),
            aggregator: AggregatorConfig::fast(),
            job: JobConfig {
                concurrency: 8,
                max_external_calls: 60,
                max_reextractions: 1,
            },
        }
    }

    /// Thorough preset: more evidence and debate before settling
    pub fn thorough() -> Self {
        Self {
            extractor: ExtractorConfig::thorough(),
            research: ResearchConfig::thorough(),
            cluster: ClusterConfig::thorough(),
            verdict: VerdictConfig::thorough(),
            aggregator: AggregatorConfig::thorough(),
            job: JobConfig {
                concurrency: 2,
                max_external_calls: 400,
                max_reextractions: 2,
            },
        }
    }
}
