//! Configuration management for the ATS checker

use crate::error::{AtsCheckerError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub keywords: KeywordConfig,
    pub nlp: NlpConfig,
    pub enrichment: EnrichmentConfig,
}

/// Weights for the four category scores. They must sum to 1.0; the overall
/// score blends the weighted category sum 70/30 with semantic similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub skills_weight: f32,
    pub experience_weight: f32,
    pub education_weight: f32,
    pub keyword_weight: f32,
    pub excellent_threshold: f32,
    pub good_threshold: f32,
    pub fair_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub max_keywords: usize,
    pub min_keyword_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NlpConfig {
    pub mode: NlpMode,
    pub model_dir: PathBuf,
    /// Texts are truncated to this many characters before the semantic
    /// similarity computation.
    pub similarity_char_cap: usize,
}

/// Which language backend to select at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NlpMode {
    /// Use the embedding model if present on disk, otherwise statistical.
    Auto,
    /// Require the embedding model; fail at startup if it is missing.
    Model,
    /// Force the tf-idf / bigram fallback path.
    Statistical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let model_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ats-checker")
            .join("models")
            .join("embedding");

        Self {
            scoring: ScoringConfig {
                skills_weight: 0.40,
                experience_weight: 0.30,
                education_weight: 0.15,
                keyword_weight: 0.15,
                excellent_threshold: 80.0,
                good_threshold: 60.0,
                fair_threshold: 40.0,
            },
            keywords: KeywordConfig {
                max_keywords: 50,
                min_keyword_length: 2,
            },
            nlp: NlpConfig {
                mode: NlpMode::Auto,
                model_dir,
                similarity_char_cap: 1_000_000,
            },
            enrichment: EnrichmentConfig {
                enabled: true,
                base_url: "http://localhost:11434".to_string(),
                model: "llama3.1".to_string(),
                timeout_secs: 30,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| {
                AtsCheckerError::Configuration(format!("Failed to parse config: {}", e))
            })?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            AtsCheckerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Category weights must form a proper weighted average.
    pub fn validate(&self) -> Result<()> {
        let sum = self.scoring.skills_weight
            + self.scoring.experience_weight
            + self.scoring.education_weight
            + self.scoring.keyword_weight;
        if (sum - 1.0).abs() > 1e-4 {
            return Err(AtsCheckerError::Configuration(format!(
                "scoring weights must sum to 1.0, got {:.4}",
                sum
            )));
        }
        if self.keywords.max_keywords == 0 {
            return Err(AtsCheckerError::Configuration(
                "keywords.max_keywords must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("ats-checker")
            .join("config.toml")
    }
}
