//! Ollama-backed enrichment provider

use crate::config::EnrichmentConfig;
use crate::enrichment::{
    prompts, EnrichmentBundle, EnrichmentOutcome, EnrichmentProvider, EnrichmentRequest,
    KeywordChecklist, SectionHints,
};
use crate::error::{AtsCheckerError, Result};
use async_trait::async_trait;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const UNAVAILABLE_MESSAGE: &str =
    "AI suggestions unavailable. Please ensure the enrichment service is running.";

pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    available: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Build the client and probe the service once, so later calls can
    /// degrade immediately instead of re-timing-out on a dead endpoint.
    pub async fn connect(config: &EnrichmentConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AtsCheckerError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let available = match client.get(format!("{}/api/tags", base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("enrichment service probe failed: {}", e);
                false
            }
        };
        if available {
            info!("enrichment service reachable at {}", base_url);
        }

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            available,
        })
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> std::result::Result<String, reqwest::Error> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": { "temperature": 0.7, "num_predict": max_tokens },
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateResponse = response.json().await?;
        Ok(body.response.trim().to_string())
    }

    async fn try_enrich(
        &self,
        request: &EnrichmentRequest<'_>,
    ) -> std::result::Result<EnrichmentBundle, reqwest::Error> {
        let missing = request.missing;
        let job = request.job_text;

        let mut skills_pool: Vec<String> = missing.technical_skills.iter().take(8).cloned().collect();
        skills_pool.extend(missing.soft_skills.iter().take(4).cloned());

        let skills_to_add = if skills_pool.is_empty() {
            Vec::new()
        } else {
            let text = self.generate(&prompts::skills_to_add(job, &skills_pool), 250).await?;
            let parsed = dash_lines(&text, 10);
            if parsed.is_empty() {
                skills_pool.iter().take(10).cloned().collect()
            } else {
                parsed
            }
        };

        let summary_skills: Vec<String> = missing
            .technical_skills
            .iter()
            .take(5)
            .chain(missing.soft_skills.iter().take(2))
            .cloned()
            .collect();
        let professional_summary = if missing.technical_skills.is_empty() {
            String::new()
        } else {
            self.generate(&prompts::professional_summary(job, &summary_skills), 200)
                .await?
        };

        let bullet_skills: Vec<String> =
            missing.technical_skills.iter().take(5).cloned().collect();
        let experience_bullets = if bullet_skills.is_empty() {
            Vec::new()
        } else {
            let text = self
                .generate(&prompts::experience_bullets(job, &bullet_skills), 400)
                .await?;
            dash_lines(&text, 4)
        };

        let integration_skills: Vec<String> = missing
            .technical_skills
            .iter()
            .take(3)
            .chain(missing.soft_skills.iter().take(2))
            .cloned()
            .collect();
        let skills_integration = if integration_skills.is_empty() {
            Vec::new()
        } else {
            let text = self
                .generate(&prompts::skills_integration(job, &integration_skills), 200)
                .await?;
            sentences(&text, 3)
        };

        let enhancement_skills: Vec<String> =
            missing.technical_skills.iter().take(4).cloned().collect();
        let summary_enhancement = if enhancement_skills.is_empty() {
            String::new()
        } else {
            self.generate(&prompts::summary_enhancement(job, &enhancement_skills), 150)
                .await?
        };

        let project_skills: Vec<String> =
            missing.technical_skills.iter().take(6).cloned().collect();
        let project_ideas = if project_skills.is_empty() {
            Vec::new()
        } else {
            let has_projects = request.sections.other.to_lowercase().contains("project");
            let text = self
                .generate(&prompts::project_ideas(job, &project_skills, has_projects), 400)
                .await?;
            dash_lines(&text, 4)
        };

        Ok(EnrichmentBundle {
            missing_keywords_list: KeywordChecklist::from_missing(missing),
            skills_to_add,
            professional_summary,
            experience_bullets,
            skills_integration,
            summary_enhancement,
            project_ideas,
            section_specific: SectionHints::from_missing(missing),
            llm_unavailable: false,
            message: None,
        })
    }
}

#[async_trait]
impl EnrichmentProvider for OllamaProvider {
    async fn enrich(&self, request: EnrichmentRequest<'_>) -> EnrichmentOutcome {
        if !self.available {
            return EnrichmentOutcome::Unavailable {
                message: UNAVAILABLE_MESSAGE.to_string(),
            };
        }

        match self.try_enrich(&request).await {
            Ok(bundle) => EnrichmentOutcome::Ready(bundle),
            Err(e) => {
                warn!("enrichment call failed: {}", e);
                EnrichmentOutcome::Unavailable {
                    message: UNAVAILABLE_MESSAGE.to_string(),
                }
            }
        }
    }
}

/// Dash-prefixed lines of a generation, up to `cap`.
fn dash_lines(text: &str, cap: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('-'))
        .map(|line| line.trim_start_matches('-').trim().to_string())
        .filter(|line| !line.is_empty())
        .take(cap)
        .collect()
}

/// Non-trivial lines of a generation, up to `cap`.
fn sentences(text: &str, cap: usize) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.len() > 20)
        .map(|line| line.to_string())
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_lines_parsing() {
        let text = "Here are skills:\n- Python 3.x\n- AWS Lambda\nnot a bullet\n-   \n- Docker";
        let lines = dash_lines(text, 10);

        assert_eq!(lines, vec!["Python 3.x", "AWS Lambda", "Docker"]);
    }

    #[test]
    fn test_dash_lines_cap() {
        let text = "- a1111111\n- b2222222\n- c3333333";
        assert_eq!(dash_lines(text, 2).len(), 2);
    }

    #[test]
    fn test_sentences_filters_short_lines() {
        let text = "ok\nExpert in distributed systems and cloud tooling.\nshort";
        let lines = sentences(text, 3);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Expert"));
    }

    #[tokio::test]
    async fn test_unreachable_service_marks_unavailable() {
        let config = EnrichmentConfig {
            enabled: true,
            base_url: "http://127.0.0.1:1".to_string(),
            model: "test".to_string(),
            timeout_secs: 1,
        };
        let provider = OllamaProvider::connect(&config).await.unwrap();
        assert!(!provider.is_available());

        let missing = crate::processing::gap::MissingKeywords::default();
        let sections = crate::processing::segmenter::SectionMap::default();
        let outcome = provider
            .enrich(EnrichmentRequest {
                job_text: "job",
                missing: &missing,
                sections: &sections,
                overall_score: 10.0,
            })
            .await;
        assert!(matches!(outcome, EnrichmentOutcome::Unavailable { .. }));
    }
}
