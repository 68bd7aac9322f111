//! Enrichment service integration
//!
//! An external text-generation service expands the gap analysis into
//! natural-language resume text. Unavailability is an expected outcome, not
//! an exception: providers return a result value and the caller degrades to
//! a deterministic fallback bundle.

pub mod ollama;
pub mod prompts;

use crate::processing::gap::MissingKeywords;
use crate::processing::segmenter::SectionMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use ollama::OllamaProvider;

/// Everything a provider needs for one enrichment call.
pub struct EnrichmentRequest<'a> {
    pub job_text: &'a str,
    pub missing: &'a MissingKeywords,
    pub sections: &'a SectionMap,
    pub overall_score: f32,
}

#[derive(Debug)]
pub enum EnrichmentOutcome {
    Ready(EnrichmentBundle),
    Unavailable { message: String },
}

#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    async fn enrich(&self, request: EnrichmentRequest<'_>) -> EnrichmentOutcome;
}

/// Per-category checklist of keywords worth adding, capped per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordChecklist {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub technical_skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub soft_skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub certifications: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub education: Vec<String>,
}

impl KeywordChecklist {
    pub fn from_missing(missing: &MissingKeywords) -> Self {
        let take = |list: &[String], n: usize| list.iter().take(n).cloned().collect();
        Self {
            technical_skills: take(&missing.technical_skills, 10),
            soft_skills: take(&missing.soft_skills, 5),
            certifications: take(&missing.certifications, 5),
            education: take(&missing.education, 3),
        }
    }
}

/// Section-targeted one-line hints, derivable without the language model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionHints {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub technical_skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub certifications: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub soft_skills: Vec<String>,
}

impl SectionHints {
    pub fn from_missing(missing: &MissingKeywords) -> Self {
        Self {
            technical_skills: missing
                .technical_skills
                .iter()
                .take(5)
                .map(|skill| format!("Add '{}' to your Technical Skills section", skill))
                .collect(),
            certifications: missing
                .certifications
                .iter()
                .take(3)
                .map(|cert| format!("Consider obtaining: {}", cert))
                .collect(),
            soft_skills: missing
                .soft_skills
                .iter()
                .take(3)
                .map(|skill| {
                    format!(
                        "Demonstrate '{}' through specific examples in your experience",
                        skill
                    )
                })
                .collect(),
        }
    }
}

/// Structured free-text suggestions for one analysis. `llm_unavailable`
/// marks the degraded shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentBundle {
    pub missing_keywords_list: KeywordChecklist,
    pub skills_to_add: Vec<String>,
    pub professional_summary: String,
    pub experience_bullets: Vec<String>,
    pub skills_integration: Vec<String>,
    pub summary_enhancement: String,
    pub project_ideas: Vec<String>,
    pub section_specific: SectionHints,
    pub llm_unavailable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl EnrichmentBundle {
    /// The degraded bundle: everything the core can derive on its own,
    /// flagged unavailable with a user-facing message.
    pub fn fallback(missing: &MissingKeywords, message: String) -> Self {
        Self {
            section_specific: SectionHints::from_missing(missing),
            llm_unavailable: true,
            message: Some(message),
            ..Default::default()
        }
    }
}

/// Provider used when enrichment is switched off or unreachable at startup.
pub struct DisabledProvider;

#[async_trait]
impl EnrichmentProvider for DisabledProvider {
    async fn enrich(&self, _request: EnrichmentRequest<'_>) -> EnrichmentOutcome {
        EnrichmentOutcome::Unavailable {
            message: "AI suggestions are disabled.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing() -> MissingKeywords {
        MissingKeywords {
            technical_skills: vec!["python".into(), "aws".into()],
            soft_skills: vec!["leadership".into()],
            education: vec!["bachelor degree".into()],
            certifications: vec!["AWS Certified".into()],
            other: vec![],
        }
    }

    #[tokio::test]
    async fn test_disabled_provider_is_unavailable() {
        let missing = missing();
        let sections = SectionMap::default();
        let outcome = DisabledProvider
            .enrich(EnrichmentRequest {
                job_text: "job",
                missing: &missing,
                sections: &sections,
                overall_score: 42.0,
            })
            .await;

        assert!(matches!(outcome, EnrichmentOutcome::Unavailable { .. }));
    }

    #[test]
    fn test_fallback_bundle_shape() {
        let bundle = EnrichmentBundle::fallback(&missing(), "offline".to_string());

        assert!(bundle.llm_unavailable);
        assert_eq!(bundle.message.as_deref(), Some("offline"));
        assert!(bundle.skills_to_add.is_empty());
        assert_eq!(
            bundle.section_specific.technical_skills[0],
            "Add 'python' to your Technical Skills section"
        );
        assert_eq!(
            bundle.section_specific.certifications[0],
            "Consider obtaining: AWS Certified"
        );
    }

    #[test]
    fn test_checklist_caps() {
        let many = MissingKeywords {
            technical_skills: (0..20).map(|i| format!("skill{}", i)).collect(),
            ..Default::default()
        };
        let checklist = KeywordChecklist::from_missing(&many);
        assert_eq!(checklist.technical_skills.len(), 10);
    }
}
