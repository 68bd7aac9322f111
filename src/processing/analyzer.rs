//! Analysis engine coordinating the full matching pipeline

use crate::config::Config;
use crate::enrichment::{
    EnrichmentBundle, EnrichmentOutcome, EnrichmentProvider, EnrichmentRequest,
};
use crate::error::{AtsCheckerError, Result};
use crate::processing::gap::{GapAnalyzer, MissingKeywords};
use crate::processing::language::{self, LanguageBackend};
use crate::processing::scorer::{round2, MatchScorer, ScoreReport};
use crate::processing::segmenter::{ContactInfo, SectionSegmenter};
use crate::processing::suggestions::{SuggestionPlanner, SuggestionReport};
use crate::processing::taxonomy::{KeywordTaxonomy, KeywordTaxonomyExtractor};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Keyword view of one analysis: what the posting asks for, what the resume
/// lacks, and the coverage percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordReport {
    pub found: KeywordTaxonomy,
    pub missing: MissingKeywords,
    pub density: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPresence {
    pub has_summary: bool,
    pub has_experience: bool,
    pub has_education: bool,
    pub has_skills: bool,
    pub word_count: usize,
}

/// The assembled response document. The engine returns every piece; final
/// wire encoding is the caller's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub score: ScoreReport,
    pub keywords: KeywordReport,
    pub suggestions: SuggestionReport,
    pub enrichment: EnrichmentBundle,
    pub sections: SectionPresence,
    pub contact_info: ContactInfo,
    pub processing_time_ms: u64,
    pub generated_at: DateTime<Utc>,
}

pub struct AnalysisEngine {
    segmenter: SectionSegmenter,
    taxonomy: KeywordTaxonomyExtractor,
    gap: GapAnalyzer,
    scorer: MatchScorer,
    planner: SuggestionPlanner,
    enrichment: Box<dyn EnrichmentProvider>,
    backend_name: &'static str,
}

impl AnalysisEngine {
    /// Build the engine, selecting the language backend per config.
    pub fn new(config: &Config, enrichment: Box<dyn EnrichmentProvider>) -> Result<Self> {
        let backend = language::select_backend(&config.nlp)?;
        Self::with_backend(config, backend, enrichment)
    }

    /// Build the engine around an already-selected backend.
    pub fn with_backend(
        config: &Config,
        backend: Arc<dyn LanguageBackend>,
        enrichment: Box<dyn EnrichmentProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let taxonomy = KeywordTaxonomyExtractor::new(Arc::clone(&backend), &config.keywords)?;
        let scorer = MatchScorer::new(
            config.scoring.clone(),
            Arc::clone(&backend),
            config.nlp.similarity_char_cap,
        );

        Ok(Self {
            segmenter: SectionSegmenter::new(),
            taxonomy,
            gap: GapAnalyzer::new(),
            scorer,
            planner: SuggestionPlanner::new(),
            enrichment,
            backend_name: backend.name(),
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend_name
    }

    /// Run one full analysis. The enrichment call is best-effort: its
    /// failure degrades that part of the report, never the analysis.
    pub async fn analyze(&self, resume_text: &str, job_text: &str) -> Result<AnalysisReport> {
        if resume_text.trim().is_empty() {
            return Err(AtsCheckerError::MissingInput(
                "resume document is empty".to_string(),
            ));
        }
        if job_text.trim().is_empty() {
            return Err(AtsCheckerError::MissingInput(
                "job description is empty".to_string(),
            ));
        }

        let started = Instant::now();

        let profile = self.segmenter.segment(resume_text);
        debug!(
            "segmented resume: {} words, skills section {} chars",
            profile.word_count,
            profile.sections.skills.len()
        );

        let taxonomy = self.taxonomy.extract(job_text);
        let missing = self.gap.find_missing(&profile.raw_text, &taxonomy);
        let density = self
            .gap
            .keyword_density(&profile.raw_text, &taxonomy.all_keywords);

        let score = self.scorer.score(&profile, job_text, &taxonomy);
        let suggestions = self.planner.plan(&missing, &score, &profile.sections);

        let request = EnrichmentRequest {
            job_text,
            missing: &missing,
            sections: &profile.sections,
            overall_score: score.overall_score,
        };
        let enrichment = match self.enrichment.enrich(request).await {
            EnrichmentOutcome::Ready(bundle) => bundle,
            EnrichmentOutcome::Unavailable { message } => {
                warn!("enrichment unavailable: {}", message);
                EnrichmentBundle::fallback(&missing, message)
            }
        };

        let sections = SectionPresence {
            has_summary: !profile.sections.summary.is_empty(),
            has_experience: !profile.sections.experience.is_empty(),
            has_education: !profile.sections.education.is_empty(),
            has_skills: !profile.sections.skills.is_empty(),
            word_count: profile.word_count,
        };

        Ok(AnalysisReport {
            score,
            keywords: KeywordReport {
                found: taxonomy,
                missing,
                density: round2(density),
            },
            suggestions,
            enrichment,
            sections,
            contact_info: profile.contact,
            processing_time_ms: started.elapsed().as_millis() as u64,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NlpMode;
    use crate::enrichment::DisabledProvider;

    fn engine() -> AnalysisEngine {
        let mut config = Config::default();
        config.nlp.mode = NlpMode::Statistical;
        AnalysisEngine::new(&config, Box::new(DisabledProvider)).unwrap()
    }

    const RESUME: &str = "Jane Doe\njane@example.com\n\nSummary\nBackend engineer.\n\n\
                          Experience\nBuilt Python services on AWS for five years.\n\n\
                          Education\nBachelor of Science in CS\n\nSkills\nPython, AWS, Docker";

    const JOB: &str = "Requires 5+ years Python and AWS experience. Bachelor's degree \
                       required. AWS Certified preferred.";

    #[tokio::test]
    async fn test_full_pipeline_report_shape() {
        let report = engine().analyze(RESUME, JOB).await.unwrap();

        assert!(report.score.overall_score >= 0.0 && report.score.overall_score <= 100.0);
        assert!(report
            .keywords
            .found
            .technical_skills
            .contains(&"python".to_string()));
        assert!(report.sections.has_skills);
        assert!(report.sections.has_experience);
        assert_eq!(
            report.contact_info.email.as_deref(),
            Some("jane@example.com")
        );
        // Disabled enrichment degrades to the fallback bundle.
        assert!(report.enrichment.llm_unavailable);
        assert!(!report.suggestions.formatting.is_empty());
    }

    #[tokio::test]
    async fn test_empty_job_description_is_rejected() {
        let err = engine().analyze(RESUME, "   ").await.unwrap_err();
        assert!(matches!(err, AtsCheckerError::MissingInput(_)));
    }

    #[tokio::test]
    async fn test_empty_resume_is_rejected() {
        let err = engine().analyze("", JOB).await.unwrap_err();
        assert!(matches!(err, AtsCheckerError::MissingInput(_)));
    }

    #[tokio::test]
    async fn test_identical_inputs_are_deterministic() {
        let first = engine().analyze(RESUME, JOB).await.unwrap();
        let second = engine().analyze(RESUME, JOB).await.unwrap();

        assert_eq!(first.score, second.score);
        assert_eq!(first.keywords.found, second.keywords.found);
        assert_eq!(first.keywords.missing, second.keywords.missing);
        assert_eq!(first.suggestions, second.suggestions);
    }
}
