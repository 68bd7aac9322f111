//! Multi-factor match scoring
//!
//! Four category scores plus a semantic similarity score, combined into one
//! weighted overall score. Every sub-score has a defined fallback value, so
//! scoring never propagates a failure.

use crate::config::ScoringConfig;
use crate::processing::language::LanguageBackend;
use crate::processing::segmenter::ResumeProfile;
use crate::processing::similarity;
use crate::processing::taxonomy::KeywordTaxonomy;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Degree-level keywords worth a flat education bonus.
const DEGREE_KEYWORDS: &[&str] = &["bachelor", "master", "phd", "doctorate", "associate"];

/// Share of the overall score carried by the weighted category sum; the
/// rest comes from semantic similarity.
const CATEGORY_BLEND: f32 = 0.7;
const SEMANTIC_BLEND: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub skills_match: f32,
    pub experience_match: f32,
    pub education_match: f32,
    pub keyword_density: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Excellent => write!(f, "Excellent"),
            Rating::Good => write!(f, "Good"),
            Rating::Fair => write!(f, "Fair"),
            Rating::NeedsImprovement => write!(f, "Needs Improvement"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub overall_score: f32,
    pub category_scores: CategoryScores,
    pub semantic_similarity: f32,
    pub rating: Rating,
}

pub struct MatchScorer {
    config: ScoringConfig,
    language: Arc<dyn LanguageBackend>,
    similarity_char_cap: usize,
}

impl MatchScorer {
    pub fn new(
        config: ScoringConfig,
        language: Arc<dyn LanguageBackend>,
        similarity_char_cap: usize,
    ) -> Self {
        Self {
            config,
            language,
            similarity_char_cap,
        }
    }

    pub fn score(
        &self,
        profile: &ResumeProfile,
        job_text: &str,
        taxonomy: &KeywordTaxonomy,
    ) -> ScoreReport {
        let skills = clamp_score(Self::score_skills(&profile.sections.skills, taxonomy));
        let experience = clamp_score(Self::score_experience(
            &profile.sections.experience,
            job_text,
        ));
        let education = clamp_score(Self::score_education(
            &profile.sections.education,
            taxonomy,
        ));
        let density = clamp_score(Self::score_keywords(
            &profile.raw_text,
            &taxonomy.all_keywords,
        ));

        let semantic = clamp_score(self.semantic_similarity(&profile.raw_text, job_text));

        let weighted = skills * self.config.skills_weight
            + experience * self.config.experience_weight
            + education * self.config.education_weight
            + density * self.config.keyword_weight;
        let overall = clamp_score(weighted * CATEGORY_BLEND + semantic * SEMANTIC_BLEND);

        ScoreReport {
            overall_score: round2(overall),
            category_scores: CategoryScores {
                skills_match: round2(skills),
                experience_match: round2(experience),
                education_match: round2(education),
                keyword_density: round2(density),
            },
            semantic_similarity: round2(semantic),
            rating: self.rating(overall),
        }
    }

    /// 70% technical ratio + 30% soft ratio. An empty skills section scores
    /// zero; a job with no skill requirements at all scores neutral.
    fn score_skills(skills_section: &str, taxonomy: &KeywordTaxonomy) -> f32 {
        if skills_section.trim().is_empty() {
            return 0.0;
        }

        let total_skills = taxonomy.technical_skills.len() + taxonomy.soft_skills.len();
        if total_skills == 0 {
            return 50.0;
        }

        let skills_lower = skills_section.to_lowercase();
        let ratio = |required: &[String]| -> f32 {
            if required.is_empty() {
                return 0.0;
            }
            let matched = required
                .iter()
                .filter(|skill| skills_lower.contains(&skill.to_lowercase()))
                .count();
            matched as f32 / required.len() as f32 * 100.0
        };

        ratio(&taxonomy.technical_skills) * 0.7 + ratio(&taxonomy.soft_skills) * 0.3
    }

    /// Tf-idf cosine between the experience section and the job posting.
    /// Neutral when the section is empty or the similarity is undefined.
    fn score_experience(experience_section: &str, job_text: &str) -> f32 {
        if experience_section.trim().is_empty() {
            return 50.0;
        }

        match similarity::tfidf_cosine(experience_section, job_text) {
            Some(sim) => sim * 100.0,
            None => 50.0,
        }
    }

    /// Requirement hit ratio with a flat degree bonus. An absent section
    /// gets partial credit and takes precedence over the requirement count;
    /// a posting without explicit requirements scores generously.
    fn score_education(education_section: &str, taxonomy: &KeywordTaxonomy) -> f32 {
        if education_section.trim().is_empty() {
            return 30.0;
        }

        let total_requirements = taxonomy.education.len() + taxonomy.certifications.len();
        if total_requirements == 0 {
            return 70.0;
        }

        let education_lower = education_section.to_lowercase();
        let matched = taxonomy
            .education
            .iter()
            .chain(taxonomy.certifications.iter())
            .filter(|req| education_lower.contains(&req.to_lowercase()))
            .count();

        let mut score = matched as f32 / total_requirements as f32 * 100.0;

        let has_degree = DEGREE_KEYWORDS
            .iter()
            .any(|degree| education_lower.contains(degree));
        if has_degree {
            score = (score + 20.0).min(100.0);
        }

        score
    }

    /// Keyword coverage over `all_keywords`; neutral for an empty list.
    fn score_keywords(resume_text: &str, all_keywords: &[String]) -> f32 {
        if all_keywords.is_empty() {
            return 50.0;
        }

        let resume_lower = resume_text.to_lowercase();
        let matched = all_keywords
            .iter()
            .filter(|kw| resume_lower.contains(&kw.to_lowercase()))
            .count();

        (matched as f32 / all_keywords.len() as f32 * 100.0).min(100.0)
    }

    /// Backend similarity with a tf-idf fallback, then a fixed neutral
    /// value. Texts are truncated to bound the computation.
    fn semantic_similarity(&self, resume_text: &str, job_text: &str) -> f32 {
        let resume = truncate_chars(resume_text, self.similarity_char_cap);
        let job = truncate_chars(job_text, self.similarity_char_cap);

        match self.language.similarity(resume, job) {
            Ok(sim) => sim.clamp(0.0, 1.0) * 100.0,
            Err(e) => {
                warn!("semantic similarity failed ({}), using tf-idf fallback", e);
                match similarity::tfidf_cosine(resume, job) {
                    Some(sim) => sim * 100.0,
                    None => 50.0,
                }
            }
        }
    }

    fn rating(&self, score: f32) -> Rating {
        if score >= self.config.excellent_threshold {
            Rating::Excellent
        } else if score >= self.config.good_threshold {
            Rating::Good
        } else if score >= self.config.fair_threshold {
            Rating::Fair
        } else {
            Rating::NeedsImprovement
        }
    }
}

pub(crate) fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

fn clamp_score(value: f32) -> f32 {
    value.clamp(0.0, 100.0)
}

fn truncate_chars(text: &str, cap: usize) -> &str {
    match text.char_indices().nth(cap) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
