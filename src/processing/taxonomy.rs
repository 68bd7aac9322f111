//! Keyword taxonomy extraction from job descriptions

use crate::config::KeywordConfig;
use crate::error::{AtsCheckerError, Result};
use crate::processing::language::LanguageBackend;
use aho_corasick::AhoCorasick;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Technical skill reference set. Kept sorted: match output follows this
/// order, which makes the extraction deterministic.
pub const TECH_SKILLS: &[&str] = &[
    "agile",
    "ai",
    "angular",
    "aws",
    "azure",
    "c#",
    "c++",
    "ci/cd",
    "computer vision",
    "deep learning",
    "django",
    "docker",
    "elasticsearch",
    "express",
    "flask",
    "gcp",
    "git",
    "graphql",
    "java",
    "javascript",
    "jenkins",
    "jira",
    "kotlin",
    "kubernetes",
    "machine learning",
    "microservices",
    "mongodb",
    "mysql",
    "nlp",
    "node.js",
    "numpy",
    "pandas",
    "php",
    "postgresql",
    "python",
    "pytorch",
    "react",
    "redis",
    "rest api",
    "ruby",
    "scikit-learn",
    "scrum",
    "spring",
    "sql",
    "swift",
    "tensorflow",
    "vue",
];

/// Soft skill reference set, sorted like [`TECH_SKILLS`].
pub const SOFT_SKILLS: &[&str] = &[
    "adaptable",
    "analytical",
    "collaborative",
    "communication",
    "creative",
    "critical thinking",
    "decision making",
    "detail-oriented",
    "leadership",
    "organized",
    "presentation",
    "problem solving",
    "teamwork",
    "time management",
];

const EDUCATION_TRIGGERS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "diploma",
    "certification",
];

/// Categorized keywords extracted from one job description. Every list
/// holds distinct entries in a deterministic order; `all_keywords` is
/// frequency-ranked and capped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordTaxonomy {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub required_experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub all_keywords: Vec<String>,
}

pub struct KeywordTaxonomyExtractor {
    tech_matcher: AhoCorasick,
    soft_matcher: AhoCorasick,
    education_regexes: Vec<(&'static str, Regex)>,
    experience_regex: Regex,
    certification_regex: Regex,
    language: Arc<dyn LanguageBackend>,
    max_keywords: usize,
    min_keyword_length: usize,
}

impl KeywordTaxonomyExtractor {
    pub fn new(language: Arc<dyn LanguageBackend>, config: &KeywordConfig) -> Result<Self> {
        // Overlapping search keeps the substring-containment semantics:
        // "java" still counts when only "javascript" appears.
        let build = |patterns: &[&str]| {
            AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(patterns)
                .map_err(|e| {
                    AtsCheckerError::Processing(format!("Failed to build skill matcher: {}", e))
                })
        };
        let tech_matcher = build(TECH_SKILLS)?;
        let soft_matcher = build(SOFT_SKILLS)?;

        // Possessive forms ("bachelor's degree") count as adjacency.
        let education_regexes = EDUCATION_TRIGGERS
            .iter()
            .map(|trigger| {
                let pattern = format!(
                    r"\b\w+(?:'s)?\s+{trigger}\b|\b{trigger}(?:'s)?\s+\w+\b",
                    trigger = trigger
                );
                Regex::new(&pattern)
                    .map(|re| (*trigger, re))
                    .map_err(|e| {
                        AtsCheckerError::Processing(format!("Invalid education pattern: {}", e))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let experience_regex =
            Regex::new(r"(\d+)\+?\s*years?").expect("Invalid experience regex");

        let certification_regex = Regex::new(r"\b[A-Z]{2,}[\w\s-]*(?i:certified|certification)\b")
            .expect("Invalid certification regex");

        Ok(Self {
            tech_matcher,
            soft_matcher,
            education_regexes,
            experience_regex,
            certification_regex,
            language,
            max_keywords: config.max_keywords,
            min_keyword_length: config.min_keyword_length,
        })
    }

    /// Derive the full taxonomy from one job description.
    pub fn extract(&self, job_text: &str) -> KeywordTaxonomy {
        let job_lower = job_text.to_lowercase();

        let technical_skills = Self::matched_skills(&self.tech_matcher, TECH_SKILLS, job_text);
        let soft_skills = Self::matched_skills(&self.soft_matcher, SOFT_SKILLS, job_text);

        let extraction = self.language.phrases(job_text, self.min_keyword_length);

        let education = self.extract_education(&job_lower);
        let required_experience = self.extract_experience(&job_lower);
        let certifications = self.extract_certifications(job_text);

        let combined = technical_skills
            .iter()
            .chain(soft_skills.iter())
            .cloned()
            .chain(extraction.noun_phrases)
            .chain(extraction.entities)
            .collect();
        let all_keywords = self.rank_keywords(combined);

        KeywordTaxonomy {
            technical_skills,
            soft_skills,
            required_experience,
            education,
            certifications,
            all_keywords,
        }
    }

    /// Which reference-set entries occur (case-insensitive substring) in the
    /// text, in reference-set order.
    fn matched_skills(matcher: &AhoCorasick, reference: &[&str], text: &str) -> Vec<String> {
        let mut seen = vec![false; reference.len()];
        for m in matcher.find_overlapping_iter(text) {
            seen[m.pattern().as_usize()] = true;
        }
        reference
            .iter()
            .zip(seen)
            .filter(|(_, hit)| *hit)
            .map(|(skill, _)| skill.to_string())
            .collect()
    }

    /// Trigger word plus one adjacent word, for each trigger present.
    fn extract_education(&self, job_lower: &str) -> Vec<String> {
        let mut matches = Vec::new();
        for (trigger, regex) in &self.education_regexes {
            if !job_lower.contains(trigger) {
                continue;
            }
            for m in regex.find_iter(job_lower) {
                matches.push(m.as_str().to_string());
            }
        }
        dedup_first_seen(matches)
    }

    fn extract_experience(&self, job_lower: &str) -> Vec<String> {
        let matches = self
            .experience_regex
            .captures_iter(job_lower)
            .filter_map(|caps| caps.get(1))
            .map(|years| format!("{} years", years.as_str()))
            .collect();
        dedup_first_seen(matches)
    }

    /// Uppercase-acronym tokens followed by "certified"/"certification".
    fn extract_certifications(&self, job_text: &str) -> Vec<String> {
        let matches = self
            .certification_regex
            .find_iter(job_text)
            .map(|m| m.as_str().trim().to_string())
            .collect();
        dedup_first_seen(matches)
    }

    /// Frequency ranking over the combined candidate list. Counting happens
    /// before deduplication; the sort is stable, so equal counts keep their
    /// first-seen order. This pins the tie-break as a defined contract.
    fn rank_keywords(&self, candidates: Vec<String>) -> Vec<String> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();

        for candidate in candidates {
            let keyword = candidate.trim().to_string();
            if keyword.chars().count() <= self.min_keyword_length {
                continue;
            }
            if !counts.contains_key(&keyword) {
                order.push(keyword.clone());
            }
            *counts.entry(keyword).or_insert(0) += 1;
        }

        order.sort_by_key(|keyword| std::cmp::Reverse(counts[keyword]));
        order.truncate(self.max_keywords);
        order
    }
}

fn dedup_first_seen(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::language::StatisticalBackend;

    fn extractor() -> KeywordTaxonomyExtractor {
        let config = Config::default();
        KeywordTaxonomyExtractor::new(Arc::new(StatisticalBackend::new()), &config.keywords)
            .unwrap()
    }

    #[test]
    fn test_requirements_scenario() {
        let taxonomy = extractor().extract(
            "Requires 5+ years Python and AWS experience. Bachelor's degree required. \
             AWS Certified preferred.",
        );

        assert!(taxonomy.technical_skills.contains(&"python".to_string()));
        assert!(taxonomy.technical_skills.contains(&"aws".to_string()));
        assert!(taxonomy
            .required_experience
            .contains(&"5 years".to_string()));
        assert!(taxonomy.education.iter().any(|e| e.contains("bachelor")));
        assert!(taxonomy
            .certifications
            .iter()
            .any(|c| c.starts_with("AWS") && c.contains("Certified")));
    }

    #[test]
    fn test_substring_detection_is_preserved() {
        // "java" is a substring of "javascript": both are reported.
        let taxonomy = extractor().extract("We use JavaScript heavily.");

        assert!(taxonomy.technical_skills.contains(&"java".to_string()));
        assert!(taxonomy
            .technical_skills
            .contains(&"javascript".to_string()));
    }

    #[test]
    fn test_skill_order_is_reference_order() {
        let taxonomy = extractor().extract("python then aws then docker");

        assert_eq!(
            taxonomy.technical_skills,
            vec!["aws".to_string(), "docker".to_string(), "python".to_string()]
        );
    }

    #[test]
    fn test_soft_skills_detected() {
        let taxonomy = extractor().extract("Strong communication and leadership expected.");

        assert_eq!(
            taxonomy.soft_skills,
            vec!["communication".to_string(), "leadership".to_string()]
        );
    }

    #[test]
    fn test_all_keywords_capped_and_ranked() {
        let config = Config::default();
        let mut keyword_config = config.keywords.clone();
        keyword_config.max_keywords = 5;
        let extractor = KeywordTaxonomyExtractor::new(
            Arc::new(StatisticalBackend::new()),
            &keyword_config,
        )
        .unwrap();

        let taxonomy = extractor.extract(
            "python python python docker kubernetes pipelines monitoring alerting tracing",
        );

        assert!(taxonomy.all_keywords.len() <= 5);
        // "python python" repeats as a bigram, so it outranks single-shot phrases.
        assert_eq!(taxonomy.all_keywords[0], "python python");
    }

    #[test]
    fn test_experience_formats_and_dedups() {
        let taxonomy = extractor().extract("3 years backend, 3 years cloud, 10+ years total");

        assert_eq!(
            taxonomy.required_experience,
            vec!["3 years".to_string(), "10 years".to_string()]
        );
    }

    #[test]
    fn test_no_requirements_yields_empty_lists() {
        let taxonomy = extractor().extract("A short note about nothing in particular.");

        assert!(taxonomy.required_experience.is_empty());
        assert!(taxonomy.education.is_empty());
        assert!(taxonomy.certifications.is_empty());
    }
}
