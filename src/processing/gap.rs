//! Missing-keyword analysis and keyword density

use crate::processing::taxonomy::KeywordTaxonomy;
use serde::{Deserialize, Serialize};

/// Taxonomy entries absent from the resume, by category. `other` holds
/// general keywords not already counted under the skill buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingKeywords {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub other: Vec<String>,
}

impl MissingKeywords {
    pub fn total(&self) -> usize {
        self.technical_skills.len()
            + self.soft_skills.len()
            + self.education.len()
            + self.certifications.len()
            + self.other.len()
    }
}

/// Presence is a case-insensitive substring test against the resume's full
/// text. No token boundaries: a keyword inside a longer resume word counts
/// as present.
pub struct GapAnalyzer;

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl GapAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn find_missing(&self, resume_text: &str, taxonomy: &KeywordTaxonomy) -> MissingKeywords {
        let resume_lower = resume_text.to_lowercase();
        let absent = |keyword: &String| !resume_lower.contains(&keyword.to_lowercase());

        let technical_skills: Vec<String> = taxonomy
            .technical_skills
            .iter()
            .filter(|kw| absent(kw))
            .cloned()
            .collect();
        let soft_skills: Vec<String> = taxonomy
            .soft_skills
            .iter()
            .filter(|kw| absent(kw))
            .cloned()
            .collect();
        let education = taxonomy
            .education
            .iter()
            .filter(|kw| absent(kw))
            .cloned()
            .collect();
        let certifications = taxonomy
            .certifications
            .iter()
            .filter(|kw| absent(kw))
            .cloned()
            .collect();

        // Skip entries the skill buckets already report.
        let other = taxonomy
            .all_keywords
            .iter()
            .filter(|kw| {
                absent(kw) && !technical_skills.contains(kw) && !soft_skills.contains(kw)
            })
            .cloned()
            .collect();

        MissingKeywords {
            technical_skills,
            soft_skills,
            education,
            certifications,
            other,
        }
    }

    /// Share of the keyword list found in the resume, as a percentage.
    /// Defined as 0 for an empty list.
    pub fn keyword_density(&self, resume_text: &str, keywords: &[String]) -> f32 {
        if keywords.is_empty() {
            return 0.0;
        }

        let resume_lower = resume_text.to_lowercase();
        let found = keywords
            .iter()
            .filter(|kw| resume_lower.contains(&kw.to_lowercase()))
            .count();

        found as f32 / keywords.len() as f32 * 100.0
    }
}
