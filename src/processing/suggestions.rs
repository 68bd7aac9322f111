//! Suggestion planning
//!
//! Rule-table-driven: each rule checks score thresholds or missing-keyword
//! counts and appends a record to one of four buckets, in a fixed order, so
//! the output is fully determined by the inputs.

use crate::processing::gap::MissingKeywords;
use crate::processing::scorer::{Rating, ScoreReport};
use crate::processing::segmenter::SectionMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Suggestion {
    fn new(title: &str, description: String, action: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            action,
            keywords: None,
            section: None,
        }
    }

    fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    fn section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSummary {
    pub message: String,
    pub priority: SummaryPriority,
    pub total_missing_keywords: usize,
    pub critical_issues: usize,
    pub important_issues: usize,
    pub top_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub critical: Vec<Suggestion>,
    pub important: Vec<Suggestion>,
    pub recommended: Vec<Suggestion>,
    pub formatting: Vec<Suggestion>,
    pub summary: SuggestionSummary,
}

/// Domain buckets for project archetype suggestions.
const PROJECT_BUCKETS: &[(&[&str], &str)] = &[
    (
        &[
            "react", "angular", "vue", "javascript", "node.js", "express", "django", "flask",
        ],
        "a full-stack web application",
    ),
    (
        &[
            "python",
            "machine learning",
            "data analysis",
            "pandas",
            "numpy",
            "tensorflow",
            "pytorch",
        ],
        "a data analysis or ML project",
    ),
    (
        &["android", "ios", "react native", "flutter", "swift", "kotlin"],
        "a mobile app",
    ),
    (
        &["aws", "azure", "gcp", "docker", "kubernetes", "ci/cd"],
        "a cloud-deployed application",
    ),
    (
        &["sql", "mongodb", "postgresql", "mysql", "redis"],
        "a database-driven application",
    ),
];

/// Sections a resume cannot do without, with the minimum content length
/// below which they count as missing.
const ESSENTIAL_SECTIONS: &[&str] = &["experience", "education", "skills"];
const MIN_SECTION_LENGTH: usize = 20;

pub struct SuggestionPlanner;

impl Default for SuggestionPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionPlanner {
    pub fn new() -> Self {
        Self
    }

    pub fn plan(
        &self,
        missing: &MissingKeywords,
        score: &ScoreReport,
        sections: &SectionMap,
    ) -> SuggestionReport {
        let mut critical = Vec::new();
        let mut important = Vec::new();
        let mut recommended = Vec::new();

        let overall = score.overall_score;
        let categories = &score.category_scores;

        // 1. Very low overall score leads the critical bucket.
        if overall < 40.0 {
            critical.push(Suggestion::new(
                "Low ATS Score - Major Improvements Needed",
                "Your resume needs significant optimization to pass ATS screening.".to_string(),
                "Focus on adding missing keywords and restructuring content to match job \
                 requirements."
                    .to_string(),
            ));
        }

        // 2. Weak skills match with concrete gaps to name.
        if categories.skills_match < 60.0 && !missing.technical_skills.is_empty() {
            let preview: Vec<&str> = missing
                .technical_skills
                .iter()
                .take(5)
                .map(String::as_str)
                .collect();
            critical.push(
                Suggestion::new(
                    "Add Missing Technical Skills",
                    format!(
                        "Your resume is missing {} key technical skills.",
                        missing.technical_skills.len()
                    ),
                    format!(
                        "Add these skills to your Skills section: {}",
                        preview.join(", ")
                    ),
                )
                .keywords(missing.technical_skills.clone())
                .section("skills"),
            );
        }

        // 3. Experience section does not echo the posting.
        if categories.experience_match < 60.0 {
            important.push(
                Suggestion::new(
                    "Strengthen Experience Section",
                    "Your experience section doesn't align well with job requirements."
                        .to_string(),
                    "Rewrite bullet points to include job-specific keywords and quantify \
                     achievements."
                        .to_string(),
                )
                .section("experience"),
            );
        }

        // 4. Stated qualifications not visible.
        if categories.education_match < 50.0 && !missing.education.is_empty() {
            important.push(
                Suggestion::new(
                    "Highlight Relevant Education",
                    "Education requirements from job posting are not clearly visible."
                        .to_string(),
                    format!(
                        "Ensure these qualifications are prominent: {}",
                        missing.education.join(", ")
                    ),
                )
                .section("education"),
            );
        }

        // 5. Too few of the posting's keywords overall.
        if categories.keyword_density < 50.0 {
            important.push(
                Suggestion::new(
                    "Increase Keyword Density",
                    "Your resume contains too few keywords from the job description."
                        .to_string(),
                    "Naturally incorporate more job-specific terms throughout your resume."
                        .to_string(),
                )
                .section("all"),
            );
        }

        // 6. Soft skills worth weaving in.
        if !missing.soft_skills.is_empty() {
            let preview: Vec<&str> = missing
                .soft_skills
                .iter()
                .take(3)
                .map(String::as_str)
                .collect();
            recommended.push(
                Suggestion::new(
                    "Add Soft Skills",
                    format!(
                        "Include {} soft skills mentioned in job posting.",
                        missing.soft_skills.len()
                    ),
                    format!(
                        "Weave these into your experience descriptions: {}",
                        preview.join(", ")
                    ),
                )
                .keywords(missing.soft_skills.clone())
                .section("experience"),
            );
        }

        // 7. Certifications the posting asks for.
        if !missing.certifications.is_empty() {
            recommended.push(
                Suggestion::new(
                    "Highlight Certifications",
                    "Job requires specific certifications.".to_string(),
                    format!(
                        "If you have these, add them prominently: {}",
                        missing.certifications.join(", ")
                    ),
                )
                .keywords(missing.certifications.clone())
                .section("certifications"),
            );
        }

        // 8. Project gaps.
        recommended.extend(self.project_suggestions(sections, missing, categories.skills_match));

        // 9. Formatting checklist.
        let formatting = self.formatting_tips(sections);

        let summary = self.summarize(
            score.rating,
            missing.total(),
            &critical,
            &important,
            &recommended,
        );

        SuggestionReport {
            critical,
            important,
            recommended,
            formatting,
            summary,
        }
    }

    /// Project-gap heuristic: the `other` bucket stands in for a projects
    /// section. The two branches are alternatives, never both.
    fn project_suggestions(
        &self,
        sections: &SectionMap,
        missing: &MissingKeywords,
        skills_match: f32,
    ) -> Vec<Suggestion> {
        let has_projects = sections.other.to_lowercase().contains("project");
        let tech_missing = &missing.technical_skills;
        let mut suggestions = Vec::new();

        if !has_projects || skills_match < 70.0 {
            if !tech_missing.is_empty() {
                let preview: Vec<&str> = tech_missing.iter().take(3).map(String::as_str).collect();
                suggestions.push(
                    Suggestion::new(
                        "Add Relevant Projects",
                        format!(
                            "Your resume would benefit from projects showcasing: {}",
                            preview.join(", ")
                        ),
                        format!(
                            "Consider adding projects like: {}",
                            Self::project_archetypes(tech_missing)
                        ),
                    )
                    .keywords(tech_missing.clone())
                    .section("projects"),
                );
            } else {
                suggestions.push(
                    Suggestion::new(
                        "Strengthen Projects Section",
                        "Projects demonstrate practical application of skills.".to_string(),
                        "Add 2-3 projects that align with the job requirements, highlighting \
                         technologies used and outcomes achieved."
                            .to_string(),
                    )
                    .section("projects"),
                );
            }
        } else if has_projects && skills_match < 60.0 {
            let preview: Vec<&str> = tech_missing.iter().take(5).map(String::as_str).collect();
            suggestions.push(
                Suggestion::new(
                    "Enhance Project Descriptions",
                    "Your projects don't highlight the required technical skills.".to_string(),
                    format!(
                        "Update project descriptions to emphasize: {}",
                        preview.join(", ")
                    ),
                )
                .keywords(tech_missing.clone())
                .section("projects"),
            );
        }

        suggestions
    }

    /// Name up to two project archetypes matching the missing skills.
    fn project_archetypes(missing_skills: &[String]) -> String {
        let lowered: Vec<String> = missing_skills.iter().map(|s| s.to_lowercase()).collect();

        let matched: Vec<&str> = PROJECT_BUCKETS
            .iter()
            .filter(|(keywords, _)| {
                lowered
                    .iter()
                    .any(|skill| keywords.iter().any(|kw| skill.contains(kw)))
            })
            .map(|(_, archetype)| *archetype)
            .take(2)
            .collect();

        if matched.is_empty() {
            "projects demonstrating the required technologies".to_string()
        } else {
            matched.join(", ")
        }
    }

    fn formatting_tips(&self, sections: &SectionMap) -> Vec<Suggestion> {
        let mut tips = Vec::new();

        for name in ESSENTIAL_SECTIONS {
            let text = match *name {
                "experience" => &sections.experience,
                "education" => &sections.education,
                _ => &sections.skills,
            };
            if text.len() < MIN_SECTION_LENGTH {
                let title_case = capitalize(name);
                tips.push(
                    Suggestion::new(
                        &format!("Add {} Section", title_case),
                        format!(
                            "Your resume appears to be missing a clear {} section.",
                            name
                        ),
                        format!(
                            "Create a dedicated {} section with clear headers.",
                            title_case
                        ),
                    )
                    .section(name),
                );
            }
        }

        tips.push(Suggestion::new(
            "Use Standard Section Headers",
            "ATS systems look for standard section names.".to_string(),
            "Use headers like \"Work Experience\", \"Education\", \"Skills\", \
             \"Certifications\"."
                .to_string(),
        ));
        tips.push(Suggestion::new(
            "Avoid Graphics and Tables",
            "Complex formatting can confuse ATS parsers.".to_string(),
            "Use simple bullet points and clear text formatting.".to_string(),
        ));
        tips.push(Suggestion::new(
            "Use Standard Fonts",
            "Stick to ATS-friendly fonts.".to_string(),
            "Use Arial, Calibri, or Times New Roman in 10-12pt size.".to_string(),
        ));
        tips.push(Suggestion::new(
            "Include Contact Information",
            "Make it easy for recruiters to reach you.".to_string(),
            "Put phone, email, and LinkedIn at the top of your resume.".to_string(),
        ));

        tips
    }

    fn summarize(
        &self,
        rating: Rating,
        total_missing: usize,
        critical: &[Suggestion],
        important: &[Suggestion],
        recommended: &[Suggestion],
    ) -> SuggestionSummary {
        let (message, priority) = match rating {
            Rating::Excellent => (
                "Your resume is well-optimized for ATS! Just a few minor tweaks recommended.",
                SummaryPriority::Low,
            ),
            Rating::Good => (
                "Your resume is good but has room for improvement. Focus on the important \
                 suggestions.",
                SummaryPriority::Medium,
            ),
            _ => (
                "Your resume needs significant optimization to pass ATS screening. Address \
                 critical issues first.",
                SummaryPriority::High,
            ),
        };

        let mut top_actions: Vec<String> = critical
            .iter()
            .take(2)
            .map(|s| s.action.clone())
            .collect();
        for suggestion in important.iter().chain(recommended.iter()) {
            if top_actions.len() >= 3 {
                break;
            }
            top_actions.push(suggestion.action.clone());
        }

        SuggestionSummary {
            message: message.to_string(),
            priority,
            total_missing_keywords: total_missing,
            critical_issues: critical.len(),
            important_issues: important.len(),
            top_actions,
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::CategoryScores;

    fn report(overall: f32, skills: f32, experience: f32, education: f32, density: f32) -> ScoreReport {
        let rating = if overall >= 80.0 {
            Rating::Excellent
        } else if overall >= 60.0 {
            Rating::Good
        } else if overall >= 40.0 {
            Rating::Fair
        } else {
            Rating::NeedsImprovement
        };
        ScoreReport {
            overall_score: overall,
            category_scores: CategoryScores {
                skills_match: skills,
                experience_match: experience,
                education_match: education,
                keyword_density: density,
            },
            semantic_similarity: 50.0,
            rating,
        }
    }

    fn missing_with_tech() -> MissingKeywords {
        MissingKeywords {
            technical_skills: vec!["python".into(), "aws".into()],
            soft_skills: vec!["leadership".into()],
            education: vec!["bachelor degree".into()],
            certifications: vec!["AWS Certified".into()],
            other: vec![],
        }
    }

    fn healthy_sections() -> SectionMap {
        SectionMap {
            summary: "Seasoned engineer with impact".into(),
            experience: "Ten years of shipping production systems".into(),
            education: "BSc in Computer Science from somewhere".into(),
            skills: "A broad palette of technical skills".into(),
            certifications: String::new(),
            other: String::new(),
        }
    }

    #[test]
    fn test_low_score_record_leads_critical_bucket() {
        let planner = SuggestionPlanner::new();
        let plan = planner.plan(
            &missing_with_tech(),
            &report(35.0, 30.0, 30.0, 30.0, 30.0),
            &healthy_sections(),
        );

        assert_eq!(
            plan.critical[0].title,
            "Low ATS Score - Major Improvements Needed"
        );
        // Weak skills with gaps adds the second critical record.
        assert_eq!(plan.critical[1].title, "Add Missing Technical Skills");
    }

    #[test]
    fn test_no_critical_records_for_strong_resume() {
        let planner = SuggestionPlanner::new();
        let plan = planner.plan(
            &MissingKeywords::default(),
            &report(85.0, 90.0, 90.0, 90.0, 90.0),
            &healthy_sections(),
        );

        assert!(plan.critical.is_empty());
        assert!(plan.important.is_empty());
        assert_eq!(plan.summary.priority, SummaryPriority::Low);
    }

    #[test]
    fn test_top_actions_order_and_cap() {
        let planner = SuggestionPlanner::new();
        let plan = planner.plan(
            &missing_with_tech(),
            &report(35.0, 30.0, 30.0, 30.0, 30.0),
            &healthy_sections(),
        );

        assert_eq!(plan.summary.top_actions.len(), 3);
        assert_eq!(plan.summary.top_actions[0], plan.critical[0].action);
        assert_eq!(plan.summary.top_actions[1], plan.critical[1].action);
        assert_eq!(plan.summary.top_actions[2], plan.important[0].action);
    }

    #[test]
    fn test_summary_counts() {
        let planner = SuggestionPlanner::new();
        let missing = missing_with_tech();
        let plan = planner.plan(
            &missing,
            &report(35.0, 30.0, 30.0, 30.0, 30.0),
            &healthy_sections(),
        );

        assert_eq!(plan.summary.total_missing_keywords, missing.total());
        assert_eq!(plan.summary.critical_issues, plan.critical.len());
        assert_eq!(plan.summary.important_issues, plan.important.len());
        assert_eq!(plan.summary.priority, SummaryPriority::High);
    }

    #[test]
    fn test_soft_skill_preview_caps_at_three() {
        let planner = SuggestionPlanner::new();
        let missing = MissingKeywords {
            soft_skills: vec![
                "leadership".into(),
                "teamwork".into(),
                "communication".into(),
                "creative".into(),
            ],
            ..Default::default()
        };
        let plan = planner.plan(
            &missing,
            &report(70.0, 80.0, 80.0, 80.0, 80.0),
            &healthy_sections(),
        );

        let record = plan
            .recommended
            .iter()
            .find(|s| s.title == "Add Soft Skills")
            .unwrap();
        assert!(record.action.contains("communication"));
        assert!(!record.action.contains("creative"));
    }

    #[test]
    fn test_project_archetypes_by_bucket() {
        let archetypes = SuggestionPlanner::project_archetypes(&[
            "react".to_string(),
            "aws".to_string(),
        ]);
        assert_eq!(
            archetypes,
            "a full-stack web application, a cloud-deployed application"
        );

        let generic = SuggestionPlanner::project_archetypes(&["cobol".to_string()]);
        assert_eq!(generic, "projects demonstrating the required technologies");
    }

    #[test]
    fn test_project_suggestion_for_missing_projects_section() {
        let planner = SuggestionPlanner::new();
        let plan = planner.plan(
            &missing_with_tech(),
            &report(50.0, 50.0, 80.0, 80.0, 80.0),
            &healthy_sections(),
        );

        assert!(plan
            .recommended
            .iter()
            .any(|s| s.title == "Add Relevant Projects"));
    }

    #[test]
    fn test_formatting_always_includes_standing_tips() {
        let planner = SuggestionPlanner::new();
        let plan = planner.plan(
            &MissingKeywords::default(),
            &report(85.0, 90.0, 90.0, 90.0, 90.0),
            &healthy_sections(),
        );

        // Healthy sections: only the four standing tips remain.
        assert_eq!(plan.formatting.len(), 4);
        assert_eq!(plan.formatting[0].title, "Use Standard Section Headers");
    }

    #[test]
    fn test_formatting_flags_thin_sections() {
        let planner = SuggestionPlanner::new();
        let mut sections = healthy_sections();
        sections.skills = "short".into();
        let plan = planner.plan(
            &MissingKeywords::default(),
            &report(85.0, 90.0, 90.0, 90.0, 90.0),
            &sections,
        );

        assert_eq!(plan.formatting.len(), 5);
        assert_eq!(plan.formatting[0].title, "Add Skills Section");
    }
}
