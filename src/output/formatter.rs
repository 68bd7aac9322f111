//! Output formatters for the analysis report

use crate::error::Result;
use crate::processing::analyzer::AnalysisReport;
use crate::processing::scorer::Rating;
use crate::processing::suggestions::Suggestion;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

/// Trait for rendering analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    pub detailed: bool,
}

/// JSON formatter for structured consumption
pub struct JsonFormatter {
    pub pretty: bool,
}

/// Markdown formatter for shareable reports
pub struct MarkdownFormatter;

/// Coordinates the individual formatters
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn render(report: &AnalysisReport, format: OutputFormat, detailed: bool) -> Result<String> {
        match format {
            OutputFormat::Console => ConsoleFormatter { detailed }.format_report(report),
            OutputFormat::Json => JsonFormatter { pretty: true }.format_report(report),
            OutputFormat::Markdown => MarkdownFormatter.format_report(report),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();

        let score_line = format!(
            "{:.1}% ({})",
            report.score.overall_score, report.score.rating
        );
        let colored_score = match report.score.rating {
            Rating::Excellent => score_line.green().bold(),
            Rating::Good => score_line.cyan().bold(),
            Rating::Fair => score_line.yellow().bold(),
            Rating::NeedsImprovement => score_line.red().bold(),
        };

        out.push_str(&format!("\n{}\n", "ATS Match Report".bold()));
        out.push_str(&format!("Overall Score: {}\n\n", colored_score));

        let categories = &report.score.category_scores;
        out.push_str(&format!("{}\n", "Category Scores".bold()));
        out.push_str(&format!("  Skills:          {:>6.1}%\n", categories.skills_match));
        out.push_str(&format!(
            "  Experience:      {:>6.1}%\n",
            categories.experience_match
        ));
        out.push_str(&format!(
            "  Education:       {:>6.1}%\n",
            categories.education_match
        ));
        out.push_str(&format!(
            "  Keyword density: {:>6.1}%\n",
            categories.keyword_density
        ));
        out.push_str(&format!(
            "  Semantic match:  {:>6.1}%\n\n",
            report.score.semantic_similarity
        ));

        out.push_str(&format!("{}\n", "Summary".bold()));
        out.push_str(&format!("  {}\n", report.suggestions.summary.message));
        out.push_str(&format!(
            "  Missing keywords: {} | Critical issues: {} | Important issues: {}\n\n",
            report.suggestions.summary.total_missing_keywords,
            report.suggestions.summary.critical_issues,
            report.suggestions.summary.important_issues,
        ));

        if !report.suggestions.summary.top_actions.is_empty() {
            out.push_str(&format!("{}\n", "Top Actions".bold()));
            for (i, action) in report.suggestions.summary.top_actions.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, action));
            }
            out.push('\n');
        }

        Self::push_bucket(&mut out, "Critical", &report.suggestions.critical, |s| {
            s.red().to_string()
        });
        Self::push_bucket(&mut out, "Important", &report.suggestions.important, |s| {
            s.yellow().to_string()
        });
        if self.detailed {
            Self::push_bucket(&mut out, "Recommended", &report.suggestions.recommended, |s| {
                s.cyan().to_string()
            });
            Self::push_bucket(&mut out, "Formatting", &report.suggestions.formatting, |s| {
                s.normal().to_string()
            });

            let missing = &report.keywords.missing;
            if !missing.technical_skills.is_empty() {
                out.push_str(&format!(
                    "{} {}\n",
                    "Missing technical skills:".bold(),
                    missing.technical_skills.join(", ")
                ));
            }
            if !missing.soft_skills.is_empty() {
                out.push_str(&format!(
                    "{} {}\n",
                    "Missing soft skills:".bold(),
                    missing.soft_skills.join(", ")
                ));
            }
            out.push('\n');
        }

        if report.enrichment.llm_unavailable {
            if let Some(message) = &report.enrichment.message {
                out.push_str(&format!("{}\n", message.dimmed()));
            }
        } else {
            out.push_str(&format!("{}\n", "AI Suggestions".bold()));
            if !report.enrichment.professional_summary.is_empty() {
                out.push_str(&format!(
                    "  Summary draft: {}\n",
                    report.enrichment.professional_summary
                ));
            }
            for bullet in &report.enrichment.experience_bullets {
                out.push_str(&format!("  - {}\n", bullet));
            }
            for idea in &report.enrichment.project_ideas {
                out.push_str(&format!("  * {}\n", idea));
            }
        }

        out.push_str(&format!(
            "\nAnalyzed {} words in {}ms\n",
            report.sections.word_count, report.processing_time_ms
        ));

        Ok(out)
    }
}

impl ConsoleFormatter {
    fn push_bucket(
        out: &mut String,
        title: &str,
        suggestions: &[Suggestion],
        paint: impl Fn(&str) -> String,
    ) {
        if suggestions.is_empty() {
            return;
        }
        out.push_str(&format!("{}\n", paint(title)));
        for suggestion in suggestions {
            out.push_str(&format!("  • {}: {}\n", suggestion.title, suggestion.action));
        }
        out.push('\n');
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(rendered)
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();
        let categories = &report.score.category_scores;

        out.push_str("# ATS Match Report\n\n");
        out.push_str(&format!(
            "**Overall score:** {:.1}% ({})\n\n",
            report.score.overall_score, report.score.rating
        ));

        out.push_str("## Category Scores\n\n");
        out.push_str("| Category | Score |\n|---|---|\n");
        out.push_str(&format!("| Skills | {:.1}% |\n", categories.skills_match));
        out.push_str(&format!(
            "| Experience | {:.1}% |\n",
            categories.experience_match
        ));
        out.push_str(&format!(
            "| Education | {:.1}% |\n",
            categories.education_match
        ));
        out.push_str(&format!(
            "| Keyword density | {:.1}% |\n",
            categories.keyword_density
        ));
        out.push_str(&format!(
            "| Semantic similarity | {:.1}% |\n\n",
            report.score.semantic_similarity
        ));

        out.push_str("## Summary\n\n");
        out.push_str(&format!("{}\n\n", report.suggestions.summary.message));
        for action in &report.suggestions.summary.top_actions {
            out.push_str(&format!("1. {}\n", action));
        }
        out.push('\n');

        for (title, bucket) in [
            ("Critical", &report.suggestions.critical),
            ("Important", &report.suggestions.important),
            ("Recommended", &report.suggestions.recommended),
            ("Formatting", &report.suggestions.formatting),
        ] {
            if bucket.is_empty() {
                continue;
            }
            out.push_str(&format!("## {}\n\n", title));
            for suggestion in bucket {
                out.push_str(&format!(
                    "- **{}**: {} {}\n",
                    suggestion.title, suggestion.description, suggestion.action
                ));
            }
            out.push('\n');
        }

        let missing = &report.keywords.missing;
        if missing.total() > 0 {
            out.push_str("## Missing Keywords\n\n");
            for (label, list) in [
                ("Technical", &missing.technical_skills),
                ("Soft", &missing.soft_skills),
                ("Education", &missing.education),
                ("Certifications", &missing.certifications),
                ("Other", &missing.other),
            ] {
                if !list.is_empty() {
                    out.push_str(&format!("- {}: {}\n", label, list.join(", ")));
                }
            }
            out.push('\n');
        }

        if !report.enrichment.llm_unavailable {
            out.push_str("## AI Suggestions\n\n");
            if !report.enrichment.professional_summary.is_empty() {
                out.push_str(&format!(
                    "{}\n\n",
                    report.enrichment.professional_summary
                ));
            }
            for bullet in &report.enrichment.experience_bullets {
                out.push_str(&format!("- {}\n", bullet));
            }
        }

        out.push_str(&format!(
            "\n_Generated at {} in {}ms._\n",
            report.generated_at.format("%Y-%m-%d %H:%M UTC"),
            report.processing_time_ms
        ));

        Ok(out)
    }
}
