//! Integration tests for the ATS checker

use ats_checker::config::{Config, NlpMode};
use ats_checker::enrichment::DisabledProvider;
use ats_checker::error::AtsCheckerError;
use ats_checker::input::manager::InputManager;
use ats_checker::processing::analyzer::AnalysisEngine;
use std::io::Write;
use std::path::Path;

fn test_config() -> Config {
    let mut config = Config::default();
    config.nlp.mode = NlpMode::Statistical;
    config
}

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(&test_config(), Box::new(DisabledProvider)).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    // Markdown markup must not leak through.
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_extraction_caching() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected() {
    let mut temp = tempfile::Builder::new()
        .suffix(".docx")
        .tempfile()
        .unwrap();
    temp.write_all(b"not really a document").unwrap();

    let mut manager = InputManager::new();
    let err = manager.extract_text(temp.path()).await.unwrap_err();
    assert!(matches!(err, AtsCheckerError::UnsupportedFormat(_)));
}

#[tokio::test]
async fn test_nonexistent_file_is_rejected() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nope.txt")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_corrupt_pdf_reports_document_read_error() {
    let mut temp = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    temp.write_all(b"this is not a pdf at all").unwrap();

    let mut manager = InputManager::new();
    let err = manager.extract_text(temp.path()).await.unwrap_err();
    assert!(matches!(err, AtsCheckerError::DocumentRead { .. }));
}

#[tokio::test]
async fn test_full_analysis_over_fixture_files() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let report = engine().analyze(&resume, &job).await.unwrap();

    // Taxonomy pulls the posting's requirements.
    assert!(report
        .keywords
        .found
        .technical_skills
        .contains(&"python".to_string()));
    assert!(report
        .keywords
        .found
        .required_experience
        .contains(&"5 years".to_string()));
    assert!(report
        .keywords
        .found
        .education
        .iter()
        .any(|e| e.contains("bachelor")));
    assert!(report
        .keywords
        .found
        .certifications
        .iter()
        .any(|c| c.contains("Certified")));

    // The resume covers python/aws/docker/postgresql, so those are not missing.
    assert!(!report
        .keywords
        .missing
        .technical_skills
        .contains(&"python".to_string()));
    // Kubernetes appears only in the posting.
    assert!(report
        .keywords
        .missing
        .technical_skills
        .contains(&"kubernetes".to_string()));

    assert!(report.sections.has_summary);
    assert!(report.sections.has_experience);
    assert!(report.sections.has_education);
    assert!(report.sections.has_skills);
    assert!(report.sections.word_count > 50);

    assert_eq!(
        report.contact_info.email.as_deref(),
        Some("john.doe@example.com")
    );
    assert_eq!(
        report.contact_info.linkedin.as_deref(),
        Some("linkedin.com/in/john-doe")
    );

    assert!(report.score.overall_score >= 0.0 && report.score.overall_score <= 100.0);
    assert!(report.keywords.density >= 0.0 && report.keywords.density <= 100.0);

    // Enrichment was disabled: the degraded bundle is present, flagged, and
    // the analysis still succeeded.
    assert!(report.enrichment.llm_unavailable);
    assert!(report.enrichment.message.is_some());
}

#[tokio::test]
async fn test_analysis_is_idempotent() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let engine = engine();
    let first = engine.analyze(&resume, &job).await.unwrap();
    let second = engine.analyze(&resume, &job).await.unwrap();

    assert_eq!(first.score, second.score);
    assert_eq!(first.keywords.found, second.keywords.found);
    assert_eq!(first.keywords.missing, second.keywords.missing);
    assert_eq!(first.keywords.density, second.keywords.density);
    assert_eq!(first.suggestions, second.suggestions);
}

#[tokio::test]
async fn test_weak_resume_gets_critical_guidance() {
    let resume = "Skills\nMicrosoft Word\n\nExperience\nCashier at a store for two summers.";
    let job = "Requires Python, AWS, Docker, Kubernetes, PostgreSQL, React and strong \
               leadership. 5+ years experience. Bachelor's degree required.";

    let report = engine().analyze(resume, job).await.unwrap();

    assert!(report.score.category_scores.skills_match < 60.0);
    assert!(report
        .suggestions
        .critical
        .iter()
        .any(|s| s.title == "Add Missing Technical Skills"));
    // Overall under 40 puts the low-score record first.
    if report.score.overall_score < 40.0 {
        assert_eq!(
            report.suggestions.critical[0].title,
            "Low ATS Score - Major Improvements Needed"
        );
    }
}
