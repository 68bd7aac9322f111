//! Language analysis capability
//!
//! Semantic similarity and candidate-phrase extraction sit behind one trait
//! with two implementations: an embedding-backed one (Model2Vec static
//! embeddings loaded from disk) and a statistical one (tf-idf cosine plus a
//! bigram scan). The backend is chosen once at startup so behavior stays
//! uniform across a process lifetime; `NlpMode` can force either path.

use crate::config::{NlpConfig, NlpMode};
use crate::error::{AtsCheckerError, Result};
use crate::processing::similarity;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use regex::Regex;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

/// Candidate phrases pulled out of a job description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseExtraction {
    pub noun_phrases: Vec<String>,
    pub entities: Vec<String>,
}

/// Maximum tokens per extracted phrase.
const MAX_PHRASE_TOKENS: usize = 3;

pub trait LanguageBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Document similarity in [0, 1].
    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32>;

    /// Best-effort candidate phrases; `min_length` is the minimum character
    /// length of a phrase worth keeping.
    fn phrases(&self, text: &str, min_length: usize) -> PhraseExtraction;
}

/// Pick the backend once at startup. `Auto` degrades to the statistical
/// backend when no embedding model is present on disk; `Model` makes that
/// a hard error so misconfiguration is visible immediately.
pub fn select_backend(config: &NlpConfig) -> Result<Arc<dyn LanguageBackend>> {
    match config.mode {
        NlpMode::Statistical => {
            info!("Language backend: statistical (tf-idf / bigram)");
            Ok(Arc::new(StatisticalBackend::new()))
        }
        NlpMode::Model => {
            let backend = EmbeddingBackend::load(config)?;
            info!("Language backend: embedding model");
            Ok(Arc::new(backend))
        }
        NlpMode::Auto => match EmbeddingBackend::load(config) {
            Ok(backend) => {
                info!("Language backend: embedding model");
                Ok(Arc::new(backend))
            }
            Err(e) => {
                warn!(
                    "Embedding model unavailable ({}), falling back to statistical backend",
                    e
                );
                Ok(Arc::new(StatisticalBackend::new()))
            }
        },
    }
}

/// Model2Vec static-embedding backend.
pub struct EmbeddingBackend {
    model: StaticModel,
    entity_regex: Regex,
}

impl EmbeddingBackend {
    pub fn load(config: &NlpConfig) -> Result<Self> {
        if !config.model_dir.exists() {
            return Err(AtsCheckerError::Configuration(format!(
                "embedding model directory not found: {}",
                config.model_dir.display()
            )));
        }

        let model = StaticModel::from_pretrained(&config.model_dir, None, None, None)
            .map_err(|e| AtsCheckerError::Processing(format!("Failed to load model: {}", e)))?;

        let entity_regex = Regex::new(r"\b[A-Z]{2,}\b|\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b")
            .expect("Invalid entity regex");

        Ok(Self {
            model,
            entity_regex,
        })
    }
}

impl LanguageBackend for EmbeddingBackend {
    fn name(&self) -> &'static str {
        "embedding"
    }

    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32> {
        let embedding_a = self.model.encode_single(text_a);
        let embedding_b = self.model.encode_single(text_b);

        similarity::cosine_similarity(&embedding_a, &embedding_b)
            .map(|s| s.clamp(0.0, 1.0))
            .ok_or_else(|| {
                AtsCheckerError::Processing("embedding produced a zero vector".to_string())
            })
    }

    /// Chunk runs of consecutive content words (up to three tokens) and
    /// collect entity-like spans: acronyms and capitalized multi-word names.
    fn phrases(&self, text: &str, min_length: usize) -> PhraseExtraction {
        PhraseExtraction {
            noun_phrases: chunk_phrases(text, min_length),
            entities: entity_spans(&self.entity_regex, text, min_length),
        }
    }
}

/// Runs of consecutive content words become candidate chunks; runs longer
/// than [`MAX_PHRASE_TOKENS`] are discarded rather than split.
fn chunk_phrases(text: &str, min_length: usize) -> Vec<String> {
    let mut noun_phrases = Vec::new();
    let mut run: Vec<String> = Vec::new();

    let flush = |run: &mut Vec<String>, out: &mut Vec<String>| {
        if !run.is_empty() && run.len() <= MAX_PHRASE_TOKENS {
            let phrase = run.join(" ");
            if phrase.chars().count() > min_length {
                out.push(phrase);
            }
        }
        run.clear();
    };

    for word in text.unicode_words() {
        let lower = word.to_lowercase();
        if similarity::is_stop_word(&lower) || lower.chars().count() < 3 {
            flush(&mut run, &mut noun_phrases);
        } else {
            run.push(lower);
        }
    }
    flush(&mut run, &mut noun_phrases);

    noun_phrases
}

fn entity_spans(entity_regex: &Regex, text: &str, min_length: usize) -> Vec<String> {
    entity_regex
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|e| e.chars().count() > min_length)
        .collect()
}

/// Fallback backend with no model dependency.
pub struct StatisticalBackend {
    word_regex: Regex,
}

impl Default for StatisticalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticalBackend {
    pub fn new() -> Self {
        Self {
            word_regex: Regex::new(r"\b[a-z]{3,}\b").expect("Invalid word regex"),
        }
    }
}

impl LanguageBackend for StatisticalBackend {
    fn name(&self) -> &'static str {
        "statistical"
    }

    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f32> {
        similarity::tfidf_cosine(text_a, text_b).ok_or_else(|| {
            AtsCheckerError::Processing("tf-idf similarity undefined for empty text".to_string())
        })
    }

    /// Bigram scan over lowercased alphabetic tokens; no entity extraction
    /// on this path.
    fn phrases(&self, text: &str, min_length: usize) -> PhraseExtraction {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = self
            .word_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let noun_phrases = words
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .filter(|phrase| phrase.chars().count() > min_length)
            .collect();

        PhraseExtraction {
            noun_phrases,
            entities: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn statistical_config() -> NlpConfig {
        let mut config = Config::default().nlp;
        config.mode = NlpMode::Statistical;
        config
    }

    #[test]
    fn test_forced_statistical_selection() {
        let backend = select_backend(&statistical_config()).unwrap();
        assert_eq!(backend.name(), "statistical");
    }

    #[test]
    fn test_auto_falls_back_without_model() {
        let mut config = statistical_config();
        config.mode = NlpMode::Auto;
        config.model_dir = std::path::PathBuf::from("/nonexistent/model/dir");
        let backend = select_backend(&config).unwrap();
        assert_eq!(backend.name(), "statistical");
    }

    #[test]
    fn test_model_mode_fails_without_model() {
        let mut config = statistical_config();
        config.mode = NlpMode::Model;
        config.model_dir = std::path::PathBuf::from("/nonexistent/model/dir");
        assert!(select_backend(&config).is_err());
    }

    #[test]
    fn test_bigram_phrases() {
        let backend = StatisticalBackend::new();
        let extraction = backend.phrases("Senior backend engineer wanted", 2);

        assert!(extraction
            .noun_phrases
            .contains(&"senior backend".to_string()));
        assert!(extraction
            .noun_phrases
            .contains(&"backend engineer".to_string()));
        assert!(extraction.entities.is_empty());
    }

    #[test]
    fn test_bigram_skips_short_tokens() {
        let backend = StatisticalBackend::new();
        let extraction = backend.phrases("go is fun", 2);

        // Tokens shorter than three characters never enter bigrams.
        assert!(extraction.noun_phrases.contains(&"fun".to_string()) == false);
        assert!(!extraction
            .noun_phrases
            .iter()
            .any(|p| p.contains("go") || p.contains("is")));
    }

    #[test]
    fn test_chunk_phrases_respects_token_cap() {
        let phrases = chunk_phrases("distributed systems engineer with kafka streaming", 2);

        // "distributed systems engineer" is a three-token run; "with" breaks
        // the next run.
        assert!(phrases.contains(&"distributed systems engineer".to_string()));
        assert!(phrases.contains(&"kafka streaming".to_string()));

        // A four-token run is discarded, not split.
        let long_run = chunk_phrases("distributed systems platform engineer", 2);
        assert!(long_run.is_empty());
    }

    #[test]
    fn test_entity_spans_find_acronyms_and_names() {
        let regex = Regex::new(r"\b[A-Z]{2,}\b|\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").unwrap();
        let entities = entity_spans(&regex, "Deploy on AWS with Google Cloud support", 2);

        assert!(entities.contains(&"aws".to_string()));
        assert!(entities.contains(&"google cloud".to_string()));
    }

    #[test]
    fn test_statistical_similarity_bounds() {
        let backend = StatisticalBackend::new();
        let sim = backend
            .similarity("rust systems engineer", "rust systems engineer")
            .unwrap();
        assert!((sim - 1.0).abs() < 1e-5);
        assert!(backend.similarity("", "job").is_err());
    }
}
