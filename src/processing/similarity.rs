//! Tokenization and tf-idf cosine similarity
//!
//! The statistical similarity path: both texts are tokenized with stop-word
//! filtering, projected into a shared tf-idf space and compared with cosine
//! similarity.

use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Common English stop words, sorted for binary search.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "down", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your",
];

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercased content words of a text: unicode word segmentation, stop words
/// and one-character tokens dropped, purely numeric tokens dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(|w| w.to_lowercase())
        .filter(|w| w.len() > 1 && !is_stop_word(w) && w.chars().any(|c| c.is_alphabetic()))
        .collect()
}

/// Cosine similarity of two equal-length vectors, `None` when either has
/// zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }
    Some(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Tf-idf cosine similarity between two texts, in [0, 1]. `None` when either
/// text has no content tokens.
pub fn tfidf_cosine(text_a: &str, text_b: &str) -> Option<f32> {
    let tokens_a = tokenize(text_a);
    let tokens_b = tokenize(text_b);
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return None;
    }

    let counts_a = term_counts(&tokens_a);
    let counts_b = term_counts(&tokens_b);

    let mut vocabulary: Vec<&String> = counts_a.keys().chain(counts_b.keys()).collect();
    vocabulary.sort();
    vocabulary.dedup();

    // Smoothed idf over the two-document corpus.
    let idf = |term: &String| {
        let df = counts_a.contains_key(term) as usize + counts_b.contains_key(term) as usize;
        ((1.0 + 2.0) / (1.0 + df as f32)).ln() + 1.0
    };

    let weigh = |counts: &HashMap<String, usize>, total: usize| -> Vec<f32> {
        vocabulary
            .iter()
            .map(|term| {
                let tf = counts.get(*term).copied().unwrap_or(0) as f32 / total as f32;
                tf * idf(*term)
            })
            .collect()
    };

    let vec_a = weigh(&counts_a, tokens_a.len());
    let vec_b = weigh(&counts_b, tokens_b.len());

    cosine_similarity(&vec_a, &vec_b).map(|s| s.clamp(0.0, 1.0))
}

fn term_counts(tokens: &[String]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_word_table_is_sorted() {
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, STOP_WORDS);
    }

    #[test]
    fn test_tokenize_filters_stop_words() {
        let tokens = tokenize("The quick brown fox is near the river");
        assert!(tokens.contains(&"quick".to_string()));
        assert!(tokens.contains(&"river".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
        assert!(!tokens.contains(&"is".to_string()));
    }

    #[test]
    fn test_identical_texts_have_full_similarity() {
        let text = "Python developer building distributed backend services";
        let sim = tfidf_cosine(text, text).unwrap();
        assert!((sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_disjoint_texts_have_zero_similarity() {
        let sim = tfidf_cosine("kubernetes docker terraform", "violin sonata orchestra").unwrap();
        assert!(sim.abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_yields_none() {
        assert!(tfidf_cosine("", "some job description").is_none());
        assert!(tfidf_cosine("the of and", "some job description").is_none());
    }

    #[test]
    fn test_overlapping_texts_rank_between() {
        let sim = tfidf_cosine(
            "python aws backend services",
            "python aws frontend design",
        )
        .unwrap();
        assert!(sim > 0.0 && sim < 1.0);
    }
}
