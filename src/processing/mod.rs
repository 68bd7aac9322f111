//! Matching pipeline modules

pub mod analyzer;
pub mod gap;
pub mod language;
pub mod scorer;
pub mod segmenter;
pub mod similarity;
pub mod suggestions;
pub mod taxonomy;
