//! Document type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => DocumentFormat::Pdf,
            "txt" => DocumentFormat::Text,
            "md" | "markdown" => DocumentFormat::Markdown,
            _ => DocumentFormat::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentFormat::Unknown)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, DocumentFormat::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_mapping() {
        assert_eq!(DocumentFormat::from_extension("PDF"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_extension("txt"), DocumentFormat::Text);
        assert_eq!(
            DocumentFormat::from_extension("markdown"),
            DocumentFormat::Markdown
        );
        assert_eq!(
            DocumentFormat::from_extension("docx"),
            DocumentFormat::Unknown
        );
    }

    #[test]
    fn test_path_without_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("resume")),
            DocumentFormat::Unknown
        );
    }
}
