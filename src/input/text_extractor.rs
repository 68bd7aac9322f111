//! Text extraction from supported document formats

use crate::error::{AtsCheckerError, Result};
use pulldown_cmark::{html, Parser};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AtsCheckerError::DocumentRead {
                path: path.display().to_string(),
                cause: anyhow::anyhow!("{}", e),
            }
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AtsCheckerError::DocumentRead {
                path: path.display().to_string(),
                cause: anyhow::Error::new(e),
            })?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown = fs::read_to_string(path)
            .await
            .map_err(|e| AtsCheckerError::DocumentRead {
                path: path.display().to_string(),
                cause: anyhow::Error::new(e),
            })?;

        let parser = Parser::new(&markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(html_to_text(&html_output))
    }
}

/// Strip the rendered markup back down to plain lines.
fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("</p>", "\n\n")
        .replace("</h1>", "\n")
        .replace("</h2>", "\n")
        .replace("</h3>", "\n")
        .replace("</li>", "\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let tag = regex::Regex::new(r"<[^>]*>").unwrap();
    let clean = tag.replace_all(&text, "");

    clean
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_strips_tags() {
        let text = html_to_text("<h2>Skills</h2>\n<p>Python &amp; Go</p>");
        assert!(text.contains("Skills"));
        assert!(text.contains("Python & Go"));
        assert!(!text.contains('<'));
    }
}
