//! Resume section segmentation and contact extraction

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Section header synonyms, evaluated in this order. A line switches the
/// active section only when it contains one of these keywords and is short
/// enough to be a header rather than a sentence that mentions the word.
const SECTION_KEYWORDS: &[(SectionKind, &[&str])] = &[
    (
        SectionKind::Summary,
        &["summary", "profile", "objective", "about"],
    ),
    (
        SectionKind::Experience,
        &[
            "experience",
            "work history",
            "employment",
            "professional experience",
        ],
    ),
    (
        SectionKind::Education,
        &["education", "academic", "qualification", "degree"],
    ),
    (
        SectionKind::Skills,
        &["skills", "technical skills", "competencies", "expertise"],
    ),
    (
        SectionKind::Certifications,
        &["certification", "certificate", "license"],
    ),
];

/// Header lines have at most this many whitespace-separated tokens.
const MAX_HEADER_TOKENS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Other,
}

/// Text of each fixed resume section. Every line of the source document
/// lands in exactly one bucket; lines before the first header go to `other`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMap {
    pub summary: String,
    pub experience: String,
    pub education: String,
    pub skills: String,
    pub certifications: String,
    pub other: String,
}

impl SectionMap {
    fn bucket_mut(&mut self, kind: SectionKind) -> &mut String {
        match kind {
            SectionKind::Summary => &mut self.summary,
            SectionKind::Experience => &mut self.experience,
            SectionKind::Education => &mut self.education,
            SectionKind::Skills => &mut self.skills,
            SectionKind::Certifications => &mut self.certifications,
            SectionKind::Other => &mut self.other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Segmented view of one resume. `raw_text` is the cleaned full text that
/// downstream matching runs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub sections: SectionMap,
    pub contact: ContactInfo,
    pub raw_text: String,
    pub word_count: usize,
}

pub struct SectionSegmenter {
    email_regex: Regex,
    phone_regex: Regex,
    linkedin_regex: Regex,
    whitespace_regex: Regex,
    unsafe_chars_regex: Regex,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionSegmenter {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
            .expect("Invalid phone regex");

        let linkedin_regex =
            Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("Invalid LinkedIn regex");

        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        let unsafe_chars_regex =
            Regex::new(r"[^\w\s\-.,@()&/]").expect("Invalid character filter regex");

        Self {
            email_regex,
            phone_regex,
            linkedin_regex,
            whitespace_regex,
            unsafe_chars_regex,
        }
    }

    /// Split a resume into sections and pull out contact details.
    ///
    /// Header detection runs over the raw newline-delimited text; the
    /// cleaned text is what contact extraction and all downstream keyword
    /// matching see.
    pub fn segment(&self, raw_text: &str) -> ResumeProfile {
        let sections = self.identify_sections(raw_text);
        let cleaned = self.clean_text(raw_text);
        let contact = self.extract_contact(&cleaned);
        let word_count = cleaned.split_whitespace().count();

        ResumeProfile {
            sections,
            contact,
            raw_text: cleaned,
            word_count,
        }
    }

    /// Collapse whitespace runs, then strip everything outside the safe
    /// character set (word characters plus `- . , @ ( ) & /`).
    pub fn clean_text(&self, text: &str) -> String {
        let collapsed = self.whitespace_regex.replace_all(text, " ");
        let stripped = self.unsafe_chars_regex.replace_all(&collapsed, "");
        stripped.trim().to_string()
    }

    fn identify_sections(&self, text: &str) -> SectionMap {
        let mut content: [Vec<&str>; 6] = std::array::from_fn(|_| Vec::new());
        let mut current = SectionKind::Other;

        for line in text.lines() {
            let line_lower = line.to_lowercase();
            let line_lower = line_lower.trim();

            let header = if line.split_whitespace().count() <= MAX_HEADER_TOKENS {
                SECTION_KEYWORDS
                    .iter()
                    .find(|(_, keywords)| keywords.iter().any(|kw| line_lower.contains(kw)))
                    .map(|(kind, _)| *kind)
            } else {
                None
            };

            if let Some(kind) = header {
                current = kind;
            } else if !line.trim().is_empty() {
                content[Self::bucket_index(current)].push(line.trim());
            }
        }

        let mut sections = SectionMap::default();
        for kind in [
            SectionKind::Summary,
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::Skills,
            SectionKind::Certifications,
            SectionKind::Other,
        ] {
            *sections.bucket_mut(kind) = content[Self::bucket_index(kind)].join(" ");
        }
        sections
    }

    fn bucket_index(kind: SectionKind) -> usize {
        match kind {
            SectionKind::Summary => 0,
            SectionKind::Experience => 1,
            SectionKind::Education => 2,
            SectionKind::Skills => 3,
            SectionKind::Certifications => 4,
            SectionKind::Other => 5,
        }
    }

    /// First match in document order wins; the patterns only check shape,
    /// not deliverability.
    fn extract_contact(&self, text: &str) -> ContactInfo {
        ContactInfo {
            email: self
                .email_regex
                .find(text)
                .map(|m| m.as_str().to_string()),
            phone: self
                .phone_regex
                .find(text)
                .map(|m| m.as_str().trim().to_string()),
            linkedin: self
                .linkedin_regex
                .find(text)
                .map(|m| m.as_str().to_string()),
        }
    }
}
