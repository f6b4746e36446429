//! Patent front-page summary.
//!
//! Pulls the bibliographic fields out of the recognized text of a US patent
//! front page (INID codes `(54)` title, `(45)` date) and renders them as a
//! compact slide text block.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static TITLE_START_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(54\)\s*").unwrap());

static INVENTORS_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Inventors?:\s*").unwrap());

static ABSTRACT_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Abstract:?\s*").unwrap());

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"US\s\d{1,3},\d{3},\d{3}\s\w\d").unwrap());

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\(45\)\s*Date of Patent:\s*(\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\.\s\d{1,2},\s\d{4}\b)",
    )
    .unwrap()
});

/// Ends a field: the next INID code or a blank line.
static FIELD_END_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{2}\)|\n{2,}").unwrap());

/// Ends the abstract: a blank line.
static PARAGRAPH_END_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n").unwrap());

const TITLE_MISSING: &str = "Title N/A";
const NUMBER_MISSING: &str = "PATENT # N/A";
const DATE_MISSING: &str = "Date N/A";
const INVENTORS_MISSING: &str = "Inventors N/A";
const ABSTRACT_MISSING: &str = "Abstract N/A";

/// Bibliographic fields parsed from a patent front page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentInfo {
    pub title: String,
    pub number: String,
    pub date: String,
    pub inventors: String,
    pub abstract_text: String,
}

impl PatentInfo {
    /// Parse fields from recognized text. Missing fields get a placeholder.
    pub fn parse(text: &str) -> Self {
        let title = field_after(text, &TITLE_START_REGEX, &FIELD_END_REGEX)
            .map(|t| t.trim().replace('\n', " ").trim_start_matches(')').to_string())
            .unwrap_or_else(|| TITLE_MISSING.to_string());

        let number = NUMBER_REGEX
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| NUMBER_MISSING.to_string());

        let date = DATE_REGEX
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| DATE_MISSING.to_string());

        let inventors = field_after(text, &INVENTORS_START_REGEX, &FIELD_END_REGEX)
            .map(|t| t.trim().replace('\n', " "))
            .unwrap_or_else(|| INVENTORS_MISSING.to_string());

        let abstract_text = field_after(text, &ABSTRACT_START_REGEX, &PARAGRAPH_END_REGEX)
            .map(|t| t.trim().to_string())
            .unwrap_or_else(|| ABSTRACT_MISSING.to_string());

        Self {
            title,
            number,
            date,
            inventors,
            abstract_text,
        }
    }

    /// Render the summary block written to the slide.
    ///
    /// ```text
    /// Widget assembly
    /// PATENT #: US 1,234,567 B2     Jan. 5, 2021
    /// INVENTORS: Jane Doe; John Roe
    ///
    /// A widget comprising...
    /// ```
    pub fn to_slide_text(&self) -> String {
        format!(
            "{}\nPATENT #: {}     {}\nINVENTORS: {}\n\n{}",
            self.title, self.number, self.date, self.inventors, self.abstract_text
        )
    }
}

/// Text following the first `start` match up to the first `end` match (or
/// end of input). The field must be at least one character long.
fn field_after<'t>(text: &'t str, start: &Regex, end: &Regex) -> Option<&'t str> {
    let from = start.find(text)?.end();
    let rest = &text[from..];
    let first_len = rest.chars().next()?.len_utf8();

    let stop = end
        .find_at(rest, first_len)
        .map(|m| m.start())
        .unwrap_or(rest.len());
    Some(&rest[..stop])
}
