//! Cleanup of raw recognized text.
//!
//! Recognition engines emit page separators, mixed line endings, and
//! decomposed or ligature characters. The normalizer keeps the text's line
//! structure but removes that noise before it is persisted and injected.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Three or more consecutive newlines.
static BLANK_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Typographic ligatures that OCR engines emit for common letter pairs.
const LIGATURES: &[(char, &str)] = &[
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Form feed: tesseract terminates each page with one.
const PAGE_SEPARATOR: char = '\u{000C}';

/// Text normalizer for recognized page text.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Whether to collapse runs of blank lines into one.
    collapse_blank_lines: bool,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            collapse_blank_lines: true,
        }
    }

    pub fn with_collapse_blank_lines(mut self, collapse: bool) -> Self {
        self.collapse_blank_lines = collapse;
        self
    }

    /// Normalize recognized text.
    ///
    /// - Line endings become `\n` and page separators are dropped
    /// - Unicode is composed (NFC) and ligatures are expanded
    /// - Trailing whitespace is trimmed from every line
    /// - Leading and trailing blank lines are removed
    pub fn normalize(&self, text: &str) -> String {
        let unified = text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace(PAGE_SEPARATOR, "");

        let mut composed = String::with_capacity(unified.len());
        for c in unified.nfc() {
            match LIGATURES.iter().find(|(lig, _)| *lig == c) {
                Some((_, expanded)) => composed.push_str(expanded),
                None => composed.push(c),
            }
        }

        let mut result = composed
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");

        if self.collapse_blank_lines {
            result = BLANK_RUN_REGEX.replace_all(&result, "\n\n").into_owned();
        }

        result.trim_matches('\n').to_string()
    }
}
