//! Text recognition adapter.
//!
//! Runs the engine over one page image, persists the text artifact next to
//! the image, and turns per-call engine failures into a failed
//! [`ExtractedText`] instead of an error.

use std::path::PathBuf;

use crate::artifacts::ArtifactDir;
use crate::capability::TextEngine;
use crate::error::{PageError, Result};
use crate::normalize::TextNormalizer;
use crate::types::{ExtractedText, PageImage};

/// Result of recognizing one page.
#[derive(Debug, Clone)]
pub struct Recognition {
    pub text: ExtractedText,

    /// Location of the text artifact, if it could be written.
    pub text_path: Option<PathBuf>,

    pub error: Option<PageError>,
}

pub struct RecognitionAdapter<'a> {
    engine: &'a dyn TextEngine,
    normalizer: Option<TextNormalizer>,
}

impl<'a> RecognitionAdapter<'a> {
    /// Fails with a `SetupError` if the engine is not installed.
    pub fn new(engine: &'a dyn TextEngine) -> Result<Self> {
        engine.ensure_available()?;
        Ok(Self {
            engine,
            normalizer: Some(TextNormalizer::new()),
        })
    }

    /// Replace the text cleanup step, or disable it with `None`.
    pub fn with_normalizer(mut self, normalizer: Option<TextNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Recognize `image` and write `page_<index>.txt`.
    ///
    /// On engine failure the artifact is still written (empty) so every
    /// rasterized page keeps its image/text pair.
    pub fn recognize(&self, image: &PageImage, artifacts: &ArtifactDir) -> Recognition {
        let page = image.page_index;

        let (text, mut error) = match self.engine.recognize(&image.path) {
            Ok(raw) => {
                let cleaned = match &self.normalizer {
                    Some(normalizer) => normalizer.normalize(&raw),
                    None => raw,
                };
                (ExtractedText::recognized(page, cleaned), None)
            }
            Err(e) => {
                log::warn!("Recognition failed for page {}: {}", page, e);
                (
                    ExtractedText::failed(page),
                    Some(PageError::RecognitionFailed {
                        page,
                        reason: e.to_string(),
                    }),
                )
            }
        };

        let text_path = match artifacts.write_text(page, &text.text) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Could not persist text for page {}: {}", page, e);
                error.get_or_insert(PageError::RecognitionFailed {
                    page,
                    reason: format!("failed to write text artifact: {}", e),
                });
                None
            }
        };

        let text = if error.is_some() {
            ExtractedText { success: false, ..text }
        } else {
            text
        };

        Recognition {
            text,
            text_path,
            error,
        }
    }
}
