//! Slide injection.
//!
//! Page `i` is written to slide `i`. The mapping is validated once, before
//! any slide is touched; slides past the page count are never written.
//!
//! Injection replaces the text previously written to a slide rather than
//! appending to it, so rerunning a document yields the same slide content.

use crate::capability::SlideDeck;
use crate::error::{Error, PageError, Result};
use crate::types::{PageImage, SlideTarget};

/// Check that every page has a slide to land on.
pub fn validate_mapping(slide_count: usize, page_count: usize) -> Result<()> {
    if slide_count < page_count {
        return Err(Error::SlideCountMismatch {
            slides: slide_count,
            pages: page_count,
        });
    }
    Ok(())
}

/// Writes recognized text into a borrowed presentation.
pub struct SlideInjector<'d> {
    deck: &'d mut dyn SlideDeck,
    page_count: usize,
}

impl<'d> SlideInjector<'d> {
    /// Validate the deck against the document before any mutation.
    pub fn new(deck: &'d mut dyn SlideDeck, page_count: usize) -> Result<Self> {
        validate_mapping(deck.slide_count(), page_count)?;
        Ok(Self { deck, page_count })
    }

    pub fn inject(&mut self, target: SlideTarget, text: &str) -> std::result::Result<(), PageError> {
        let slide = self.mapped(target)?;
        self.deck
            .set_slide_text(slide, text)
            .map_err(|e| injection_failed(slide, e))
    }

    /// Place the rendered page next to the text on its slide.
    pub fn inject_image(
        &mut self,
        target: SlideTarget,
        image: &PageImage,
    ) -> std::result::Result<(), PageError> {
        let slide = self.mapped(target)?;
        self.deck
            .set_slide_image(slide, image)
            .map_err(|e| injection_failed(slide, e))
    }

    fn mapped(&self, target: SlideTarget) -> std::result::Result<usize, PageError> {
        let slide = target.slide_index;
        if slide >= self.page_count {
            return Err(PageError::InjectionFailed {
                page: slide,
                reason: format!("slide {} is outside the mapped page range", slide),
            });
        }
        Ok(slide)
    }
}

fn injection_failed(slide: usize, error: Error) -> PageError {
    PageError::InjectionFailed {
        page: slide,
        reason: error.to_string(),
    }
}
