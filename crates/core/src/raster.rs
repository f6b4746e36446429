//! Page rasterization.
//!
//! [`Rasterizer::rasterize`] yields one [`PageImage`] per page in increasing
//! index order. Each image is written to its artifact path before it is
//! yielded, so stopping early still leaves valid files for earlier pages.

use std::iter::FusedIterator;

use crate::artifacts::ArtifactDir;
use crate::capability::PageRenderer;
use crate::error::{PageError, Result};
use crate::types::{PageImage, SourceDocument};

/// Default raster resolution, chosen for OCR legibility.
pub const DEFAULT_DPI: u32 = 300;

/// Converts document pages into persisted raster images.
pub struct Rasterizer<'a> {
    renderer: &'a dyn PageRenderer,
    dpi: u32,
}

impl<'a> Rasterizer<'a> {
    /// Fails with a `SetupError` if the rendering tool is missing. `dpi` is
    /// passed to the renderer as is.
    pub fn new(renderer: &'a dyn PageRenderer, dpi: u32) -> Result<Self> {
        renderer.ensure_available()?;
        Ok(Self { renderer, dpi })
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Rasterize a single page to its artifact path.
    pub fn rasterize_page(
        &self,
        document: &SourceDocument,
        page_index: usize,
        artifacts: &ArtifactDir,
    ) -> std::result::Result<PageImage, PageError> {
        if page_index >= document.page_count() {
            return Err(PageError::RasterizeFailed {
                page: page_index,
                reason: format!(
                    "page index out of range (document has {} pages)",
                    document.page_count()
                ),
            });
        }

        let stem = artifacts.image_stem(page_index);
        log::debug!("Rasterizing page {} at {} DPI", page_index, self.dpi);

        let rendered = self
            .renderer
            .render_page(document, page_index, self.dpi, &stem)
            .map_err(|e| PageError::RasterizeFailed {
                page: page_index,
                reason: e.to_string(),
            })?;

        Ok(PageImage {
            page_index,
            path: rendered.path,
            dpi: self.dpi,
            width: rendered.width,
            height: rendered.height,
        })
    }

    /// Lazy sequence over every page. Call again (or [`PageImages::restart`])
    /// to start over from page 0.
    pub fn rasterize<'s>(
        &'s self,
        document: &'s SourceDocument,
        artifacts: &'s ArtifactDir,
    ) -> PageImages<'s, 'a> {
        PageImages {
            rasterizer: self,
            document,
            artifacts,
            next: 0,
        }
    }
}

/// Iterator returned by [`Rasterizer::rasterize`].
///
/// A failed page yields `Err` and the sequence moves on to the next page.
pub struct PageImages<'s, 'a> {
    rasterizer: &'s Rasterizer<'a>,
    document: &'s SourceDocument,
    artifacts: &'s ArtifactDir,
    next: usize,
}

impl PageImages<'_, '_> {
    pub fn restart(&mut self) {
        self.next = 0;
    }
}

impl Iterator for PageImages<'_, '_> {
    type Item = std::result::Result<PageImage, PageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.document.page_count() {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(
            self.rasterizer
                .rasterize_page(self.document, index, self.artifacts),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.document.page_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PageImages<'_, '_> {}

impl FusedIterator for PageImages<'_, '_> {}
