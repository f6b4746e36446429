//! Capability traits for the external collaborators.
//!
//! The pipeline only sees these seams; concrete engines live in their own
//! crates and tests substitute fakes.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{PageImage, SourceDocument};

/// Validates and opens a source document.
pub trait DocumentLoader {
    /// Fails with `DocumentNotFound`, `DocumentUnreadable`, or `EmptyDocument`.
    fn load(&self, path: &Path) -> Result<SourceDocument>;
}

/// A page image written by a [`PageRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Renders one document page to a raster image file.
pub trait PageRenderer {
    /// Fatal check run once before any page is processed.
    fn ensure_available(&self) -> Result<()>;

    /// Render `page_index` (zero-based) to `<target_stem>.<ext>`.
    fn render_page(
        &self,
        document: &SourceDocument,
        page_index: usize,
        dpi: u32,
        target_stem: &Path,
    ) -> Result<RenderedPage>;
}

/// Runs text recognition over one image file.
pub trait TextEngine {
    /// Fatal check run once before any page is processed.
    fn ensure_available(&self) -> Result<()>;

    /// Raw recognized text. An image without text yields `Ok("")`.
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Handle to an open, externally-owned presentation.
pub trait SlideDeck {
    fn slide_count(&self) -> usize;

    /// Write `text` into the slide, replacing text previously written there.
    fn set_slide_text(&mut self, slide_index: usize, text: &str) -> Result<()>;

    /// Place the page image on the slide, replacing an image previously
    /// placed there.
    fn set_slide_image(&mut self, slide_index: usize, image: &PageImage) -> Result<()>;
}
