//! Fakes for the capability traits, shared by unit tests.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::artifacts::{page_stem, IMAGE_EXTENSION};
use crate::capability::{DocumentLoader, PageRenderer, RenderedPage, SlideDeck, TextEngine};
use crate::error::{Error, Result, SetupError};
use crate::types::{PageImage, SourceDocument};

fn missing(tool: &str) -> Error {
    SetupError::MissingDependency {
        tool: tool.to_string(),
        reason: "not installed".to_string(),
    }
    .into()
}

fn failed(tool: &str, reason: &str) -> Error {
    Error::ToolFailed {
        tool: tool.to_string(),
        reason: reason.to_string(),
    }
}

/// Page index encoded in an artifact file name.
fn index_of(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("page_")?.get(..4)?.parse().ok()
}

/// Loader that returns a fixed page count, or a fixed error.
pub struct FakeLoader {
    pub pages: usize,
    pub not_found: bool,
}

impl FakeLoader {
    pub fn with_pages(pages: usize) -> Self {
        Self {
            pages,
            not_found: false,
        }
    }
}

impl DocumentLoader for FakeLoader {
    fn load(&self, path: &Path) -> Result<SourceDocument> {
        if self.not_found {
            return Err(SetupError::DocumentNotFound(path.to_path_buf()).into());
        }
        if self.pages == 0 {
            return Err(SetupError::EmptyDocument(path.to_path_buf()).into());
        }
        Ok(SourceDocument::new(path, self.pages))
    }
}

#[derive(Default)]
pub struct FakeRenderer {
    pub fail_on: Vec<usize>,
    pub unavailable: bool,
    pub calls: Cell<usize>,
}

impl FakeRenderer {
    pub fn failing_on(pages: &[usize]) -> Self {
        Self {
            fail_on: pages.to_vec(),
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl PageRenderer for FakeRenderer {
    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(missing("fake-renderer"));
        }
        Ok(())
    }

    fn render_page(
        &self,
        _document: &SourceDocument,
        page_index: usize,
        _dpi: u32,
        target_stem: &Path,
    ) -> Result<RenderedPage> {
        self.calls.set(self.calls.get() + 1);
        if self.fail_on.contains(&page_index) {
            return Err(failed("fake-renderer", "corrupt page"));
        }
        let path = target_stem.with_extension(IMAGE_EXTENSION);
        fs::write(&path, format!("image {}", page_index))?;
        Ok(RenderedPage {
            path,
            width: 100,
            height: 200,
        })
    }
}

/// Engine that "recognizes" the page stem, e.g. `Text of page_0002`.
#[derive(Default)]
pub struct FakeEngine {
    pub fail_on: Vec<usize>,
    pub blank: bool,
    pub unavailable: bool,
    pub seen: std::cell::RefCell<Vec<PathBuf>>,
}

impl FakeEngine {
    pub fn failing_on(pages: &[usize]) -> Self {
        Self {
            fail_on: pages.to_vec(),
            ..Self::default()
        }
    }

    pub fn blank() -> Self {
        Self {
            blank: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn text_for(page_index: usize) -> String {
        format!("Text of {}", page_stem(page_index))
    }
}

impl TextEngine for FakeEngine {
    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(missing("fake-engine"));
        }
        Ok(())
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        self.seen.borrow_mut().push(image.to_path_buf());
        let index = index_of(image).ok_or_else(|| failed("fake-engine", "unreadable image"))?;
        if self.fail_on.contains(&index) {
            return Err(failed("fake-engine", "engine crashed"));
        }
        if self.blank {
            return Ok(String::new());
        }
        Ok(Self::text_for(index))
    }
}

/// Deck that records every write.
pub struct SpyDeck {
    pub slides: Vec<Option<String>>,
    pub images: Vec<Option<PathBuf>>,
    pub mutations: usize,
    pub fail_on: Vec<usize>,
}

impl SpyDeck {
    pub fn with_slides(count: usize) -> Self {
        Self {
            slides: vec![None; count],
            images: vec![None; count],
            mutations: 0,
            fail_on: Vec::new(),
        }
    }
}

impl SlideDeck for SpyDeck {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn set_slide_text(&mut self, slide_index: usize, text: &str) -> Result<()> {
        if self.fail_on.contains(&slide_index) {
            return Err(Error::PptxParseError("slide is locked".to_string()));
        }
        let slot = self
            .slides
            .get_mut(slide_index)
            .ok_or_else(|| Error::PptxParseError(format!("no slide {}", slide_index)))?;
        *slot = Some(text.to_string());
        self.mutations += 1;
        Ok(())
    }

    fn set_slide_image(&mut self, slide_index: usize, image: &PageImage) -> Result<()> {
        if self.fail_on.contains(&slide_index) {
            return Err(Error::PptxParseError("slide is locked".to_string()));
        }
        let slot = self
            .images
            .get_mut(slide_index)
            .ok_or_else(|| Error::PptxParseError(format!("no slide {}", slide_index)))?;
        *slot = Some(image.path.clone());
        self.mutations += 1;
        Ok(())
    }
}
