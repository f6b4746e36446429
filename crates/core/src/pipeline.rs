//! Pipeline orchestrator.
//!
//! ```text
//! Idle -> Loading -> ValidatingMapping -> ProcessingPages -> Done
//!            |              |
//!            +--------------+-----------> Aborted
//! ```
//!
//! Setup failures and a slide/page count mismatch abort the run before any
//! page is touched. Once pages are being processed, failures are recorded per
//! page and never abort.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use crate::artifacts::{ArtifactDir, DEFAULT_IMAGES_DIR};
use crate::capability::{DocumentLoader, PageRenderer, SlideDeck, TextEngine};
use crate::error::{Error, Result};
use crate::inject::SlideInjector;
use crate::patent::PatentInfo;
use crate::raster::{Rasterizer, DEFAULT_DPI};
use crate::recognize::RecognitionAdapter;
use crate::types::{PageResult, PipelineResult, SlideTarget, SourceDocument};

/// Orchestrator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loading,
    ValidatingMapping,
    ProcessingPages,
    Done,
    Aborted,
}

/// What gets written into each slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// The recognized text as-is.
    #[default]
    Text,
    /// A patent front-page summary built from the recognized text.
    Patent,
}

/// Run settings.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raster resolution.
    pub dpi: u32,

    /// Directory for page images and text artifacts.
    pub images_dir: PathBuf,

    pub text_format: TextFormat,

    /// Clean up recognized text before persisting and injecting it.
    pub normalize_text: bool,

    /// Remove page artifacts left by earlier runs before the first write.
    pub clean_images: bool,

    /// Also place each rendered page image on its slide.
    pub embed_images: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            text_format: TextFormat::default(),
            normalize_text: true,
            clean_images: false,
            embed_images: false,
        }
    }
}

/// Sequences loading, rasterization, recognition, and injection.
pub struct Pipeline<'a> {
    loader: &'a dyn DocumentLoader,
    renderer: &'a dyn PageRenderer,
    engine: &'a dyn TextEngine,
    config: PipelineConfig,
    state: Cell<PipelineState>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        loader: &'a dyn DocumentLoader,
        renderer: &'a dyn PageRenderer,
        engine: &'a dyn TextEngine,
    ) -> Self {
        Self {
            loader,
            renderer,
            engine,
            config: PipelineConfig::default(),
            state: Cell::new(PipelineState::Idle),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// State reached by the most recent run.
    pub fn state(&self) -> PipelineState {
        self.state.get()
    }

    fn transition(&self, to: PipelineState) {
        log::debug!("Pipeline state: {:?} -> {:?}", self.state.get(), to);
        self.state.set(to);
    }

    fn abort<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            log::error!("Run aborted: {}", e);
            self.transition(PipelineState::Aborted);
        }
        result
    }

    /// Load the document, check dependencies, and validate the slide mapping.
    ///
    /// The deck is borrowed for the lifetime of the run; the pipeline never
    /// saves or closes it.
    pub fn begin<'p, 'd>(
        &'p self,
        path: &Path,
        deck: &'d mut dyn SlideDeck,
    ) -> Result<PipelineRun<'p, 'a, 'd>> {
        self.transition(PipelineState::Loading);
        let document = self.abort(self.loader.load(path))?;
        log::info!(
            "Loaded {} ({} pages)",
            document.path().display(),
            document.page_count()
        );

        let rasterizer = self.abort(Rasterizer::new(self.renderer, self.config.dpi))?;
        let recognizer = self.abort(RecognitionAdapter::new(self.engine))?;
        let recognizer = if self.config.normalize_text {
            recognizer
        } else {
            recognizer.with_normalizer(None)
        };

        self.transition(PipelineState::ValidatingMapping);
        let injector = self.abort(SlideInjector::new(deck, document.page_count()))?;

        let artifacts = self.abort(
            ArtifactDir::create(&self.config.images_dir).map_err(Error::from),
        )?;
        if self.config.clean_images {
            self.abort(artifacts.clean().map_err(Error::from))?;
        }

        self.transition(PipelineState::ProcessingPages);
        Ok(PipelineRun {
            pipeline: self,
            results: Vec::with_capacity(document.page_count()),
            document,
            rasterizer,
            recognizer,
            injector,
            artifacts,
            next: 0,
            progress: None,
        })
    }

    /// Process every page and return the per-page breakdown.
    pub fn run(&self, path: &Path, deck: &mut dyn SlideDeck) -> Result<PipelineResult> {
        let mut run = self.begin(path, deck)?;
        while run.process_next().is_some() {}
        Ok(run.finish())
    }
}

/// A run in the `ProcessingPages` state.
///
/// Pages are processed strictly in index order, one per
/// [`process_next`](Self::process_next) call. Calling [`finish`](Self::finish)
/// early cancels the remaining pages.
pub struct PipelineRun<'p, 'a, 'd> {
    pipeline: &'p Pipeline<'a>,
    document: SourceDocument,
    rasterizer: Rasterizer<'a>,
    recognizer: RecognitionAdapter<'a>,
    injector: SlideInjector<'d>,
    artifacts: ArtifactDir,
    results: Vec<PageResult>,
    next: usize,
    progress: Option<Box<dyn FnMut(usize, usize) + 'p>>,
}

impl<'p> PipelineRun<'p, '_, '_> {
    /// Called with `(pages_done, page_count)` after each page.
    pub fn with_progress(mut self, callback: impl FnMut(usize, usize) + 'p) -> Self {
        self.progress = Some(Box::new(callback));
        self
    }

    pub fn document(&self) -> &SourceDocument {
        &self.document
    }

    pub fn artifacts(&self) -> &ArtifactDir {
        &self.artifacts
    }

    pub fn remaining(&self) -> usize {
        self.document.page_count() - self.next
    }

    /// Process the next page. Returns `None` once every page is done.
    pub fn process_next(&mut self) -> Option<&PageResult> {
        let total = self.document.page_count();
        if self.next >= total {
            return None;
        }

        let index = self.next;
        self.next += 1;

        let result = self.process_page(index);
        match &result.error {
            None => log::info!("page {}/{}: {}", index + 1, total, result.status),
            Some(reason) => log::warn!(
                "page {}/{}: {}: {}",
                index + 1,
                total,
                result.status,
                reason
            ),
        }
        self.results.push(result);

        if let Some(callback) = self.progress.as_mut() {
            callback(self.results.len(), total);
        }
        if self.next == total {
            self.pipeline.transition(PipelineState::Done);
        }

        self.results.last()
    }

    fn process_page(&mut self, index: usize) -> PageResult {
        let image = match self
            .rasterizer
            .rasterize_page(&self.document, index, &self.artifacts)
        {
            Ok(image) => image,
            Err(e) => {
                // A failed page must not keep artifacts from an earlier run.
                if let Err(io) = self.artifacts.remove_page(index) {
                    log::warn!("Could not remove stale artifacts of page {}: {}", index, io);
                }
                return PageResult::failed(&e, None, None);
            }
        };

        let recognition = self.recognizer.recognize(&image, &self.artifacts);
        if let Some(e) = &recognition.error {
            return PageResult::failed(e, Some(image.path), recognition.text_path);
        }
        let text_path = recognition
            .text_path
            .unwrap_or_else(|| self.artifacts.text_path(index));

        let slide_text = match self.pipeline.config.text_format {
            TextFormat::Text => recognition.text.text,
            TextFormat::Patent => PatentInfo::parse(&recognition.text.text).to_slide_text(),
        };

        let target = SlideTarget::for_page(index);
        let injected = if self.pipeline.config.embed_images {
            self.injector.inject_image(target, &image)
        } else {
            Ok(())
        }
        .and_then(|()| self.injector.inject(target, &slide_text));

        match injected {
            Ok(()) => PageResult::succeeded(index, image.path, text_path),
            Err(e) => PageResult::failed(&e, Some(image.path), Some(text_path)),
        }
    }

    /// End the run. Pages not yet processed are reported as cancelled.
    pub fn finish(self) -> PipelineResult {
        if self.next < self.document.page_count() {
            log::info!(
                "Run stopped after {} of {} pages",
                self.next,
                self.document.page_count()
            );
            self.pipeline.transition(PipelineState::Done);
        }

        let result = PipelineResult::new(
            self.document.path().to_path_buf(),
            self.document.page_count(),
            self.results,
        );
        log::info!(
            "{}/{} pages succeeded",
            result.succeeded(),
            result.page_count
        );
        result
    }
}
