//! Core domain types, capability traits, and the page-indexed
//! extraction-and-injection pipeline.

pub mod artifacts;
pub mod capability;
pub mod error;
pub mod inject;
pub mod normalize;
pub mod patent;
pub mod pipeline;
pub mod raster;
pub mod recognize;
pub mod types;

#[cfg(test)]
mod testing;

pub use artifacts::{page_stem, ArtifactDir, DEFAULT_IMAGES_DIR, IMAGE_EXTENSION};
pub use capability::{DocumentLoader, PageRenderer, RenderedPage, SlideDeck, TextEngine};
pub use error::{Error, PageError, Result, SetupError};
pub use inject::{validate_mapping, SlideInjector};
pub use normalize::TextNormalizer;
pub use patent::PatentInfo;
pub use pipeline::{Pipeline, PipelineConfig, PipelineRun, PipelineState, TextFormat};
pub use raster::{PageImages, Rasterizer, DEFAULT_DPI};
pub use recognize::{Recognition, RecognitionAdapter};
pub use types::{
    ExtractedText, Outcome, PageImage, PageResult, PageStatus, PipelineResult, SlideTarget,
    SourceDocument,
};
