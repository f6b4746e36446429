//! Domain types shared by every stage of the pipeline.
//!
//! The page index is the single ordering key: images, text artifacts, and
//! slide targets all carry the same zero-based index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::PageError;

/// An opened source document. Page count is fixed once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    page_count: usize,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, page_count: usize) -> Self {
        Self {
            path: path.into(),
            page_count,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Page indices in processing order.
    pub fn page_indices(&self) -> std::ops::Range<usize> {
        0..self.page_count
    }
}

/// A rasterized page persisted to disk. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    /// Zero-based page index.
    pub page_index: usize,

    /// Location of the persisted image artifact.
    pub path: PathBuf,

    /// Raster resolution in dots per inch.
    pub dpi: u32,

    /// Pixel width.
    pub width: u32,

    /// Pixel height.
    pub height: u32,
}

/// Recognized text for one page image.
///
/// `text` is never absent: a failed recognition records an empty string
/// with `success == false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub page_index: usize,
    pub text: String,
    pub success: bool,
}

impl ExtractedText {
    pub fn recognized(page_index: usize, text: impl Into<String>) -> Self {
        Self {
            page_index,
            text: text.into(),
            success: true,
        }
    }

    pub fn failed(page_index: usize) -> Self {
        Self {
            page_index,
            text: String::new(),
            success: false,
        }
    }
}

/// A slide position in the externally-owned presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideTarget {
    pub slide_index: usize,
}

impl SlideTarget {
    /// Positional mapping: page `i` always lands on slide `i`.
    pub fn for_page(page_index: usize) -> Self {
        Self {
            slide_index: page_index,
        }
    }
}

/// Final status of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Succeeded,
    RasterizeFailed,
    RecognitionFailed,
    InjectionFailed,
}

impl PageStatus {
    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Succeeded => "succeeded",
            Self::RasterizeFailed => "rasterize failed",
            Self::RecognitionFailed => "recognition failed",
            Self::InjectionFailed => "injection failed",
        };
        f.write_str(label)
    }
}

impl From<&PageError> for PageStatus {
    fn from(error: &PageError) -> Self {
        match error {
            PageError::RasterizeFailed { .. } => Self::RasterizeFailed,
            PageError::RecognitionFailed { .. } => Self::RecognitionFailed,
            PageError::InjectionFailed { .. } => Self::InjectionFailed,
        }
    }
}

/// Outcome of one page, with paths to whatever artifacts were persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    pub page_index: usize,
    pub status: PageStatus,
    pub image_path: Option<PathBuf>,
    pub text_path: Option<PathBuf>,

    /// Failure detail when `status` is not `Succeeded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageResult {
    pub fn succeeded(page_index: usize, image_path: PathBuf, text_path: PathBuf) -> Self {
        Self {
            page_index,
            status: PageStatus::Succeeded,
            image_path: Some(image_path),
            text_path: Some(text_path),
            error: None,
        }
    }

    pub fn failed(error: &PageError, image_path: Option<PathBuf>, text_path: Option<PathBuf>) -> Self {
        Self {
            page_index: error.page(),
            status: PageStatus::from(error),
            image_path,
            text_path,
            error: Some(error.reason().to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Overall outcome of a run that reached `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every page succeeded.
    Succeeded,
    /// All pages were attempted; at least one failed.
    Degraded,
    /// The caller stopped before every page was attempted.
    Cancelled,
}

/// Per-page breakdown of a completed run, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub document: PathBuf,
    pub page_count: usize,
    pub pages: Vec<PageResult>,
    pub outcome: Outcome,
}

impl PipelineResult {
    pub fn new(document: PathBuf, page_count: usize, pages: Vec<PageResult>) -> Self {
        let outcome = if pages.len() < page_count {
            Outcome::Cancelled
        } else if pages.iter().all(PageResult::is_success) {
            Outcome::Succeeded
        } else {
            Outcome::Degraded
        };

        Self {
            document,
            page_count,
            pages,
            outcome,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.pages.iter().filter(|p| p.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.pages.len() - self.succeeded()
    }

    /// Pages that did not succeed, in page order.
    pub fn failures(&self) -> impl Iterator<Item = &PageResult> {
        self.pages.iter().filter(|p| !p.is_success())
    }

    pub fn is_fully_successful(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }
}
