//! Error types for the extraction-and-injection pipeline.
//!
//! Two families: [`Error`] is fatal and aborts a run before any page is
//! processed; [`PageError`] is recoverable and is recorded per page.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a run.
#[derive(Error, Debug)]
pub enum Error {
    /// A dependency or the source document could not be set up.
    #[error(transparent)]
    Setup(#[from] SetupError),

    /// The presentation has fewer slides than the document has pages.
    #[error("Presentation has {slides} slides but the document has {pages} pages")]
    SlideCountMismatch { slides: usize, pages: usize },

    /// One invocation of an external tool failed.
    #[error("{tool} failed: {reason}")]
    ToolFailed { tool: String, reason: String },

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The PPTX package structure is invalid.
    #[error("PPTX parsing error: {0}")]
    PptxParseError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),
}

/// Missing collaborators and unusable source documents.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("Document {} could not be read: {reason}", path.display())]
    DocumentUnreadable { path: PathBuf, reason: String },

    /// Page count is zero; there is nothing to process.
    #[error("Document {} has no pages", .0.display())]
    EmptyDocument(PathBuf),

    /// An external tool (rasterizer, recognition engine) is not installed.
    #[error("Required tool '{tool}' is unavailable: {reason}")]
    MissingDependency { tool: String, reason: String },

    #[error("Presentation is unavailable: {0}")]
    PresentationUnavailable(String),
}

/// Recoverable per-page failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Page {page}: rasterization failed: {reason}")]
    RasterizeFailed { page: usize, reason: String },

    #[error("Page {page}: text recognition failed: {reason}")]
    RecognitionFailed { page: usize, reason: String },

    #[error("Page {page}: slide injection failed: {reason}")]
    InjectionFailed { page: usize, reason: String },
}

impl PageError {
    /// Zero-based index of the page that failed.
    pub fn page(&self) -> usize {
        match self {
            Self::RasterizeFailed { page, .. }
            | Self::RecognitionFailed { page, .. }
            | Self::InjectionFailed { page, .. } => *page,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::RasterizeFailed { reason, .. }
            | Self::RecognitionFailed { reason, .. }
            | Self::InjectionFailed { reason, .. } => reason,
        }
    }
}
