//! Page rendering via `pdftoppm` (poppler-utils).

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use slidescribe_core::{
    Error, PageRenderer, RenderedPage, Result, SetupError, SourceDocument, IMAGE_EXTENSION,
};

const TOOL: &str = "pdftoppm";

/// Renders single PDF pages to PNG.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    binary: PathBuf,
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(TOOL),
        }
    }
}

impl Pdftoppm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit executable instead of searching `PATH`.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    fn tool_failed(reason: impl Into<String>) -> Error {
        Error::ToolFailed {
            tool: TOOL.to_string(),
            reason: reason.into(),
        }
    }
}

impl PageRenderer for Pdftoppm {
    fn ensure_available(&self) -> Result<()> {
        // `pdftoppm -v` exits non-zero on some poppler releases; being able
        // to spawn it is what matters.
        match Command::new(&self.binary).arg("-v").output() {
            Ok(_) => Ok(()),
            Err(e) => {
                let reason = if e.kind() == io::ErrorKind::NotFound {
                    format!(
                        "{} not found. Install with: brew install poppler (macOS) \
                         or apt install poppler-utils (Linux)",
                        self.binary.display()
                    )
                } else {
                    e.to_string()
                };
                Err(SetupError::MissingDependency {
                    tool: TOOL.to_string(),
                    reason,
                }
                .into())
            }
        }
    }

    fn render_page(
        &self,
        document: &SourceDocument,
        page_index: usize,
        dpi: u32,
        target_stem: &Path,
    ) -> Result<RenderedPage> {
        let page_number = (page_index + 1).to_string();
        log::debug!(
            "Running {} on page {} of {}",
            TOOL,
            page_number,
            document.path().display()
        );

        let output = Command::new(&self.binary)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-f")
            .arg(&page_number)
            .arg("-l")
            .arg(&page_number)
            .arg("-singlefile")
            .arg(document.path().as_os_str())
            .arg(target_stem.as_os_str())
            .output()
            .map_err(|e| Self::tool_failed(format!("failed to run: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Self::tool_failed(stderr.trim().to_string()));
        }

        let path = target_stem.with_extension(IMAGE_EXTENSION);
        if !path.is_file() {
            return Err(Self::tool_failed(format!(
                "no image produced at {}",
                path.display()
            )));
        }

        let (width, height) = image::image_dimensions(&path)
            .map_err(|e| Self::tool_failed(format!("unreadable output image: {}", e)))?;

        Ok(RenderedPage {
            path,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_blank_pdf;

    #[test]
    fn test_missing_binary_is_setup_error() {
        let renderer = Pdftoppm::new().with_binary("/nonexistent/pdftoppm");
        let err = renderer.ensure_available().unwrap_err();
        assert!(matches!(
            err,
            Error::Setup(SetupError::MissingDependency { .. })
        ));
    }

    #[test]
    fn test_missing_binary_fails_page() {
        let tmp = tempfile::tempdir().unwrap();
        let renderer = Pdftoppm::new().with_binary("/nonexistent/pdftoppm");
        let doc = SourceDocument::new(tmp.path().join("doc.pdf"), 1);

        let err = renderer
            .render_page(&doc, 0, 72, &tmp.path().join("page_0000"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { .. }));
    }

    #[test]
    fn test_renders_requested_page() {
        let renderer = Pdftoppm::new();
        if renderer.ensure_available().is_err() {
            eprintln!("pdftoppm not installed; skipping");
            return;
        }

        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("doc.pdf");
        write_blank_pdf(&pdf, 2);
        let doc = SourceDocument::new(&pdf, 2);

        let page = renderer
            .render_page(&doc, 1, 72, &tmp.path().join("page_0001"))
            .unwrap();
        assert_eq!(page.path, tmp.path().join("page_0001.png"));
        // US letter at 72 DPI
        assert_eq!((page.width, page.height), (612, 792));
    }
}
