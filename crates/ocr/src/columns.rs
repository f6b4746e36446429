//! Two-column recognition.

use std::path::Path;

use slidescribe_core::{ArtifactDir, Error, Result, TextEngine};

/// Recognizes the left and right halves of an image separately and joins
/// them with a blank line.
///
/// The crops are kept next to the page image as `<stem>_col1.<ext>` and
/// `<stem>_col2.<ext>`.
#[derive(Debug, Clone)]
pub struct ColumnSplit<E> {
    inner: E,
}

impl<E: TextEngine> ColumnSplit<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

fn image_error(path: &Path, e: image::ImageError) -> Error {
    Error::ToolFailed {
        tool: "column split".to_string(),
        reason: format!("{}: {}", path.display(), e),
    }
}

impl<E: TextEngine> TextEngine for ColumnSplit<E> {
    fn ensure_available(&self) -> Result<()> {
        self.inner.ensure_available()
    }

    fn recognize(&self, image_path: &Path) -> Result<String> {
        let page = image::open(image_path).map_err(|e| image_error(image_path, e))?;
        let (width, height) = (page.width(), page.height());

        if width < 2 {
            return self.inner.recognize(image_path);
        }

        let column_width = width / 2;
        let halves = [
            (0, column_width),
            (column_width, width - column_width),
        ];

        let mut texts = Vec::with_capacity(halves.len());
        for (column, (x, w)) in halves.into_iter().enumerate() {
            let path = ArtifactDir::column_path(image_path, column + 1);
            page.crop_imm(x, 0, w, height)
                .save(&path)
                .map_err(|e| image_error(&path, e))?;
            texts.push(self.inner.recognize(&path)?);
        }

        Ok(texts.join("\n\n"))
    }
}
