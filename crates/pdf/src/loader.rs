//! Source document loading.

use std::path::Path;

use lopdf::Document;
use slidescribe_core::{DocumentLoader, Result, SetupError, SourceDocument};

/// Opens PDFs and reports their page count.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl PdfLoader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentLoader for PdfLoader {
    fn load(&self, path: &Path) -> Result<SourceDocument> {
        if !path.is_file() {
            return Err(SetupError::DocumentNotFound(path.to_path_buf()).into());
        }

        let doc = Document::load(path).map_err(|e| SetupError::DocumentUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let page_count = doc.get_pages().len();
        log::debug!("{} has {} pages", path.display(), page_count);

        if page_count == 0 {
            return Err(SetupError::EmptyDocument(path.to_path_buf()).into());
        }

        Ok(SourceDocument::new(path, page_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_blank_pdf;
    use slidescribe_core::Error;

    #[test]
    fn test_load_counts_pages() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("three.pdf");
        write_blank_pdf(&path, 3);

        let doc = PdfLoader::new().load(&path).unwrap();
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.path(), path.as_path());
    }

    #[test]
    fn test_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PdfLoader::new()
            .load(&tmp.path().join("nope.pdf"))
            .unwrap_err();
        assert!(matches!(err, Error::Setup(SetupError::DocumentNotFound(_))));
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PdfLoader::new().load(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::Setup(SetupError::DocumentNotFound(_))));
    }

    #[test]
    fn test_garbage_is_unreadable() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfLoader::new().load(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::Setup(SetupError::DocumentUnreadable { .. })
        ));
    }

    #[test]
    fn test_zero_pages_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("empty.pdf");
        write_blank_pdf(&path, 0);

        let err = PdfLoader::new().load(&path).unwrap_err();
        assert!(matches!(err, Error::Setup(SetupError::EmptyDocument(_))));
    }
}
