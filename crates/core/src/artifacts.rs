//! Artifact naming and the images directory.
//!
//! Every attempted page owns `page_<index:04>.<ext>` and `page_<index:04>.txt`.
//! Names depend only on the page index, so reruns overwrite instead of
//! accumulating files.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Default directory for persisted artifacts.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Extension of rasterized page images.
pub const IMAGE_EXTENSION: &str = "png";

const TEXT_EXTENSION: &str = "txt";
const PAGE_PREFIX: &str = "page_";

/// Columns produced by a two-column split.
const COLUMN_COUNT: usize = 2;

/// File names this directory owns: page images, texts, and column crops.
static ARTIFACT_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^page_\d{4,}(_col\d+)?\.(png|txt)$").unwrap());

/// File stem shared by a page's image and text artifacts.
pub fn page_stem(page_index: usize) -> String {
    format!("{}{:04}", PAGE_PREFIX, page_index)
}

/// A directory that is guaranteed to exist for as long as the handle does.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    /// Create the directory if absent and return a handle to it.
    pub fn create(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path without extension; renderers append their own.
    pub fn image_stem(&self, page_index: usize) -> PathBuf {
        self.root.join(page_stem(page_index))
    }

    pub fn image_path(&self, page_index: usize) -> PathBuf {
        self.image_stem(page_index).with_extension(IMAGE_EXTENSION)
    }

    pub fn text_path(&self, page_index: usize) -> PathBuf {
        self.image_stem(page_index).with_extension(TEXT_EXTENSION)
    }

    /// Path of one column crop (`column` is 1-based) derived from an image path.
    pub fn column_path(image_path: &Path, column: usize) -> PathBuf {
        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("page");
        let ext = image_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(IMAGE_EXTENSION);
        image_path.with_file_name(format!("{}_col{}.{}", stem, column, ext))
    }

    /// Persist a page's text as UTF-8, replacing any previous artifact.
    pub fn write_text(&self, page_index: usize, text: &str) -> io::Result<PathBuf> {
        let path = self.text_path(page_index);
        fs::write(&path, text.as_bytes())?;
        Ok(path)
    }

    /// Remove the image, text, and column crops of one page, if present.
    pub fn remove_page(&self, page_index: usize) -> io::Result<()> {
        let image = self.image_path(page_index);
        let mut paths = vec![self.text_path(page_index)];
        paths.extend((1..=COLUMN_COUNT).map(|column| Self::column_path(&image, column)));
        paths.push(image);

        for path in paths {
            match fs::remove_file(&path) {
                Ok(()) => log::debug!("Removed stale {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Remove every page artifact from an earlier run. Other files are left alone.
    pub fn clean(&self) -> io::Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let is_page_artifact = entry
                .file_name()
                .to_str()
                .map(|name| ARTIFACT_NAME_REGEX.is_match(name))
                .unwrap_or(false);

            if is_page_artifact && entry.file_type()?.is_file() {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        log::debug!("Removed {} stale artifacts from {}", removed, self.root.display());
        Ok(removed)
    }
}
