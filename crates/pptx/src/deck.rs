//! An open `.pptx` presentation.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, Cursor, Read, Seek, Write};
use std::path::{Path, PathBuf};

use slidescribe_core::{Error, PageImage, Result, SetupError, SlideDeck, IMAGE_EXTENSION};
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::parser::{self, ShapeText};
use crate::writer::{self, Frame, DEFAULT_SLIDE_SIZE};

/// Name of the shape that holds injected text.
pub const TEXT_SHAPE_NAME: &str = "slidescribe:ocr-text";

/// Name of the picture that shows the rendered page.
pub const IMAGE_SHAPE_NAME: &str = "slidescribe:page-image";

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const MEDIA_DIR: &str = "ppt/media";

const IMAGE_REL_ID: &str = "rIdSlidescribeImage";
const IMAGE_REL_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// One part of the package, kept in archive order.
#[derive(Debug, Clone)]
struct Part {
    name: String,
    data: Vec<u8>,
}

impl Part {
    fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// A presentation loaded into memory.
///
/// Slide writes stay in memory until [`save`](Self::save) or
/// [`save_as`](Self::save_as).
#[derive(Debug, Clone)]
pub struct PptxDeck {
    path: PathBuf,
    parts: Vec<Part>,
    index: HashMap<String, usize>,
    slide_paths: Vec<String>,
    slide_size: (i64, i64),
    frame: Frame,
    picture_frame: Frame,
    dirty: bool,
}

impl PptxDeck {
    /// Open a presentation from disk.
    ///
    /// Any failure here means there is no presentation to write into, so it
    /// is reported as a setup error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let unavailable =
            |reason: String| Error::from(SetupError::PresentationUnavailable(reason));

        let file = File::open(path)
            .map_err(|e| unavailable(format!("cannot open {}: {}", path.display(), e)))?;

        Self::from_reader(BufReader::new(file), path)
            .map_err(|e| unavailable(format!("{}: {}", path.display(), e)))
    }

    /// Load a presentation from any seekable reader. `path` is where
    /// [`save`](Self::save) writes.
    pub fn from_reader<R: Read + Seek>(reader: R, path: impl Into<PathBuf>) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive
                .by_index(i)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", i, e)))?;
            let name = entry.name().to_string();
            let mut data = Vec::new();
            if !entry.is_dir() {
                entry
                    .read_to_end(&mut data)
                    .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;
            }
            parts.push(Part { name, data });
        }

        let index = parts
            .iter()
            .enumerate()
            .map(|(i, part)| (part.name.clone(), i))
            .collect();

        let mut deck = Self {
            path: path.into(),
            parts,
            index,
            slide_paths: Vec::new(),
            slide_size: DEFAULT_SLIDE_SIZE,
            frame: Frame::default(),
            picture_frame: Frame::default(),
            dirty: false,
        };

        let rels = deck.part_text(PRESENTATION_RELS_PART)?;
        let presentation = deck.part_text(PRESENTATION_PART).ok();

        deck.slide_paths = parser::slide_order(&rels, presentation.as_deref())?;
        for slide in &deck.slide_paths {
            if !deck.index.contains_key(slide) {
                return Err(Error::PptxParseError(format!(
                    "slide part '{}' is missing from the package",
                    slide
                )));
            }
        }

        let (width, height) = presentation
            .as_deref()
            .and_then(parser::slide_size)
            .unwrap_or(DEFAULT_SLIDE_SIZE);
        deck.slide_size = (width, height);
        deck.frame = Frame::inset(width, height);
        deck.picture_frame = Frame::columns(width, height).1;

        log::debug!(
            "Opened {} with {} slides",
            deck.path.display(),
            deck.slide_paths.len()
        );
        Ok(deck)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Slide part paths in presentation order.
    pub fn slide_paths(&self) -> &[String] {
        &self.slide_paths
    }

    /// Whether there are unsaved slide writes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Slide width and height in EMU.
    pub fn slide_size(&self) -> (i64, i64) {
        self.slide_size
    }

    /// Override where injected text boxes are placed.
    pub fn with_text_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Override the area page images are fitted into.
    pub fn with_picture_frame(mut self, frame: Frame) -> Self {
        self.picture_frame = frame;
        self
    }

    /// Text in the left column, page image in the right.
    pub fn with_side_by_side_layout(self) -> Self {
        let (left, right) = Frame::columns(self.slide_size.0, self.slide_size.1);
        self.with_text_frame(left).with_picture_frame(right)
    }

    /// All shapes on a slide with their text.
    pub fn slide_shapes(&self, slide_index: usize) -> Result<Vec<ShapeText>> {
        let xml = self.part_text(self.slide_path(slide_index)?)?;
        parser::extract_shapes(&xml)
    }

    /// Text previously injected into a slide, if any.
    pub fn injected_text(&self, slide_index: usize) -> Result<Option<String>> {
        Ok(self
            .slide_shapes(slide_index)?
            .into_iter()
            .find(|shape| shape.name == TEXT_SHAPE_NAME)
            .map(|shape| shape.text))
    }

    /// Bytes of the page image previously placed on a slide, if any.
    pub fn injected_image(&self, slide_index: usize) -> Result<Option<Vec<u8>>> {
        let slide_path = self.slide_path(slide_index)?;
        let xml = self.part_text(slide_path)?;
        let Some(rel_id) = parser::picture_embed(&xml, IMAGE_SHAPE_NAME)? else {
            return Ok(None);
        };

        let rels_path = rels_path(slide_path);
        let target = parser::relationships(&self.part_text(&rels_path)?)?
            .into_iter()
            .find(|rel| rel.id == rel_id)
            .map(|rel| rel.target)
            .ok_or_else(|| {
                Error::PptxParseError(format!("'{}' has no relationship '{}'", rels_path, rel_id))
            })?;

        let media = resolve_relative(part_dir(slide_path), &target);
        self.index
            .get(&media)
            .map(|&i| Some(self.parts[i].data.clone()))
            .ok_or_else(|| Error::ZipError(format!("File not found in archive '{}'", media)))
    }

    /// Write the package back to the path it was opened from.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone();
        self.save_as(path)
    }

    /// Write the package to `path`, which becomes the deck's path.
    ///
    /// The archive is written to a uniquely named temporary file in the same
    /// directory and renamed into place, so a failed save never leaves a
    /// truncated presentation.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        self.write_to(tmp.as_file_mut())?;
        tmp.persist(&path).map_err(|e| Error::from(e.error))?;

        log::info!("Saved {}", path.display());
        self.path = path;
        self.dirty = false;
        Ok(())
    }

    /// Serialize the package into any seekable writer.
    pub fn write_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let zip_err = |e: zip::result::ZipError| Error::ZipError(e.to_string());
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for part in &self.parts {
            if part.is_dir() {
                zip.add_directory(part.name.as_str(), options).map_err(zip_err)?;
            } else {
                zip.start_file(part.name.as_str(), options).map_err(zip_err)?;
                zip.write_all(&part.data)?;
            }
        }

        zip.finish().map_err(zip_err)?;
        Ok(())
    }

    /// Serialize the package into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    fn slide_path(&self, slide_index: usize) -> Result<&str> {
        self.slide_paths
            .get(slide_index)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::PptxParseError(format!(
                    "slide {} does not exist (presentation has {} slides)",
                    slide_index,
                    self.slide_paths.len()
                ))
            })
    }

    /// Replace or add a part. Returns whether the package changed.
    fn set_part(&mut self, name: &str, data: Vec<u8>) -> bool {
        match self.index.get(name) {
            Some(&i) if self.parts[i].data == data => false,
            Some(&i) => {
                self.parts[i].data = data;
                true
            }
            None => {
                self.index.insert(name.to_string(), self.parts.len());
                self.parts.push(Part {
                    name: name.to_string(),
                    data,
                });
                true
            }
        }
    }

    fn part_text(&self, name: &str) -> Result<String> {
        let part = self
            .index
            .get(name)
            .map(|&i| &self.parts[i])
            .ok_or_else(|| Error::ZipError(format!("File not found in archive '{}'", name)))?;

        String::from_utf8(part.data.clone())
            .map_err(|e| Error::PptxParseError(format!("'{}' is not UTF-8: {}", name, e)))
    }
}

impl SlideDeck for PptxDeck {
    fn slide_count(&self) -> usize {
        self.slide_paths.len()
    }

    fn set_slide_text(&mut self, slide_index: usize, text: &str) -> Result<()> {
        let slide_path = self.slide_path(slide_index)?.to_string();
        let current = self.part_text(&slide_path)?;
        let updated = writer::replace_text_shape(&current, TEXT_SHAPE_NAME, text, self.frame)?;

        if self.set_part(&slide_path, updated.into_bytes()) {
            self.dirty = true;
        }
        log::debug!("Wrote {} bytes of text to {}", text.len(), slide_path);
        Ok(())
    }

    fn set_slide_image(&mut self, slide_index: usize, image: &PageImage) -> Result<()> {
        let slide_path = self.slide_path(slide_index)?.to_string();
        let extension = image
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or(IMAGE_EXTENSION)
            .to_ascii_lowercase();
        let content_type = image_content_type(&extension)?;
        let data = fs::read(&image.path)?;

        let media_path = format!("{}/slidescribe_{}.{}", MEDIA_DIR, part_stem(&slide_path), extension);
        let mut changed = self.set_part(&media_path, data);

        let rels_path = rels_path(&slide_path);
        let rels = if self.index.contains_key(&rels_path) {
            Some(self.part_text(&rels_path)?)
        } else {
            None
        };
        let target = relative_target(&slide_path, &media_path);
        let rels = writer::upsert_relationship(rels.as_deref(), IMAGE_REL_ID, IMAGE_REL_TYPE, &target)?;
        changed |= self.set_part(&rels_path, rels.into_bytes());

        let types = self.part_text(CONTENT_TYPES_PART)?;
        let types = writer::ensure_default_content_type(&types, &extension, content_type)?;
        changed |= self.set_part(CONTENT_TYPES_PART, types.into_bytes());

        let frame = self.picture_frame.fit(image.width, image.height);
        let slide = self.part_text(&slide_path)?;
        let slide = writer::replace_picture(&slide, IMAGE_SHAPE_NAME, IMAGE_REL_ID, frame)?;
        changed |= self.set_part(&slide_path, slide.into_bytes());

        if changed {
            self.dirty = true;
        }
        log::debug!("Placed {} on {}", image.path.display(), slide_path);
        Ok(())
    }
}

fn image_content_type(extension: &str) -> Result<&'static str> {
    match extension {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        other => Err(Error::PptxParseError(format!(
            "unsupported image type '{}'",
            other
        ))),
    }
}

/// Directory of a package part, e.g. `ppt/slides`.
fn part_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// File name of a part without its extension, e.g. `slide3`.
fn part_stem(part: &str) -> &str {
    let file = part.rsplit_once('/').map(|(_, file)| file).unwrap_or(part);
    file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file)
}

/// `ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`.
fn rels_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Relationship target of `to` as seen from the part `from`.
fn relative_target(from: &str, to: &str) -> String {
    let dir: Vec<&str> = part_dir(from).split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to.split('/').collect();
    let common = dir.iter().zip(&to).take_while(|(a, b)| a == b).count();
    format!("{}{}", "../".repeat(dir.len() - common), to[common..].join("/"))
}

/// Package path of `target` relative to the directory `dir`.
fn resolve_relative(dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            other => segments.push(other),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::pptx_bytes;

    fn deck(count: usize) -> PptxDeck {
        PptxDeck::from_reader(Cursor::new(pptx_bytes(count)), "deck.pptx").unwrap()
    }

    fn title(deck: &PptxDeck, slide: usize) -> String {
        deck.slide_shapes(slide).unwrap()[0].text.clone()
    }

    #[test]
    fn test_slides_follow_presentation_order() {
        let deck = deck(3);
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slide_paths()[0], "ppt/slides/slide3.xml");
        assert_eq!(title(&deck, 0), "Slide 3");
        assert_eq!(title(&deck, 2), "Slide 1");
        assert!(!deck.is_dirty());
    }

    #[test]
    fn test_set_text_and_read_back() {
        let mut deck = deck(2);
        deck.set_slide_text(1, "Recognized\ntext").unwrap();

        assert!(deck.is_dirty());
        assert_eq!(deck.injected_text(1).unwrap().as_deref(), Some("Recognized\ntext"));
        assert_eq!(deck.injected_text(0).unwrap(), None);
        assert_eq!(title(&deck, 1), "Slide 1");
    }

    #[test]
    fn test_set_text_replaces_previous() {
        let mut deck = deck(1);
        deck.set_slide_text(0, "first").unwrap();
        deck.set_slide_text(0, "second").unwrap();

        let shapes = deck.slide_shapes(0).unwrap();
        assert_eq!(shapes.iter().filter(|s| s.name == TEXT_SHAPE_NAME).count(), 1);
        assert_eq!(deck.injected_text(0).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_text_frame_uses_slide_size() {
        let mut deck = deck(1);
        deck.set_slide_text(0, "x").unwrap();
        let shape = deck
            .slide_shapes(0)
            .unwrap()
            .into_iter()
            .find(|s| s.name == TEXT_SHAPE_NAME)
            .unwrap();
        assert_eq!((shape.x, shape.y), (609600.0, 342900.0));
    }

    #[test]
    fn test_unknown_slide_is_error() {
        let mut deck = deck(1);
        assert!(matches!(
            deck.set_slide_text(5, "x"),
            Err(Error::PptxParseError(_))
        ));
        assert!(!deck.is_dirty());
    }

    #[test]
    fn test_save_and_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deck.pptx");
        fs::write(&path, pptx_bytes(2)).unwrap();

        let mut deck = PptxDeck::open(&path).unwrap();
        deck.set_slide_text(0, "hello & goodbye").unwrap();
        deck.save().unwrap();
        assert!(!deck.is_dirty());
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("deck.pptx")]);

        let reopened = PptxDeck::open(&path).unwrap();
        assert_eq!(reopened.slide_count(), 2);
        assert_eq!(
            reopened.injected_text(0).unwrap().as_deref(),
            Some("hello & goodbye")
        );
        assert_eq!(reopened.parts.len(), deck.parts.len());
    }

    #[test]
    fn test_save_leaves_unrelated_tmp_file_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deck.pptx");
        let neighbour = tmp.path().join("deck.pptx.tmp");
        fs::write(&path, pptx_bytes(1)).unwrap();
        fs::write(&neighbour, b"keep me").unwrap();

        let mut deck = PptxDeck::open(&path).unwrap();
        deck.set_slide_text(0, "saved").unwrap();
        deck.save().unwrap();

        assert_eq!(fs::read(&neighbour).unwrap(), b"keep me");
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_save_as_moves_path() {
        let tmp = tempfile::tempdir().unwrap();
        let mut deck = deck(1);
        let out = tmp.path().join("out.pptx");
        deck.save_as(&out).unwrap();
        assert_eq!(deck.path(), out.as_path());
        assert_eq!(PptxDeck::open(&out).unwrap().slide_count(), 1);
    }

    #[test]
    fn test_rewrite_same_text_is_stable() {
        let mut deck = deck(1);
        deck.set_slide_text(0, "same").unwrap();
        let first = deck.part_text("ppt/slides/slide1.xml").unwrap();
        deck.set_slide_text(0, "same").unwrap();
        assert_eq!(deck.part_text("ppt/slides/slide1.xml").unwrap(), first);
    }

    #[test]
    fn test_open_missing_file_is_setup_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = PptxDeck::open(tmp.path().join("missing.pptx")).unwrap_err();
        assert!(matches!(
            err,
            Error::Setup(SetupError::PresentationUnavailable(_))
        ));
    }

    #[test]
    fn test_open_non_zip_is_setup_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("legacy.ppt");
        fs::write(&path, b"\xD0\xCF\x11\xE0 not a zip").unwrap();
        assert!(matches!(
            PptxDeck::open(&path),
            Err(Error::Setup(SetupError::PresentationUnavailable(_)))
        ));
    }

    #[test]
    fn test_to_bytes_round_trip() {
        let mut deck = deck(2);
        deck.set_slide_text(1, "persisted").unwrap();
        let bytes = deck.to_bytes().unwrap();

        let reloaded = PptxDeck::from_reader(Cursor::new(bytes), "copy.pptx").unwrap();
        assert_eq!(reloaded.injected_text(1).unwrap().as_deref(), Some("persisted"));
        assert_eq!(reloaded.slide_paths(), deck.slide_paths());
    }

    fn page_image(dir: &Path, width: u32, height: u32) -> PageImage {
        let path = dir.join("page_0001.png");
        fs::write(&path, b"\x89PNG fake page").unwrap();
        PageImage {
            page_index: 0,
            path,
            dpi: 300,
            width,
            height,
        }
    }

    #[test]
    fn test_set_image_adds_media_relationship_and_content_type() {
        let tmp = tempfile::tempdir().unwrap();
        let mut deck = deck(2);
        deck.set_slide_image(0, &page_image(tmp.path(), 100, 100)).unwrap();

        assert!(deck.is_dirty());
        assert_eq!(
            deck.injected_image(0).unwrap().as_deref(),
            Some(&b"\x89PNG fake page"[..])
        );
        assert_eq!(deck.injected_image(1).unwrap(), None);

        let rels = deck.part_text("ppt/slides/_rels/slide2.xml.rels").unwrap();
        assert!(rels.contains(r#"Target="../media/slidescribe_slide2.png""#));
        let types = deck.part_text("[Content_Types].xml").unwrap();
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));

        // Square page fitted into the right column.
        let slide = deck.part_text("ppt/slides/slide2.xml").unwrap();
        assert!(slide.contains(r#"<a:off x="6400800" y="838200"/>"#));
        assert!(slide.contains(r#"<a:ext cx="5181600" cy="5181600"/>"#));
    }

    #[test]
    fn test_set_image_twice_keeps_one_picture() {
        let tmp = tempfile::tempdir().unwrap();
        let mut deck = deck(1);
        let image = page_image(tmp.path(), 200, 100);
        deck.set_slide_image(0, &image).unwrap();
        deck.set_slide_text(0, "beside").unwrap();
        let parts = deck.parts.len();
        deck.set_slide_image(0, &image).unwrap();

        let slide = deck.part_text("ppt/slides/slide1.xml").unwrap();
        assert_eq!(slide.matches("<p:pic>").count(), 1);
        let types = deck.part_text("[Content_Types].xml").unwrap();
        assert_eq!(types.matches(r#"Extension="png""#).count(), 1);
        assert_eq!(deck.parts.len(), parts);
        assert_eq!(deck.injected_text(0).unwrap().as_deref(), Some("beside"));
    }

    #[test]
    fn test_same_image_after_save_is_not_a_change() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deck.pptx");
        fs::write(&path, pptx_bytes(1)).unwrap();
        let image = page_image(tmp.path(), 100, 100);

        let mut deck = PptxDeck::open(&path).unwrap();
        deck.set_slide_image(0, &image).unwrap();
        deck.save().unwrap();

        let mut reopened = PptxDeck::open(&path).unwrap();
        assert!(reopened.injected_image(0).unwrap().is_some());
        reopened.set_slide_image(0, &image).unwrap();
        assert!(!reopened.is_dirty());
    }

    #[test]
    fn test_missing_image_file_leaves_deck_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let mut deck = deck(1);
        let image = PageImage {
            page_index: 0,
            path: tmp.path().join("page_0001.png"),
            dpi: 300,
            width: 10,
            height: 10,
        };
        assert!(matches!(deck.set_slide_image(0, &image), Err(Error::IoError(_))));
        assert!(!deck.is_dirty());
    }

    #[test]
    fn test_side_by_side_layout_moves_text_left() {
        let mut deck = deck(1).with_side_by_side_layout();
        deck.set_slide_text(0, "x").unwrap();
        let shape = deck
            .slide_shapes(0)
            .unwrap()
            .into_iter()
            .find(|s| s.name == TEXT_SHAPE_NAME)
            .unwrap();
        assert_eq!((shape.x, shape.y), (609600.0, 342900.0));
        assert_eq!(deck.slide_size(), (12192000, 6858000));
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(rels_path("ppt/slides/slide1.xml"), "ppt/slides/_rels/slide1.xml.rels");
        assert_eq!(
            relative_target("ppt/slides/slide1.xml", "ppt/media/a.png"),
            "../media/a.png"
        );
        assert_eq!(relative_target("slide.xml", "ppt/media/a.png"), "ppt/media/a.png");
        assert_eq!(resolve_relative("ppt/slides", "../media/a.png"), "ppt/media/a.png");
        assert_eq!(resolve_relative("ppt/slides", "/ppt/media/a.png"), "ppt/media/a.png");
    }
}
