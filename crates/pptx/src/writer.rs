//! Write-side package editing: replacing injected shapes, and the
//! relationship and content-type entries an embedded image needs.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use slidescribe_core::{Error, Result};

use crate::parser::{attribute, local_name};

/// Default slide size (4:3) in EMU, used when `presentation.xml` has none.
pub const DEFAULT_SLIDE_SIZE: (i64, i64) = (9_144_000, 6_858_000);

const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const EMPTY_RELATIONSHIPS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\n",
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#
);

/// Top-level elements of a shape tree that carry a `cNvPr` name.
const SHAPE_ELEMENTS: &[&[u8]] = &[b"sp", b"pic"];

/// Position and size of an injected shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// A frame inset by 5% of the slide on every side.
    pub fn inset(slide_width: i64, slide_height: i64) -> Self {
        let dx = slide_width / 20;
        let dy = slide_height / 20;
        Self {
            x: dx,
            y: dy,
            cx: slide_width - 2 * dx,
            cy: slide_height - 2 * dy,
        }
    }

    /// Left and right columns with the same 5% margins and gutter.
    pub fn columns(slide_width: i64, slide_height: i64) -> (Self, Self) {
        let dx = slide_width / 20;
        let dy = slide_height / 20;
        let width = (slide_width - 3 * dx) / 2;
        let height = slide_height - 2 * dy;
        (
            Self { x: dx, y: dy, cx: width, cy: height },
            Self { x: 2 * dx + width, y: dy, cx: width, cy: height },
        )
    }

    /// The largest frame with the aspect ratio of a `width` x `height`
    /// image that fits inside this one, centered.
    pub fn fit(self, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return self;
        }
        let scale = (self.cx as f64 / width as f64).min(self.cy as f64 / height as f64);
        let cx = (width as f64 * scale).round() as i64;
        let cy = (height as f64 * scale).round() as i64;
        Self {
            x: self.x + (self.cx - cx) / 2,
            y: self.y + (self.cy - cy) / 2,
            cx,
            cy,
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::inset(DEFAULT_SLIDE_SIZE.0, DEFAULT_SLIDE_SIZE.1)
    }
}

/// A top-level shape buffered until we know whether it is ours.
struct PendingShape {
    kind: &'static [u8],
    events: Vec<Event<'static>>,
    depth: usize,
    id: Option<u32>,
    ours: bool,
}

/// Rewrite slide XML so that it holds exactly one text box named
/// `shape_name` containing `text`. Every other element passes through
/// unchanged.
pub fn replace_text_shape(
    slide_xml: &str,
    shape_name: &str,
    text: &str,
    frame: Frame,
) -> Result<String> {
    replace_shape(slide_xml, shape_name, |id| {
        text_shape_xml(id, shape_name, text, frame)
    })
}

/// Rewrite slide XML so that it holds exactly one picture named
/// `shape_name` showing the image behind relationship `rel_id`.
pub fn replace_picture(
    slide_xml: &str,
    shape_name: &str,
    rel_id: &str,
    frame: Frame,
) -> Result<String> {
    replace_shape(slide_xml, shape_name, |id| {
        picture_xml(id, shape_name, rel_id, frame)
    })
}

fn shape_kind(name: &[u8]) -> Option<&'static [u8]> {
    let name = local_name(name);
    SHAPE_ELEMENTS.iter().copied().find(|kind| *kind == name)
}

/// Drop every top-level shape named `shape_name` and append the one built by
/// `build` (given a free shape id) at the end of the shape tree.
fn replace_shape(
    slide_xml: &str,
    shape_name: &str,
    build: impl FnOnce(u32) -> String,
) -> Result<String> {
    let mut reader = Reader::from_str(slide_xml);
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(slide_xml.len() + 1024)));

    let mut pending: Option<PendingShape> = None;
    let mut max_id = 0u32;
    let mut build = Some(build);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlError(format!("Error parsing slide: {}", e)))?;

        if let Event::Eof = event {
            break;
        }

        if let Event::Start(e) | Event::Empty(e) = &event {
            if local_name(e.name().as_ref()) == b"cNvPr" {
                let id = attribute(e, b"id").and_then(|id| id.parse::<u32>().ok());
                let name = attribute(e, b"name");
                match pending.as_mut() {
                    Some(shape) => {
                        shape.id = shape.id.or(id);
                        shape.ours |= name.as_deref() == Some(shape_name);
                    }
                    None => max_id = max_id.max(id.unwrap_or(0)),
                }
            }
        }

        let opened = match &event {
            Event::Start(e) => shape_kind(e.name().as_ref()),
            _ => None,
        };
        let closed = match &event {
            Event::End(e) => shape_kind(e.name().as_ref()),
            _ => None,
        };

        if let Some(shape) = pending.as_mut() {
            if opened == Some(shape.kind) {
                shape.depth += 1;
            } else if closed == Some(shape.kind) {
                shape.depth -= 1;
            }
            shape.events.push(event.into_owned());

            if shape.depth == 0 {
                if let Some(shape) = pending.take() {
                    if !shape.ours {
                        max_id = max_id.max(shape.id.unwrap_or(0));
                        for event in shape.events {
                            write(&mut writer, event)?;
                        }
                    }
                }
            }
            continue;
        }

        if let Some(kind) = opened {
            pending = Some(PendingShape {
                kind,
                events: vec![event.into_owned()],
                depth: 1,
                id: None,
                ours: false,
            });
            continue;
        }

        let closes_tree =
            matches!(&event, Event::End(e) if local_name(e.name().as_ref()) == b"spTree");
        if closes_tree {
            if let Some(build) = build.take() {
                let shape = build(max_id + 1);
                writer
                    .get_mut()
                    .write_all(shape.as_bytes())
                    .map_err(|e| Error::XmlError(format!("Error writing slide: {}", e)))?;
            }
        }

        write(&mut writer, event)?;
    }

    if build.is_some() {
        return Err(Error::PptxParseError(
            "slide has no shape tree to insert into".to_string(),
        ));
    }

    into_string(writer)
}

/// Add (or replace, by `Id`) one relationship. `rels_xml` is `None` when the
/// part has no relationships file yet.
pub fn upsert_relationship(
    rels_xml: Option<&str>,
    id: &str,
    rel_type: &str,
    target: &str,
) -> Result<String> {
    let mut relationship = BytesStart::new("Relationship");
    relationship.push_attribute(("Id", id));
    relationship.push_attribute(("Type", rel_type));
    relationship.push_attribute(("Target", target));

    append_child(
        rels_xml.unwrap_or(EMPTY_RELATIONSHIPS),
        b"Relationships",
        |e| {
            local_name(e.name().as_ref()) == b"Relationship"
                && attribute(e, b"Id").as_deref() == Some(id)
        },
        relationship,
    )
}

/// Register a `<Default>` content type for `extension` unless one exists.
pub fn ensure_default_content_type(
    types_xml: &str,
    extension: &str,
    content_type: &str,
) -> Result<String> {
    let mut reader = Reader::from_str(types_xml);
    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Default" =>
            {
                let registered = attribute(e, b"Extension")
                    .map(|ext| ext.eq_ignore_ascii_case(extension))
                    .unwrap_or(false);
                if registered {
                    return Ok(types_xml.to_string());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(format!("Error parsing content types: {}", e))),
            _ => {}
        }
    }

    let mut default = BytesStart::new("Default");
    default.push_attribute(("Extension", extension));
    default.push_attribute(("ContentType", content_type));
    append_child(types_xml, b"Types", |_| false, default)
}

/// Copy `xml`, dropping elements matched by `remove` and appending `child` as
/// the last child of the first `parent` element.
fn append_child(
    xml: &str,
    parent: &[u8],
    remove: impl Fn(&BytesStart) -> bool,
    child: BytesStart<'_>,
) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(xml.len() + 256)));
    let mut child = Some(child);

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlError(format!("Error parsing package part: {}", e)))?;

        match &event {
            Event::Eof => break,
            Event::Empty(e) if remove(e) => continue,
            Event::Start(e) if remove(e) => {
                let end = e.to_end().into_owned();
                reader
                    .read_to_end(end.name())
                    .map_err(|e| Error::XmlError(format!("Error parsing package part: {}", e)))?;
                continue;
            }
            Event::End(e) if local_name(e.name().as_ref()) == parent => {
                if let Some(child) = child.take() {
                    write(&mut writer, Event::Empty(child))?;
                }
            }
            Event::Empty(e) if local_name(e.name().as_ref()) == parent => {
                if let Some(child) = child.take() {
                    write(&mut writer, Event::Start(e.borrow()))?;
                    write(&mut writer, Event::Empty(child))?;
                    write(&mut writer, Event::End(e.to_end()))?;
                    continue;
                }
            }
            _ => {}
        }

        write(&mut writer, event)?;
    }

    if child.is_some() {
        return Err(Error::PptxParseError(format!(
            "package part has no <{}> element",
            String::from_utf8_lossy(parent)
        )));
    }

    into_string(writer)
}

fn write(writer: &mut Writer<Cursor<Vec<u8>>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::XmlError(format!("Error writing slide: {}", e)))
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> Result<String> {
    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| Error::XmlError(format!("XML output is not UTF-8: {}", e)))
}

/// Drop characters XML 1.0 cannot carry.
fn xml_safe(line: &str) -> String {
    line.chars()
        .filter(|&c| c == '\t' || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect()
}

/// Serialized `<p:sp>` text box, one paragraph per line of `text`.
pub fn text_shape_xml(id: u32, name: &str, text: &str, frame: Frame) -> String {
    let mut paragraphs = String::new();
    for line in text.split('\n') {
        let line = xml_safe(line.trim_end_matches('\r'));
        if line.is_empty() {
            paragraphs.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        } else {
            paragraphs.push_str(&format!(
                r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
                escape(line.as_str())
            ));
        }
    }

    format!(
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>"#,
            r#"<p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>"#,
            "{paragraphs}</p:txBody></p:sp>"
        ),
        id = id,
        name = escape(name),
        x = frame.x,
        y = frame.y,
        cx = frame.cx,
        cy = frame.cy,
        paragraphs = paragraphs,
    )
}

/// Serialized `<p:pic>` that stretches the embedded image over `frame`.
pub fn picture_xml(id: u32, name: &str, rel_id: &str, frame: Frame) -> String {
    format!(
        concat!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="{name}"/>"#,
            r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip xmlns:r="{ns}" r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#
        ),
        id = id,
        name = escape(name),
        ns = RELATIONSHIPS_NS,
        rel_id = escape(rel_id),
        x = frame.x,
        y = frame.y,
        cx = frame.cx,
        cy = frame.cy,
    )
}
