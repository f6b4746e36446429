//! Read-side PPTX parsing: slide order, slide size, and shape text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slidescribe_core::{Error, Result};
use std::collections::HashMap;

/// Text content of one shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeText {
    /// `name` attribute of the shape's `cNvPr`.
    pub name: String,

    /// Paragraphs joined with `\n`.
    pub text: String,

    /// Offset in EMU.
    pub x: f64,
    pub y: f64,
}

/// Slide part paths (e.g. `ppt/slides/slide1.xml`) in presentation order.
///
/// Order comes from `<p:sldIdLst>` in `presentation.xml`. Without it,
/// slide relationships are sorted by the number in their id or target.
pub(crate) fn slide_order(rels_xml: &str, presentation_xml: Option<&str>) -> Result<Vec<String>> {
    let relationships = slide_relationships(rels_xml)?;

    if let Some(presentation_xml) = presentation_xml {
        let ids = slide_id_list(presentation_xml)?;
        if !ids.is_empty() {
            let by_id: HashMap<&str, &str> = relationships
                .iter()
                .map(|(id, target)| (id.as_str(), target.as_str()))
                .collect();

            return ids
                .iter()
                .map(|id| {
                    by_id
                        .get(id.as_str())
                        .map(|target| resolve_target(target))
                        .ok_or_else(|| {
                            Error::PptxParseError(format!("slide relationship '{}' is missing", id))
                        })
                })
                .collect();
        }
        log::debug!("presentation.xml has no slide id list, ordering by slide number");
    }

    let mut slides: Vec<(String, Option<usize>)> = relationships
        .into_iter()
        .map(|(id, target)| {
            let order_num = extract_slide_number(&target).or_else(|| extract_slide_number(&id));
            (resolve_target(&target), order_num)
        })
        .collect();

    slides.sort_by(|a, b| match (a.1, b.1) {
        (Some(na), Some(nb)) => na.cmp(&nb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    });

    Ok(slides.into_iter().map(|(path, _)| path).collect())
}

/// One `<Relationship>` of a `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// Every relationship in a `.rels` part, in document order.
pub(crate) fn relationships(rels_xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(rels_xml);
    reader.trim_text(true);
    let mut found = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                found.push(Relationship {
                    id: attribute(e, b"Id").unwrap_or_default(),
                    rel_type: attribute(e, b"Type").unwrap_or_default(),
                    target: attribute(e, b"Target").unwrap_or_default(),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(found)
}

/// `(Id, Target)` of every slide relationship.
fn slide_relationships(rels_xml: &str) -> Result<Vec<(String, String)>> {
    Ok(relationships(rels_xml)?
        .into_iter()
        .filter(|rel| rel.rel_type.ends_with("/slide"))
        .map(|rel| (rel.id, rel.target))
        .collect())
}

/// Relationship ids from `<p:sldIdLst>`, in order.
fn slide_id_list(presentation_xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(presentation_xml);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() != b"id" && local_name(attr.key.as_ref()) == b"id" {
                        ids.push(String::from_utf8_lossy(&attr.value).to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation.xml: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Slide width and height in EMU from `<p:sldSz>`.
pub(crate) fn slide_size(presentation_xml: &str) -> Option<(i64, i64)> {
    let mut reader = Reader::from_str(presentation_xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldSz" =>
            {
                let mut cx = None;
                let mut cy = None;
                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).parse::<i64>().ok();
                    match attr.key.as_ref() {
                        b"cx" => cx = value,
                        b"cy" => cy = value,
                        _ => {}
                    }
                }
                return cx.zip(cy);
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

/// Every shape (`sp`) with its name, text, and offset, in document order.
pub fn extract_shapes(xml_content: &str) -> Result<Vec<ShapeText>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);

    let mut current_shape: Option<ShapeText> = None;
    let mut in_text_body = false;
    let mut in_run_text = false;
    let mut paragraphs_seen = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    current_shape = Some(ShapeText::default());
                    paragraphs_seen = 0;
                }
                b"cNvPr" => read_name(e, current_shape.as_mut()),
                b"off" => read_offset(e, current_shape.as_mut()),
                b"txBody" => in_text_body = true,
                b"p" if in_text_body => {
                    if let Some(shape) = current_shape.as_mut() {
                        if paragraphs_seen > 0 {
                            shape.text.push('\n');
                        }
                    }
                    paragraphs_seen += 1;
                }
                b"t" if in_text_body => in_run_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"cNvPr" => read_name(e, current_shape.as_mut()),
                b"off" => read_offset(e, current_shape.as_mut()),
                b"br" if in_text_body => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.text.push('\n');
                    }
                }
                b"p" if in_text_body => {
                    if let Some(shape) = current_shape.as_mut() {
                        if paragraphs_seen > 0 {
                            shape.text.push('\n');
                        }
                    }
                    paragraphs_seen += 1;
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_run_text => {
                if let Some(shape) = current_shape.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::XmlError(format!("Invalid slide text: {}", e)))?;
                    shape.text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(shape) = current_shape.take() {
                        shapes.push(shape);
                    }
                    in_text_body = false;
                    in_run_text = false;
                }
                b"txBody" => in_text_body = false,
                b"t" => in_run_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(shapes)
}

/// Relationship id embedded by the picture named `name`, if the slide has one.
pub fn picture_embed(xml_content: &str, name: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml_content);
    let mut in_picture = false;
    let mut ours = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"pic" => {
                in_picture = true;
                ours = false;
            }
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if in_picture => {
                match local_name(e.name().as_ref()) {
                    b"cNvPr" => ours = attribute(e, b"name").as_deref() == Some(name),
                    b"blip" if ours => {
                        let embed = e
                            .attributes()
                            .flatten()
                            .find(|attr| local_name(attr.key.as_ref()) == b"embed")
                            .map(|attr| String::from_utf8_lossy(&attr.value).to_string());
                        return Ok(embed);
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"pic" => {
                in_picture = false;
            }
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }
}

/// Value of the attribute whose full name is `key`.
pub(crate) fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

fn read_name(e: &BytesStart, shape: Option<&mut ShapeText>) {
    if let Some(shape) = shape {
        for attr in e.attributes().flatten() {
            if attr.key.as_ref() == b"name" {
                shape.name = String::from_utf8_lossy(&attr.value).to_string();
            }
        }
    }
}

fn read_offset(e: &BytesStart, shape: Option<&mut ShapeText>) {
    if let Some(shape) = shape {
        for attr in e.attributes().flatten() {
            let value = String::from_utf8_lossy(&attr.value).parse::<f64>();
            match (attr.key.as_ref(), value) {
                (b"x", Ok(x)) => shape.x = x,
                (b"y", Ok(y)) => shape.y = y,
                _ => {}
            }
        }
    }
}

/// Package path of a relationship target relative to `ppt/`.
pub(crate) fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
