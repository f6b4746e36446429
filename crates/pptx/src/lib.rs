//! PPTX (Office Open XML) presentation handle.
//!
//! Opens a .pptx package, resolves slide order, writes recognized text and
//! page images into slides, and saves the package back to disk.

pub mod deck;
pub mod parser;
pub mod writer;

pub use deck::{PptxDeck, IMAGE_SHAPE_NAME, TEXT_SHAPE_NAME};
pub use parser::ShapeText;
pub use writer::Frame;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#;

    fn slide_xml(title: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/><p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            title
        )
    }

    /// A package whose slides are listed in reverse file order, so slide
    /// index `i` holds `ppt/slides/slide{count - i}.xml` titled `Slide {count - i}`.
    pub fn pptx_bytes(count: usize) -> Vec<u8> {
        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        let mut ids = String::new();
        for n in 1..=count {
            rels.push_str(&format!(
                r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#
            ));
        }
        for n in (1..=count).rev() {
            ids.push_str(&format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n));
        }
        rels.push_str("</Relationships>");

        let presentation = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst>{}</p:sldIdLst><p:sldSz cx="12192000" cy="6858000"/></p:presentation>"#,
            ids
        );

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        let mut add = |name: &str, content: &str| {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        };
        add("[Content_Types].xml", CONTENT_TYPES);
        add("ppt/presentation.xml", &presentation);
        add("ppt/_rels/presentation.xml.rels", &rels);
        for n in 1..=count {
            add(
                &format!("ppt/slides/slide{}.xml", n),
                &slide_xml(&format!("Slide {}", n)),
            );
        }
        zip.finish().unwrap().into_inner()
    }
}
