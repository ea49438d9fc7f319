//! Document compositing: stamp text onto every page of a template
//!
//! One call produces one output document: the template is loaded, every page
//! gets an overlay with the text centered in the caller's bounding box, and
//! the result is serialized in a single save at the end. A failure anywhere
//! before the save leaves no output file behind.

use std::path::Path;

use lopdf::{Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::fonts::RegisteredFont;
use crate::layout::{centered_baseline, BoundingBox};
use crate::pdf::overlay::{apply_overlay, overlay_content};
use crate::style::StyleSpec;

/// Stamp `text` onto every page of the document at `input`, writing the
/// composited result to `output`.
///
/// The box is page-relative; placement is recomputed per page because page
/// sizes may differ within one template. The font is resolved by the caller
/// and embedded once per output document.
pub fn stamp_document(
    input: &Path,
    output: &Path,
    text: &str,
    bbox: &BoundingBox,
    style: &StyleSpec,
    font: &RegisteredFont,
) -> Result<()> {
    let mut doc = Document::load(input)?;

    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if page_ids.is_empty() {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }

    let font_id = font.embed(&mut doc)?;
    let font_size = style.size as f32;
    let text_width = font.measure(text, font_size)?;

    for page_id in page_ids {
        // Placement depends only on the box, the measured text and the
        // font size; the page dimensions are still resolved so oversized
        // or inherited MediaBoxes surface errors here, per page
        let (_width, _height) = page_size(&doc, page_id)?;
        let (x, y) = centered_baseline(bbox, text_width, font_size);
        let content = overlay_content(text, x, y, style);
        apply_overlay(&mut doc, page_id, content, font_id)?;
    }

    doc.compress();
    doc.save(output)?;

    Ok(())
}

/// Resolve a page's dimensions from its MediaBox.
///
/// MediaBox is an inheritable attribute: a page without its own entry takes
/// the nearest ancestor's, so the Parent chain is walked until one is found.
pub fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let mut current = page_id;
    loop {
        let dict = doc.get_object(current)?.as_dict()?;

        if let Ok(media_box) = dict.get(b"MediaBox") {
            let media_box = match media_box {
                Object::Reference(id) => doc.get_object(*id)?,
                other => other,
            };
            let coords = media_box.as_array().map_err(Error::Pdf)?;
            if coords.len() != 4 {
                return Err(Error::General("MediaBox must have 4 entries".to_string()));
            }
            let values: Vec<f32> = coords.iter().map(object_to_f32).collect::<Result<_>>()?;
            return Ok((values[2] - values[0], values[3] - values[1]));
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => current = *parent_id,
            _ => {
                return Err(Error::General(
                    "Page has no MediaBox (own or inherited)".to_string(),
                ))
            }
        }
    }
}

/// Page count and per-page dimensions of a document, for inspection.
pub fn document_info(path: &Path) -> Result<Vec<(f32, f32)>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    pages
        .into_values()
        .map(|page_id| page_size(&doc, page_id))
        .collect()
}

fn object_to_f32(obj: &Object) -> Result<f32> {
    match obj {
        Object::Integer(n) => Ok(*n as f32),
        Object::Real(r) => Ok(*r),
        _ => Err(Error::General("Expected a number in MediaBox".to_string())),
    }
}
