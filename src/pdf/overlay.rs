//! Overlay rendering onto existing PDF pages
//!
//! An overlay is a small content stream containing only the placed text. It
//! is appended after the page's original content so the text draws on top,
//! and wrapped in q/Q so it cannot leak graphics state into anything else.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::Result;
use crate::fonts::winansi;
use crate::style::StyleSpec;

/// Resource name the stamped font is registered under in page resources.
/// Deliberately unusual so it does not collide with the template's own
/// font names (templates commonly use /F1, /F2, ...).
pub const FONT_RESOURCE: &str = "CrtF1";

/// Build the content stream for one page's overlay.
///
/// `(x, y)` is the text baseline origin in page coordinates. The text is
/// WinAnsi-encoded to match the encoding the font is registered with.
pub fn overlay_content(text: &str, x: f32, y: f32, style: &StyleSpec) -> Vec<u8> {
    let [r, g, b] = style.color;
    let mut ops = Vec::new();
    ops.extend_from_slice(
        format!(
            "q\n{r} {g} {b} rg\nBT\n/{FONT_RESOURCE} {} Tf\n1 0 0 1 {x} {y} Tm\n(",
            style.size
        )
        .as_bytes(),
    );
    ops.extend_from_slice(&escape_pdf_string(&winansi::encode(text)));
    ops.extend_from_slice(b") Tj\nET\nQ\n");
    ops
}

/// Escape special characters in a PDF literal string
fn escape_pdf_string(bytes: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(bytes.len());
    for &byte in bytes {
        match byte {
            b'\\' => escaped.extend_from_slice(b"\\\\"),
            b'(' => escaped.extend_from_slice(b"\\("),
            b')' => escaped.extend_from_slice(b"\\)"),
            b'\r' => escaped.extend_from_slice(b"\\r"),
            b'\n' => escaped.extend_from_slice(b"\\n"),
            _ => escaped.push(byte),
        }
    }
    escaped
}

/// Append an overlay to a page: add the content stream after the page's
/// existing Contents and register the stamp font in the page's resources.
pub fn apply_overlay(
    doc: &mut Document,
    page_id: ObjectId,
    content: Vec<u8>,
    font_id: ObjectId,
) -> Result<()> {
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
    append_content_to_page(doc, page_id, content_id)?;
    add_font_to_page_resources(doc, page_id, font_id)?;
    Ok(())
}

/// Append a content stream reference to a page's Contents.
///
/// Appending (rather than prepending) draws the overlay on top of the
/// template's own content.
fn append_content_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    new_content_id: ObjectId,
) -> Result<()> {
    let page_obj = doc.get_object_mut(page_id)?;

    if let Object::Dictionary(ref mut page_dict) = *page_obj {
        let existing = page_dict.get(b"Contents").ok().cloned();

        let contents = match existing {
            Some(Object::Reference(content_id)) => {
                vec![
                    Object::Reference(content_id),
                    Object::Reference(new_content_id),
                ]
            }
            Some(Object::Array(mut content_array)) => {
                content_array.push(Object::Reference(new_content_id));
                content_array
            }
            _ => vec![Object::Reference(new_content_id)],
        };
        page_dict.set("Contents", Object::Array(contents));
    }

    Ok(())
}

/// Register the stamp font in a page's Resources under [`FONT_RESOURCE`].
///
/// Resources is an inheritable attribute that may also live behind a
/// reference shared between pages. Either way the page gets its own
/// resolved copy with the stamp font added, so the template's own fonts
/// and XObjects stay reachable.
fn add_font_to_page_resources(
    doc: &mut Document,
    page_id: ObjectId,
    font_id: ObjectId,
) -> Result<()> {
    // Resolve the resources dictionary first (immutable pass) to avoid
    // holding a borrow while mutating the page
    let mut resources = resolved_resources(doc, page_id)?;
    let mut fonts = match resources.get(b"Font") {
        Ok(Object::Dictionary(existing)) => existing.clone(),
        Ok(Object::Reference(fonts_id)) => match doc.get_object(*fonts_id) {
            Ok(Object::Dictionary(existing)) => existing.clone(),
            _ => Dictionary::new(),
        },
        _ => Dictionary::new(),
    };
    fonts.set(FONT_RESOURCE, Object::Reference(font_id));
    resources.set("Font", Object::Dictionary(fonts));

    let page_obj = doc.get_object_mut(page_id)?;
    if let Object::Dictionary(ref mut page_dict) = *page_obj {
        // Direct dictionary, not a reference: the page owns its copy now
        page_dict.set("Resources", Object::Dictionary(resources));
    }

    Ok(())
}

/// Resolve a page's effective Resources dictionary.
///
/// A page without its own Resources entry inherits the nearest ancestor's,
/// so the Parent chain is walked until one is found. An empty dictionary is
/// returned when no node carries Resources at all.
fn resolved_resources(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut current = page_id;
    loop {
        let dict = doc.get_object(current)?.as_dict()?;

        if let Ok(resources) = dict.get(b"Resources") {
            let resources = match resources {
                Object::Reference(res_id) => doc.get_object(*res_id)?,
                other => other,
            };
            if let Ok(resolved) = resources.as_dict() {
                return Ok(resolved.clone());
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => current = *parent_id,
            _ => return Ok(Dictionary::new()),
        }
    }
}
