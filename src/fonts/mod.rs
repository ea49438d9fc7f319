//! Font catalog and font resources
//!
//! The catalog discovers system fonts once per run and registers them under
//! unique identifiers (numeric suffixes de-duplicate collisions). It is
//! passed explicitly into the batch and the overlay pipeline; there is no
//! process-global registry, which keeps the core testable in isolation.
//!
//! The built-in Helvetica base font is always present, so a run never
//! depends on the host having any fonts installed.

pub mod builtin;
pub mod winansi;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};

/// Name of the advisory font list written at the start of each run
pub const FONT_README_NAME: &str = "FONTS_README.md";

/// The identifier the built-in base font is registered under
pub const BUILTIN_FONT_NAME: &str = "Helvetica";

#[derive(Debug, Clone, Copy)]
enum FontEntry {
    /// Non-embedded standard-14 base font
    Builtin,
    /// Discovered system face, loaded on demand
    Face(fontdb::ID),
}

/// Registry of available fonts, keyed by identifier.
pub struct FontCatalog {
    db: fontdb::Database,
    names: BTreeMap<String, FontEntry>,
}

impl FontCatalog {
    /// Catalog containing only the built-in base font. Used in tests and as
    /// the fallback when system discovery finds nothing.
    pub fn builtin() -> Self {
        let mut names = BTreeMap::new();
        names.insert(BUILTIN_FONT_NAME.to_string(), FontEntry::Builtin);
        Self {
            db: fontdb::Database::new(),
            names,
        }
    }

    /// Discover system fonts and build the full catalog.
    ///
    /// Identifiers come from each face's PostScript name (falling back to
    /// the family name). Faces that would collide with an already-registered
    /// identifier get a `_{n}` suffix, so every face stays addressable.
    pub fn system() -> Self {
        let mut catalog = Self::builtin();
        catalog.db.load_system_fonts();

        let faces: Vec<(fontdb::ID, String)> = catalog
            .db
            .faces()
            .filter_map(|face| {
                let base = if !face.post_script_name.is_empty() {
                    face.post_script_name.clone()
                } else {
                    face.families.first()?.0.clone()
                };
                Some((face.id, base))
            })
            .collect();

        for (id, base) in faces {
            let mut name = base.clone();
            let mut suffix = 1;
            while catalog.names.contains_key(&name) {
                name = format!("{base}_{suffix}");
                suffix += 1;
            }
            catalog.names.insert(name, FontEntry::Face(id));
        }

        catalog
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Resolve an identifier to a usable font. Lookup is case-insensitive,
    /// matching how users copy names out of FONTS_README.md.
    pub fn resolve(&self, name: &str) -> Result<RegisteredFont> {
        let entry = self.names.get(name).or_else(|| {
            self.names
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, entry)| entry)
        });

        match entry {
            Some(FontEntry::Builtin) => Ok(RegisteredFont::Builtin),
            Some(FontEntry::Face(id)) => self
                .db
                .with_face_data(*id, |data, index| RegisteredFont::TrueType {
                    name: sanitize_pdf_name(name),
                    data: data.to_vec(),
                    index,
                })
                .ok_or_else(|| Error::Font(format!("Could not load font data for {name:?}"))),
            None => Err(Error::UnknownFont(name.to_string())),
        }
    }

    /// (Re)write the advisory font list the user picks identifiers from.
    /// Purely a side channel; nothing reads it back programmatically.
    pub fn write_readme(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)?;
        writeln!(file, "# Available Fonts")?;
        writeln!(file)?;
        writeln!(
            file,
            "Pass any of the following identifiers to `--font`. The list is \
             regenerated at the start of every run."
        )?;
        writeln!(file)?;
        writeln!(file, "| Font Name |")?;
        writeln!(file, "|-----------|")?;
        for name in self.names() {
            writeln!(file, "| `{name}` |")?;
        }
        Ok(())
    }
}

impl Default for FontCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A font resolved from the catalog: everything the overlay pipeline needs
/// to measure text and to register the font in an output document.
pub enum RegisteredFont {
    /// Built-in Helvetica; measured from the AFM width table, referenced as
    /// a non-embedded Type1 font
    Builtin,
    /// A TrueType face; measured by shaping, embedded with `FontFile2`
    TrueType {
        name: String,
        data: Vec<u8>,
        index: u32,
    },
}

impl RegisteredFont {
    /// Measure the advance width of `text` at `font_size` points.
    pub fn measure(&self, text: &str, font_size: f32) -> Result<f32> {
        match self {
            Self::Builtin => Ok(builtin::measure_winansi(&winansi::encode(text), font_size)),
            Self::TrueType { data, index, .. } => {
                let face = parse_face(data, *index)?;
                let mut buffer = rustybuzz::UnicodeBuffer::new();
                buffer.push_str(text);
                let shaped = rustybuzz::shape(&face, &[], buffer);
                let advance: i32 = shaped.glyph_positions().iter().map(|p| p.x_advance).sum();
                Ok(advance as f32 * font_size / face.units_per_em() as f32)
            }
        }
    }

    /// Add this font to a document and return the font object's id.
    /// Called once per output document; pages reference the id through
    /// their resource dictionaries.
    pub fn embed(&self, doc: &mut Document) -> Result<ObjectId> {
        match self {
            Self::Builtin => Ok(add_builtin_type1(doc)),
            Self::TrueType { name, data, index } => embed_truetype(doc, name, data, *index),
        }
    }
}

fn parse_face(data: &[u8], index: u32) -> Result<rustybuzz::Face<'_>> {
    rustybuzz::Face::from_slice(data, index)
        .ok_or_else(|| Error::Font("Failed to parse font face".to_string()))
}

/// Restrict an identifier to characters that are safe inside a PDF name
/// object (no whitespace or delimiters).
fn sanitize_pdf_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Reference Helvetica as a Type1 standard font (no font program needed).
fn add_builtin_type1(doc: &mut Document) -> ObjectId {
    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"Type1".to_vec()));
    font.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    doc.add_object(Object::Dictionary(font))
}

/// Embed a TrueType face with WinAnsiEncoding.
///
/// The font program goes into the PDF as a `FontFile2` stream so output
/// renders identically on systems without the font installed. Descriptor
/// metrics and the `Widths` array are computed from the face itself.
fn embed_truetype(doc: &mut Document, name: &str, data: &[u8], index: u32) -> Result<ObjectId> {
    let face = parse_face(data, index)?;
    let upem = face.units_per_em() as f32;
    // FontDescriptor values are expressed in 1/1000ths of the em square
    let scale = |units: i16| -> i64 { (units as f32 * 1000.0 / upem).round() as i64 };

    let mut font_stream_dict = Dictionary::new();
    font_stream_dict.set("Length1", Object::Integer(data.len() as i64));
    let font_stream = Stream::new(font_stream_dict, data.to_vec());
    let font_stream_id = doc.add_object(Object::Stream(font_stream));

    let bbox = face.global_bounding_box();
    let ascent = face.ascender();
    let descent = face.descender();
    let cap_height = face.capital_height().unwrap_or(ascent);

    let mut descriptor = Dictionary::new();
    descriptor.set("Type", Object::Name(b"FontDescriptor".to_vec()));
    descriptor.set("FontName", Object::Name(name.as_bytes().to_vec()));
    descriptor.set("Flags", Object::Integer(32)); // Nonsymbolic
    descriptor.set(
        "FontBBox",
        Object::Array(vec![
            Object::Integer(scale(bbox.x_min)),
            Object::Integer(scale(bbox.y_min)),
            Object::Integer(scale(bbox.x_max)),
            Object::Integer(scale(bbox.y_max)),
        ]),
    );
    descriptor.set("ItalicAngle", Object::Integer(0));
    descriptor.set("Ascent", Object::Integer(scale(ascent)));
    descriptor.set("Descent", Object::Integer(scale(descent)));
    descriptor.set("CapHeight", Object::Integer(scale(cap_height)));
    descriptor.set("StemV", Object::Integer(80));
    descriptor.set("FontFile2", Object::Reference(font_stream_id));
    let descriptor_id = doc.add_object(Object::Dictionary(descriptor));

    // Advance widths for WinAnsi codes 32-255; codes without a glyph get 0
    let widths: Vec<Object> = (32u16..=255)
        .map(|code| {
            let advance = winansi::winansi_to_char(code as u8)
                .and_then(|ch| face.glyph_index(ch))
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| (adv as f32 * 1000.0 / upem).round() as i64)
                .unwrap_or(0);
            Object::Integer(advance)
        })
        .collect();

    let mut font = Dictionary::new();
    font.set("Type", Object::Name(b"Font".to_vec()));
    font.set("Subtype", Object::Name(b"TrueType".to_vec()));
    font.set("BaseFont", Object::Name(name.as_bytes().to_vec()));
    font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
    font.set("FontDescriptor", Object::Reference(descriptor_id));
    font.set("FirstChar", Object::Integer(32));
    font.set("LastChar", Object::Integer(255));
    font.set("Widths", Object::Array(widths));

    Ok(doc.add_object(Object::Dictionary(font)))
}
