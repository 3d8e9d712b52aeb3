//! Per-page font records and show-text decoding.
//!
//! A font table is rebuilt for every page and Form XObject scope from the
//! `Font` sub-dictionary of the current resources. Each [`Font`] carries the
//! encoding derived from its `/Encoding` entry and, when present and
//! parseable, a ToUnicode [`CMap`]. Text shown through the font decodes to
//! UTF-8 via the ToUnicode map first, falling back to the byte encoding.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object};
use pdfwalk_core::{BaseEncoding, FontEncoding, glyph_name_to_char};

use crate::cmap::CMap;
use crate::resolver::resolve_ref;
use crate::tokenizer::Operand;
use crate::walker::decode_stream_payload;

/// How a font's character codes map to bytes and, without a ToUnicode map,
/// to Unicode.
#[derive(Debug, Clone)]
pub enum Encoding {
    /// Single-byte codes through a base table plus Differences overlay.
    Simple(FontEncoding),
    /// Two-byte codes (`Identity-H` / `Identity-V`). Without a ToUnicode
    /// map, code values are taken as Unicode scalars.
    Identity,
}

impl Encoding {
    /// Build the encoding from a font dictionary's resolved `/Encoding`
    /// entry. Accepts a base-encoding name, `Identity-H`/`Identity-V`, or a
    /// dictionary carrying `/BaseEncoding` and `/Differences`. Anything
    /// unrecognized (or absent) falls back to StandardEncoding.
    fn from_object(doc: &Document, entry: Option<&Object>) -> Self {
        let standard = || Encoding::Simple(FontEncoding::from_base(BaseEncoding::Standard));
        let Some(entry) = entry else {
            return standard();
        };

        match resolve_ref(doc, entry) {
            Object::Name(name) => {
                let name = String::from_utf8_lossy(name);
                if name == "Identity-H" || name == "Identity-V" {
                    return Encoding::Identity;
                }
                match BaseEncoding::from_name(&name) {
                    Some(base) => Encoding::Simple(FontEncoding::from_base(base)),
                    None => standard(),
                }
            }
            Object::Dictionary(dict) => {
                let base = dict
                    .get(b"BaseEncoding")
                    .ok()
                    .and_then(|o| o.as_name().ok().and_then(|b| std::str::from_utf8(b).ok()))
                    .and_then(BaseEncoding::from_name)
                    .unwrap_or(BaseEncoding::Standard);
                let mut encoding = FontEncoding::from_base(base);
                if let Ok(differences) = dict.get(b"Differences") {
                    encoding.apply_differences(&parse_differences(resolve_ref(doc, differences)));
                }
                Encoding::Simple(encoding)
            }
            _ => standard(),
        }
    }

    /// Decode a byte string without a ToUnicode map.
    pub fn decode_bytes(&self, bytes: &[u8]) -> String {
        match self {
            Encoding::Simple(table) => table.decode_bytes(bytes),
            Encoding::Identity => codepoints_identity(bytes)
                .into_iter()
                .map(|c| char::from_u32(c).unwrap_or('\u{FFFD}'))
                .collect(),
        }
    }

    /// The character codes carried by a byte string, at this encoding's
    /// code width.
    fn codepoints(&self, bytes: &[u8]) -> Vec<u32> {
        match self {
            Encoding::Simple(_) => bytes.iter().map(|&b| b as u32).collect(),
            Encoding::Identity => codepoints_identity(bytes),
        }
    }
}

fn codepoints_identity(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(2)
        .map(|c| match c {
            [hi, lo] => u32::from(u16::from_be_bytes([*hi, *lo])),
            _ => 0xFFFD,
        })
        .collect()
}

/// A `/Differences` array folded into `(code, char)` overrides.
///
/// The array interleaves starting codes with runs of glyph names:
/// `[code1 /a /b code2 /c …]`. Names without a known Unicode mapping are
/// skipped.
fn parse_differences(array: &Object) -> Vec<(u8, char)> {
    let Ok(items) = array.as_array() else {
        return Vec::new();
    };

    let mut overrides = Vec::new();
    let mut code: u16 = 0;
    for item in items {
        match item {
            Object::Integer(n) => code = *n as u16,
            Object::Name(name) => {
                let name = String::from_utf8_lossy(name);
                if code <= 0xFF {
                    if let Some(ch) = glyph_name_to_char(&name) {
                        overrides.push((code as u8, ch));
                    }
                }
                code = code.saturating_add(1);
            }
            _ => {}
        }
    }
    overrides
}

/// One font from a resource dictionary's `Font` entry.
#[derive(Debug, Clone)]
pub struct Font {
    /// Resource label (e.g. `F1`).
    pub label: String,
    /// `/Subtype` name, when present.
    pub subtype: Option<String>,
    /// `/BaseFont` name, when present.
    pub basefont: Option<String>,
    /// Decoding behavior from the `/Encoding` entry.
    pub encoding: Encoding,
    /// Resolved `/DescendantFonts` entry of composite fonts, when present.
    pub descendant_fonts: Option<Object>,
    /// Parsed `/ToUnicode` CMap. Parse failures leave this `None`.
    pub to_unicode: Option<CMap>,
}

impl Font {
    fn from_dict(doc: &Document, label: String, dict: &Dictionary) -> Self {
        let name_of = |key: &[u8]| {
            dict.get(key)
                .ok()
                .map(|o| resolve_ref(doc, o))
                .and_then(|o| o.as_name().ok().and_then(|b| std::str::from_utf8(b).ok()))
                .map(str::to_string)
        };

        let descendant_fonts = dict
            .get(b"DescendantFonts")
            .ok()
            .map(|o| resolve_ref(doc, o).clone());

        let to_unicode = dict
            .get(b"ToUnicode")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_stream().ok())
            .and_then(|stream| decode_stream_payload(stream).ok())
            .and_then(|data| match CMap::parse(&data) {
                Ok(cmap) => Some(cmap),
                Err(_err) => {
                    // A broken ToUnicode map is not fatal; text through this
                    // font falls back to its base encoding.
                    #[cfg(feature = "tracing")]
                    tracing::debug!(font = %label, error = %_err, "dropping unparseable ToUnicode CMap");
                    None
                }
            });

        Font {
            subtype: name_of(b"Subtype"),
            basefont: name_of(b"BaseFont"),
            encoding: Encoding::from_object(doc, dict.get(b"Encoding").ok()),
            descendant_fonts,
            to_unicode,
            label,
        }
    }

    /// Decode a show-text byte string to UTF-8.
    ///
    /// The ToUnicode map wins when present (unmapped codes become U+FFFD);
    /// otherwise the byte encoding decodes directly.
    pub fn to_utf8(&self, bytes: &[u8]) -> String {
        match &self.to_unicode {
            Some(cmap) => self
                .encoding
                .codepoints(bytes)
                .into_iter()
                .map(|code| cmap.lookup(code).unwrap_or("\u{FFFD}").to_string())
                .collect(),
            None => self.encoding.decode_bytes(bytes),
        }
    }

    /// Apply show-text decoding to one operand. Strings decode to
    /// [`Operand::Text`]; arrays decode element-wise with numeric
    /// positioning values passed through; everything else is unchanged.
    pub(crate) fn decode_operand(&self, operand: Operand) -> Operand {
        match operand {
            Operand::LiteralString(bytes) | Operand::HexString(bytes) => {
                Operand::Text(self.to_utf8(&bytes))
            }
            Operand::Array(items) => Operand::Array(
                items
                    .into_iter()
                    .map(|item| self.decode_operand(item))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Build the `{label → Font}` table for one scope from a resource
/// dictionary. A missing or non-dictionary `Font` entry yields an empty
/// table.
pub fn build_font_table(doc: &Document, resources: &Dictionary) -> HashMap<String, Font> {
    let mut table = HashMap::new();

    let fonts = resources
        .get(b"Font")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok());
    let Some(fonts) = fonts else {
        return table;
    };

    for (label, entry) in fonts.iter() {
        let label = String::from_utf8_lossy(label).into_owned();
        if let Ok(dict) = resolve_ref(doc, entry).as_dict() {
            table.insert(label.clone(), Font::from_dict(doc, label, dict));
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn doc_with_font(font: Dictionary) -> (Document, Dictionary) {
        let mut doc = Document::with_version("1.4");
        let font_id = doc.add_object(Object::Dictionary(font));
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        };
        (doc, resources)
    }

    // --- Table construction ---

    #[test]
    fn builds_entry_per_label() {
        let (doc, resources) = doc_with_font(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        let table = build_font_table(&doc, &resources);
        assert_eq!(table.len(), 1);
        let font = &table["F1"];
        assert_eq!(font.label, "F1");
        assert_eq!(font.subtype.as_deref(), Some("Type1"));
        assert_eq!(font.basefont.as_deref(), Some("Helvetica"));
        assert!(font.to_unicode.is_none());
    }

    #[test]
    fn missing_font_dict_is_empty_table() {
        let doc = Document::with_version("1.4");
        let table = build_font_table(&doc, &dictionary! {});
        assert!(table.is_empty());
    }

    #[test]
    fn non_dict_font_entries_are_skipped() {
        let (doc, _) = doc_with_font(dictionary! {});
        let resources = dictionary! {
            "Font" => dictionary! { "F1" => Object::Integer(3) },
        };
        assert!(build_font_table(&doc, &resources).is_empty());
    }

    // --- Encoding behavior ---

    #[test]
    fn win_ansi_decoding() {
        let (doc, resources) = doc_with_font(dictionary! {
            "Subtype" => "Type1",
            "Encoding" => "WinAnsiEncoding",
        });
        let table = build_font_table(&doc, &resources);
        assert_eq!(table["F1"].to_utf8(b"caf\xe9"), "café");
    }

    #[test]
    fn default_encoding_is_standard() {
        let (doc, resources) = doc_with_font(dictionary! { "Subtype" => "Type1" });
        let table = build_font_table(&doc, &resources);
        // 0x27 is quoteright in StandardEncoding
        assert_eq!(table["F1"].to_utf8(b"\x27"), "’");
    }

    #[test]
    fn differences_override_base_encoding() {
        let (doc, resources) = doc_with_font(dictionary! {
            "Subtype" => "Type1",
            "Encoding" => dictionary! {
                "BaseEncoding" => "WinAnsiEncoding",
                "Differences" => vec![
                    Object::Integer(65),
                    Object::Name(b"eacute".to_vec()),
                    Object::Name(b"ccedilla".to_vec()),
                ],
            },
        });
        let table = build_font_table(&doc, &resources);
        assert_eq!(table["F1"].to_utf8(b"ABC"), "éçC");
    }

    #[test]
    fn identity_h_without_tounicode() {
        let (doc, resources) = doc_with_font(dictionary! {
            "Subtype" => "Type0",
            "Encoding" => "Identity-H",
        });
        let table = build_font_table(&doc, &resources);
        assert_eq!(table["F1"].to_utf8(&[0x00, 0x41, 0x4E, 0x2D]), "A中");
    }

    // --- ToUnicode ---

    #[test]
    fn tounicode_wins_over_encoding() {
        let mut doc = Document::with_version("1.4");
        let cmap_data = b"beginbfchar\n<41> <0062>\nendbfchar\n".to_vec();
        let cmap_id = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            cmap_data,
        )));
        let font_id = doc.add_object(Object::Dictionary(dictionary! {
            "Subtype" => "Type1",
            "Encoding" => "WinAnsiEncoding",
            "ToUnicode" => cmap_id,
        }));
        let resources = dictionary! { "Font" => dictionary! { "F1" => font_id } };

        let table = build_font_table(&doc, &resources);
        // 'A' (0x41) remaps to 'b' through the CMap
        assert_eq!(table["F1"].to_utf8(b"A"), "b");
    }

    #[test]
    fn tounicode_two_byte_codes() {
        let mut doc = Document::with_version("1.4");
        let cmap_data = b"beginbfchar\n<0003> <0048>\nendbfchar\n".to_vec();
        let cmap_id = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            cmap_data,
        )));
        let font_id = doc.add_object(Object::Dictionary(dictionary! {
            "Subtype" => "Type0",
            "Encoding" => "Identity-H",
            "ToUnicode" => cmap_id,
        }));
        let resources = dictionary! { "Font" => dictionary! { "F1" => font_id } };

        let table = build_font_table(&doc, &resources);
        assert_eq!(table["F1"].to_utf8(&[0x00, 0x03]), "H");
    }

    #[test]
    fn broken_tounicode_is_swallowed() {
        let mut doc = Document::with_version("1.4");
        let cmap_id = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            b"beginbfchar\n<NOTHEX> <0041>\nendbfchar\n".to_vec(),
        )));
        let font_id = doc.add_object(Object::Dictionary(dictionary! {
            "Subtype" => "Type1",
            "Encoding" => "WinAnsiEncoding",
            "ToUnicode" => cmap_id,
        }));
        let resources = dictionary! { "Font" => dictionary! { "F1" => font_id } };

        let table = build_font_table(&doc, &resources);
        let font = &table["F1"];
        assert!(font.to_unicode.is_none());
        // Falls back to WinAnsi
        assert_eq!(font.to_utf8(b"Hi"), "Hi");
    }

    // --- Operand decoding ---

    #[test]
    fn decode_operand_replaces_strings() {
        let (doc, resources) = doc_with_font(dictionary! {
            "Subtype" => "Type1",
            "Encoding" => "WinAnsiEncoding",
        });
        let table = build_font_table(&doc, &resources);
        let font = &table["F1"];

        assert_eq!(
            font.decode_operand(Operand::LiteralString(b"Hi".to_vec())),
            Operand::Text("Hi".to_string())
        );
    }

    #[test]
    fn decode_operand_keeps_positioning_numbers() {
        let (doc, resources) = doc_with_font(dictionary! {
            "Subtype" => "Type1",
            "Encoding" => "WinAnsiEncoding",
        });
        let table = build_font_table(&doc, &resources);
        let font = &table["F1"];

        let decoded = font.decode_operand(Operand::Array(vec![
            Operand::LiteralString(b"H".to_vec()),
            Operand::Integer(-20),
            Operand::HexString(vec![0x65]),
        ]));
        assert_eq!(
            decoded,
            Operand::Array(vec![
                Operand::Text("H".to_string()),
                Operand::Integer(-20),
                Operand::Text("e".to_string()),
            ])
        );
    }
}
