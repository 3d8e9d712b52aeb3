//! Standard PDF single-byte encodings and glyph-name resolution.
//!
//! Implements the Annex D byte tables (StandardEncoding, WinAnsiEncoding,
//! MacRomanEncoding, PDFDocEncoding), Differences-array overlays on top of a
//! base table, and resolution of Adobe glyph names to Unicode characters.

use std::fmt;

/// A named single-byte encoding from the PDF specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseEncoding {
    /// StandardEncoding — Adobe's standard Latin text encoding.
    Standard,
    /// WinAnsiEncoding — Windows code page 1252 superset.
    WinAnsi,
    /// MacRomanEncoding — classic Mac OS Roman.
    MacRoman,
    /// PDFDocEncoding — the encoding of text strings outside content streams.
    PdfDoc,
}

impl BaseEncoding {
    /// Resolve a PDF encoding name (e.g. `WinAnsiEncoding`) to its table.
    ///
    /// Returns `None` for names this crate does not carry.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "StandardEncoding" => Some(BaseEncoding::Standard),
            "WinAnsiEncoding" => Some(BaseEncoding::WinAnsi),
            "MacRomanEncoding" => Some(BaseEncoding::MacRoman),
            "PDFDocEncoding" => Some(BaseEncoding::PdfDoc),
            _ => None,
        }
    }

    fn table(self) -> &'static [Option<char>; 256] {
        match self {
            BaseEncoding::Standard => &STANDARD_TABLE,
            BaseEncoding::WinAnsi => &WIN_ANSI_TABLE,
            BaseEncoding::MacRoman => &MAC_ROMAN_TABLE,
            BaseEncoding::PdfDoc => &PDF_DOC_TABLE,
        }
    }

    /// Look up the Unicode character for a byte code.
    ///
    /// Returns `None` for codes the encoding leaves undefined.
    pub fn decode(self, code: u8) -> Option<char> {
        self.table()[code as usize]
    }

    /// Decode a byte string; undefined codes become U+FFFD.
    pub fn decode_bytes(self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|&b| self.decode(b).unwrap_or('\u{FFFD}'))
            .collect()
    }
}

/// A single-byte encoding table, optionally overlaid with a Differences array.
///
/// This is the decoded form of a font dictionary's `/Encoding` entry when it
/// names a base table or carries `/BaseEncoding` plus `/Differences`.
#[derive(Clone)]
pub struct FontEncoding {
    table: [Option<char>; 256],
}

impl fmt::Debug for FontEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mapped = self.table.iter().filter(|c| c.is_some()).count();
        f.debug_struct("FontEncoding")
            .field("mapped_codes", &mapped)
            .finish()
    }
}

impl FontEncoding {
    /// Start from one of the standard base tables.
    pub fn from_base(base: BaseEncoding) -> Self {
        Self {
            table: *base.table(),
        }
    }

    /// Overlay `(code, character)` overrides from a Differences array.
    pub fn apply_differences(&mut self, differences: &[(u8, char)]) {
        for &(code, ch) in differences {
            self.table[code as usize] = Some(ch);
        }
    }

    /// Look up the Unicode character for a byte code.
    pub fn decode(&self, code: u8) -> Option<char> {
        self.table[code as usize]
    }

    /// Decode a byte string; undefined codes become U+FFFD.
    pub fn decode_bytes(&self, bytes: &[u8]) -> String {
        bytes
            .iter()
            .map(|&b| self.decode(b).unwrap_or('\u{FFFD}'))
            .collect()
    }
}

/// Resolve an Adobe glyph name to its Unicode character.
///
/// Handles `uniXXXX` forms, single ASCII-character names, and the common
/// Latin and punctuation glyph names that appear in Differences arrays.
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() == 4 {
            if let Ok(code) = u32::from_str_radix(hex, 16) {
                return char::from_u32(code);
            }
        }
    }

    let bytes = name.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii_graphic() {
        return Some(bytes[0] as char);
    }

    GLYPH_NAMES
        .binary_search_by_key(&name, |&(n, _)| n)
        .ok()
        .map(|i| GLYPH_NAMES[i].1)
}

/// Named glyphs mapped to Unicode, sorted for binary search. Single-letter
/// and digit-as-character names are handled algorithmically above.
static GLYPH_NAMES: &[(&str, char)] = &[
    ("AE", 'Æ'),
    ("Aacute", 'Á'),
    ("Acircumflex", 'Â'),
    ("Adieresis", 'Ä'),
    ("Agrave", 'À'),
    ("Aring", 'Å'),
    ("Atilde", 'Ã'),
    ("Ccedilla", 'Ç'),
    ("Eacute", 'É'),
    ("Ecircumflex", 'Ê'),
    ("Edieresis", 'Ë'),
    ("Egrave", 'È'),
    ("Eth", 'Ð'),
    ("Euro", '€'),
    ("Iacute", 'Í'),
    ("Icircumflex", 'Î'),
    ("Idieresis", 'Ï'),
    ("Igrave", 'Ì'),
    ("Lslash", 'Ł'),
    ("Ntilde", 'Ñ'),
    ("OE", 'Œ'),
    ("Oacute", 'Ó'),
    ("Ocircumflex", 'Ô'),
    ("Odieresis", 'Ö'),
    ("Ograve", 'Ò'),
    ("Oslash", 'Ø'),
    ("Otilde", 'Õ'),
    ("Scaron", 'Š'),
    ("Thorn", 'Þ'),
    ("Uacute", 'Ú'),
    ("Ucircumflex", 'Û'),
    ("Udieresis", 'Ü'),
    ("Ugrave", 'Ù'),
    ("Yacute", 'Ý'),
    ("Ydieresis", 'Ÿ'),
    ("Zcaron", 'Ž'),
    ("aacute", 'á'),
    ("acircumflex", 'â'),
    ("acute", '´'),
    ("adieresis", 'ä'),
    ("ae", 'æ'),
    ("agrave", 'à'),
    ("ampersand", '&'),
    ("aring", 'å'),
    ("asciicircum", '^'),
    ("asciitilde", '~'),
    ("asterisk", '*'),
    ("at", '@'),
    ("atilde", 'ã'),
    ("backslash", '\\'),
    ("bar", '|'),
    ("braceleft", '{'),
    ("braceright", '}'),
    ("bracketleft", '['),
    ("bracketright", ']'),
    ("breve", '˘'),
    ("brokenbar", '¦'),
    ("bullet", '•'),
    ("caron", 'ˇ'),
    ("ccedilla", 'ç'),
    ("cedilla", '¸'),
    ("cent", '¢'),
    ("circumflex", 'ˆ'),
    ("colon", ':'),
    ("comma", ','),
    ("copyright", '©'),
    ("currency", '¤'),
    ("dagger", '†'),
    ("daggerdbl", '‡'),
    ("degree", '°'),
    ("dieresis", '¨'),
    ("divide", '÷'),
    ("dollar", '$'),
    ("dotaccent", '˙'),
    ("dotlessi", 'ı'),
    ("eacute", 'é'),
    ("ecircumflex", 'ê'),
    ("edieresis", 'ë'),
    ("egrave", 'è'),
    ("eight", '8'),
    ("ellipsis", '…'),
    ("emdash", '—'),
    ("endash", '–'),
    ("equal", '='),
    ("eth", 'ð'),
    ("exclam", '!'),
    ("exclamdown", '¡'),
    ("fi", 'ﬁ'),
    ("five", '5'),
    ("fl", 'ﬂ'),
    ("florin", 'ƒ'),
    ("four", '4'),
    ("fraction", '⁄'),
    ("germandbls", 'ß'),
    ("grave", '`'),
    ("greater", '>'),
    ("guillemotleft", '«'),
    ("guillemotright", '»'),
    ("guilsinglleft", '‹'),
    ("guilsinglright", '›'),
    ("hungarumlaut", '˝'),
    ("hyphen", '-'),
    ("iacute", 'í'),
    ("icircumflex", 'î'),
    ("idieresis", 'ï'),
    ("igrave", 'ì'),
    ("less", '<'),
    ("logicalnot", '¬'),
    ("lslash", 'ł'),
    ("macron", '¯'),
    ("minus", '−'),
    ("mu", 'µ'),
    ("multiply", '×'),
    ("nine", '9'),
    ("ntilde", 'ñ'),
    ("numbersign", '#'),
    ("oacute", 'ó'),
    ("ocircumflex", 'ô'),
    ("odieresis", 'ö'),
    ("oe", 'œ'),
    ("ogonek", '˛'),
    ("ograve", 'ò'),
    ("one", '1'),
    ("onehalf", '½'),
    ("onequarter", '¼'),
    ("onesuperior", '¹'),
    ("ordfeminine", 'ª'),
    ("ordmasculine", 'º'),
    ("oslash", 'ø'),
    ("otilde", 'õ'),
    ("paragraph", '¶'),
    ("parenleft", '('),
    ("parenright", ')'),
    ("percent", '%'),
    ("period", '.'),
    ("periodcentered", '·'),
    ("perthousand", '‰'),
    ("plus", '+'),
    ("plusminus", '±'),
    ("question", '?'),
    ("questiondown", '¿'),
    ("quotedbl", '"'),
    ("quotedblbase", '„'),
    ("quotedblleft", '“'),
    ("quotedblright", '”'),
    ("quoteleft", '‘'),
    ("quoteright", '’'),
    ("quotesinglbase", '‚'),
    ("quotesingle", '\''),
    ("registered", '®'),
    ("ring", '˚'),
    ("scaron", 'š'),
    ("section", '§'),
    ("semicolon", ';'),
    ("seven", '7'),
    ("six", '6'),
    ("slash", '/'),
    ("space", ' '),
    ("sterling", '£'),
    ("thorn", 'þ'),
    ("three", '3'),
    ("threequarters", '¾'),
    ("threesuperior", '³'),
    ("tilde", '˜'),
    ("trademark", '™'),
    ("two", '2'),
    ("twosuperior", '²'),
    ("uacute", 'ú'),
    ("ucircumflex", 'û'),
    ("udieresis", 'ü'),
    ("ugrave", 'ù'),
    ("underscore", '_'),
    ("yacute", 'ý'),
    ("ydieresis", 'ÿ'),
    ("yen", '¥'),
    ("zcaron", 'ž'),
    ("zero", '0'),
];

// =============================================================================
// Encoding tables
// =============================================================================

/// Printable ASCII (0x20–0x7E) mapped to itself, plus tab/LF/CR.
const fn ascii_base() -> [Option<char>; 256] {
    let mut t = [None; 256];
    t[0x09] = Some('\t');
    t[0x0A] = Some('\n');
    t[0x0D] = Some('\r');
    let mut c = 0x20;
    while c <= 0x7E {
        t[c] = Some(c as u8 as char);
        c += 1;
    }
    t
}

/// Fill codes `from..=0xFF` with the identically numbered Latin-1 characters.
const fn fill_latin1(mut t: [Option<char>; 256], from: usize) -> [Option<char>; 256] {
    let mut c = from;
    while c <= 0xFF {
        t[c] = char::from_u32(c as u32);
        c += 1;
    }
    t
}

/// StandardEncoding. ASCII with typographic quotes at 0x27/0x60 and the
/// Adobe symbol set in the high half; much of the high range is undefined.
static STANDARD_TABLE: [Option<char>; 256] = {
    let mut t = ascii_base();
    t[0x27] = Some('’');
    t[0x60] = Some('‘');
    t[0xA1] = Some('¡');
    t[0xA2] = Some('¢');
    t[0xA3] = Some('£');
    t[0xA4] = Some('⁄');
    t[0xA5] = Some('¥');
    t[0xA6] = Some('ƒ');
    t[0xA7] = Some('§');
    t[0xA8] = Some('¤');
    t[0xA9] = Some('\'');
    t[0xAA] = Some('“');
    t[0xAB] = Some('«');
    t[0xAC] = Some('‹');
    t[0xAD] = Some('›');
    t[0xAE] = Some('ﬁ');
    t[0xAF] = Some('ﬂ');
    t[0xB1] = Some('–');
    t[0xB2] = Some('†');
    t[0xB3] = Some('‡');
    t[0xB4] = Some('·');
    t[0xB6] = Some('¶');
    t[0xB7] = Some('•');
    t[0xB8] = Some('‚');
    t[0xB9] = Some('„');
    t[0xBA] = Some('”');
    t[0xBB] = Some('»');
    t[0xBC] = Some('…');
    t[0xBD] = Some('‰');
    t[0xBF] = Some('¿');
    t[0xC1] = Some('`');
    t[0xC2] = Some('´');
    t[0xC3] = Some('ˆ');
    t[0xC4] = Some('˜');
    t[0xC5] = Some('¯');
    t[0xC6] = Some('˘');
    t[0xC7] = Some('˙');
    t[0xC8] = Some('¨');
    t[0xCA] = Some('˚');
    t[0xCB] = Some('¸');
    t[0xCD] = Some('˝');
    t[0xCE] = Some('˛');
    t[0xCF] = Some('ˇ');
    t[0xD0] = Some('—');
    t[0xE1] = Some('Æ');
    t[0xE3] = Some('ª');
    t[0xE8] = Some('Ł');
    t[0xE9] = Some('Ø');
    t[0xEA] = Some('Œ');
    t[0xEB] = Some('º');
    t[0xF1] = Some('æ');
    t[0xF5] = Some('ı');
    t[0xF8] = Some('ł');
    t[0xF9] = Some('ø');
    t[0xFA] = Some('œ');
    t[0xFB] = Some('ß');
    t
};

/// WinAnsiEncoding. ASCII plus Latin-1 from 0xA0 up, with the Windows-1252
/// punctuation block in 0x80–0x9F. Codes 0x81, 0x8D, 0x8F, 0x90 and 0x9D
/// are undefined.
static WIN_ANSI_TABLE: [Option<char>; 256] = {
    let mut t = fill_latin1(ascii_base(), 0xA0);
    t[0x80] = Some('€');
    t[0x82] = Some('‚');
    t[0x83] = Some('ƒ');
    t[0x84] = Some('„');
    t[0x85] = Some('…');
    t[0x86] = Some('†');
    t[0x87] = Some('‡');
    t[0x88] = Some('ˆ');
    t[0x89] = Some('‰');
    t[0x8A] = Some('Š');
    t[0x8B] = Some('‹');
    t[0x8C] = Some('Œ');
    t[0x8E] = Some('Ž');
    t[0x91] = Some('‘');
    t[0x92] = Some('’');
    t[0x93] = Some('“');
    t[0x94] = Some('”');
    t[0x95] = Some('•');
    t[0x96] = Some('–');
    t[0x97] = Some('—');
    t[0x98] = Some('˜');
    t[0x99] = Some('™');
    t[0x9A] = Some('š');
    t[0x9B] = Some('›');
    t[0x9C] = Some('œ');
    t[0x9E] = Some('ž');
    t[0x9F] = Some('Ÿ');
    t
};

/// MacRomanEncoding. ASCII low half, Mac OS Roman high half.
static MAC_ROMAN_TABLE: [Option<char>; 256] = {
    let mut t = ascii_base();
    let high: [char; 128] = [
        // 0x80
        'Ä', 'Å', 'Ç', 'É', 'Ñ', 'Ö', 'Ü', 'á', 'à', 'â', 'ä', 'ã', 'å', 'ç', 'é', 'è',
        // 0x90
        'ê', 'ë', 'í', 'ì', 'î', 'ï', 'ñ', 'ó', 'ò', 'ô', 'ö', 'õ', 'ú', 'ù', 'û', 'ü',
        // 0xA0
        '†', '°', '¢', '£', '§', '•', '¶', 'ß', '®', '©', '™', '´', '¨', '≠', 'Æ', 'Ø',
        // 0xB0
        '∞', '±', '≤', '≥', '¥', 'µ', '∂', '∑', '∏', 'π', '∫', 'ª', 'º', 'Ω', 'æ', 'ø',
        // 0xC0
        '¿', '¡', '¬', '√', 'ƒ', '≈', '∆', '«', '»', '…', '\u{00A0}', 'À', 'Ã', 'Õ', 'Œ', 'œ',
        // 0xD0
        '–', '—', '“', '”', '‘', '’', '÷', '◊', 'ÿ', 'Ÿ', '⁄', '¤', '‹', '›', 'ﬁ', 'ﬂ',
        // 0xE0
        '‡', '·', '‚', '„', '‰', 'Â', 'Ê', 'Á', 'Ë', 'È', 'Í', 'Î', 'Ï', 'Ì', 'Ó', 'Ô',
        // 0xF0
        '\u{F8FF}', 'Ò', 'Ú', 'Û', 'Ù', 'ı', 'ˆ', '˜', '¯', '˘', '˙', '˚', '¸', '˝', '˛', 'ˇ',
    ];
    let mut c = 0;
    while c < 128 {
        t[0x80 + c] = Some(high[c]);
        c += 1;
    }
    t
};

/// PDFDocEncoding. ASCII plus Latin-1 from 0xA1 up, spacing accents in
/// 0x18–0x1F, the typographic block in 0x80–0x9E, and the euro at 0xA0.
/// Codes 0x7F, 0x9F and 0xAD are undefined.
static PDF_DOC_TABLE: [Option<char>; 256] = {
    let mut t = fill_latin1(ascii_base(), 0xA1);
    t[0x18] = Some('˘');
    t[0x19] = Some('ˇ');
    t[0x1A] = Some('ˆ');
    t[0x1B] = Some('˙');
    t[0x1C] = Some('˝');
    t[0x1D] = Some('˛');
    t[0x1E] = Some('˚');
    t[0x1F] = Some('˜');
    t[0x80] = Some('•');
    t[0x81] = Some('†');
    t[0x82] = Some('‡');
    t[0x83] = Some('…');
    t[0x84] = Some('—');
    t[0x85] = Some('–');
    t[0x86] = Some('ƒ');
    t[0x87] = Some('⁄');
    t[0x88] = Some('‹');
    t[0x89] = Some('›');
    t[0x8A] = Some('−');
    t[0x8B] = Some('‰');
    t[0x8C] = Some('„');
    t[0x8D] = Some('“');
    t[0x8E] = Some('”');
    t[0x8F] = Some('‘');
    t[0x90] = Some('’');
    t[0x91] = Some('‚');
    t[0x92] = Some('™');
    t[0x93] = Some('ﬁ');
    t[0x94] = Some('ﬂ');
    t[0x95] = Some('Ł');
    t[0x96] = Some('Œ');
    t[0x97] = Some('Š');
    t[0x98] = Some('Ÿ');
    t[0x99] = Some('Ž');
    t[0x9A] = Some('ı');
    t[0x9B] = Some('ł');
    t[0x9C] = Some('œ');
    t[0x9D] = Some('š');
    t[0x9E] = Some('ž');
    t[0xA0] = Some('€');
    t[0xAD] = None;
    t
};
