//! ToUnicode CMap parsing.
//!
//! A ToUnicode CMap maps character codes to Unicode strings. This parser
//! extracts `beginbfchar`/`endbfchar` and `beginbfrange`/`endbfrange`
//! sections; destination values are UTF-16BE, so ligatures (multi-character
//! targets) and surrogate pairs both work.

use std::collections::HashMap;

use crate::error::WalkError;
use pdfwalk_core::decode_utf16be;

/// A parsed ToUnicode CMap.
#[derive(Debug, Clone, Default)]
pub struct CMap {
    mappings: HashMap<u32, String>,
}

impl CMap {
    /// Parse a ToUnicode CMap from its decoded stream bytes.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::MalformedPdf`] when a mapping line carries
    /// unparseable hex. Callers building fonts swallow this and keep the
    /// font without a ToUnicode map.
    pub fn parse(data: &[u8]) -> Result<Self, WalkError> {
        let text = String::from_utf8_lossy(data);
        let mut mappings = HashMap::new();

        for section in sections(&text, "beginbfchar", "endbfchar") {
            parse_bfchar(section, &mut mappings)?;
        }
        for section in sections(&text, "beginbfrange", "endbfrange") {
            parse_bfrange(section, &mut mappings)?;
        }

        Ok(CMap { mappings })
    }

    /// Look up the Unicode string for a character code.
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(String::as_str)
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// True when the CMap carries no mappings.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Iterate the text spans between each `begin`/`end` keyword pair.
fn sections<'t>(
    text: &'t str,
    begin: &'static str,
    end: &'static str,
) -> impl Iterator<Item = &'t str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let start = rest.find(begin)? + begin.len();
        let len = rest[start..].find(end)?;
        let section = &rest[start..start + len];
        rest = &rest[start + len + end.len()..];
        Some(section)
    })
}

/// Parse `<srcCode> <dstUnicode>` lines.
fn parse_bfchar(section: &str, mappings: &mut HashMap<u32, String>) -> Result<(), WalkError> {
    for line in section.lines() {
        let tokens = hex_tokens(line);
        if let [src, dst, ..] = tokens.as_slice() {
            mappings.insert(hex_code(src)?, utf16be_hex(dst)?);
        }
    }
    Ok(())
}

/// Parse `<srcLow> <srcHigh> <dstStart>` lines, or the array form
/// `<srcLow> <srcHigh> [<dst1> <dst2> …]` with one target per code.
fn parse_bfrange(section: &str, mappings: &mut HashMap<u32, String>) -> Result<(), WalkError> {
    for line in section.lines() {
        let line = line.trim();
        if let Some(bracket) = line.find('[') {
            let src = hex_tokens(&line[..bracket]);
            let [low, high, ..] = src.as_slice() else {
                continue;
            };
            let low = hex_code(low)?;
            let high = hex_code(high)?;
            let body = &line[bracket + 1..line.rfind(']').unwrap_or(line.len())];
            for (i, dst) in hex_tokens(body).iter().enumerate() {
                let code = low + i as u32;
                if code > high {
                    break;
                }
                mappings.insert(code, utf16be_hex(dst)?);
            }
        } else {
            let tokens = hex_tokens(line);
            let [low, high, dst, ..] = tokens.as_slice() else {
                continue;
            };
            let low = hex_code(low)?;
            let high = hex_code(high)?;
            let dst_start = hex_code(dst)?;
            for offset in 0..=high.saturating_sub(low) {
                if let Some(ch) = char::from_u32(dst_start + offset) {
                    mappings.insert(low + offset, ch.to_string());
                }
            }
        }
    }
    Ok(())
}

/// Extract every `<hex>` token from a line.
fn hex_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start + 1..].find('>') else {
            break;
        };
        tokens.push(&rest[start + 1..start + 1 + len]);
        rest = &rest[start + 1 + len + 1..];
    }
    tokens
}

/// Parse a hex token like `0041` as a character code.
fn hex_code(hex: &str) -> Result<u32, WalkError> {
    u32::from_str_radix(hex, 16)
        .map_err(|e| WalkError::MalformedPdf(format!("invalid CMap hex code '{hex}': {e}")))
}

/// Decode a hex token holding UTF-16BE code units into a string.
///
/// Two-digit tokens are zero-extended to one code unit; anything else must
/// split into whole 4-digit units.
fn utf16be_hex(hex: &str) -> Result<String, WalkError> {
    if hex.len() == 2 {
        let code = hex_code(hex)?;
        return Ok(char::from_u32(code).unwrap_or('\u{FFFD}').to_string());
    }
    if hex.len() % 4 != 0 {
        return Err(WalkError::MalformedPdf(format!(
            "CMap UTF-16BE value has odd length: '{hex}'"
        )));
    }

    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for unit in hex.as_bytes().chunks(4) {
        let unit = std::str::from_utf8(unit)
            .map_err(|_| WalkError::MalformedPdf("non-ASCII bytes in CMap hex".to_string()))?;
        let value = u16::from_str_radix(unit, 16).map_err(|e| {
            WalkError::MalformedPdf(format!("invalid CMap UTF-16BE unit '{unit}': {e}"))
        })?;
        bytes.extend_from_slice(&value.to_be_bytes());
    }
    Ok(decode_utf16be(&bytes))
}
