//! Text-string decoding for document metadata.
//!
//! PDF text strings outside content streams are either UTF-16BE (signalled
//! by a leading byte order mark) or PDFDocEncoding. Both forms decode to
//! UTF-8 here.

use crate::encoding::BaseEncoding;

/// Decode a PDF text string to UTF-8.
///
/// A leading `0xFE 0xFF` byte order mark selects UTF-16BE for the remainder;
/// anything else is decoded as PDFDocEncoding.
pub fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => decode_utf16be(rest),
        _ => BaseEncoding::PdfDoc.decode_bytes(bytes),
    }
}

/// Decode big-endian UTF-16 bytes, lossily.
///
/// Unpaired surrogates become U+FFFD; a dangling trailing byte is dropped.
pub fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
