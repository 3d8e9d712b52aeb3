//! Backend-independent building blocks for pdfwalk-rs.
//!
//! This crate provides the standard PDF single-byte encodings and the
//! text-string decoding rules used when walking a document. It has no
//! required external dependencies — all functionality is pure Rust.
//!
//! # Modules
//!
//! - [`encoding`] — Byte encodings: [`BaseEncoding`], [`FontEncoding`],
//!   glyph-name resolution
//! - [`strings`] — Text-string decoding: UTF-16BE BOM detection with
//!   PDFDocEncoding fallback

#![deny(missing_docs)]

/// Standard PDF byte encodings, Differences overlays, and glyph names.
pub mod encoding;
/// Text-string decoding for document metadata.
pub mod strings;

pub use encoding::{BaseEncoding, FontEncoding, glyph_name_to_char};
pub use strings::{decode_text_string, decode_utf16be};
