//! Event-driven PDF page-tree walker and content-stream interpreter.
//!
//! Given a parsed [`lopdf::Document`], pdfwalk walks the page tree with
//! inherited resources, tokenizes each page's content streams into operators
//! and operand stacks, decodes shown text through per-font encodings
//! (including ToUnicode CMaps), splices inline-image data, recurses into
//! Form XObjects, and dispatches every event to a [`Receiver`].
//!
//! # Key types
//!
//! - [`Receiver`] — Callback trait; implement only the events you care about
//! - [`walk`] / [`Walker`] — Entry points over a parsed document
//! - [`Operand`] — Content-stream operand values handed to callbacks
//! - [`Callback`] — The operator → callback vocabulary
//! - [`Font`] / [`CMap`] — Per-page font records and ToUnicode maps
//!
//! # Example
//!
//! ```
//! use lopdf::{Document, Object, dictionary};
//! use pdfwalk::{Operand, Receiver, walk};
//!
//! #[derive(Default)]
//! struct Outline {
//!     pages: usize,
//!     text: Vec<String>,
//! }
//!
//! impl Receiver for Outline {
//!     fn begin_page(&mut self, _page: &lopdf::Dictionary) {
//!         self.pages += 1;
//!     }
//!     fn show_text(&mut self, operands: &[Operand]) {
//!         if let Some(Operand::Text(s)) = operands.first() {
//!             self.text.push(s.clone());
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), pdfwalk::WalkError> {
//! let mut doc = Document::with_version("1.4");
//! let pages_id = doc.new_object_id();
//! let font_id = doc.add_object(dictionary! {
//!     "Type" => "Font",
//!     "Subtype" => "Type1",
//!     "BaseFont" => "Helvetica",
//!     "Encoding" => "WinAnsiEncoding",
//! });
//! let content_id = doc.add_object(Object::Stream(lopdf::Stream::new(
//!     dictionary! {},
//!     b"BT /F1 12 Tf (Hello) Tj ET".to_vec(),
//! )));
//! let page_id = doc.add_object(dictionary! {
//!     "Type" => "Page",
//!     "Parent" => pages_id,
//!     "Contents" => content_id,
//!     "Resources" => dictionary! {
//!         "Font" => dictionary! { "F1" => font_id },
//!     },
//! });
//! doc.objects.insert(
//!     pages_id,
//!     Object::Dictionary(dictionary! {
//!         "Type" => "Pages",
//!         "Kids" => vec![Object::from(page_id)],
//!         "Count" => 1i64,
//!     }),
//! );
//! let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
//! doc.trailer.set("Root", catalog_id);
//!
//! let mut outline = Outline::default();
//! walk(&doc, &mut outline)?;
//! assert_eq!(outline.pages, 1);
//! assert_eq!(outline.text, vec!["Hello"]);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

/// ToUnicode CMap parsing.
pub mod cmap;
/// Error types.
pub mod error;
/// Font records and show-text decoding.
pub mod font;
/// The operator table and callback vocabulary.
pub mod operators;
/// The receiver trait and dispatch adapter.
pub mod receiver;
/// Deep indirect-reference resolution.
pub mod resolver;
/// The content-stream tokenizer.
pub mod tokenizer;
/// The page-tree walker and metadata entry point.
pub mod walker;

mod interpreter;

pub use cmap::CMap;
pub use error::WalkError;
pub use font::{Encoding, Font, build_font_table};
pub use operators::{Callback, callback_for};
pub use pdfwalk_core;
pub use receiver::{Receiver, dispatch};
pub use resolver::resolve_references;
pub use tokenizer::{Operand, Token, Tokenizer};
pub use walker::{Walker, walk};
