//! Page-tree walking, resource scoping, and the metadata entry point.
//!
//! The [`Walker`] owns the resource stack that models Pages → Page → Form
//! inheritance. Every push is paired with a pop on all exit paths, including
//! interpreter errors, so the stack is empty whenever [`Walker::document`]
//! returns. After a fatal error, pops still happen but no further callbacks
//! fire.

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, StringFormat};
use pdfwalk_core::decode_text_string;

use crate::error::WalkError;
use crate::font::{Font, build_font_table};
use crate::interpreter;
use crate::receiver::Receiver;
use crate::resolver::{resolve_ref, resolve_references};

/// Walk a parsed document end to end: metadata callbacks first, then the
/// page tree.
///
/// Resolves the catalog from the trailer's `Root` and the Info dictionary
/// from `Info`, then runs [`Walker::metadata`] followed by
/// [`Walker::document`].
///
/// # Errors
///
/// [`WalkError::MalformedPdf`] when the catalog is missing or not a
/// dictionary, or when a content stream ends prematurely;
/// [`WalkError::Stream`] when a content stream's filters fail to decode.
pub fn walk(doc: &Document, receiver: &mut dyn Receiver) -> Result<(), WalkError> {
    let root = catalog(doc)?;
    let info = doc
        .trailer
        .get(b"Info")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok());

    let mut walker = Walker::new(doc);
    walker.metadata(receiver, root, info);
    walker.document(receiver, root)
}

/// Resolve the document catalog from the trailer.
fn catalog(doc: &Document) -> Result<&Dictionary, WalkError> {
    doc.trailer
        .get(b"Root")
        .ok()
        .map(|o| resolve_ref(doc, o))
        .and_then(|o| o.as_dict().ok())
        .ok_or_else(|| {
            WalkError::MalformedPdf("document catalog is missing or not a dictionary".to_string())
        })
}

/// Walks one document's page tree, firing [`Receiver`] callbacks.
///
/// A walker holds per-walk mutable state (the resource stack) and must not
/// be shared across concurrent walks; use one walker per document.
pub struct Walker<'a> {
    doc: &'a Document,
    resources: Vec<Dictionary>,
}

impl<'a> Walker<'a> {
    /// Create a walker over a parsed document.
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            resources: Vec::new(),
        }
    }

    /// Fire the metadata callbacks: `pdf_version`, `metadata` (decoded Info
    /// dictionary), `xml_metadata`, and `page_count`.
    ///
    /// Missing or malformed optional fields are skipped silently; this
    /// operation cannot fail.
    pub fn metadata(
        &self,
        receiver: &mut dyn Receiver,
        root: &Dictionary,
        info: Option<&Dictionary>,
    ) {
        let doc = self.doc;
        receiver.pdf_version(&doc.version);

        if let Some(info) = info {
            receiver.metadata(&decode_string_values(info));
        }

        if let Some(data) = root
            .get(b"Metadata")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_stream().ok())
            .and_then(|s| decode_stream_payload(s).ok())
        {
            receiver.xml_metadata(&data);
        }

        if let Some(count) = root
            .get(b"Pages")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
            .and_then(|pages| pages.get(b"Count").ok())
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_i64().ok())
        {
            receiver.page_count(count);
        }
    }

    /// Walk the whole page tree under the catalog's `Pages` entry.
    ///
    /// Fires `begin_document`, recurses through containers and pages, then
    /// fires `end_document`. The resource stack is empty on return, on both
    /// the success and the error path.
    ///
    /// # Errors
    ///
    /// Propagates interpreter and stream-decoding failures; no callbacks
    /// fire after the error.
    pub fn document(
        &mut self,
        receiver: &mut dyn Receiver,
        root: &Dictionary,
    ) -> Result<(), WalkError> {
        receiver.begin_document(root);

        let doc = self.doc;
        let result = match root
            .get(b"Pages")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
        {
            Some(pages) => self.walk_pages(receiver, pages),
            None => Ok(()),
        };
        debug_assert!(self.resources.is_empty(), "resource stack must unwind");
        result?;

        receiver.end_document();
        Ok(())
    }

    /// Recurse into one page-tree node, branching on its `Type`.
    fn walk_pages(
        &mut self,
        receiver: &mut dyn Receiver,
        node: &Dictionary,
    ) -> Result<(), WalkError> {
        let node_type = node.get(b"Type").ok().and_then(|o| o.as_name().ok().and_then(|b| std::str::from_utf8(b).ok()));
        match node_type {
            Some("Pages") => {
                receiver.begin_page_container(node);
                let pushed = self.push_scope_resources(node);
                let result = self.walk_kids(receiver, node);
                if pushed {
                    self.resources.pop();
                }
                result?;
                receiver.end_page_container();
            }
            Some("Page") => {
                receiver.begin_page(node);
                let pushed = self.push_scope_resources(node);
                let result = self.visit_page(receiver, node);
                if pushed {
                    self.resources.pop();
                }
                result?;
                receiver.end_page();
            }
            // Unknown node types are tolerated silently
            _ => {}
        }
        Ok(())
    }

    fn walk_kids(
        &mut self,
        receiver: &mut dyn Receiver,
        node: &Dictionary,
    ) -> Result<(), WalkError> {
        let doc = self.doc;
        let kids = node
            .get(b"Kids")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_array().ok());
        let Some(kids) = kids else {
            return Ok(());
        };

        for kid in kids {
            if let Ok(kid) = resolve_ref(doc, kid).as_dict() {
                self.walk_pages(receiver, kid)?;
            }
        }
        Ok(())
    }

    /// Leaf-page body: resource callbacks, font table, content streams.
    fn visit_page(
        &mut self,
        receiver: &mut dyn Receiver,
        page: &Dictionary,
    ) -> Result<(), WalkError> {
        let merged = self.current_resources();
        self.walk_resources(receiver, &merged);
        let fonts = build_font_table(self.doc, &merged);

        for bytes in self.content_streams(page)? {
            interpreter::run(self, receiver, &bytes, &fonts)?;
        }
        Ok(())
    }

    /// Normalize `Contents` to an ordered run of decoded payloads. A page
    /// may carry a single stream, an array of streams, or nothing.
    fn content_streams(&self, page: &Dictionary) -> Result<Vec<Vec<u8>>, WalkError> {
        let doc = self.doc;
        let Ok(contents) = page.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match resolve_ref(doc, contents) {
            Object::Stream(stream) => Ok(vec![decode_stream_payload(stream)?]),
            Object::Array(items) => {
                let mut streams = Vec::new();
                for item in items {
                    if let Ok(stream) = resolve_ref(doc, item).as_stream() {
                        streams.push(decode_stream_payload(stream)?);
                    }
                }
                Ok(streams)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Fire the per-kind resource callbacks for one resource dictionary.
    fn walk_resources(&self, receiver: &mut dyn Receiver, res: &Dictionary) {
        let resolved = resolve_references(self.doc, &Object::Dictionary(res.clone()));
        let Ok(res) = resolved.as_dict() else {
            return;
        };

        if let Ok(list) = res.get(b"ProcSet") {
            receiver.resource_procset(list);
        }
        if let Ok(Object::Dictionary(entries)) = res.get(b"XObject") {
            for (name, value) in entries.iter() {
                receiver.resource_xobject(&String::from_utf8_lossy(name), value);
            }
        }
        if let Ok(Object::Dictionary(entries)) = res.get(b"ExtGState") {
            for (name, value) in entries.iter() {
                receiver.resource_extgstate(&String::from_utf8_lossy(name), value);
            }
        }
        if let Ok(Object::Dictionary(entries)) = res.get(b"ColorSpace") {
            for (name, value) in entries.iter() {
                receiver.resource_colorspace(&String::from_utf8_lossy(name), value);
            }
        }
        if let Ok(Object::Dictionary(entries)) = res.get(b"Pattern") {
            for (name, value) in entries.iter() {
                receiver.resource_pattern(&String::from_utf8_lossy(name), value);
            }
        }
        if let Ok(Object::Dictionary(entries)) = res.get(b"Font") {
            let fonts = build_font_table(self.doc, res);
            for (label, _) in entries.iter() {
                let label = String::from_utf8_lossy(label);
                if let Some(font) = fonts.get(label.as_ref()) {
                    receiver.resource_font(&label, font);
                }
            }
        }
    }

    /// Interpret the Form XObject named `label` in the current resources.
    ///
    /// Invoked by the interpreter for `Do`. Anything that is not a stream
    /// with `Subtype = Form` is ignored. The `Subtype` is read from the
    /// stream dictionary without dereferencing; an indirect `Subtype`
    /// fails the comparison and skips the form.
    pub(crate) fn walk_xobject_form(
        &mut self,
        receiver: &mut dyn Receiver,
        label: &str,
    ) -> Result<(), WalkError> {
        let doc = self.doc;
        let current = self.current_resources();

        let stream = current
            .get(b"XObject")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
            .and_then(|xobjects| xobjects.get(label.as_bytes()).ok())
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_stream().ok());
        let Some(stream) = stream else {
            return Ok(());
        };

        let subtype = stream.dict.get(b"Subtype").ok().and_then(|o| o.as_name().ok().and_then(|b| std::str::from_utf8(b).ok()));
        if subtype != Some("Form") {
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(label, "walking form xobject");

        receiver.begin_form_xobject();

        let mut fonts = HashMap::new();
        let mut pushed = false;
        if let Some(own) = stream
            .dict
            .get(b"Resources")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
        {
            self.resources.push(own.clone());
            pushed = true;
            self.walk_resources(receiver, own);
            fonts = build_font_table(doc, own);
        }

        let result = self.interpret_form(receiver, stream, &fonts);
        if pushed {
            self.resources.pop();
        }
        result?;

        receiver.end_form_xobject();
        Ok(())
    }

    fn interpret_form(
        &mut self,
        receiver: &mut dyn Receiver,
        stream: &lopdf::Stream,
        fonts: &HashMap<String, Font>,
    ) -> Result<(), WalkError> {
        let bytes = decode_stream_payload(stream)?;
        interpreter::run(self, receiver, &bytes, fonts)
    }

    /// Shallow merge of the resource stack, later entries winning per key.
    fn current_resources(&self) -> Dictionary {
        let mut merged = Dictionary::new();
        for res in &self.resources {
            for (key, value) in res.iter() {
                merged.set(key.clone(), value.clone());
            }
        }
        merged
    }

    /// Push a node's own `Resources` if it has any; reports whether a pop
    /// is owed.
    fn push_scope_resources(&mut self, node: &Dictionary) -> bool {
        let doc = self.doc;
        if let Some(res) = node
            .get(b"Resources")
            .ok()
            .map(|o| resolve_ref(doc, o))
            .and_then(|o| o.as_dict().ok())
        {
            self.resources.push(res.clone());
            return true;
        }
        false
    }
}

/// Decode a stream's payload, running its filter chain if it has one.
pub(crate) fn decode_stream_payload(stream: &lopdf::Stream) -> Result<Vec<u8>, WalkError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| WalkError::Stream(format!("stream decompression failed: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

/// Decode the text-string values of a dictionary, recursively.
fn decode_string_values(dict: &Dictionary) -> Dictionary {
    let mut out = Dictionary::new();
    for (key, value) in dict.iter() {
        out.set(key.clone(), decode_strings(value));
    }
    out
}

fn decode_strings(obj: &Object) -> Object {
    match obj {
        Object::String(bytes, _) => Object::String(
            decode_text_string(bytes).into_bytes(),
            StringFormat::Literal,
        ),
        Object::Array(items) => Object::Array(items.iter().map(decode_strings).collect()),
        Object::Dictionary(dict) => Object::Dictionary(decode_string_values(dict)),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Operand;
    use lopdf::dictionary;

    #[derive(Default)]
    struct Events {
        names: Vec<String>,
    }

    impl Receiver for Events {
        fn begin_document(&mut self, _root: &Dictionary) {
            self.names.push("begin_document".into());
        }
        fn end_document(&mut self) {
            self.names.push("end_document".into());
        }
        fn begin_page_container(&mut self, _node: &Dictionary) {
            self.names.push("begin_page_container".into());
        }
        fn end_page_container(&mut self) {
            self.names.push("end_page_container".into());
        }
        fn begin_page(&mut self, _page: &Dictionary) {
            self.names.push("begin_page".into());
        }
        fn end_page(&mut self) {
            self.names.push("end_page".into());
        }
        fn show_text(&mut self, operands: &[Operand]) {
            if let Some(Operand::Text(s)) = operands.first() {
                self.names.push(format!("show_text({s})"));
            }
        }
    }

    /// Catalog + Pages + one Page with the given content and resources.
    fn one_page_doc(content: &[u8], resources: Option<Dictionary>) -> (Document, Dictionary) {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            content.to_vec(),
        )));

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        };
        if let Some(res) = resources {
            page.set("Resources", Object::Dictionary(res));
        }
        let page_id = doc.add_object(Object::Dictionary(page));

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let root = catalog(&doc).unwrap().clone();
        (doc, root)
    }

    // --- Resource stack balance ---

    #[test]
    fn resource_stack_empty_after_clean_walk() {
        let (doc, root) = one_page_doc(
            b"BT ET",
            Some(dictionary! { "ProcSet" => vec![Object::Name(b"PDF".to_vec())] }),
        );
        let mut walker = Walker::new(&doc);
        walker.document(&mut Events::default(), &root).unwrap();
        assert!(walker.resources.is_empty());
    }

    #[test]
    fn resource_stack_empty_after_interpreter_error() {
        let (doc, root) = one_page_doc(
            b"BT (oh no",
            Some(dictionary! { "ProcSet" => vec![Object::Name(b"PDF".to_vec())] }),
        );
        let mut walker = Walker::new(&doc);
        let mut events = Events::default();
        let err = walker.document(&mut events, &root).unwrap_err();
        assert!(matches!(err, WalkError::MalformedPdf(_)));
        assert!(walker.resources.is_empty());
        // No callbacks after the error: neither end_page nor end_document
        assert!(!events.names.iter().any(|n| n == "end_page"));
        assert!(!events.names.iter().any(|n| n == "end_document"));
    }

    // --- current_resources merging ---

    #[test]
    fn later_resource_entries_win() {
        let doc = Document::with_version("1.4");
        let mut walker = Walker::new(&doc);
        walker.resources.push(dictionary! {
            "A" => Object::Integer(1),
            "B" => Object::Integer(1),
        });
        walker.resources.push(dictionary! { "B" => Object::Integer(2) });

        let merged = walker.current_resources();
        assert_eq!(merged.get(b"A").unwrap(), &Object::Integer(1));
        assert_eq!(merged.get(b"B").unwrap(), &Object::Integer(2));
    }

    #[test]
    fn inherited_resources_reach_the_page() {
        // Font lives on the Pages container; the page has none of its own.
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(Object::Dictionary(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        }));
        let content_id = doc.add_object(Object::Stream(lopdf::Stream::new(
            dictionary! {},
            b"BT /F1 12 Tf (caf\xe9) Tj ET".to_vec(),
        )));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::from(page_id)],
                "Count" => 1i64,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let root = catalog(&doc).unwrap().clone();
        let mut events = Events::default();
        Walker::new(&doc).document(&mut events, &root).unwrap();
        assert!(events.names.contains(&"show_text(café)".to_string()));
    }

    // --- Metadata string decoding ---

    #[test]
    fn decode_strings_handles_bom_and_pdfdoc() {
        let info = dictionary! {
            "Title" => Object::String(b"\xfe\xff\x00\x41\x00\x42".to_vec(), StringFormat::Literal),
            "Author" => Object::String(b"\x41\x42".to_vec(), StringFormat::Hexadecimal),
            "Pages" => Object::Integer(2),
        };
        let decoded = decode_string_values(&info);
        assert_eq!(
            decoded.get(b"Title").unwrap(),
            &Object::String(b"AB".to_vec(), StringFormat::Literal)
        );
        assert_eq!(
            decoded.get(b"Author").unwrap(),
            &Object::String(b"AB".to_vec(), StringFormat::Literal)
        );
        assert_eq!(decoded.get(b"Pages").unwrap(), &Object::Integer(2));
    }

    #[test]
    fn decode_strings_recurses_containers() {
        let info = dictionary! {
            "Inner" => dictionary! {
                "Names" => vec![Object::String(b"ACME\x92".to_vec(), StringFormat::Literal)],
            },
        };
        let decoded = decode_string_values(&info);
        let inner = decoded.get(b"Inner").unwrap().as_dict().unwrap();
        let names = inner.get(b"Names").unwrap().as_array().unwrap();
        assert_eq!(
            names[0],
            Object::String("ACME™".as_bytes().to_vec(), StringFormat::Literal)
        );
    }

    // --- Catalog resolution ---

    #[test]
    fn missing_catalog_is_malformed() {
        let doc = Document::with_version("1.4");
        let mut events = Events::default();
        let err = walk(&doc, &mut events).unwrap_err();
        assert!(matches!(err, WalkError::MalformedPdf(_)));
        assert!(events.names.is_empty());
    }
}
