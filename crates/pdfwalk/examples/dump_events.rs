//! Print the callback event stream of a PDF document.
//!
//! Usage: `cargo run --example dump_events -- <path-to-pdf>`

use lopdf::Dictionary;
use pdfwalk::{Operand, Receiver, walk};

struct Printer {
    depth: usize,
}

impl Printer {
    fn line(&self, text: &str) {
        println!("{:indent$}{text}", "", indent = self.depth * 2);
    }
}

impl Receiver for Printer {
    fn pdf_version(&mut self, version: &str) {
        self.line(&format!("pdf_version {version}"));
    }
    fn page_count(&mut self, count: i64) {
        self.line(&format!("page_count {count}"));
    }
    fn begin_page(&mut self, _page: &Dictionary) {
        self.line("begin_page");
        self.depth += 1;
    }
    fn end_page(&mut self) {
        self.depth -= 1;
        self.line("end_page");
    }
    fn begin_form_xobject(&mut self) {
        self.line("begin_form_xobject");
        self.depth += 1;
    }
    fn end_form_xobject(&mut self) {
        self.depth -= 1;
        self.line("end_form_xobject");
    }
    fn set_text_font_and_size(&mut self, operands: &[Operand]) {
        self.line(&format!("Tf {operands:?}"));
    }
    fn show_text(&mut self, operands: &[Operand]) {
        if let Some(Operand::Text(text)) = operands.first() {
            self.line(&format!("show_text {text:?}"));
        }
    }
    fn invoke_xobject(&mut self, operands: &[Operand]) {
        self.line(&format!("Do {operands:?}"));
    }
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: dump_events <path-to-pdf>");
        std::process::exit(1);
    });

    let doc = lopdf::Document::load(&path).unwrap_or_else(|e| {
        eprintln!("Error opening PDF: {e}");
        std::process::exit(1);
    });

    let mut printer = Printer { depth: 0 };
    if let Err(e) = walk(&doc, &mut printer) {
        eprintln!("Walk failed: {e}");
        std::process::exit(1);
    }
}
