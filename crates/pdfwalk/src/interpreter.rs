//! The content-stream interpreter.
//!
//! Drives the tokenizer over one decoded content stream, accumulates the
//! operand stack, applies per-operator postprocessing (font selection, text
//! decoding, inline-image splicing), and dispatches each operator's
//! callback. Operands are consumed atomically: the full stack goes to the
//! callback and is cleared, or a terminal error is raised with no further
//! dispatch.

use std::collections::HashMap;

use crate::error::WalkError;
use crate::font::Font;
use crate::operators::Callback;
use crate::receiver::{Receiver, dispatch};
use crate::tokenizer::{Operand, Token, Tokenizer, is_whitespace};
use crate::walker::Walker;

/// Canonical message for a content stream that ends mid-token.
const EOF_MESSAGE: &str = "End Of File while processing a content stream";

/// Interpret one content stream against the given font table.
///
/// `Do` recurses through the walker into Form XObjects, which run their own
/// interpreter pass with their own font table.
pub(crate) fn run(
    walker: &mut Walker<'_>,
    receiver: &mut dyn Receiver,
    bytes: &[u8],
    fonts: &HashMap<String, Font>,
) -> Result<(), WalkError> {
    let mut tokens = Tokenizer::new(bytes);
    let mut operands: Vec<Operand> = Vec::new();
    let mut current_font: Option<String> = None;

    loop {
        let token = match tokens.next_token() {
            Ok(Some(token)) => token,
            Ok(None) => return Ok(()),
            Err(WalkError::UnexpectedEof) => {
                return Err(WalkError::MalformedPdf(EOF_MESSAGE.to_string()));
            }
            Err(err) => return Err(err),
        };

        let callback = match token {
            Token::Operand(operand) => {
                operands.push(operand);
                continue;
            }
            Token::Operator(callback) => callback,
        };

        match callback {
            Callback::SetTextFontAndSize => {
                if let Some(Operand::Name(label)) = operands.first() {
                    current_font = Some(label.clone());
                }
            }
            Callback::BeginInlineImageData => {
                // Tokenization is suspended here: everything up to the EI
                // sentinel is raw image data, not PDF tokens.
                let entries = pair_image_dictionary(std::mem::take(&mut operands));
                let data = match tokens.read_until(b"EI") {
                    Ok(data) => trim_image_separators(data),
                    Err(WalkError::UnexpectedEof) => {
                        return Err(WalkError::MalformedPdf(EOF_MESSAGE.to_string()));
                    }
                    Err(err) => return Err(err),
                };
                operands.push(Operand::Dictionary(entries));
                operands.push(Operand::LiteralString(data));
            }
            _ => {}
        }

        if callback.shows_text() {
            if let Some(font) = current_font.as_deref().and_then(|label| fonts.get(label)) {
                operands = operands
                    .into_iter()
                    .map(|operand| font.decode_operand(operand))
                    .collect();
            }
        }

        dispatch(receiver, callback, &operands);

        if callback == Callback::InvokeXobject {
            let label = match operands.first() {
                Some(Operand::Name(name)) => Some(name.clone()),
                _ => None,
            };
            operands.clear();
            if let Some(label) = label {
                walker.walk_xobject_form(receiver, &label)?;
            }
        } else {
            operands.clear();
        }
    }
}

/// Collapse `[name, value, name, value, …]` operands into inline-image
/// dictionary entries. Pairs without a name key are dropped.
fn pair_image_dictionary(operands: Vec<Operand>) -> Vec<(String, Operand)> {
    let mut entries = Vec::new();
    let mut iter = operands.into_iter();
    while let Some(key) = iter.next() {
        let Some(value) = iter.next() else {
            break;
        };
        if let Operand::Name(name) = key {
            entries.push((name, value));
        }
    }
    entries
}

/// Strip the single separator byte after `ID` and before `EI` from a raw
/// inline-image span.
fn trim_image_separators(mut data: Vec<u8>) -> Vec<u8> {
    if data.first().copied().is_some_and(is_whitespace) {
        data.remove(0);
    }
    if data.last().copied().is_some_and(is_whitespace) {
        data.pop();
    }
    data
}
