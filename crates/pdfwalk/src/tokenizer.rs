//! Streaming tokenizer for PDF content streams.
//!
//! Pulls one token at a time from decoded content-stream bytes. Operator
//! classification goes through the operator table: a keyword is an operator
//! only if [`crate::operators::callback_for`] knows it; anything else is an
//! operand token. The interpreter owns the operand stack and decides when to
//! bypass tokenization ([`Tokenizer::read_until`] for inline-image data).

use crate::error::WalkError;
use crate::operators::{self, Callback};

/// A PDF content-stream operand value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Integer number (e.g. `42`, `-7`).
    Integer(i64),
    /// Real number (e.g. `3.14`, `.5`).
    Real(f64),
    /// Name object (e.g. `/F1`), stored without the leading `/`. Bare
    /// keywords outside the operator table also land here.
    Name(String),
    /// Literal string delimited by parentheses, stored as raw bytes.
    LiteralString(Vec<u8>),
    /// Hexadecimal string delimited by angle brackets, stored as decoded bytes.
    HexString(Vec<u8>),
    /// UTF-8 text produced by decoding a show-text string operand through
    /// the current font. Never produced by the tokenizer itself.
    Text(String),
    /// Array of operands (e.g. `[(A) -20 (B)]`).
    Array(Vec<Operand>),
    /// Boolean value.
    Boolean(bool),
    /// The null object.
    Null,
    /// Dictionary (`<< /Key value … >>`), keys in stream order.
    Dictionary(Vec<(String, Operand)>),
}

/// One token pulled from a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A recognized operator, resolved through the operator table.
    Operator(Callback),
    /// Anything else: a literal destined for the operand stack.
    Operand(Operand),
}

/// Returns `true` for PDF whitespace bytes.
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0C | 0x00)
}

/// Returns `true` for PDF delimiter bytes.
fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// A pull tokenizer over one content stream's bytes.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `input`, classifying operators through the operator table.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Pull the next token.
    ///
    /// Returns `Ok(None)` at clean end of stream.
    ///
    /// # Errors
    ///
    /// [`WalkError::UnexpectedEof`] when the input ends inside a token;
    /// [`WalkError::MalformedPdf`] for other syntax violations.
    pub fn next_token(&mut self) -> Result<Option<Token>, WalkError> {
        loop {
            self.skip_whitespace_and_comments();
            let Some(&b) = self.input.get(self.pos) else {
                return Ok(None);
            };

            let operand = match b {
                b'(' => Operand::LiteralString(self.literal_string()?),
                b'<' => {
                    if self.input.get(self.pos + 1) == Some(&b'<') {
                        Operand::Dictionary(self.dictionary()?)
                    } else {
                        Operand::HexString(self.hex_string()?)
                    }
                }
                b'[' => {
                    self.pos += 1;
                    Operand::Array(self.array_body()?)
                }
                b'/' => Operand::Name(self.name()),
                b'0'..=b'9' | b'+' | b'-' | b'.' => self.number()?,
                b'a'..=b'z' | b'A'..=b'Z' | b'*' | b'\'' | b'"' => {
                    let keyword = self.keyword();
                    match keyword.as_str() {
                        "true" => Operand::Boolean(true),
                        "false" => Operand::Boolean(false),
                        "null" => Operand::Null,
                        _ => match operators::callback_for(&keyword) {
                            Some(cb) => return Ok(Some(Token::Operator(cb))),
                            // Keywords outside the operator table ride the
                            // operand stack like any other literal.
                            None => Operand::Name(keyword),
                        },
                    }
                }
                b']' => {
                    return Err(WalkError::MalformedPdf(
                        "unexpected ']' outside array".to_string(),
                    ));
                }
                _ => {
                    // Stray byte: skip it
                    self.pos += 1;
                    continue;
                }
            };
            return Ok(Some(Token::Operand(operand)));
        }
    }

    /// Consume raw bytes up to (but not including) the next occurrence of
    /// `sentinel` and return them. The sentinel stays in the input and is
    /// tokenized normally afterwards.
    ///
    /// # Errors
    ///
    /// [`WalkError::UnexpectedEof`] when the sentinel never occurs.
    pub fn read_until(&mut self, sentinel: &[u8]) -> Result<Vec<u8>, WalkError> {
        let haystack = &self.input[self.pos..];
        let found = haystack
            .windows(sentinel.len())
            .position(|w| w == sentinel)
            .ok_or(WalkError::UnexpectedEof)?;
        let data = haystack[..found].to_vec();
        self.pos += found;
        Ok(data)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.input.get(self.pos) {
            if is_whitespace(b) {
                self.pos += 1;
            } else if b == b'%' {
                while self
                    .input
                    .get(self.pos)
                    .is_some_and(|&b| b != b'\n' && b != b'\r')
                {
                    self.pos += 1;
                }
            } else {
                break;
            }
        }
    }

    /// Parse a literal string `(...)` with balanced parentheses and escapes.
    /// The opening parenthesis is at the current position.
    fn literal_string(&mut self) -> Result<Vec<u8>, WalkError> {
        self.pos += 1; // '('
        let mut out = Vec::new();
        let mut depth = 1u32;

        while let Some(&b) = self.input.get(self.pos) {
            match b {
                b'(' => {
                    depth += 1;
                    out.push(b'(');
                    self.pos += 1;
                }
                b')' => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Ok(out);
                    }
                    out.push(b')');
                }
                b'\\' => {
                    self.pos += 1;
                    let &escaped = self.input.get(self.pos).ok_or(WalkError::UnexpectedEof)?;
                    self.pos += 1;
                    match escaped {
                        b'n' => out.push(b'\n'),
                        b'r' => out.push(b'\r'),
                        b't' => out.push(b'\t'),
                        b'b' => out.push(0x08),
                        b'f' => out.push(0x0C),
                        b'\r' => {
                            // line continuation; swallow an optional LF
                            if self.input.get(self.pos) == Some(&b'\n') {
                                self.pos += 1;
                            }
                        }
                        b'\n' => {}
                        b'0'..=b'7' => {
                            // octal escape, up to three digits
                            let mut val = escaped - b'0';
                            let mut digits = 1;
                            while digits < 3 {
                                match self.input.get(self.pos) {
                                    Some(&d @ b'0'..=b'7') => {
                                        val = val.wrapping_mul(8).wrapping_add(d - b'0');
                                        self.pos += 1;
                                        digits += 1;
                                    }
                                    _ => break,
                                }
                            }
                            out.push(val);
                        }
                        other => out.push(other),
                    }
                }
                _ => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }

        Err(WalkError::UnexpectedEof)
    }

    /// Parse a hex string `<...>`. The opening bracket is at the current
    /// position. An odd digit count gets a trailing zero appended.
    fn hex_string(&mut self) -> Result<Vec<u8>, WalkError> {
        self.pos += 1; // '<'
        let mut digits = Vec::new();

        loop {
            let &b = self.input.get(self.pos).ok_or(WalkError::UnexpectedEof)?;
            self.pos += 1;
            if b == b'>' {
                break;
            }
            if is_whitespace(b) {
                continue;
            }
            digits.push(hex_digit(b)?);
        }

        if digits.len() % 2 != 0 {
            digits.push(0);
        }
        Ok(digits.chunks(2).map(|d| (d[0] << 4) | d[1]).collect())
    }

    /// Parse a `/Name` token, decoding `#XX` escapes. The slash is at the
    /// current position.
    fn name(&mut self) -> String {
        self.pos += 1; // '/'
        let start = self.pos;
        while self
            .input
            .get(self.pos)
            .is_some_and(|&b| !is_whitespace(b) && !is_delimiter(b))
        {
            self.pos += 1;
        }

        let raw = &self.input[start..self.pos];
        let mut name = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'#' && i + 2 < raw.len() {
                if let (Ok(hi), Ok(lo)) = (hex_digit(raw[i + 1]), hex_digit(raw[i + 2])) {
                    name.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
            name.push(raw[i]);
            i += 1;
        }
        String::from_utf8_lossy(&name).into_owned()
    }

    /// Parse an integer or real number.
    fn number(&mut self) -> Result<Operand, WalkError> {
        let start = self.pos;
        let mut has_dot = false;

        if matches!(self.input.get(self.pos), Some(b'+') | Some(b'-')) {
            self.pos += 1;
        }
        while let Some(&b) = self.input.get(self.pos) {
            if b == b'.' {
                if has_dot {
                    break;
                }
                has_dot = true;
                self.pos += 1;
            } else if b.is_ascii_digit() {
                self.pos += 1;
            } else {
                break;
            }
        }

        let token = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| WalkError::MalformedPdf("invalid UTF-8 in number token".to_string()))?;
        if has_dot {
            token
                .parse()
                .map(Operand::Real)
                .map_err(|_| WalkError::MalformedPdf(format!("invalid real number: {token}")))
        } else {
            token
                .parse()
                .map(Operand::Integer)
                .map_err(|_| WalkError::MalformedPdf(format!("invalid integer: {token}")))
        }
    }

    /// Consume a keyword (alphanumeric plus `*`, `'`, `"`). Digits only
    /// continue a keyword, never start one; `d0` and `d1` are single tokens.
    fn keyword(&mut self) -> String {
        let start = self.pos;
        while self
            .input
            .get(self.pos)
            .is_some_and(|&b| b.is_ascii_alphanumeric() || matches!(b, b'*' | b'\'' | b'"'))
        {
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Parse array elements until `]`. The opening bracket has been consumed.
    fn array_body(&mut self) -> Result<Vec<Operand>, WalkError> {
        let mut elements = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.input.get(self.pos) {
                None => return Err(WalkError::UnexpectedEof),
                Some(b']') => {
                    self.pos += 1;
                    return Ok(elements);
                }
                Some(_) => elements.push(self.value()?),
            }
        }
    }

    /// Parse a dictionary `<< /Key value … >>`. The current bytes are `<<`.
    fn dictionary(&mut self) -> Result<Vec<(String, Operand)>, WalkError> {
        self.pos += 2; // '<<'
        let mut entries = Vec::new();

        loop {
            self.skip_whitespace_and_comments();
            match self.input.get(self.pos) {
                None => return Err(WalkError::UnexpectedEof),
                Some(b'>') => {
                    if self.input.get(self.pos + 1) == Some(&b'>') {
                        self.pos += 2;
                        return Ok(entries);
                    }
                    return Err(WalkError::MalformedPdf(
                        "stray '>' in dictionary".to_string(),
                    ));
                }
                Some(b'/') => {
                    let key = self.name();
                    self.skip_whitespace_and_comments();
                    if self.pos >= self.input.len() {
                        return Err(WalkError::UnexpectedEof);
                    }
                    let value = self.value()?;
                    entries.push((key, value));
                }
                Some(_) => {
                    return Err(WalkError::MalformedPdf(
                        "expected name key in dictionary".to_string(),
                    ));
                }
            }
        }
    }

    /// Parse one operand inside an array or dictionary. Keywords here are
    /// never operators; unknown ones decay to names.
    fn value(&mut self) -> Result<Operand, WalkError> {
        let &b = self.input.get(self.pos).ok_or(WalkError::UnexpectedEof)?;
        match b {
            b'(' => Ok(Operand::LiteralString(self.literal_string()?)),
            b'<' => {
                if self.input.get(self.pos + 1) == Some(&b'<') {
                    Ok(Operand::Dictionary(self.dictionary()?))
                } else {
                    Ok(Operand::HexString(self.hex_string()?))
                }
            }
            b'[' => {
                self.pos += 1;
                Ok(Operand::Array(self.array_body()?))
            }
            b'/' => Ok(Operand::Name(self.name())),
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.number(),
            b'a'..=b'z' | b'A'..=b'Z' => {
                let kw = self.keyword();
                Ok(match kw.as_str() {
                    "true" => Operand::Boolean(true),
                    "false" => Operand::Boolean(false),
                    "null" => Operand::Null,
                    _ => Operand::Name(kw),
                })
            }
            other => Err(WalkError::MalformedPdf(format!(
                "unexpected byte in container: 0x{other:02X}"
            ))),
        }
    }
}

/// Convert a hex digit byte to its value.
fn hex_digit(b: u8) -> Result<u8, WalkError> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        b'a'..=b'f' => Ok(b - b'a' + 10),
        b'A'..=b'F' => Ok(b - b'A' + 10),
        _ => Err(WalkError::MalformedPdf(format!(
            "invalid hex digit: {:?}",
            b as char
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &[u8]) -> Vec<Token> {
        let mut tok = Tokenizer::new(input);
        let mut out = Vec::new();
        while let Some(t) = tok.next_token().unwrap() {
            out.push(t);
        }
        out
    }

    fn operand(t: &Token) -> &Operand {
        match t {
            Token::Operand(o) => o,
            Token::Operator(cb) => panic!("expected operand, got operator {cb:?}"),
        }
    }

    // --- Numbers ---

    #[test]
    fn integers() {
        let ts = tokens(b"42 -7 +5 0");
        assert_eq!(operand(&ts[0]), &Operand::Integer(42));
        assert_eq!(operand(&ts[1]), &Operand::Integer(-7));
        assert_eq!(operand(&ts[2]), &Operand::Integer(5));
        assert_eq!(operand(&ts[3]), &Operand::Integer(0));
    }

    #[test]
    fn reals() {
        let ts = tokens(b"3.14 .5 -.002 0.0");
        assert_eq!(operand(&ts[0]), &Operand::Real(3.14));
        assert_eq!(operand(&ts[1]), &Operand::Real(0.5));
        assert_eq!(operand(&ts[2]), &Operand::Real(-0.002));
        assert_eq!(operand(&ts[3]), &Operand::Real(0.0));
    }

    // --- Strings ---

    #[test]
    fn literal_string_simple() {
        let ts = tokens(b"(Hello)");
        assert_eq!(operand(&ts[0]), &Operand::LiteralString(b"Hello".to_vec()));
    }

    #[test]
    fn literal_string_balanced_parens() {
        let ts = tokens(b"(a(b)c)");
        assert_eq!(operand(&ts[0]), &Operand::LiteralString(b"a(b)c".to_vec()));
    }

    #[test]
    fn literal_string_escapes() {
        let ts = tokens(b"(line1\\nline2\\t\\(x\\))");
        assert_eq!(
            operand(&ts[0]),
            &Operand::LiteralString(b"line1\nline2\t(x)".to_vec())
        );
    }

    #[test]
    fn literal_string_octal_escape() {
        let ts = tokens(b"(\\101\\12)");
        assert_eq!(operand(&ts[0]), &Operand::LiteralString(vec![65, 10]));
    }

    #[test]
    fn literal_string_line_continuation() {
        let ts = tokens(b"(ab\\\ncd)");
        assert_eq!(operand(&ts[0]), &Operand::LiteralString(b"abcd".to_vec()));
    }

    #[test]
    fn unterminated_literal_string_is_eof() {
        let mut tok = Tokenizer::new(b"(oh no");
        assert!(matches!(tok.next_token(), Err(WalkError::UnexpectedEof)));
    }

    #[test]
    fn hex_string() {
        let ts = tokens(b"<48656C6C6F>");
        assert_eq!(operand(&ts[0]), &Operand::HexString(b"Hello".to_vec()));
    }

    #[test]
    fn hex_string_odd_digits_padded() {
        let ts = tokens(b"<ABC>");
        assert_eq!(operand(&ts[0]), &Operand::HexString(vec![0xAB, 0xC0]));
    }

    #[test]
    fn hex_string_embedded_whitespace() {
        let ts = tokens(b"<48 65 6C>");
        assert_eq!(operand(&ts[0]), &Operand::HexString(b"Hel".to_vec()));
    }

    #[test]
    fn unterminated_hex_string_is_eof() {
        let mut tok = Tokenizer::new(b"<48");
        assert!(matches!(tok.next_token(), Err(WalkError::UnexpectedEof)));
    }

    // --- Names ---

    #[test]
    fn names() {
        let ts = tokens(b"/F1 /DeviceRGB");
        assert_eq!(operand(&ts[0]), &Operand::Name("F1".to_string()));
        assert_eq!(operand(&ts[1]), &Operand::Name("DeviceRGB".to_string()));
    }

    #[test]
    fn name_hex_escape() {
        let ts = tokens(b"/F#231");
        assert_eq!(operand(&ts[0]), &Operand::Name("F#1".to_string()));
    }

    // --- Keywords and operators ---

    #[test]
    fn booleans_and_null() {
        let ts = tokens(b"true false null");
        assert_eq!(operand(&ts[0]), &Operand::Boolean(true));
        assert_eq!(operand(&ts[1]), &Operand::Boolean(false));
        assert_eq!(operand(&ts[2]), &Operand::Null);
    }

    #[test]
    fn operators_resolved_through_table() {
        let ts = tokens(b"BT ET q Q f*");
        assert_eq!(ts[0], Token::Operator(Callback::BeginTextObject));
        assert_eq!(ts[1], Token::Operator(Callback::EndTextObject));
        assert_eq!(ts[2], Token::Operator(Callback::SaveGraphicsState));
        assert_eq!(ts[3], Token::Operator(Callback::RestoreGraphicsState));
        assert_eq!(ts[4], Token::Operator(Callback::FillPathWithEvenOdd));
    }

    #[test]
    fn quote_operators_tokenize() {
        let ts = tokens(b"(a) ' 1 2 (b) \"");
        assert_eq!(ts[1], Token::Operator(Callback::MoveToNextLineAndShowText));
        assert_eq!(ts[5], Token::Operator(Callback::SetSpacingNextLineShowText));
    }

    #[test]
    fn unknown_keyword_becomes_operand() {
        let ts = tokens(b"XYZ re");
        assert_eq!(operand(&ts[0]), &Operand::Name("XYZ".to_string()));
        assert_eq!(ts[1], Token::Operator(Callback::AppendRectangle));
    }

    #[test]
    fn glyph_metric_operators_tokenize() {
        // d0/d1 carry a digit; the keyword scanner must not split them
        let ts = tokens(b"750 0 d0");
        assert_eq!(operand(&ts[0]), &Operand::Integer(750));
        assert_eq!(operand(&ts[1]), &Operand::Integer(0));
        assert_eq!(ts[2], Token::Operator(Callback::SetGlyphWidth));

        let ts = tokens(b"750 0 -2 -8 752 70 d1");
        assert_eq!(
            ts[6],
            Token::Operator(Callback::SetGlyphWidthAndBoundingBox)
        );
    }

    // --- Arrays ---

    #[test]
    fn array_of_numbers() {
        let ts = tokens(b"[1 2 3]");
        assert_eq!(
            operand(&ts[0]),
            &Operand::Array(vec![
                Operand::Integer(1),
                Operand::Integer(2),
                Operand::Integer(3),
            ])
        );
    }

    #[test]
    fn tj_style_array() {
        let ts = tokens(b"[(H) -20 (ello)]");
        assert_eq!(
            operand(&ts[0]),
            &Operand::Array(vec![
                Operand::LiteralString(b"H".to_vec()),
                Operand::Integer(-20),
                Operand::LiteralString(b"ello".to_vec()),
            ])
        );
    }

    #[test]
    fn nested_arrays() {
        let ts = tokens(b"[[1] []]");
        assert_eq!(
            operand(&ts[0]),
            &Operand::Array(vec![
                Operand::Array(vec![Operand::Integer(1)]),
                Operand::Array(vec![]),
            ])
        );
    }

    #[test]
    fn unterminated_array_is_eof() {
        let mut tok = Tokenizer::new(b"[1 2");
        assert!(matches!(tok.next_token(), Err(WalkError::UnexpectedEof)));
    }

    #[test]
    fn stray_array_close_is_error() {
        let mut tok = Tokenizer::new(b"]");
        assert!(matches!(tok.next_token(), Err(WalkError::MalformedPdf(_))));
    }

    // --- Dictionaries ---

    #[test]
    fn inline_dictionary() {
        let ts = tokens(b"<< /MCID 0 >>");
        assert_eq!(
            operand(&ts[0]),
            &Operand::Dictionary(vec![("MCID".to_string(), Operand::Integer(0))])
        );
    }

    #[test]
    fn nested_dictionary() {
        let ts = tokens(b"<< /Outer << /Inner 42 >> >>");
        assert_eq!(
            operand(&ts[0]),
            &Operand::Dictionary(vec![(
                "Outer".to_string(),
                Operand::Dictionary(vec![("Inner".to_string(), Operand::Integer(42))])
            )])
        );
    }

    #[test]
    fn bdc_with_property_list() {
        let ts = tokens(b"/Tag << /MCID 0 >> BDC");
        assert_eq!(operand(&ts[0]), &Operand::Name("Tag".to_string()));
        assert!(matches!(ts[1], Token::Operand(Operand::Dictionary(_))));
        assert_eq!(ts[2], Token::Operator(Callback::BeginMarkedContentWithPl));
    }

    // --- Comments and whitespace ---

    #[test]
    fn comments_are_skipped() {
        let ts = tokens(b"% leading comment\nBT % trailing\nET");
        assert_eq!(ts[0], Token::Operator(Callback::BeginTextObject));
        assert_eq!(ts[1], Token::Operator(Callback::EndTextObject));
    }

    #[test]
    fn empty_and_blank_streams() {
        assert!(tokens(b"").is_empty());
        assert!(tokens(b" \t\r\n ").is_empty());
    }

    // --- read_until ---

    #[test]
    fn read_until_leaves_sentinel() {
        let mut tok = Tokenizer::new(b"\x00\x01\x02EI rest");
        let data = tok.read_until(b"EI").unwrap();
        assert_eq!(data, vec![0x00, 0x01, 0x02]);
        assert_eq!(
            tok.next_token().unwrap(),
            Some(Token::Operator(Callback::EndInlineImage))
        );
    }

    #[test]
    fn read_until_missing_sentinel_is_eof() {
        let mut tok = Tokenizer::new(b"\x00\x01\x02");
        assert!(matches!(tok.read_until(b"EI"), Err(WalkError::UnexpectedEof)));
    }

    #[test]
    fn read_until_empty_span() {
        let mut tok = Tokenizer::new(b"EI");
        assert_eq!(tok.read_until(b"EI").unwrap(), Vec::<u8>::new());
    }
}
