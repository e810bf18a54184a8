use log::debug;

use crate::error::{ScanError, ScanErrorKind};

/// One syntax event pulled from the scanner.
///
/// String-carrying events own their (escape-decoded, UTF-8 validated)
/// content. Numbers borrow the raw token text from the input so the
/// consumer picks the representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    ObjectBegin,
    ObjectEnd,
    ArrayBegin,
    ArrayEnd,
    /// An object member key. Always followed by the member's value events.
    Key(String),
    Str(String),
    /// Raw number token, e.g. `-12.5e3`. Guaranteed to match the JSON
    /// number grammar.
    Number(&'a str),
    Bool(bool),
    Null,
    /// The document is complete. The scanner is fused: further calls keep
    /// returning `End`.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

/// What the grammar allows next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    RootValue,
    /// A member value, after a key's colon.
    Value,
    /// Just after `[`: a value or an immediate `]`.
    FirstItemOrClose,
    CommaOrCloseArray,
    /// Just after `{`: a key or an immediate `}`.
    FirstKeyOrClose,
    CommaOrCloseObject,
    /// Root value done; only whitespace may remain.
    Eof,
}

/// Pull scanner over a single JSON document.
///
/// ```
/// use jayl_scan::{Event, Scanner};
///
/// let mut scan = Scanner::new(b"[1, true]");
/// assert_eq!(scan.next_event(), Ok(Event::ArrayBegin));
/// assert_eq!(scan.next_event(), Ok(Event::Number("1")));
/// assert_eq!(scan.next_event(), Ok(Event::Bool(true)));
/// assert_eq!(scan.next_event(), Ok(Event::ArrayEnd));
/// assert_eq!(scan.next_event(), Ok(Event::End));
/// ```
#[derive(Debug)]
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    stack: Vec<Container>,
    expect: Expect,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Scanner {
            input,
            pos: 0,
            stack: Vec::new(),
            expect: Expect::RootValue,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Pull the next event, or the fault that stops the document.
    pub fn next_event(&mut self) -> Result<Event<'a>, ScanError> {
        self.skip_ws();
        match self.expect {
            Expect::RootValue | Expect::Value => {
                if self.at_end() {
                    return Err(self.err_here(ScanErrorKind::UnexpectedEnd));
                }
                self.scan_value()
            }
            Expect::FirstItemOrClose => match self.peek() {
                None => Err(self.err_here(ScanErrorKind::UnexpectedEnd)),
                Some(b']') => self.close(Container::Array),
                Some(_) => self.scan_value(),
            },
            Expect::CommaOrCloseArray => match self.peek() {
                None => Err(self.err_here(ScanErrorKind::UnexpectedEnd)),
                Some(b']') => self.close(Container::Array),
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws();
                    if self.at_end() {
                        return Err(self.err_here(ScanErrorKind::UnexpectedEnd));
                    }
                    self.scan_value()
                }
                Some(_) => Err(self.err_here(ScanErrorKind::ExpectedCommaOrClose)),
            },
            Expect::FirstKeyOrClose => match self.peek() {
                None => Err(self.err_here(ScanErrorKind::UnexpectedEnd)),
                Some(b'}') => self.close(Container::Object),
                Some(b'"') => self.scan_key(),
                Some(_) => Err(self.err_here(ScanErrorKind::ExpectedObjectKey)),
            },
            Expect::CommaOrCloseObject => match self.peek() {
                None => Err(self.err_here(ScanErrorKind::UnexpectedEnd)),
                Some(b'}') => self.close(Container::Object),
                Some(b',') => {
                    self.pos += 1;
                    self.skip_ws();
                    match self.peek() {
                        None => Err(self.err_here(ScanErrorKind::UnexpectedEnd)),
                        Some(b'"') => self.scan_key(),
                        Some(_) => Err(self.err_here(ScanErrorKind::ExpectedObjectKey)),
                    }
                }
                Some(_) => Err(self.err_here(ScanErrorKind::ExpectedCommaOrClose)),
            },
            Expect::Eof => {
                if self.at_end() {
                    Ok(Event::End)
                } else {
                    Err(self.err_here(ScanErrorKind::TrailingData))
                }
            }
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn err_here(&self, kind: ScanErrorKind) -> ScanError {
        self.err_at(kind, self.pos)
    }

    fn err_at(&self, kind: ScanErrorKind, pos: usize) -> ScanError {
        debug!("scan fault {kind:?} at byte {pos}");
        ScanError::new(kind, pos)
    }

    /// After a value or close completes, decide what the enclosing
    /// container (or the document) allows next.
    fn resume(&mut self) {
        self.expect = match self.stack.last() {
            Some(Container::Array) => Expect::CommaOrCloseArray,
            Some(Container::Object) => Expect::CommaOrCloseObject,
            None => {
                debug!("root value complete at byte {}", self.pos);
                Expect::Eof
            }
        };
    }

    fn close(&mut self, kind: Container) -> Result<Event<'a>, ScanError> {
        self.pos += 1;
        self.stack.pop();
        self.resume();
        Ok(match kind {
            Container::Array => Event::ArrayEnd,
            Container::Object => Event::ObjectEnd,
        })
    }

    /// Scan a value starting at the current byte. Whitespace has been
    /// skipped and the input is known to be non-empty.
    fn scan_value(&mut self) -> Result<Event<'a>, ScanError> {
        match self.input[self.pos] {
            b'{' => {
                self.pos += 1;
                self.stack.push(Container::Object);
                self.expect = Expect::FirstKeyOrClose;
                Ok(Event::ObjectBegin)
            }
            b'[' => {
                self.pos += 1;
                self.stack.push(Container::Array);
                self.expect = Expect::FirstItemOrClose;
                Ok(Event::ArrayBegin)
            }
            b'"' => {
                let s = self.scan_string()?;
                self.resume();
                Ok(Event::Str(s))
            }
            b't' => self.scan_literal("true", Event::Bool(true)),
            b'f' => self.scan_literal("false", Event::Bool(false)),
            b'n' => self.scan_literal("null", Event::Null),
            b'-' | b'0'..=b'9' => {
                let raw = self.scan_number()?;
                self.resume();
                Ok(Event::Number(raw))
            }
            _ => Err(self.err_here(ScanErrorKind::ExpectedValue)),
        }
    }

    /// Scan a key string plus its colon; the member value comes from the
    /// following call.
    fn scan_key(&mut self) -> Result<Event<'a>, ScanError> {
        let key = self.scan_string()?;
        self.skip_ws();
        match self.peek() {
            None => Err(self.err_here(ScanErrorKind::UnexpectedEnd)),
            Some(b':') => {
                self.pos += 1;
                self.expect = Expect::Value;
                Ok(Event::Key(key))
            }
            Some(_) => Err(self.err_here(ScanErrorKind::ExpectedColon)),
        }
    }

    fn scan_literal(
        &mut self,
        text: &'static str,
        event: Event<'a>,
    ) -> Result<Event<'a>, ScanError> {
        let start = self.pos;
        let end = start + text.len();
        if end > self.input.len() {
            return if text.as_bytes().starts_with(&self.input[start..]) {
                Err(self.err_at(ScanErrorKind::UnexpectedEnd, self.input.len()))
            } else {
                Err(self.err_at(ScanErrorKind::InvalidLiteral, start))
            };
        }
        if &self.input[start..end] != text.as_bytes() {
            return Err(self.err_at(ScanErrorKind::InvalidLiteral, start));
        }
        self.pos = end;
        self.resume();
        Ok(event)
    }

    /// Scan a number token, returning the raw text. Grammar per RFC 8259:
    /// optional minus, integer part without leading zeros, optional
    /// fraction and exponent, each with at least one digit.
    fn scan_number(&mut self) -> Result<&'a str, ScanError> {
        let start = self.pos;
        let mut i = self.pos;
        if self.input[i] == b'-' {
            i += 1;
        }
        match self.input.get(i) {
            Some(b'0') => {
                i += 1;
                if matches!(self.input.get(i), Some(b'0'..=b'9')) {
                    return Err(self.err_at(ScanErrorKind::InvalidNumber, i));
                }
            }
            Some(b'1'..=b'9') => {
                i += 1;
                while matches!(self.input.get(i), Some(b'0'..=b'9')) {
                    i += 1;
                }
            }
            Some(_) => return Err(self.err_at(ScanErrorKind::InvalidNumber, i)),
            None => return Err(self.err_at(ScanErrorKind::UnexpectedEnd, i)),
        }
        if self.input.get(i) == Some(&b'.') {
            i += 1;
            match self.input.get(i) {
                Some(b'0'..=b'9') => {
                    while matches!(self.input.get(i), Some(b'0'..=b'9')) {
                        i += 1;
                    }
                }
                Some(_) => return Err(self.err_at(ScanErrorKind::InvalidNumber, i)),
                None => return Err(self.err_at(ScanErrorKind::UnexpectedEnd, i)),
            }
        }
        if matches!(self.input.get(i), Some(b'e' | b'E')) {
            i += 1;
            if matches!(self.input.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            match self.input.get(i) {
                Some(b'0'..=b'9') => {
                    while matches!(self.input.get(i), Some(b'0'..=b'9')) {
                        i += 1;
                    }
                }
                Some(_) => return Err(self.err_at(ScanErrorKind::InvalidNumber, i)),
                None => return Err(self.err_at(ScanErrorKind::UnexpectedEnd, i)),
            }
        }
        self.pos = i;
        // The token is ASCII by construction.
        std::str::from_utf8(&self.input[start..i])
            .map_err(|_| self.err_at(ScanErrorKind::InvalidNumber, start))
    }

    /// Scan a string starting at its opening quote; returns the decoded
    /// content with the quotes consumed.
    fn scan_string(&mut self) -> Result<String, ScanError> {
        self.pos += 1;
        let mut out = String::new();
        let mut run = self.pos;
        loop {
            match self.input.get(self.pos) {
                None => return Err(self.err_at(ScanErrorKind::UnexpectedEnd, self.input.len())),
                Some(b'"') => {
                    self.flush_run(&mut out, run, self.pos)?;
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.flush_run(&mut out, run, self.pos)?;
                    self.pos += 1;
                    self.scan_escape(&mut out)?;
                    run = self.pos;
                }
                Some(&b) if b < 0x20 => {
                    return Err(self.err_here(ScanErrorKind::ControlInString))
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// Append the unescaped byte run `start..end`, validating it as UTF-8.
    fn flush_run(&self, out: &mut String, start: usize, end: usize) -> Result<(), ScanError> {
        if start == end {
            return Ok(());
        }
        match std::str::from_utf8(&self.input[start..end]) {
            Ok(s) => {
                out.push_str(s);
                Ok(())
            }
            Err(e) => Err(self.err_at(ScanErrorKind::InvalidUtf8, start + e.valid_up_to())),
        }
    }

    /// Decode one escape; the backslash is already consumed.
    fn scan_escape(&mut self, out: &mut String) -> Result<(), ScanError> {
        let esc = self.pos - 1;
        let b = match self.input.get(self.pos) {
            None => return Err(self.err_at(ScanErrorKind::UnexpectedEnd, self.input.len())),
            Some(&b) => b,
        };
        self.pos += 1;
        match b {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let hi = self.scan_hex4()?;
                let c = if (0xD800..=0xDBFF).contains(&hi) {
                    if self.peek() != Some(b'\\') || self.input.get(self.pos + 1) != Some(&b'u') {
                        return Err(self.err_at(ScanErrorKind::LoneSurrogate, esc));
                    }
                    self.pos += 2;
                    let lo = self.scan_hex4()?;
                    if !(0xDC00..=0xDFFF).contains(&lo) {
                        return Err(self.err_at(ScanErrorKind::LoneSurrogate, esc));
                    }
                    let cp = 0x10000 + ((u32::from(hi) - 0xD800) << 10) + (u32::from(lo) - 0xDC00);
                    char::from_u32(cp)
                        .ok_or_else(|| self.err_at(ScanErrorKind::InvalidUnicodeEscape, esc))?
                } else if (0xDC00..=0xDFFF).contains(&hi) {
                    return Err(self.err_at(ScanErrorKind::LoneSurrogate, esc));
                } else {
                    char::from_u32(u32::from(hi))
                        .ok_or_else(|| self.err_at(ScanErrorKind::InvalidUnicodeEscape, esc))?
                };
                out.push(c);
            }
            _ => return Err(self.err_at(ScanErrorKind::InvalidEscape, esc)),
        }
        Ok(())
    }

    /// Read exactly four hex digits, returning their value.
    fn scan_hex4(&mut self) -> Result<u16, ScanError> {
        let start = self.pos;
        let mut v: u16 = 0;
        for i in 0..4 {
            let b = match self.input.get(start + i) {
                None => return Err(self.err_at(ScanErrorKind::UnexpectedEnd, self.input.len())),
                Some(&b) => b,
            };
            let digit = (b as char)
                .to_digit(16)
                .ok_or_else(|| self.err_at(ScanErrorKind::InvalidUnicodeEscape, start + i))?;
            v = (v << 4) | digit as u16;
        }
        self.pos = start + 4;
        Ok(v)
    }
}
