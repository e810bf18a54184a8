//! JSON text generation: a growable output buffer plus the
//! well-formedness state machine that places separators, pretty
//! whitespace, and the nesting guard.
//!
//! ## Key design decisions
//!
//! - One state per open container, kept on a stack. The state at the top
//!   decides which separator a write needs (`,` between siblings, `:`
//!   after a key) and whether the write is sitting at key position.
//! - Errors are returned, not remembered: a rejected write leaves the
//!   generator exactly as it was, and the caller's `?` decides what dies.
//! - The depth guard runs before a container open emits anything, so a
//!   rejected open never leaves half-written output.
//!
//! The generator does not care what the bytes mean. Strings are byte
//! sequences escaped per JSON; raw number tokens are the caller's promise.

use crate::error::EncodeError;
use crate::MAX_DEPTH;

/// Output buffer growing by capacity doubling.
///
/// Growth is explicit rather than left to `Vec`'s policy: capacity starts
/// at a small power of two and doubles until the pending write fits.
#[derive(Debug, Default)]
struct OutBuf {
    buf: Vec<u8>,
}

impl OutBuf {
    const INITIAL_CAPACITY: usize = 2048;

    fn new() -> Self {
        OutBuf { buf: Vec::new() }
    }

    fn ensure(&mut self, extra: usize) {
        let need = self.buf.len() + extra;
        if need <= self.buf.capacity() {
            return;
        }
        let mut cap = self.buf.capacity().max(Self::INITIAL_CAPACITY);
        while cap < need {
            cap *= 2;
        }
        self.buf.reserve_exact(cap - self.buf.len());
    }

    fn push(&mut self, byte: u8) {
        self.ensure(1);
        self.buf.push(byte);
    }

    fn extend(&mut self, bytes: &[u8]) {
        self.ensure(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// What the top of the container stack expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenState {
    /// Before the root value.
    Start,
    /// Object just opened: first key or close.
    MapStart,
    /// A member value finished: next key or close.
    MapKey,
    /// A key was written: its value must follow.
    MapVal,
    /// Array just opened: first element or close.
    ArrayStart,
    /// At least one element written: next element or close.
    InArray,
    /// The root value is done; only inspection is allowed.
    Complete,
}

/// Streaming JSON text writer.
///
/// Call the `open_*`/`close_*`/`write_*` primitives in document order;
/// the generator places every separator and, in pretty mode, every
/// newline and indent. [`Generator::write_string`] serves both keys and
/// member values, the state decides which one a call is.
///
/// ```
/// use jayl_core::Generator;
///
/// let mut g = Generator::new();
/// g.open_object().unwrap();
/// g.write_string(b"key").unwrap();
/// g.write_int(7).unwrap();
/// g.close_object().unwrap();
/// assert_eq!(g.into_bytes(), b"{\"key\":7}");
/// ```
#[derive(Debug)]
pub struct Generator {
    out: OutBuf,
    state: Vec<GenState>,
    pretty: bool,
    indent: Box<str>,
}

impl Default for Generator {
    fn default() -> Self {
        Generator::new()
    }
}

impl Generator {
    /// Compact output: no whitespace anywhere.
    pub fn new() -> Self {
        Generator {
            out: OutBuf::new(),
            state: vec![GenState::Start],
            pretty: false,
            indent: "".into(),
        }
    }

    /// Pretty output: newline-separated entries, `": "` after keys, one
    /// `indent` repetition per nesting level, and a final newline once the
    /// root value completes.
    pub fn with_indent(indent: &str) -> Self {
        Generator {
            out: OutBuf::new(),
            state: vec![GenState::Start],
            pretty: true,
            indent: indent.into(),
        }
    }

    /// Number of currently open containers.
    pub fn depth(&self) -> usize {
        self.state.len() - 1
    }

    /// True once the root value is finished.
    pub fn is_complete(&self) -> bool {
        self.current() == GenState::Complete
    }

    /// The bytes emitted so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.out.as_slice()
    }

    /// Consume the generator, returning the output.
    pub fn into_bytes(self) -> Vec<u8> {
        self.out.into_bytes()
    }

    pub fn open_object(&mut self) -> Result<(), EncodeError> {
        self.open(GenState::MapStart, b'{', "object")
    }

    pub fn open_array(&mut self) -> Result<(), EncodeError> {
        self.open(GenState::ArrayStart, b'[', "array")
    }

    pub fn close_object(&mut self) -> Result<(), EncodeError> {
        self.close(GenState::MapStart, GenState::MapKey, b'}')
    }

    pub fn close_array(&mut self) -> Result<(), EncodeError> {
        self.close(GenState::ArrayStart, GenState::InArray, b']')
    }

    pub fn write_null(&mut self) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.not_at_key_position("null")?;
        self.atom(b"null");
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.not_at_key_position("bool")?;
        self.atom(if value { b"true" } else { b"false" });
        Ok(())
    }

    pub fn write_int(&mut self, value: i64) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.not_at_key_position("int")?;
        let mut buf = itoa::Buffer::new();
        self.atom(buf.format(value).as_bytes());
        Ok(())
    }

    /// Emit a pre-formatted number token verbatim. The caller guarantees
    /// the text is a valid JSON number; the generator only places it.
    pub fn write_raw_number(&mut self, token: &str) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.not_at_key_position("number")?;
        self.atom(token.as_bytes());
        Ok(())
    }

    /// Emit a double as its shortest round-trip decimal form. NaN and the
    /// infinities have no JSON form and are rejected.
    pub fn write_double(&mut self, value: f64) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.not_at_key_position("float")?;
        if !value.is_finite() {
            return Err(EncodeError::InvalidNumber(value));
        }
        let mut buf = ryu::Buffer::new();
        self.atom(buf.format_finite(value).as_bytes());
        Ok(())
    }

    /// Emit a string token: quoted, with `"` `\` and the control range
    /// escaped. All other bytes pass through verbatim, so the content
    /// needs no particular encoding. At key position this is the key.
    pub fn write_string(&mut self, content: &[u8]) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.separator();
        self.indentation();
        self.quoted(content);
        self.appended();
        self.final_newline();
        Ok(())
    }

    fn current(&self) -> GenState {
        self.state.last().copied().unwrap_or(GenState::Complete)
    }

    fn check_writable(&self) -> Result<(), EncodeError> {
        if self.current() == GenState::Complete {
            return Err(EncodeError::GenerationComplete);
        }
        Ok(())
    }

    fn not_at_key_position(&self, found: &'static str) -> Result<(), EncodeError> {
        match self.current() {
            GenState::MapStart | GenState::MapKey => {
                Err(EncodeError::UnsupportedKeyType { found })
            }
            _ => Ok(()),
        }
    }

    /// Separator owed by the previous write at this level.
    fn separator(&mut self) {
        match self.current() {
            GenState::MapKey | GenState::InArray => {
                self.out.push(b',');
                if self.pretty {
                    self.out.push(b'\n');
                }
            }
            GenState::MapVal => {
                self.out.push(b':');
                if self.pretty {
                    self.out.push(b' ');
                }
            }
            _ => {}
        }
    }

    /// Pretty indentation for a write that starts a line. A member value
    /// continues its key's line, so it gets none.
    fn indentation(&mut self) {
        if !self.pretty || self.current() == GenState::MapVal {
            return;
        }
        for _ in 0..self.depth() {
            self.out.extend(self.indent.as_bytes());
        }
    }

    /// Advance the current level after one complete value landed on it.
    fn appended(&mut self) {
        let next = match self.current() {
            GenState::Start => GenState::Complete,
            GenState::MapStart | GenState::MapKey => GenState::MapVal,
            GenState::MapVal => GenState::MapKey,
            GenState::ArrayStart | GenState::InArray => GenState::InArray,
            GenState::Complete => GenState::Complete,
        };
        if let Some(top) = self.state.last_mut() {
            *top = next;
        }
    }

    fn final_newline(&mut self) {
        if self.pretty && self.current() == GenState::Complete {
            self.out.push(b'\n');
        }
    }

    fn atom(&mut self, token: &[u8]) {
        self.separator();
        self.indentation();
        self.out.extend(token);
        self.appended();
        self.final_newline();
    }

    /// Quote and escape string content, byte-wise. The escape set is the
    /// mandatory one: quote, backslash, and the control range. `/` stays
    /// bare and bytes >= 0x80 pass through untouched.
    fn quoted(&mut self, content: &[u8]) {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        self.out.push(b'"');
        for &b in content {
            match b {
                b'"' => self.out.extend(b"\\\""),
                b'\\' => self.out.extend(b"\\\\"),
                0x08 => self.out.extend(b"\\b"),
                0x0C => self.out.extend(b"\\f"),
                b'\n' => self.out.extend(b"\\n"),
                b'\r' => self.out.extend(b"\\r"),
                b'\t' => self.out.extend(b"\\t"),
                b if b < 0x20 => {
                    self.out.extend(b"\\u00");
                    self.out.push(HEX[usize::from(b >> 4)]);
                    self.out.push(HEX[usize::from(b & 0x0f)]);
                }
                b => self.out.push(b),
            }
        }
        self.out.push(b'"');
    }

    fn open(&mut self, entry: GenState, bracket: u8, name: &'static str) -> Result<(), EncodeError> {
        self.check_writable()?;
        self.not_at_key_position(name)?;
        if self.depth() == MAX_DEPTH {
            return Err(EncodeError::MaxDepthExceeded);
        }
        self.separator();
        self.indentation();
        self.state.push(entry);
        self.out.push(bracket);
        if self.pretty {
            self.out.push(b'\n');
        }
        Ok(())
    }

    fn close(
        &mut self,
        empty: GenState,
        after_value: GenState,
        bracket: u8,
    ) -> Result<(), EncodeError> {
        self.check_writable()?;
        let top = self.current();
        if top != empty && top != after_value {
            return Err(EncodeError::UnmatchedClose);
        }
        self.state.pop();
        if self.pretty {
            self.out.push(b'\n');
        }
        self.appended();
        self.indentation();
        self.out.push(bracket);
        self.final_newline();
        Ok(())
    }
}
