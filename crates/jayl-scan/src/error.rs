//! Scanner error type: what went wrong, and at which byte.

use thiserror::Error;

/// A lexical or grammatical fault in the input.
///
/// The position is the byte offset where the fault was detected, which for
/// truncated input is the input length.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {pos}")]
pub struct ScanError {
    kind: ScanErrorKind,
    pos: usize,
}

impl ScanError {
    pub(crate) fn new(kind: ScanErrorKind, pos: usize) -> Self {
        ScanError { kind, pos }
    }

    /// What category of fault this is.
    pub fn kind(&self) -> ScanErrorKind {
        self.kind
    }

    /// Byte offset the fault was detected at.
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// Fault categories, closed over the strict grammar the scanner enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScanErrorKind {
    /// Input ended before the document was complete (includes empty input).
    #[error("unexpected end of input")]
    UnexpectedEnd,
    /// Non-whitespace bytes after the root value.
    #[error("trailing characters after the document")]
    TrailingData,
    /// A value was required and the next byte cannot start one.
    #[error("expected a value")]
    ExpectedValue,
    /// An object key must be followed by ':'.
    #[error("expected ':' after object key")]
    ExpectedColon,
    /// An object member must start with a quoted key.
    #[error("expected an object key")]
    ExpectedObjectKey,
    /// Inside a container, only ',' or the matching close may follow a value.
    #[error("expected ',' or a closing bracket")]
    ExpectedCommaOrClose,
    /// A bare word that is not exactly `true`, `false` or `null`.
    #[error("invalid literal")]
    InvalidLiteral,
    /// Number token violating the JSON grammar (leading zero, bare dot, ...).
    #[error("malformed number")]
    InvalidNumber,
    /// A raw control byte (< 0x20) inside a string; it must be escaped.
    #[error("raw control character in string")]
    ControlInString,
    /// Backslash followed by a byte that is not a legal escape.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// `\u` not followed by four hex digits.
    #[error("invalid \\u escape")]
    InvalidUnicodeEscape,
    /// A surrogate `\u` escape without its pair.
    #[error("lone surrogate in \\u escape")]
    LoneSurrogate,
    /// String bytes that do not form valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
}
