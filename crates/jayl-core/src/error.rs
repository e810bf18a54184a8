//! Error types for JSON encoding and decoding operations.

use thiserror::Error;

pub use jayl_scan::{ScanError, ScanErrorKind};

/// Errors that can occur while serializing a [`crate::Value`] to JSON text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// Nesting went past [`crate::MAX_DEPTH`] simultaneously open
    /// containers. Raised at the container open, before any of its bytes
    /// are emitted.
    #[error("maximum nesting depth of {} exceeded", crate::MAX_DEPTH)]
    MaxDepthExceeded,

    /// An object key that is neither a string nor coercible to one.
    #[error("object key must be a string, not {found}")]
    UnsupportedKeyType {
        /// Type name of the offending value.
        found: &'static str,
    },

    /// NaN or an infinity; JSON has no representation for them.
    #[error("non-finite number {0} has no JSON representation")]
    InvalidNumber(f64),

    /// A write was attempted after the root value was already complete.
    #[error("generation already complete")]
    GenerationComplete,

    /// A close that does not match the open container, including a close
    /// while an object member value is still pending.
    #[error("close does not match the open container")]
    UnmatchedClose,
}

/// Errors that can occur while parsing JSON text into a [`crate::Value`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input is not a single well-formed JSON document. Carries the
    /// scanner's diagnostic, including the byte offset of the fault.
    #[error("malformed JSON: {0}")]
    MalformedInput(#[from] jayl_scan::ScanError),

    /// The document nests deeper than [`crate::MAX_DEPTH`] open containers.
    #[error("maximum nesting depth of {} exceeded", crate::MAX_DEPTH)]
    MaxDepthExceeded,
}

/// Umbrella error for the stream entry points, which mix codec failures
/// with I/O failures.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversion error for narrowing a [`crate::BigNum`] into a native
/// integer that cannot hold it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("integer does not fit in 64 bits")]
pub struct IntegerOverflowError;
