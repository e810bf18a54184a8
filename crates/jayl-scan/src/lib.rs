//! Strict pull-based JSON event scanner.
//!
//! [`Scanner`] walks a byte slice and hands out one syntax [`Event`] per
//! call, in document order. It accepts exactly one RFC 8259 document per
//! input: no comments, no trailing commas, no relaxed literals, nothing
//! after the root value but whitespace.
//!
//! The scanner owns the grammar. Keys are only produced inside objects,
//! commas and colons are checked, brackets must match, string escapes are
//! decoded (including surrogate pairs), and string content is validated as
//! UTF-8. What it does not own is interpretation: numbers are delivered as
//! their raw text so the consumer decides how to materialize them, and
//! nesting depth is the consumer's policy, not the scanner's.
//!
//! Every error carries the byte offset it was detected at.

pub mod error;
mod scanner;

pub use error::{ScanError, ScanErrorKind};
pub use scanner::{Event, Scanner};
