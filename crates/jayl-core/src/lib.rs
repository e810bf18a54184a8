//! # jayl-core
//!
//! Event-driven JSON codec with a tagged value model.
//!
//! One [`Value`] tree stands for one JSON document. Encoding walks the
//! tree and emits text through a generator that owns all separators,
//! pretty whitespace, and the nesting guard; decoding pulls syntax events
//! from a strict scanner ([`jayl_scan`]) and folds them into a tree with
//! a single frame stack. Both directions share [`MAX_DEPTH`], so anything
//! the encoder produces, the decoder accepts.
//!
//! Two properties worth knowing up front:
//!
//! - Strings are byte sequences. The encoder passes non-ASCII bytes
//!   through untouched; only decoded documents are guaranteed UTF-8.
//! - Integer magnitude survives: a number too wide for `i64` decodes to
//!   [`Value::BigInt`] and re-encodes as the same digits, never as a
//!   float approximation.
//!
//! ## Quick start
//!
//! ```rust
//! use jayl_core::{dumps, dumps_indent, loads, Value};
//!
//! let v = loads(r#"{"name": "Ada", "scores": [95, 87]}"#).unwrap();
//! assert_eq!(v.as_object().unwrap().get("name").unwrap().as_str(), Some("Ada"));
//!
//! // Compact bytes out; insertion order preserved.
//! assert_eq!(dumps(&v).unwrap(), br#"{"name":"Ada","scores":[95,87]}"#.to_vec());
//!
//! // Pretty with a two-space indent.
//! let pretty = dumps_indent(&v, Some(2)).unwrap();
//! assert!(pretty.ends_with(b"\n"));
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` union plus [`ByteString`], [`BigNum`], [`Map`]
//! - [`encoder`] — `Value` → JSON bytes ([`dumps`], [`dumps_indent`])
//! - [`generator`] — streaming text writer the encoder drives
//! - [`decoder`] — JSON bytes → `Value` ([`loads`])
//! - [`io`] — one-shot reader/writer adapters ([`load`], [`dump`])
//! - [`error`] — error types for both directions

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod generator;
pub mod io;
pub mod value;

pub use decoder::loads;
pub use encoder::{dumps, dumps_indent};
pub use error::{DecodeError, EncodeError, Error, IntegerOverflowError, ScanError, ScanErrorKind};
pub use generator::Generator;
pub use io::{dump, load};
pub use value::{BigNum, ByteString, Map, ParseBigNumError, Value};

/// Maximum number of simultaneously open containers, shared by the
/// generator and the decoder. Opening one more than this fails with
/// `MaxDepthExceeded` on either side, which keeps round-trips symmetric.
pub const MAX_DEPTH: usize = 128;
