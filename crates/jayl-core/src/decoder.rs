//! Parsing JSON text into a [`Value`](crate::Value) tree.
//!
//! ## Key design decisions
//!
//! - The scanner owns the grammar, this module owns materialization. By
//!   the time an event arrives here it is grammatically sound; the
//!   builder's job is shape, not syntax.
//! - One stack of frames. An object frame carries its half-bound key
//!   inline, so there is no second stack to keep in step with the first.
//! - Depth is decode policy, enforced here: pushing a frame past
//!   [`MAX_DEPTH`](crate::MAX_DEPTH) fails with `MaxDepthExceeded` before
//!   the frame exists. The scanner itself follows nesting indefinitely.
//! - Numbers materialize from raw token text: a float marker (`.`, `e`,
//!   `E`) makes a `Float`, otherwise `i64`, widening to `BigInt` when the
//!   token overflows.

use jayl_scan::{Event, Scanner};

use crate::error::DecodeError;
use crate::value::{BigNum, ByteString, Map, Value};
use crate::MAX_DEPTH;

/// A container being built; object frames hold the key awaiting its value.
enum Frame {
    Array(Vec<Value>),
    Object {
        map: Map,
        pending_key: Option<ByteString>,
    },
}

/// Parse a single JSON document into a value tree.
///
/// Accepts text or raw bytes (`&str`, `&[u8]`, `String`, `Vec<u8>`, ...).
/// The input must hold exactly one document; trailing non-whitespace and
/// empty input are [`DecodeError::MalformedInput`].
///
/// ```
/// use jayl_core::{loads, Value};
///
/// let v = loads(r#"{"a": [1, 2]}"#).unwrap();
/// let a = v.as_object().unwrap().get("a").unwrap();
/// assert_eq!(a.as_array().unwrap().len(), 2);
/// ```
pub fn loads(input: impl AsRef<[u8]>) -> Result<Value, DecodeError> {
    let mut scanner = Scanner::new(input.as_ref());
    let mut stack: Vec<Frame> = Vec::new();
    loop {
        let finished = match scanner.next_event()? {
            Event::Null => bind(&mut stack, Value::Null),
            Event::Bool(b) => bind(&mut stack, Value::Bool(b)),
            Event::Str(s) => bind(&mut stack, Value::String(ByteString::from(s))),
            Event::Number(raw) => bind(&mut stack, materialize_number(raw)),
            Event::Key(k) => {
                set_pending_key(&mut stack, ByteString::from(k));
                None
            }
            Event::ArrayBegin => {
                guard_depth(&stack)?;
                stack.push(Frame::Array(Vec::new()));
                None
            }
            Event::ObjectBegin => {
                guard_depth(&stack)?;
                stack.push(Frame::Object {
                    map: Map::new(),
                    pending_key: None,
                });
                None
            }
            Event::ArrayEnd => match stack.pop() {
                Some(Frame::Array(items)) => bind(&mut stack, Value::Array(items)),
                _ => grammar_violation(),
            },
            Event::ObjectEnd => match stack.pop() {
                Some(Frame::Object { map, .. }) => bind(&mut stack, Value::Object(map)),
                _ => grammar_violation(),
            },
            Event::End => grammar_violation(),
        };
        if let Some(root) = finished {
            // One more pull, so bytes after the document still fault.
            scanner.next_event()?;
            return Ok(root);
        }
    }
}

/// Attach a finished value to the innermost frame, or report it as the
/// root when no container is open.
fn bind(stack: &mut Vec<Frame>, value: Value) -> Option<Value> {
    match stack.last_mut() {
        None => Some(value),
        Some(Frame::Array(items)) => {
            items.push(value);
            None
        }
        Some(Frame::Object { map, pending_key }) => match pending_key.take() {
            // Duplicate keys resolve to the last write.
            Some(key) => {
                map.insert(key, value);
                None
            }
            None => grammar_violation(),
        },
    }
}

fn set_pending_key(stack: &mut Vec<Frame>, key: ByteString) {
    match stack.last_mut() {
        Some(Frame::Object { pending_key, .. }) if pending_key.is_none() => {
            *pending_key = Some(key);
        }
        _ => grammar_violation(),
    }
}

fn guard_depth(stack: &[Frame]) -> Result<(), DecodeError> {
    if stack.len() == MAX_DEPTH {
        return Err(DecodeError::MaxDepthExceeded);
    }
    Ok(())
}

/// Pick the value representation for a raw number token.
fn materialize_number(raw: &str) -> Value {
    if raw.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
        // Enormous exponents follow the platform parse to infinity; such
        // a value will refuse to encode again.
        match raw.parse::<f64>() {
            Ok(f) => Value::Float(f),
            Err(_) => grammar_violation(),
        }
    } else {
        match raw.parse::<i64>() {
            Ok(i) => Value::Int(i),
            Err(_) => match raw.parse::<BigNum>() {
                Ok(n) => Value::BigInt(n),
                Err(_) => grammar_violation(),
            },
        }
    }
}

/// The scanner broke its grammar contract. Every caller sits on an event
/// order the scanner cannot legally produce.
fn grammar_violation() -> ! {
    unreachable!("scanner event order violated the JSON grammar")
}
