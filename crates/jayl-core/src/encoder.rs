//! Serializing a [`Value`](crate::Value) tree to JSON text.
//!
//! A recursive walk over the closed union, emitting through the
//! [`Generator`]. Every variant has exactly one emission path, so there is
//! no "unknown type" case to fall through to; the compiler keeps the match
//! total. Errors are terminal: the first failure unwinds out through `?`
//! and the partial output is dropped with the generator.
//!
//! Recursion tracks document nesting, which the generator caps at
//! [`MAX_DEPTH`](crate::MAX_DEPTH) open containers, so stack use is
//! bounded.

use crate::error::EncodeError;
use crate::generator::Generator;
use crate::value::Value;

/// Serialize a value as compact JSON: `,` and `:` separators, no other
/// whitespace.
///
/// ```
/// use jayl_core::{dumps, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key", "value");
/// assert_eq!(dumps(&Value::Object(map)).unwrap(), b"{\"key\":\"value\"}");
/// ```
pub fn dumps(value: &Value) -> Result<Vec<u8>, EncodeError> {
    dumps_indent(value, None)
}

/// Serialize a value with optional pretty printing.
///
/// `None` is compact. `Some(n)` pretty-prints with an n-space indent unit;
/// `Some(0)` still breaks lines, it just indents with nothing. Pretty
/// output ends with a newline.
///
/// ```
/// use jayl_core::{dumps_indent, Map, Value};
///
/// let mut map = Map::new();
/// map.insert("foo", "bar");
/// let pretty = dumps_indent(&Value::Object(map), Some(4)).unwrap();
/// assert_eq!(pretty, b"{\n    \"foo\": \"bar\"\n}\n");
/// ```
pub fn dumps_indent(value: &Value, indent: Option<usize>) -> Result<Vec<u8>, EncodeError> {
    let mut gen = match indent {
        None => Generator::new(),
        Some(width) => Generator::with_indent(&" ".repeat(width)),
    };
    encode_value(&mut gen, value)?;
    Ok(gen.into_bytes())
}

fn encode_value(gen: &mut Generator, value: &Value) -> Result<(), EncodeError> {
    match value {
        Value::Null => gen.write_null(),
        Value::Bool(b) => gen.write_bool(*b),
        Value::Int(i) => gen.write_int(*i),
        Value::BigInt(n) => gen.write_raw_number(n.as_str()),
        Value::Float(f) => gen.write_double(*f),
        Value::String(s) => gen.write_string(s.as_bytes()),
        Value::Array(items) => {
            gen.open_array()?;
            for item in items {
                encode_value(gen, item)?;
            }
            gen.close_array()
        }
        Value::Object(map) => {
            gen.open_object()?;
            for (key, member) in map.iter() {
                gen.write_string(key.as_bytes())?;
                encode_value(gen, member)?;
            }
            gen.close_object()
        }
    }
}
