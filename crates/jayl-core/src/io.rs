//! Stream entry points: encode to a writer, decode from a reader.
//!
//! Conveniences over [`dumps_indent`]/[`loads`] with the single-shot
//! discipline the codec has everywhere: the document is fully materialized
//! in memory, the writer gets exactly one `write_all`, and the reader is
//! drained once up front. There is no incremental mode.

use std::io::{Read, Write};

use crate::error::Error;
use crate::value::Value;
use crate::{dumps_indent, loads};

/// Encode `value` and hand the bytes to `writer` in a single write.
///
/// `indent` works as in [`dumps_indent`]: `None` compact, `Some(n)`
/// pretty with an n-space indent.
pub fn dump<W: Write>(value: &Value, writer: &mut W, indent: Option<usize>) -> Result<(), Error> {
    let bytes = dumps_indent(value, indent)?;
    writer.write_all(&bytes)?;
    Ok(())
}

/// Drain `reader` and decode its content as one JSON document.
pub fn load<R: Read>(reader: &mut R) -> Result<Value, Error> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(loads(buf)?)
}
