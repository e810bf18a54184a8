//! # jayl-python
//!
//! Python bindings for the jayl JSON codec, built with PyO3.
//!
//! Exposes the following functions to Python as the `jayl` module:
//!
//! - `dumps(obj, indent=None)` -- Python object -> JSON bytes
//! - `loads(data)` -- JSON str or bytes -> Python object
//! - `dump(obj, fp, indent=None)` -- write JSON to a file-like object
//! - `load(fp)` -- read JSON from a file-like object
//! - `iterload(fp)` -- alias of `load`, kept for API compatibility
//!
//! Integers that do not fit in 64 bits cross the boundary as arbitrary
//! precision values in both directions. `bytes` objects encode as raw
//! string content without UTF-8 validation.

use jayl_core::{BigNum, EncodeError, Map, Value};
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyBytes, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use pyo3::IntoPyObjectExt;

/// Convert a Python object into a codec value.
///
/// Booleans are tested before integers: `bool` is an `int` subclass and
/// would otherwise encode as `0`/`1`.
fn value_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if let Ok(i) = obj.downcast::<PyInt>() {
        return match i.extract::<i64>() {
            Ok(v) => Ok(Value::Int(v)),
            Err(_) => {
                let text = i.str()?.to_cow()?.into_owned();
                let big: BigNum = text
                    .parse()
                    .map_err(|_| PyValueError::new_err("int has no canonical decimal form"))?;
                Ok(Value::BigInt(big))
            }
        };
    }
    if let Ok(f) = obj.downcast::<PyFloat>() {
        return Ok(Value::Float(f.value()));
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(Value::from(s.to_cow()?.into_owned()));
    }
    if let Ok(b) = obj.downcast::<PyBytes>() {
        return Ok(Value::from(b.as_bytes()));
    }
    if let Ok(list) = obj.downcast::<PyList>() {
        let mut items = Vec::with_capacity(list.len());
        for item in list.iter() {
            items.push(value_from_py(&item)?);
        }
        return Ok(Value::Array(items));
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        let mut items = Vec::with_capacity(tuple.len());
        for item in tuple.iter() {
            items.push(value_from_py(&item)?);
        }
        return Ok(Value::Array(items));
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut map = Map::with_capacity(dict.len());
        for (key, val) in dict.iter() {
            let key = value_from_py(&key)?
                .into_object_key()
                .map_err(|e| PyTypeError::new_err(e.to_string()))?;
            map.insert(key, value_from_py(&val)?);
        }
        return Ok(Value::Object(map));
    }
    // Generators encode as arrays, matching list and tuple.
    let generator_type = obj.py().import("types")?.getattr("GeneratorType")?;
    if obj.is_instance(&generator_type)? {
        let mut items = Vec::new();
        for item in obj.try_iter()? {
            items.push(value_from_py(&item?)?);
        }
        return Ok(Value::Array(items));
    }
    Err(PyTypeError::new_err(format!(
        "cannot serialize object of type {}",
        obj.get_type().name()?
    )))
}

/// Convert a codec value into a Python object.
fn value_to_py(py: Python<'_>, value: &Value) -> PyResult<PyObject> {
    match value {
        Value::Null => Ok(py.None()),
        Value::Bool(b) => (*b).into_py_any(py),
        Value::Int(i) => (*i).into_py_any(py),
        Value::BigInt(big) => Ok(py
            .get_type::<PyInt>()
            .call1((big.as_str(),))?
            .unbind()),
        Value::Float(f) => (*f).into_py_any(py),
        Value::String(s) => match s.as_str() {
            Some(text) => text.into_py_any(py),
            None => PyBytes::new(py, s.as_bytes()).into_py_any(py),
        },
        Value::Array(items) => {
            let mut objs = Vec::with_capacity(items.len());
            for item in items {
                objs.push(value_to_py(py, item)?);
            }
            PyList::new(py, objs)?.into_py_any(py)
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (key, member) in map.iter() {
                let member = value_to_py(py, member)?;
                match key.as_str() {
                    Some(text) => dict.set_item(text, member)?,
                    None => dict.set_item(PyBytes::new(py, key.as_bytes()), member)?,
                }
            }
            dict.into_py_any(py)
        }
    }
}

fn map_encode_err(e: EncodeError) -> PyErr {
    match e {
        EncodeError::UnsupportedKeyType { .. } => PyTypeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

/// Serialize a Python object to JSON.
///
/// Args:
///     obj: The object to serialize. Supported types: None, bool, int,
///         float, str, bytes, list, tuple, dict, and generators.
///     indent: Indent width for pretty output. Omitted or negative means
///         compact output.
///
/// Returns:
///     The JSON document as bytes.
///
/// Raises:
///     TypeError: If the object or one of its dict keys has no JSON form.
///     ValueError: If a number cannot be represented, or nesting is too deep.
#[pyfunction]
#[pyo3(signature = (obj, indent=None))]
fn dumps(py: Python<'_>, obj: &Bound<'_, PyAny>, indent: Option<i64>) -> PyResult<Py<PyBytes>> {
    let value = value_from_py(obj)?;
    let indent = indent.and_then(|w| usize::try_from(w).ok());
    let bytes = jayl_core::dumps_indent(&value, indent).map_err(map_encode_err)?;
    Ok(PyBytes::new(py, &bytes).unbind())
}

/// Parse a JSON document into a Python object.
///
/// Args:
///     data: The document as str or bytes.
///
/// Returns:
///     The parsed value. Objects become dicts that keep member order,
///     and integers beyond 64 bits come back as Python ints.
///
/// Raises:
///     ValueError: If the input is not a str or bytes, is not valid JSON,
///         or is nested too deeply.
#[pyfunction]
fn loads(py: Python<'_>, data: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    let value = if let Ok(s) = data.downcast::<PyString>() {
        jayl_core::loads(s.to_cow()?.as_bytes())
    } else if let Ok(b) = data.downcast::<PyBytes>() {
        jayl_core::loads(b.as_bytes())
    } else {
        return Err(PyValueError::new_err("string or bytes expected"));
    }
    .map_err(|e| PyValueError::new_err(e.to_string()))?;
    value_to_py(py, &value)
}

/// Serialize a Python object as JSON into a file-like object.
///
/// Args:
///     obj: The object to serialize (see `dumps`).
///     fp: Any object with a `write()` method accepting bytes.
///     indent: Indent width for pretty output (see `dumps`).
///
/// Raises:
///     TypeError: If `fp` has no `write()` method, or the object has no
///         JSON form.
#[pyfunction]
#[pyo3(signature = (obj, fp, indent=None))]
fn dump(
    py: Python<'_>,
    obj: &Bound<'_, PyAny>,
    fp: &Bound<'_, PyAny>,
    indent: Option<i64>,
) -> PyResult<()> {
    if !fp.hasattr("write")? {
        return Err(PyTypeError::new_err("fp must have a write() method"));
    }
    let payload = dumps(py, obj, indent)?;
    fp.call_method1("write", (payload,))?;
    Ok(())
}

/// Parse a JSON document from a file-like object.
///
/// Args:
///     fp: Any object with a `read()` method returning str or bytes.
///
/// Returns:
///     The parsed value (see `loads`).
///
/// Raises:
///     TypeError: If `fp` has no `read()` method.
///     ValueError: If the content is not valid JSON.
#[pyfunction]
fn load(py: Python<'_>, fp: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    if !fp.hasattr("read")? {
        return Err(PyTypeError::new_err("fp must have a read() method"));
    }
    let data = fp.call_method0("read")?;
    loads(py, &data)
}

/// Alias of `load`, kept for API compatibility with earlier releases.
#[pyfunction]
fn iterload(py: Python<'_>, fp: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    load(py, fp)
}

/// The `jayl` Python module, implemented in Rust via PyO3.
#[pymodule]
fn jayl(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(dumps, m)?)?;
    m.add_function(wrap_pyfunction!(loads, m)?)?;
    m.add_function(wrap_pyfunction!(dump, m)?)?;
    m.add_function(wrap_pyfunction!(load, m)?)?;
    m.add_function(wrap_pyfunction!(iterload, m)?)?;
    Ok(())
}
