//! The tagged value model: the tree JSON documents decode into and encode
//! from.
//!
//! Every JSON shape has exactly one [`Value`] variant, so encode dispatch
//! is a closed, exhaustive match. Two deliberate asymmetries with textbook
//! JSON models:
//!
//! - Strings are **byte sequences** ([`ByteString`]). The encoder never
//!   validates their encoding; bytes outside the escape set pass through
//!   verbatim. The decode side only ever produces valid UTF-8, because the
//!   scanner validates it.
//! - Integers split into native [`Value::Int`] and textual
//!   [`Value::BigInt`] ([`BigNum`]), so magnitude never silently becomes a
//!   float.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::{EncodeError, IntegerOverflowError};

// ---------------------------------------------------------------------------
// ByteString
// ---------------------------------------------------------------------------

/// Owned byte-string payload of [`Value::String`] and object keys.
///
/// JSON string content with no encoding opinion: construct one from text or
/// raw bytes, and it round-trips through the encoder untouched except for
/// the mandatory escapes.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct ByteString(Vec<u8>);

impl ByteString {
    pub fn new() -> Self {
        ByteString(Vec::new())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The content as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// The content as text, replacing invalid sequences.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "{s:?}"),
            None => write!(f, "b\"{}\"", self.0.escape_ascii()),
        }
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl std::ops::Deref for ByteString {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        ByteString(s.as_bytes().to_vec())
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        ByteString(s.into_bytes())
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        ByteString(bytes)
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        ByteString(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(bytes: &[u8; N]) -> Self {
        ByteString(bytes.to_vec())
    }
}

impl PartialEq<str> for ByteString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for ByteString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<[u8]> for ByteString {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<&[u8]> for ByteString {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// BigNum
// ---------------------------------------------------------------------------

/// An integer kept as its decimal text, for magnitudes a 64-bit integer
/// cannot hold. Encodes as a raw (unquoted) number token.
///
/// The text is validated against the JSON integer grammar: an optional
/// minus, then either `0` or a nonzero leading digit. Decoding only
/// produces a `BigNum` when the token overflows `i64`; nothing stops
/// constructing a small one by hand, but be aware it will read back as
/// [`Value::Int`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigNum(Box<str>);

impl BigNum {
    /// The decimal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        digits.len() == 1 || !digits.starts_with('0')
    }
}

/// The text was not a plain decimal integer literal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid decimal integer literal")]
pub struct ParseBigNumError;

impl FromStr for BigNum {
    type Err = ParseBigNumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if BigNum::is_valid(s) {
            Ok(BigNum(s.into()))
        } else {
            Err(ParseBigNumError)
        }
    }
}

impl From<i64> for BigNum {
    fn from(v: i64) -> Self {
        BigNum(v.to_string().into())
    }
}

impl From<u64> for BigNum {
    fn from(v: u64) -> Self {
        BigNum(v.to_string().into())
    }
}

impl From<i128> for BigNum {
    fn from(v: i128) -> Self {
        BigNum(v.to_string().into())
    }
}

impl From<u128> for BigNum {
    fn from(v: u128) -> Self {
        BigNum(v.to_string().into())
    }
}

impl TryFrom<&BigNum> for i64 {
    type Error = IntegerOverflowError;

    fn try_from(value: &BigNum) -> Result<Self, Self::Error> {
        value.0.parse().map_err(|_| IntegerOverflowError)
    }
}

impl fmt::Debug for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigNum({})", self.0)
    }
}

impl fmt::Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// String-keyed map that keeps insertion order, without reaching for an
/// external ordered-map crate.
///
/// Keys are unique: [`Map::insert`] on an existing key replaces the value
/// in place, keeping the key's original position (last write wins).
/// Lookups are linear scans, which is the right trade for the small
/// objects JSON documents typically carry.
#[derive(Clone, Default)]
pub struct Map {
    entries: Vec<(ByteString, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Map {
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Map {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Value> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find(|(k, _)| k.as_bytes() == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut Value> {
        let key = key.as_ref();
        self.entries
            .iter_mut()
            .find(|(k, _)| k.as_bytes() == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key).is_some()
    }

    /// Insert, replacing any existing value under the same key and keeping
    /// the key's original position. Returns the replaced value.
    pub fn insert(&mut self, key: impl Into<ByteString>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (ByteString, Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ByteString> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Mapping equality: same keys, same values, order ignored.
impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k) == Some(v))
    }
}

impl fmt::Debug for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<ByteString>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<ByteString>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for Map {
    type Item = (ByteString, Value);
    type IntoIter = std::vec::IntoIter<(ByteString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = &'a (ByteString, Value);
    type IntoIter = std::slice::Iter<'a, (ByteString, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A JSON document as a tree of tagged values.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Integer within the native 64-bit signed range.
    Int(i64),
    /// Integer outside the native range; see [`BigNum`].
    BigInt(BigNum),
    /// IEEE-754 double. Comparison follows IEEE semantics, so a NaN value
    /// is not equal to itself.
    Float(f64),
    String(ByteString),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    /// A short name for the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::BigInt(_) => "bigint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, if this is an `Int` or a `BigInt` that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::BigInt(b) => i64::try_from(b).ok(),
            _ => None,
        }
    }

    /// The float value. Deliberately strict: integers do not coerce, since
    /// the tags are part of the model.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// String content as text, when it is a string holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => s.as_str(),
            _ => None,
        }
    }

    /// Raw string content.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Turn this value into an object key, applying the numeric coercion
    /// rule: strings pass through, integers and floats become their
    /// decimal text. Everything else has no key form.
    ///
    /// ```
    /// use jayl_core::Value;
    ///
    /// assert_eq!(Value::Int(1).into_object_key().unwrap(), "1");
    /// assert!(Value::Null.into_object_key().is_err());
    /// ```
    pub fn into_object_key(self) -> Result<ByteString, EncodeError> {
        match self {
            Value::String(s) => Ok(s),
            Value::Int(i) => Ok(ByteString::from(i.to_string())),
            Value::BigInt(b) => Ok(ByteString::from(b.as_str())),
            Value::Float(f) => {
                let mut buf = ryu::Buffer::new();
                Ok(ByteString::from(buf.format(f)))
            }
            other => Err(EncodeError::UnsupportedKeyType {
                found: other.type_name(),
            }),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Picks `Int` when the value fits the native range, `BigInt` otherwise.
impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(BigNum::from(v)),
        }
    }
}

/// Picks `Int` when the value fits the native range, `BigInt` otherwise.
impl From<i128> for Value {
    fn from(v: i128) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(BigNum::from(v)),
        }
    }
}

/// Picks `Int` when the value fits the native range, `BigInt` otherwise.
impl From<u128> for Value {
    fn from(v: u128) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::BigInt(BigNum::from(v)),
        }
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(ByteString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(ByteString::from(s))
    }
}

/// Bytes are string content in this model.
impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::String(ByteString::from(bytes))
    }
}

/// Bytes are string content in this model.
impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::String(ByteString::from(bytes))
    }
}

impl From<ByteString> for Value {
    fn from(s: ByteString) -> Self {
        Value::String(s)
    }
}

impl From<BigNum> for Value {
    fn from(n: BigNum) -> Self {
        Value::BigInt(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}
