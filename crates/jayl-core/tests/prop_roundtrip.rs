//! Property tests for the encode/decode pair.
//!
//! Strategies generate arbitrary value trees:
//! - keys and strings cover ASCII, multi-byte UTF-8, and the escaped range
//! - integers cover all of `i64`; big integers sit strictly outside it
//! - floats are arbitrary finite doubles (the shortest-form writer makes
//!   every finite double exact)
//!
//! Known exclusions: NaN and the infinities, which have no JSON form, and
//! non-UTF-8 byte strings, which the reader rejects by design of the
//! strict input path.

use jayl_core::{dumps, dumps_indent, loads, BigNum, Map, Value};
use proptest::prelude::*;

/// Object keys: short identifiers most of the time, with the odd empty or
/// punctuation-heavy one.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-z][a-z0-9_]{0,11}").unwrap(),
        1 => Just(String::new()),
        1 => prop::string::string_regex("[ -~]{1,8}").unwrap(),
    ]
}

/// String content, weighted toward the interesting corners.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        5 => prop::string::string_regex("[ -~]{0,16}").unwrap(),
        2 => prop::string::string_regex("\\PC{0,8}").unwrap(),
        1 => Just("quote\" back\\slash".to_string()),
        1 => Just("line\nbreak\ttab\rreturn".to_string()),
        1 => Just("\u{1}\u{1f}\u{7f}".to_string()),
        1 => Just("héllo wörld 👋".to_string()),
    ]
}

/// Integers spanning the whole 64-bit range, with the edges pinned.
fn arb_int() -> impl Strategy<Value = i64> {
    prop_oneof![
        4 => any::<i64>(),
        1 => Just(0i64),
        1 => Just(i64::MAX),
        1 => Just(i64::MIN),
    ]
}

/// Integer text strictly outside the 64-bit signed range, both signs.
fn arb_big() -> impl Strategy<Value = BigNum> {
    prop_oneof![
        ((i64::MAX as u128 + 1)..=u128::MAX).prop_map(|v| BigNum::from(v)),
        (i128::MIN..(i64::MIN as i128)).prop_map(|v| BigNum::from(v)),
    ]
}

/// Finite doubles; the writer refuses the rest.
fn arb_float() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite doubles only", |f| f.is_finite())
}

/// One scalar leaf. `with_big` switches big integers on or off; the
/// serde_json oracle has no arbitrary-precision model to compare against.
fn arb_leaf(with_big: bool) -> BoxedStrategy<Value> {
    let base = prop_oneof![
        1 => Just(Value::Null),
        1 => any::<bool>().prop_map(Value::Bool),
        3 => arb_int().prop_map(Value::Int),
        2 => arb_float().prop_map(Value::Float),
        3 => arb_text().prop_map(Value::from),
    ];
    if with_big {
        prop_oneof![
            6 => base,
            1 => arb_big().prop_map(Value::BigInt),
        ]
        .boxed()
    } else {
        base.boxed()
    }
}

fn arb_value_inner(depth: u32, with_big: bool) -> BoxedStrategy<Value> {
    if depth == 0 {
        return arb_leaf(with_big);
    }
    prop_oneof![
        3 => arb_leaf(with_big),
        1 => prop::collection::vec(arb_value_inner(depth - 1, with_big), 0..5)
            .prop_map(Value::Array),
        1 => prop::collection::vec((arb_key(), arb_value_inner(depth - 1, with_big)), 0..5)
            .prop_map(|pairs| Value::Object(pairs.into_iter().collect::<Map>())),
    ]
    .boxed()
}

/// Arbitrary documents up to three container levels deep.
fn arb_value() -> BoxedStrategy<Value> {
    arb_value_inner(3, true)
}

/// Like [`arb_value`] but without big integers, for the serde_json oracle.
fn arb_plain_value() -> BoxedStrategy<Value> {
    arb_value_inner(3, false)
}

/// Mirror a value into serde_json's model for the differential checks.
fn to_serde(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::BigInt(_) => unreachable!("oracle values carry no big integers"),
        Value::Float(f) => serde_json::Value::from(*f),
        Value::String(s) => {
            serde_json::Value::String(s.as_str().expect("oracle strings are UTF-8").to_owned())
        }
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_serde).collect()),
        Value::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| {
                    (
                        k.as_str().expect("oracle keys are UTF-8").to_owned(),
                        to_serde(v),
                    )
                })
                .collect(),
        ),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Decoding what we encode gives back the identical tree, tags included.
    #[test]
    fn roundtrip_preserves_every_value(value in arb_value()) {
        let text = dumps(&value).expect("encode failed");
        let back = loads(&text).expect("reparse failed");
        prop_assert_eq!(back, value, "text was {}", String::from_utf8_lossy(&text));
    }

    /// Pretty output reparses to the same tree at any indent width.
    #[test]
    fn pretty_output_reparses(value in arb_value(), width in 0usize..9) {
        let text = dumps_indent(&value, Some(width)).expect("encode failed");
        let back = loads(&text).expect("reparse failed");
        prop_assert_eq!(back, value);
    }

    /// Compact bytes match serde_json for the shared model subset.
    #[test]
    fn compact_bytes_match_serde_json(value in arb_plain_value()) {
        let ours = dumps(&value).expect("encode failed");
        let reference = serde_json::to_vec(&to_serde(&value)).expect("serde_json failed");
        prop_assert_eq!(
            String::from_utf8_lossy(&ours),
            String::from_utf8_lossy(&reference)
        );
    }

    /// Everything serde_json emits for plain trees decodes to the same tree.
    #[test]
    fn decodes_serde_json_output(value in arb_plain_value()) {
        let reference = serde_json::to_vec(&to_serde(&value)).expect("serde_json failed");
        let back = loads(&reference).expect("well-formed input must decode");
        prop_assert_eq!(back, value);
    }

    /// The reader never panics, whatever the bytes.
    #[test]
    fn decoding_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = loads(&bytes);
    }
}
