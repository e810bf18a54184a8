use jayl_core::{EncodeError, Generator, MAX_DEPTH};

/// Helper: run a build script against a fresh compact generator.
fn build(script: impl FnOnce(&mut Generator) -> Result<(), EncodeError>) -> Vec<u8> {
    let mut g = Generator::new();
    script(&mut g).expect("generation failed");
    g.into_bytes()
}

// ============================================================================
// Well-formed sequences
// ============================================================================

#[test]
fn writes_a_compact_object() {
    let out = build(|g| {
        g.open_object()?;
        g.write_string(b"id")?;
        g.write_int(7)?;
        g.write_string(b"name")?;
        g.write_string(b"seven")?;
        g.close_object()
    });
    assert_eq!(out, br#"{"id":7,"name":"seven"}"#.as_slice());
}

#[test]
fn writes_a_compact_array() {
    let out = build(|g| {
        g.open_array()?;
        g.write_bool(true)?;
        g.write_null()?;
        g.write_double(0.5)?;
        g.close_array()
    });
    assert_eq!(out, b"[true,null,0.5]".as_slice());
}

#[test]
fn raw_number_tokens_pass_through() {
    let out = build(|g| g.write_raw_number("36893488147419103232"));
    assert_eq!(out, b"36893488147419103232".as_slice());
}

#[test]
fn string_tokens_escape_the_control_range() {
    let out = build(|g| g.write_string(b"a\x00b\x1fc"));
    assert_eq!(out, br#""a bc""#.as_slice());
}

#[test]
fn string_tokens_pass_high_bytes_through() {
    let out = build(|g| g.write_string(b"f\xe9in"));
    assert_eq!(out, b"\"f\xe9in\"".as_slice());
}

#[test]
fn depth_and_completion_track_the_document() {
    let mut g = Generator::new();
    assert_eq!(g.depth(), 0);
    assert!(!g.is_complete());

    g.open_object().expect("open");
    assert_eq!(g.depth(), 1);
    g.write_string(b"a").expect("key");
    g.open_array().expect("open");
    assert_eq!(g.depth(), 2);
    g.close_array().expect("close");
    assert_eq!(g.depth(), 1);
    assert!(!g.is_complete());
    g.close_object().expect("close");

    assert_eq!(g.depth(), 0);
    assert!(g.is_complete());
}

// ============================================================================
// Pretty mode
// ============================================================================

#[test]
fn pretty_mode_places_newlines_and_indent() {
    let mut g = Generator::with_indent("  ");
    g.open_object().expect("open");
    g.write_string(b"a").expect("key");
    g.open_array().expect("open");
    g.write_int(1).expect("element");
    g.write_int(2).expect("element");
    g.close_array().expect("close");
    g.close_object().expect("close");

    assert!(g.is_complete());
    assert_eq!(g.as_bytes(), b"{\n  \"a\": [\n    1,\n    2\n  ]\n}\n");
}

#[test]
fn pretty_empty_containers_keep_their_blank_line() {
    let mut g = Generator::with_indent("    ");
    g.open_object().expect("open");
    g.close_object().expect("close");
    assert_eq!(g.as_bytes(), b"{\n\n}\n");

    let mut g = Generator::with_indent("    ");
    g.open_array().expect("open");
    g.close_array().expect("close");
    assert_eq!(g.as_bytes(), b"[\n\n]\n");
}

#[test]
fn compact_mode_emits_no_trailing_newline() {
    let mut g = Generator::new();
    g.write_int(5).expect("root");
    assert_eq!(g.into_bytes(), b"5".as_slice());
}

// ============================================================================
// Misuse
// ============================================================================

#[test]
fn second_root_value_is_rejected() {
    let mut g = Generator::new();
    g.write_null().expect("first root");
    let err = g.write_null().expect_err("root already complete");
    assert!(matches!(err, EncodeError::GenerationComplete), "got {err:?}");
    assert!(g.is_complete());
    assert_eq!(g.as_bytes(), b"null");
}

#[test]
fn closing_after_completion_is_rejected() {
    let mut g = Generator::new();
    g.open_array().expect("open");
    g.close_array().expect("close");
    let err = g.close_array().expect_err("root already complete");
    assert!(matches!(err, EncodeError::GenerationComplete), "got {err:?}");
}

#[test]
fn only_strings_may_sit_at_key_position() {
    let mut g = Generator::new();
    g.open_object().expect("open");

    let err = g.write_int(1).expect_err("int at key position");
    assert!(
        matches!(err, EncodeError::UnsupportedKeyType { found: "int" }),
        "got {err:?}"
    );
    let err = g.write_null().expect_err("null at key position");
    assert!(
        matches!(err, EncodeError::UnsupportedKeyType { found: "null" }),
        "got {err:?}"
    );
    let err = g.open_array().expect_err("array at key position");
    assert!(
        matches!(err, EncodeError::UnsupportedKeyType { found: "array" }),
        "got {err:?}"
    );

    // The object is still usable after each rejection.
    g.write_string(b"k").expect("key");
    g.write_int(1).expect("value");
    g.close_object().expect("close");
    assert_eq!(g.into_bytes(), br#"{"k":1}"#.as_slice());
}

#[test]
fn mismatched_closes_are_rejected() {
    let mut g = Generator::new();
    let err = g.close_object().expect_err("nothing to close");
    assert!(matches!(err, EncodeError::UnmatchedClose), "got {err:?}");

    let mut g = Generator::new();
    g.open_object().expect("open");
    let err = g.close_array().expect_err("wrong bracket");
    assert!(matches!(err, EncodeError::UnmatchedClose), "got {err:?}");
}

#[test]
fn a_key_without_its_value_cannot_be_closed_over() {
    let mut g = Generator::new();
    g.open_object().expect("open");
    g.write_string(b"orphan").expect("key");
    let err = g.close_object().expect_err("member value still pending");
    assert!(matches!(err, EncodeError::UnmatchedClose), "got {err:?}");
}

#[test]
fn non_finite_doubles_leave_no_trace() {
    let mut g = Generator::new();
    g.open_array().expect("open");
    g.write_int(1).expect("element");

    let before = g.as_bytes().len();
    let err = g.write_double(f64::NAN).expect_err("no JSON form exists");
    assert!(matches!(err, EncodeError::InvalidNumber(_)), "got {err:?}");
    assert_eq!(g.as_bytes().len(), before);

    g.write_int(2).expect("still usable");
    g.close_array().expect("close");
    assert_eq!(g.into_bytes(), b"[1,2]".as_slice());
}

#[test]
fn depth_guard_fires_before_any_output() {
    let mut g = Generator::new();
    for _ in 0..MAX_DEPTH {
        g.open_array().expect("within the limit");
    }
    assert_eq!(g.depth(), MAX_DEPTH);

    let before = g.as_bytes().len();
    let err = g.open_array().expect_err("limit reached");
    assert!(matches!(err, EncodeError::MaxDepthExceeded), "got {err:?}");
    assert_eq!(g.as_bytes().len(), before, "a rejected open must not emit");

    for _ in 0..MAX_DEPTH {
        g.close_array().expect("unwinding is unaffected");
    }
    assert!(g.is_complete());
    assert_eq!(g.into_bytes().len(), MAX_DEPTH * 2);
}
