//! Tests for the token wire format

use crate::domain::value_objects::UnixMinute;
use crate::errors::TokenError;
use crate::services::token::{build_unsigned, decode_kv_payload, encode_kv_payload, parse_token};

#[test]
fn test_parse_three_segments() {
    let parts = parse_token("usr:42.1000010.c2lnbmF0dXJl").unwrap();

    assert_eq!(parts.payload, "usr:42");
    assert_eq!(parts.expires_at, UnixMinute::new(1_000_010));
    assert_eq!(parts.signature, "c2lnbmF0dXJl");
    assert_eq!(parts.unsigned, "usr:42.1000010");
}

#[test]
fn test_parse_rejects_wrong_segment_count() {
    for token in ["", "usr:42", "usr:42.1000010", "a.1.b.c", "not.a.valid.token.at.all"] {
        assert_eq!(parse_token(token), Err(TokenError::Malformed), "{}", token);
    }
}

#[test]
fn test_parse_rejects_bad_expiry() {
    assert_eq!(parse_token("usr:1.abc.sig"), Err(TokenError::Malformed));
    assert_eq!(parse_token("usr:1.-5.sig"), Err(TokenError::Malformed));
    assert_eq!(parse_token("usr:1..sig"), Err(TokenError::Malformed));
    assert_eq!(parse_token("usr:1.5."), Err(TokenError::Malformed));
}

#[test]
fn test_build_unsigned() {
    assert_eq!(
        build_unsigned("usr:42", UnixMinute::new(1_000_010)),
        "usr:42.1000010"
    );
}

#[test]
fn test_encode_kv_payload() {
    let payload = encode_kv_payload(&[("usr", "42"), ("role", "admin")]).unwrap();
    assert_eq!(payload, "usr:42,role:admin");

    let empty: [(&str, &str); 0] = [];
    assert_eq!(encode_kv_payload(&empty).unwrap(), "");
}

#[test]
fn test_encode_rejects_reserved_characters() {
    for entries in [
        [("usr", "4.2")],
        [("usr", "4,2")],
        [("usr", "4:2")],
        [("u.sr", "42")],
        [("", "42")],
    ] {
        assert!(matches!(
            encode_kv_payload(&entries),
            Err(TokenError::ReservedCharacter { .. })
        ));
    }
}

#[test]
fn test_decode_kv_payload() {
    let fields = decode_kv_payload("usr:42,role:admin");
    assert_eq!(fields.get("usr").map(String::as_str), Some("42"));
    assert_eq!(fields.get("role").map(String::as_str), Some("admin"));
    assert_eq!(fields.len(), 2);
}

#[test]
fn test_decode_skips_invalid_entries() {
    let fields = decode_kv_payload("usr:42,flag,:orphan,,note:");
    assert_eq!(fields.len(), 2);
    assert_eq!(fields.get("usr").map(String::as_str), Some("42"));
    assert_eq!(fields.get("note").map(String::as_str), Some(""));
}

#[test]
fn test_decode_last_duplicate_wins() {
    let fields = decode_kv_payload("usr:1,usr:2");
    assert_eq!(fields.get("usr").map(String::as_str), Some("2"));
}

#[test]
fn test_encode_decode_preserves_pairs() {
    let entries = [("ses", "17"), ("dev", "phone")];
    let fields = decode_kv_payload(&encode_kv_payload(&entries).unwrap());

    for (key, value) in entries {
        assert_eq!(fields.get(key).map(String::as_str), Some(value));
    }
}
