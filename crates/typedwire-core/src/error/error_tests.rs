#![allow(non_snake_case)]

use super::*;
use std::error::Error as _;

#[test]
fn MarshallingError___unknown_type___displays_correctly() {
    let err = MarshallingError::UnknownType("com.example.Missing".into());

    let display = err.to_string();

    assert_eq!(display, "unknown type tag: com.example.Missing");
}

#[test]
fn MarshallingError___missing_field___returns_code_2() {
    let err = MarshallingError::MissingField("payloadClazz");

    assert_eq!(err.error_code(), 2);
    assert!(err.to_string().contains("payloadClazz"));
}

#[test]
fn MarshallingError___from_serde_error___converts_to_codec_error() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let err: MarshallingError = json_err.into();

    assert!(matches!(err, MarshallingError::Codec { .. }));
    assert!(err.source().is_some());
}

#[test]
fn MarshallingError___invalid_property___keeps_parse_error_as_source() {
    let parse_err = "seven".parse::<i32>().unwrap_err();

    let err = MarshallingError::InvalidProperty {
        name: "Priority",
        value: "seven".into(),
        source: parse_err,
    };

    assert!(err.source().is_some());
    assert_eq!(err.to_string(), "invalid property Priority: 'seven'");
}

#[test]
fn MarshallingError___mismatch___names_found_json_kind() {
    let err = MarshallingError::mismatch("string", "string", &serde_json::json!([1, 2]));

    assert_eq!(
        err.to_string(),
        "type mismatch for 'string': expected string, found array"
    );
}

#[test]
fn MarshallingError___all_variants___have_unique_codes() {
    let errors = vec![
        MarshallingError::codec(std::fmt::Error),
        MarshallingError::MissingField(""),
        MarshallingError::UnknownType("".into()),
        MarshallingError::mismatch("", "", &serde_json::Value::Null),
        MarshallingError::MalformedHeader {
            key: "".into(),
            reason: "".into(),
        },
        MarshallingError::InvalidProperty {
            name: "",
            value: "".into(),
            source: "x".parse::<i32>().unwrap_err(),
        },
        MarshallingError::NonFiniteNumber(f64::NAN),
        MarshallingError::DuplicateType("".into()),
    ];

    let codes: Vec<u32> = errors.iter().map(|e| e.error_code()).collect();
    let unique: std::collections::HashSet<u32> = codes.iter().copied().collect();

    assert_eq!(
        codes.len(),
        unique.len(),
        "All error codes should be unique"
    );
}

#[test]
fn json_kind___each_variant___returns_shape_name() {
    assert_eq!(json_kind(&serde_json::Value::Null), "null");
    assert_eq!(json_kind(&serde_json::json!(true)), "boolean");
    assert_eq!(json_kind(&serde_json::json!(1.5)), "number");
    assert_eq!(json_kind(&serde_json::json!("s")), "string");
    assert_eq!(json_kind(&serde_json::json!([])), "array");
    assert_eq!(json_kind(&serde_json::json!({})), "object");
}
