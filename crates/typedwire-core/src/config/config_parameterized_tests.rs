#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized config JSON parsing tests
// ============================================================================

#[test_case(r#"{"log_level": "info"}"#, LogLevel::Info)]
#[test_case(r#"{"log_level": "debug"}"#, LogLevel::Debug)]
#[test_case(r#"{"log_level": "warn"}"#, LogLevel::Warn)]
#[test_case(r#"{"log_level": "error"}"#, LogLevel::Error)]
#[test_case(r#"{"log_level": "trace"}"#, LogLevel::Trace)]
#[test_case(r#"{"log_level": "off"}"#, LogLevel::Off)]
#[test_case(r#"{"log_level": "DEBUG"}"#, LogLevel::Debug)]
fn MarshallerConfig___log_level_json___parses_correctly(json: &str, expected: LogLevel) {
    let config = MarshallerConfig::from_json(json.as_bytes()).unwrap();
    assert_eq!(config.log_level(), expected);
}

#[test_case(r#"{"pretty": true}"#, true)]
#[test_case(r#"{"pretty": false}"#, false)]
#[test_case(r#"{}"#, false)]
fn MarshallerConfig___pretty_json___parses_correctly(json: &str, expected: bool) {
    let config = MarshallerConfig::from_json(json.as_bytes()).unwrap();
    assert_eq!(config.pretty, expected);
}

#[test_case(r#"{"pretty": "yes"}"#)]
#[test_case(r#"{"log_level": 3}"#)]
#[test_case(r#""text""#)]
fn MarshallerConfig___malformed_json___returns_error(json: &str) {
    assert!(MarshallerConfig::from_json(json.as_bytes()).is_err());
}
