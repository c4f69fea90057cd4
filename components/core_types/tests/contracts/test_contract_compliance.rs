//! Contract compliance tests for core_types
//!
//! These verify the shapes other components and the host runtime rely on:
//! the closed error taxonomy and the value variants the native-value bridge
//! round-trips.

use core_types::{ErrorKind, SapphireError, Value};

#[test]
fn test_value_has_all_bridge_variants() {
    let values = [
        Value::Integer(0),
        Value::Float(0.0),
        Value::Str(String::new()),
        Value::Boolean(true),
        Value::Nil,
        Value::Array(Vec::new()),
        Value::Hash(Vec::new()),
    ];
    let names: Vec<&str> = values.iter().map(|v| v.kind_name()).collect();
    assert_eq!(
        names,
        vec!["Integer", "Float", "String", "Boolean", "Nil", "Array", "Hash"]
    );
}

#[test]
fn test_error_has_kind_line_message_fields() {
    let error = SapphireError {
        kind: ErrorKind::ParseError,
        line: 7,
        message: "nesting too deep".to_string(),
    };
    assert_eq!(error.kind, ErrorKind::ParseError);
    assert_eq!(error.line, 7);
    assert_eq!(error.message, "nesting too deep");
}

#[test]
fn test_error_kind_is_copy() {
    let kind = ErrorKind::TypeError;
    let copy = kind;
    assert_eq!(kind, copy);
}

#[test]
fn test_integer_values_are_sixty_four_bit() {
    let value = Value::Integer(i64::MAX);
    assert_eq!(value, Value::Integer(9_223_372_036_854_775_807));
}
