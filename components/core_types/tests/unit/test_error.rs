//! Unit tests for SapphireError and ErrorKind

use core_types::{ErrorKind, SapphireError};

#[test]
fn test_error_construction() {
    let error = SapphireError::new(ErrorKind::ParseError, 3, "unexpected token `end`");
    assert_eq!(error.kind, ErrorKind::ParseError);
    assert_eq!(error.line, 3);
    assert_eq!(error.message, "unexpected token `end`");
}

#[test]
fn test_display_prefixes_kind_name() {
    let error = SapphireError::new(ErrorKind::TypeError, 0, "Expect argument to be String. got: Integer");
    assert_eq!(
        error.to_string(),
        "TypeError: Expect argument to be String. got: Integer"
    );
}

#[test]
fn test_kind_names_are_stable() {
    let cases = [
        (ErrorKind::ArgumentError, "ArgumentError"),
        (ErrorKind::TypeError, "TypeError"),
        (ErrorKind::ParseError, "ParseError"),
        (ErrorKind::CompileError, "CompileError"),
        (ErrorKind::UnsupportedMethodError, "UnsupportedMethodError"),
        (ErrorKind::InternalError, "InternalError"),
    ];
    for (kind, name) in cases {
        assert_eq!(kind.name(), name);
    }
}

#[test]
fn test_errors_are_plain_values() {
    let error = SapphireError::new(ErrorKind::ArgumentError, 0, "Expect 1 argument. got=0");
    let cloned = error.clone();
    assert_eq!(error, cloned);
}

#[test]
fn test_line_zero_means_no_position() {
    let error = SapphireError::new(ErrorKind::UnsupportedMethodError, 0, "Unsupported method #new for Ripper");
    assert_eq!(error.line, 0);
}

#[test]
fn test_implements_std_error() {
    fn takes_error(_: &dyn std::error::Error) {}
    let error = SapphireError::new(ErrorKind::InternalError, 0, "boom");
    takes_error(&error);
}
