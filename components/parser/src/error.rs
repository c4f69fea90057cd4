//! Parser error types and helpers

use core_types::{ErrorKind, SapphireError};

use crate::lexer::Token;

/// Create a parse error at a given line
pub fn parse_error(message: impl Into<String>, line: u32) -> SapphireError {
    SapphireError::new(ErrorKind::ParseError, line, message)
}

/// Create an unexpected token error
pub fn unexpected_token(expected: &str, got: &Token) -> SapphireError {
    parse_error(
        format!("Expected {}, got `{}`", expected, got.describe()),
        got.line,
    )
}

/// Create an unexpected end of input error
pub fn unexpected_eof(line: u32) -> SapphireError {
    parse_error("Unexpected end of input", line)
}
