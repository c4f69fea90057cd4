//! Sapphire error types and error handling.
//!
//! Every fallible operation in the front end returns these as plain values;
//! no stage uses panics or non-local control transfer for expected failures.

use thiserror::Error;

/// The kind of Sapphire error.
///
/// These correspond to the user-visible error classes of the host runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong number of arguments passed to an operation
    ArgumentError,
    /// Argument present but of the wrong kind
    TypeError,
    /// Malformed grammar rejected by the parser
    ParseError,
    /// Compilation failure (only ever a parse failure passed through)
    CompileError,
    /// A disabled capability was invoked (e.g. constructing the façade)
    UnsupportedMethodError,
    /// Internal engine error; should be unreachable given the IR invariants
    InternalError,
}

impl ErrorKind {
    /// Stable class name for this error kind
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::ArgumentError => "ArgumentError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::CompileError => "CompileError",
            ErrorKind::UnsupportedMethodError => "UnsupportedMethodError",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

/// A structured Sapphire error with kind, source line and message.
///
/// The line is best-effort: 0 when no source location applies (argument
/// guards, construction errors).
///
/// # Examples
///
/// ```
/// use core_types::{SapphireError, ErrorKind};
///
/// let error = SapphireError::new(ErrorKind::ParseError, 3, "unexpected token `end`");
/// assert_eq!(error.line, 3);
/// assert_eq!(error.to_string(), "ParseError: unexpected token `end`");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}: {message}", kind.name())]
pub struct SapphireError {
    /// The class of error
    pub kind: ErrorKind,
    /// 1-based source line the error refers to, or 0 when not applicable
    pub line: u32,
    /// Human-readable error message
    pub message: String,
}

impl SapphireError {
    /// Create a new error
    pub fn new(kind: ErrorKind, line: u32, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }
}
