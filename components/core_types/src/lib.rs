//! Core Sapphire value types and error handling.
//!
//! This crate provides the foundational types shared by every stage of the
//! Sapphire compiler front end: the structured error model and the
//! host-embeddable value representation used by the native-value bridge.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of host-embeddable Sapphire values
//! - [`SapphireError`] - Structured errors carrying a kind, line and message
//! - [`ErrorKind`] - The error taxonomy of the front end
//!
//! # Examples
//!
//! ```
//! use core_types::{Value, SapphireError, ErrorKind};
//!
//! // Build bridge values
//! let row = Value::Array(vec![
//!     Value::Integer(1),
//!     Value::Str("on_class".to_string()),
//! ]);
//! assert_eq!(row.kind_name(), "Array");
//!
//! // Build a structured error
//! let error = SapphireError::new(ErrorKind::TypeError, 0, "wrong argument");
//! assert_eq!(error.to_string(), "TypeError: wrong argument");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{ErrorKind, SapphireError};
pub use value::Value;
