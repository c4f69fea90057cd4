//! Sapphire Introspection Component
//!
//! Exposes the compiler front end to embedded Sapphire programs through the
//! `Ripper` façade: `tokenize`, `parse`, `compile`, `token` and
//! `format_token_kind`, each a pure function from argument values to a
//! result value. A host runtime binds them through an explicit [`Registry`];
//! nothing here uses process-wide state.
//!
//! # Example
//!
//! ```
//! use core_types::Value;
//! use introspection::ripper_registry;
//!
//! let registry = ripper_registry();
//! let printed = registry
//!     .call("Ripper", "parse", &[Value::string("foo 1")])
//!     .unwrap();
//! assert_eq!(printed, Value::string("self.foo(1)"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convert;
pub mod registry;
pub mod ripper;

pub use registry::{install, ripper_registry, BuiltinFn, Registry};
