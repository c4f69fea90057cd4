//! Builtin-method registry
//!
//! A host runtime owns one [`Registry`] per engine instance and dispatches
//! guest-level method calls through it. Two engines embedded in the same
//! process never share registry state.

use crate::ripper;
use core_types::{ErrorKind, SapphireError, Value};
use std::collections::HashMap;

/// A builtin method: pure function from arguments to a result value
pub type BuiltinFn = fn(&[Value]) -> Result<Value, SapphireError>;

/// Explicit table of builtin methods, keyed by class and method name
#[derive(Default)]
pub struct Registry {
    classes: HashMap<String, HashMap<String, BuiltinFn>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a method under a class name, replacing any previous binding
    pub fn define_method(&mut self, class: &str, method: &str, function: BuiltinFn) {
        self.classes
            .entry(class.to_string())
            .or_default()
            .insert(method.to_string(), function);
    }

    /// Look up a bound method
    pub fn lookup(&self, class: &str, method: &str) -> Option<BuiltinFn> {
        self.classes.get(class)?.get(method).copied()
    }

    /// Dispatch a method call.
    ///
    /// Unbound methods fail with an `UnsupportedMethodError`; the façade
    /// classes deliberately leave `new` unbound, so construction attempts
    /// take this path.
    pub fn call(&self, class: &str, method: &str, args: &[Value]) -> Result<Value, SapphireError> {
        match self.lookup(class, method) {
            Some(function) => function(args),
            None => Err(SapphireError::new(
                ErrorKind::UnsupportedMethodError,
                0,
                format!("Unsupported method #{} for {}", method, class),
            )),
        }
    }
}

/// Bind the `Ripper` façade methods into a registry
pub fn install(registry: &mut Registry) {
    registry.define_method("Ripper", "tokenize", ripper::tokenize);
    registry.define_method("Ripper", "parse", ripper::parse);
    registry.define_method("Ripper", "compile", ripper::compile);
    registry.define_method("Ripper", "token", ripper::token);
    registry.define_method("Ripper", "format_token_kind", ripper::format_token_kind);
}

/// Convenience constructor: a fresh registry with the façade installed
pub fn ripper_registry() -> Registry {
    let mut registry = Registry::new();
    install(&mut registry);
    registry
}
