//! Integration test suite for the Sapphire front end
//!
//! This crate provides integration tests that verify the lexer, parser,
//! printer, bytecode generator and introspection façade work together
//! correctly across component boundaries.

/// Re-export components for test convenience
pub mod components {
    pub use bytecode_system;
    pub use core_types;
    pub use introspection;
    pub use parser;
}
