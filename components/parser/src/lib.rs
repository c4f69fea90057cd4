//! Sapphire Parser Component
//!
//! Provides the lexer, parser, canonical AST printer, and bytecode compiler
//! for the Sapphire language front end.
//!
//! # Overview
//!
//! - [`Lexer`] - Tokenizes Sapphire source code
//! - [`Token`] - Token types including identifiers, literals, keywords
//! - [`Parser`] - Recursive descent parser producing AST
//! - [`Program`] - Abstract Syntax Tree root
//! - [`print`] - Canonical AST-to-source renderer
//! - [`BytecodeGenerator`] - Converts AST to instruction sets
//!
//! # Example
//!
//! ```
//! use parser::{print, BytecodeGenerator, Parser};
//!
//! let source = "a = 1";
//! let mut parser = Parser::new(source);
//! let program = parser.parse_program().unwrap();
//! assert_eq!(print(&program), "a = 1");
//!
//! let mut gen = BytecodeGenerator::new();
//! let sets = gen.generate(&program).unwrap();
//! assert_eq!(sets[0].name, "ProgramStart");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod bytecode_gen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod scope;

pub use ast::{Expression, Program, Receiver, Statement};
pub use bytecode_gen::BytecodeGenerator;
pub use lexer::{Keyword, Lexer, Punctuator, Token, TokenKind};
pub use parser::Parser;
pub use printer::print;
