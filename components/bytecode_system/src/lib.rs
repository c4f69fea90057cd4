//! Bytecode system for the Sapphire runtime
//!
//! This crate provides the instruction-set intermediate representation
//! produced by the bytecode compiler and consumed by the execution engine.
//!
//! # Features
//!
//! - Closed opcode set with stable string names
//! - One named instruction set per lexical scope (program, method, block)
//! - Parameter-list descriptors with parallel name/kind arrays
//! - Resolved jump anchors for control-flow instructions
//! - Serialization of all records with their wire field names
//!
//! # Example
//!
//! ```
//! use bytecode_system::{ArgSet, ArgKind, InstructionSet, Opcode, SetKind};
//!
//! let mut set = InstructionSet::new("foo", SetKind::Def);
//!
//! let mut args = ArgSet::new();
//! args.push("x", ArgKind::Normal);
//! set.arg_set = Some(args);
//!
//! // Emit instructions
//! set.emit(Opcode::GetLocal, 1, vec!["0".to_string(), "0".to_string()]);
//! set.emit(Opcode::Leave, 1, vec![]);
//!
//! assert!(set.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod instruction;
pub mod opcode;

// Re-export main types at crate root
pub use instruction::{ArgKind, ArgSet, Instruction, InstructionSet, SetKind};
pub use opcode::Opcode;
