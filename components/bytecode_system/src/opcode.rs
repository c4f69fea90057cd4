//! Bytecode opcodes for the Sapphire execution engine
//!
//! Defines the closed set of instruction actions for the stack-based VM.
//! The string form of each action is part of the wire contract consumed by
//! external tooling and must remain stable.

use serde::Serialize;
use std::fmt;

/// Bytecode opcodes for Sapphire execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Opcode {
    // Literals and receivers
    /// Push the current receiver
    #[serde(rename = "putself")]
    PutSelf,
    /// Push a literal value (integer, float or boolean) given as a parameter
    #[serde(rename = "putobject")]
    PutObject,
    /// Push a string literal given as a parameter
    #[serde(rename = "putstring")]
    PutString,
    /// Push nil
    #[serde(rename = "putnil")]
    PutNil,

    // Variables
    /// Load a local variable; parameters are slot index and scope depth
    #[serde(rename = "getlocal")]
    GetLocal,
    /// Store into a local variable; parameters are slot index and scope depth
    #[serde(rename = "setlocal")]
    SetLocal,
    /// Load a constant by name
    #[serde(rename = "getconstant")]
    GetConstant,
    /// Store into a constant by name
    #[serde(rename = "setconstant")]
    SetConstant,
    /// Load an instance variable by name
    #[serde(rename = "getinstancevariable")]
    GetInstanceVariable,
    /// Store into an instance variable by name
    #[serde(rename = "setinstancevariable")]
    SetInstanceVariable,

    // Calls
    /// Invoke a method; parameters are name, argument count and an optional
    /// `block:<set name>` reference
    #[serde(rename = "send")]
    Send,
    /// Invoke the block attached to the current method frame
    #[serde(rename = "invokeblock")]
    InvokeBlock,
    /// Reify the block attached to the current method frame as a value
    #[serde(rename = "getblock")]
    GetBlock,

    // Definitions
    /// Define an instance method; the name is pushed via putstring first
    #[serde(rename = "def_method")]
    DefMethod,
    /// Define a singleton (class-level) method
    #[serde(rename = "def_singleton_method")]
    DefSingletonMethod,
    /// Open a class or module body; parameter is `class:<Name>` or
    /// `module:<Name>`, optionally followed by a superclass name
    #[serde(rename = "def_class")]
    DefClass,

    // Control flow
    /// Jump to the anchor when the popped value is falsy
    #[serde(rename = "branchunless")]
    BranchUnless,
    /// Unconditional jump to the anchor
    #[serde(rename = "jump")]
    Jump,

    // Stack management
    /// Discard the top of the stack
    #[serde(rename = "pop")]
    Pop,
    /// Leave the current frame, returning the top of the stack
    #[serde(rename = "leave")]
    Leave,
}

impl Opcode {
    /// Stable string name of this action
    pub fn as_str(self) -> &'static str {
        match self {
            Opcode::PutSelf => "putself",
            Opcode::PutObject => "putobject",
            Opcode::PutString => "putstring",
            Opcode::PutNil => "putnil",
            Opcode::GetLocal => "getlocal",
            Opcode::SetLocal => "setlocal",
            Opcode::GetConstant => "getconstant",
            Opcode::SetConstant => "setconstant",
            Opcode::GetInstanceVariable => "getinstancevariable",
            Opcode::SetInstanceVariable => "setinstancevariable",
            Opcode::Send => "send",
            Opcode::InvokeBlock => "invokeblock",
            Opcode::GetBlock => "getblock",
            Opcode::DefMethod => "def_method",
            Opcode::DefSingletonMethod => "def_singleton_method",
            Opcode::DefClass => "def_class",
            Opcode::BranchUnless => "branchunless",
            Opcode::Jump => "jump",
            Opcode::Pop => "pop",
            Opcode::Leave => "leave",
        }
    }

    /// Whether this action carries a jump anchor when emitted
    pub fn is_branch(self) -> bool {
        matches!(self, Opcode::BranchUnless | Opcode::Jump)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
