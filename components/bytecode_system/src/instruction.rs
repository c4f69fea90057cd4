//! Instruction-set representation
//!
//! One [`InstructionSet`] is produced per lexical scope of the compiled
//! program: the top level, each method definition, each class or module
//! body, and each block literal. The execution engine pushes a call frame
//! per set; tooling consumes the serialized form.

use crate::opcode::Opcode;
use serde::Serialize;

/// Parameter kind tags for an [`ArgSet`].
///
/// The numeric values are part of the IR contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Plain positional parameter
    Normal = 0,
    /// Positional parameter with a default value
    Optional = 1,
    /// Splat parameter collecting the remaining positionals
    Splat = 2,
    /// Keyword parameter
    Keyword = 3,
    /// Explicit block parameter
    Block = 4,
}

impl ArgKind {
    /// Numeric tag of this kind
    pub fn tag(self) -> i64 {
        self as i64
    }
}

/// Descriptor for a parameter list's shape.
///
/// `names` and `types` are parallel arrays of equal length; the only way to
/// grow them is [`ArgSet::push`], which keeps them in lockstep.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArgSet {
    /// Parameter names in declaration order
    names: Vec<String>,
    /// Parameter kind tags, parallel to `names`
    types: Vec<i64>,
}

impl ArgSet {
    /// Create an empty descriptor
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, name: impl Into<String>, kind: ArgKind) {
        self.names.push(name.into());
        self.types.push(kind.tag());
    }

    /// Parameter names in declaration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Parameter kind tags, parallel to [`ArgSet::names`]
    pub fn types(&self) -> &[i64] {
        &self.types
    }

    /// Number of parameters described
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the descriptor is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A single bytecode instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instruction {
    /// The action to perform
    pub action: Opcode,
    /// Ordinal of this instruction within its set (the bytecode line)
    pub line: usize,
    /// 1-based source line of the originating AST node
    pub source_line: u32,
    /// Action parameters as strings
    pub params: Vec<String>,
    /// Resolved jump target index; present only on control-flow actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<usize>,
}

/// Kind of lexical scope an instruction set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetKind {
    /// The top-level program scope
    Program,
    /// A method definition body
    Def,
    /// A class or module body
    DefClass,
    /// A block literal body
    Block,
}

impl SetKind {
    /// Stable string name of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            SetKind::Program => "Program",
            SetKind::Def => "Def",
            SetKind::DefClass => "DefClass",
            SetKind::Block => "Block",
        }
    }
}

/// A named, ordered list of instructions for one lexical scope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructionSet {
    /// Name of the scope (`ProgramStart`, the method name, `Block:<n>`, ...)
    pub name: String,
    /// Scope kind
    #[serde(rename = "type")]
    pub kind: SetKind,
    /// Parameter descriptor; present only for scopes that accept parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg_set: Option<ArgSet>,
    /// Instructions in execution order
    pub instructions: Vec<Instruction>,
}

impl InstructionSet {
    /// Create an empty instruction set
    pub fn new(name: impl Into<String>, kind: SetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            arg_set: None,
            instructions: Vec::new(),
        }
    }

    /// Append an instruction, returning its index within the set
    pub fn emit(&mut self, action: Opcode, source_line: u32, params: Vec<String>) -> usize {
        let index = self.instructions.len();
        self.instructions.push(Instruction {
            action,
            line: index,
            source_line,
            params,
            anchor: None,
        });
        index
    }

    /// Back-fill the anchor of the control-flow instruction at `index`
    pub fn set_anchor(&mut self, index: usize, target: usize) {
        debug_assert!(self.instructions[index].action.is_branch());
        self.instructions[index].anchor = Some(target);
    }

    /// Index the next emitted instruction will receive
    pub fn next_index(&self) -> usize {
        self.instructions.len()
    }

    /// Check the structural invariants of a completed set: every anchor
    /// resolves within this set, anchors appear only on control-flow
    /// actions, and the parameter descriptor arrays have equal length.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(args) = &self.arg_set {
            if args.names().len() != args.types().len() {
                return Err(format!("{}: arg_set arrays differ in length", self.name));
            }
        }
        for inst in &self.instructions {
            match inst.anchor {
                Some(target) if !inst.action.is_branch() => {
                    return Err(format!(
                        "{}: anchor {} on non-branch {}",
                        self.name, target, inst.action
                    ));
                }
                Some(target) if target >= self.instructions.len() => {
                    return Err(format!(
                        "{}: anchor {} out of range ({} instructions)",
                        self.name,
                        target,
                        self.instructions.len()
                    ));
                }
                None if inst.action.is_branch() => {
                    return Err(format!("{}: unresolved {} anchor", self.name, inst.action));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
