//! Abstract Syntax Tree node definitions
//!
//! Nodes are built bottom-up by the parser and never mutated afterwards;
//! the printer and the bytecode compiler only read the tree. Every node
//! records the 1-based source line it started on.

/// Complete program: an ordered list of statements
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order
    pub statements: Vec<Statement>,
}

/// Sapphire statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Class definition
    Class {
        /// Class name
        name: String,
        /// Superclass name from a `< Super` clause
        superclass: Option<String>,
        /// Class body
        body: Vec<Statement>,
        /// Source line
        line: u32,
    },

    /// Module definition
    Module {
        /// Module name
        name: String,
        /// Module body
        body: Vec<Statement>,
        /// Source line
        line: u32,
    },

    /// Method definition
    Def {
        /// Method name
        name: String,
        /// Whether this is an instance or singleton method
        receiver: MethodReceiver,
        /// Parameter names in declaration order
        params: Vec<String>,
        /// Method body
        body: Vec<Statement>,
        /// Source line
        line: u32,
    },

    /// While loop
    While {
        /// Loop condition
        condition: Expression,
        /// Loop body
        body: Vec<Statement>,
        /// Source line
        line: u32,
    },

    /// Expression statement
    Expression(Expression),
}

impl Statement {
    /// Source line the statement started on
    pub fn line(&self) -> u32 {
        match self {
            Statement::Class { line, .. }
            | Statement::Module { line, .. }
            | Statement::Def { line, .. }
            | Statement::While { line, .. } => *line,
            Statement::Expression(e) => e.line(),
        }
    }
}

/// Kind of receiver a method definition binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodReceiver {
    /// Ordinary instance method
    Instance,
    /// Singleton (class-level) method defined via `def self.name`
    SelfSingleton,
}

/// Receiver of a method call.
///
/// The parser resolves "is this a self-call?" exactly once; an implicit
/// receiver is kept distinct from an explicitly written `self` so that
/// later passes never have to re-derive the difference, even though the
/// canonical printer renders both as `self.`.
#[derive(Debug, Clone, PartialEq)]
pub enum Receiver {
    /// No receiver written in the source; dispatches on `self`
    Implicit,
    /// Explicitly written receiver expression (including explicit `self`)
    Explicit(Box<Expression>),
}

/// Block literal attached to a method call
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLiteral {
    /// Block parameter names
    pub params: Vec<String>,
    /// Block body
    pub body: Vec<Statement>,
    /// Source line
    pub line: u32,
}

/// Sapphire expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier (local variable or receiverless method name)
    Identifier {
        /// Name
        name: String,
        /// Source line
        line: u32,
    },

    /// Constant reference, possibly qualified (`A::B::C`)
    Constant {
        /// Scope-resolution chain, outermost first; always non-empty
        path: Vec<String>,
        /// Source line
        line: u32,
    },

    /// Instance variable (`@name`, stored with the sigil)
    InstanceVariable {
        /// Name including the leading `@`
        name: String,
        /// Source line
        line: u32,
    },

    /// Integer literal
    Integer {
        /// Value
        value: i64,
        /// Source line
        line: u32,
    },

    /// Float literal
    Float {
        /// Value
        value: f64,
        /// Source line
        line: u32,
    },

    /// String literal
    Str {
        /// Value with escapes resolved
        value: String,
        /// Source line
        line: u32,
    },

    /// Boolean literal
    Boolean {
        /// Value
        value: bool,
        /// Source line
        line: u32,
    },

    /// Nil literal
    Nil {
        /// Source line
        line: u32,
    },

    /// The `self` expression
    SelfRef {
        /// Source line
        line: u32,
    },

    /// The `get_block` expression
    GetBlock {
        /// Source line
        line: u32,
    },

    /// Prefix expression (`!x`, `-x`)
    Prefix {
        /// Operator spelling
        operator: String,
        /// Operand
        right: Box<Expression>,
        /// Source line
        line: u32,
    },

    /// Infix expression
    Infix {
        /// Operator spelling
        operator: String,
        /// Left operand
        left: Box<Expression>,
        /// Right operand
        right: Box<Expression>,
        /// Source line
        line: u32,
    },

    /// Assignment to an identifier, instance variable or constant
    Assignment {
        /// Target (must be an assignable expression)
        target: Box<Expression>,
        /// Value
        value: Box<Expression>,
        /// Source line
        line: u32,
    },

    /// Method call with an implicit or explicit receiver
    MethodCall {
        /// Receiver as resolved at parse time
        receiver: Receiver,
        /// Method name
        method: String,
        /// Arguments in evaluation order
        arguments: Vec<Expression>,
        /// Attached block literal
        block: Option<BlockLiteral>,
        /// Source line
        line: u32,
    },

    /// Yield to the current method's block
    Yield {
        /// Arguments in evaluation order
        arguments: Vec<Expression>,
        /// Source line
        line: u32,
    },

    /// Conditional expression
    If {
        /// Condition
        condition: Box<Expression>,
        /// Statements run when the condition is truthy
        consequence: Vec<Statement>,
        /// Statements run otherwise
        alternative: Option<Vec<Statement>>,
        /// Source line
        line: u32,
    },
}

impl Expression {
    /// Source line the expression started on
    pub fn line(&self) -> u32 {
        match self {
            Expression::Identifier { line, .. }
            | Expression::Constant { line, .. }
            | Expression::InstanceVariable { line, .. }
            | Expression::Integer { line, .. }
            | Expression::Float { line, .. }
            | Expression::Str { line, .. }
            | Expression::Boolean { line, .. }
            | Expression::Nil { line }
            | Expression::SelfRef { line }
            | Expression::GetBlock { line }
            | Expression::Prefix { line, .. }
            | Expression::Infix { line, .. }
            | Expression::Assignment { line, .. }
            | Expression::MethodCall { line, .. }
            | Expression::Yield { line, .. }
            | Expression::If { line, .. } => *line,
        }
    }
}
