//! Bytecode generation from AST
//!
//! One instruction set is emitted per lexical scope: the top-level program,
//! each method definition, each class or module body, and each block
//! literal. Statements and expressions lower in evaluation order; the
//! receiver distinction was resolved at parse time, so implicit-receiver
//! calls lower exactly like explicit `self.` calls. Control flow emits
//! placeholder branches whose anchors are back-filled once the target index
//! is known; a successfully generated program never retains an unresolved
//! anchor.

use crate::ast::*;
use crate::scope::ScopeStack;
use bytecode_system::{ArgKind, ArgSet, InstructionSet, Opcode, SetKind};
use core_types::SapphireError;

/// Bytecode generator that converts an AST to instruction sets
pub struct BytecodeGenerator {
    sets: Vec<InstructionSet>,
    scopes: ScopeStack,
    block_count: usize,
}

impl BytecodeGenerator {
    /// Create a new bytecode generator
    pub fn new() -> Self {
        Self {
            sets: Vec::new(),
            scopes: ScopeStack::new(),
            block_count: 0,
        }
    }

    /// Generate instruction sets from a program.
    ///
    /// Generation itself cannot reject a well-formed tree; the `Result`
    /// mirrors the compile contract, whose only failure mode is a parse
    /// error propagated by the caller.
    pub fn generate(&mut self, program: &Program) -> Result<Vec<InstructionSet>, SapphireError> {
        self.sets.clear();
        self.scopes = ScopeStack::new();
        self.block_count = 0;

        self.scopes.push_method();
        let program_set = self.alloc_set("ProgramStart", SetKind::Program, None);
        self.compile_scope_body(program_set, &program.statements, 1)?;
        self.scopes.pop();

        for set in &self.sets {
            debug_assert!(set.validate().is_ok(), "malformed set {}", set.name);
        }
        Ok(std::mem::take(&mut self.sets))
    }

    // Statements ----------------------------------------------------------

    /// Compile the statements of one scope and close it with `leave`
    fn compile_scope_body(
        &mut self,
        set: usize,
        statements: &[Statement],
        fallback_line: u32,
    ) -> Result<(), SapphireError> {
        let mut last_line = fallback_line;
        if statements.is_empty() {
            self.emit(set, Opcode::PutNil, fallback_line, vec![]);
        } else {
            last_line = self.compile_statements(set, statements, true)?;
        }
        self.emit(set, Opcode::Leave, last_line, vec![]);
        Ok(())
    }

    /// Compile a statement list; when `keep_last` is set the final
    /// statement's value stays on the stack. Returns the last source line.
    fn compile_statements(
        &mut self,
        set: usize,
        statements: &[Statement],
        keep_last: bool,
    ) -> Result<u32, SapphireError> {
        let mut line = 0;
        for (i, statement) in statements.iter().enumerate() {
            let keep = keep_last && i == statements.len() - 1;
            self.compile_statement(set, statement, keep)?;
            line = statement.line();
        }
        Ok(line)
    }

    fn compile_statement(
        &mut self,
        set: usize,
        statement: &Statement,
        keep_value: bool,
    ) -> Result<(), SapphireError> {
        match statement {
            Statement::Expression(e) => {
                self.compile_expression(set, e)?;
                if !keep_value {
                    self.emit(set, Opcode::Pop, e.line(), vec![]);
                }
            }
            Statement::Def {
                name,
                receiver,
                params,
                body,
                line,
            } => self.compile_def(set, name, *receiver, params, body, *line)?,
            Statement::Class {
                name,
                superclass,
                body,
                line,
            } => self.compile_class(set, name, superclass.as_deref(), body, *line)?,
            Statement::Module { name, body, line } => {
                self.compile_module(set, name, body, *line)?
            }
            Statement::While {
                condition,
                body,
                line,
            } => {
                self.compile_while(set, condition, body, *line)?;
                if !keep_value {
                    self.emit(set, Opcode::Pop, *line, vec![]);
                }
            }
        }
        Ok(())
    }

    fn compile_def(
        &mut self,
        set: usize,
        name: &str,
        receiver: MethodReceiver,
        params: &[String],
        body: &[Statement],
        line: u32,
    ) -> Result<(), SapphireError> {
        let mut args = ArgSet::new();
        for param in params {
            args.push(param.clone(), ArgKind::Normal);
        }
        let def_set = self.alloc_set(name, SetKind::Def, Some(args));

        self.scopes.push_method();
        for param in params {
            self.scopes.define(param);
        }
        self.compile_scope_body(def_set, body, line)?;
        self.scopes.pop();

        self.emit(set, Opcode::PutSelf, line, vec![]);
        self.emit(set, Opcode::PutString, line, vec![name.to_string()]);
        let action = match receiver {
            MethodReceiver::Instance => Opcode::DefMethod,
            MethodReceiver::SelfSingleton => Opcode::DefSingletonMethod,
        };
        self.emit(set, action, line, vec![params.len().to_string()]);
        Ok(())
    }

    fn compile_class(
        &mut self,
        set: usize,
        name: &str,
        superclass: Option<&str>,
        body: &[Statement],
        line: u32,
    ) -> Result<(), SapphireError> {
        let class_set = self.alloc_set(format!("DefClass:{}", name), SetKind::DefClass, None);
        self.scopes.push_method();
        self.compile_scope_body(class_set, body, line)?;
        self.scopes.pop();

        self.emit(set, Opcode::PutSelf, line, vec![]);
        let mut params = vec![format!("class:{}", name)];
        if let Some(superclass) = superclass {
            params.push(superclass.to_string());
        }
        self.emit(set, Opcode::DefClass, line, params);
        self.emit(set, Opcode::Pop, line, vec![]);
        Ok(())
    }

    fn compile_module(
        &mut self,
        set: usize,
        name: &str,
        body: &[Statement],
        line: u32,
    ) -> Result<(), SapphireError> {
        let module_set = self.alloc_set(format!("DefClass:{}", name), SetKind::DefClass, None);
        self.scopes.push_method();
        self.compile_scope_body(module_set, body, line)?;
        self.scopes.pop();

        self.emit(set, Opcode::PutSelf, line, vec![]);
        self.emit(set, Opcode::DefClass, line, vec![format!("module:{}", name)]);
        self.emit(set, Opcode::Pop, line, vec![]);
        Ok(())
    }

    fn compile_while(
        &mut self,
        set: usize,
        condition: &Expression,
        body: &[Statement],
        line: u32,
    ) -> Result<(), SapphireError> {
        let loop_start = self.sets[set].next_index();
        self.compile_expression(set, condition)?;
        let exit = self.emit(set, Opcode::BranchUnless, condition.line(), vec![]);

        self.compile_statements(set, body, false)?;
        let back = self.emit(set, Opcode::Jump, line, vec![]);
        self.sets[set].set_anchor(back, loop_start);

        let after = self.sets[set].next_index();
        self.emit(set, Opcode::PutNil, line, vec![]);
        self.sets[set].set_anchor(exit, after);
        Ok(())
    }

    // Expressions ---------------------------------------------------------

    fn compile_expression(
        &mut self,
        set: usize,
        expression: &Expression,
    ) -> Result<(), SapphireError> {
        let line = expression.line();
        match expression {
            Expression::Identifier { name, .. } => {
                if let Some((slot, depth)) = self.scopes.resolve(name) {
                    self.emit(
                        set,
                        Opcode::GetLocal,
                        line,
                        vec![slot.to_string(), depth.to_string()],
                    );
                } else {
                    // an unseen bare name is a receiverless call
                    self.emit(set, Opcode::PutSelf, line, vec![]);
                    self.emit(set, Opcode::Send, line, vec![name.clone(), "0".to_string()]);
                }
            }
            Expression::Constant { path, .. } => {
                for segment in path {
                    self.emit(set, Opcode::GetConstant, line, vec![segment.clone()]);
                }
            }
            Expression::InstanceVariable { name, .. } => {
                self.emit(set, Opcode::GetInstanceVariable, line, vec![name.clone()]);
            }
            Expression::Integer { value, .. } => {
                self.emit(set, Opcode::PutObject, line, vec![value.to_string()]);
            }
            Expression::Float { value, .. } => {
                let mut buffer = ryu::Buffer::new();
                let literal = buffer.format(*value).to_string();
                self.emit(set, Opcode::PutObject, line, vec![literal]);
            }
            Expression::Str { value, .. } => {
                self.emit(set, Opcode::PutString, line, vec![value.clone()]);
            }
            Expression::Boolean { value, .. } => {
                self.emit(set, Opcode::PutObject, line, vec![value.to_string()]);
            }
            Expression::Nil { .. } => {
                self.emit(set, Opcode::PutNil, line, vec![]);
            }
            Expression::SelfRef { .. } => {
                self.emit(set, Opcode::PutSelf, line, vec![]);
            }
            Expression::GetBlock { .. } => {
                self.emit(set, Opcode::GetBlock, line, vec![]);
            }
            Expression::Prefix {
                operator, right, ..
            } => {
                self.compile_expression(set, right)?;
                let method = if operator == "-" { "-@" } else { "!" };
                self.emit(
                    set,
                    Opcode::Send,
                    line,
                    vec![method.to_string(), "0".to_string()],
                );
            }
            Expression::Infix {
                operator,
                left,
                right,
                ..
            } => self.compile_infix(set, operator, left, right, line)?,
            Expression::Assignment { target, value, .. } => {
                self.compile_assignment(set, target, value, line)?;
            }
            Expression::MethodCall {
                receiver,
                method,
                arguments,
                block,
                ..
            } => {
                match receiver {
                    Receiver::Implicit => {
                        self.emit(set, Opcode::PutSelf, line, vec![]);
                    }
                    Receiver::Explicit(e) => self.compile_expression(set, e)?,
                }
                for argument in arguments {
                    self.compile_expression(set, argument)?;
                }
                let mut params = vec![method.clone(), arguments.len().to_string()];
                if let Some(block) = block {
                    let name = self.compile_block(block)?;
                    params.push(format!("block:{}", name));
                }
                self.emit(set, Opcode::Send, line, params);
            }
            Expression::Yield { arguments, .. } => {
                for argument in arguments {
                    self.compile_expression(set, argument)?;
                }
                self.emit(
                    set,
                    Opcode::InvokeBlock,
                    line,
                    vec![arguments.len().to_string()],
                );
            }
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                self.compile_expression(set, condition)?;
                let branch = self.emit(set, Opcode::BranchUnless, condition.line(), vec![]);

                self.compile_branch_arm(set, consequence, line)?;
                let jump_end = self.emit(set, Opcode::Jump, line, vec![]);

                let else_start = self.sets[set].next_index();
                self.sets[set].set_anchor(branch, else_start);
                match alternative {
                    Some(alternative) => self.compile_branch_arm(set, alternative, line)?,
                    None => {
                        self.emit(set, Opcode::PutNil, line, vec![]);
                    }
                }
                let end = self.sets[set].next_index();
                self.sets[set].set_anchor(jump_end, end);
            }
        }
        Ok(())
    }

    /// Compile one arm of a conditional, leaving exactly one value
    fn compile_branch_arm(
        &mut self,
        set: usize,
        statements: &[Statement],
        line: u32,
    ) -> Result<(), SapphireError> {
        if statements.is_empty() {
            self.emit(set, Opcode::PutNil, line, vec![]);
        } else {
            self.compile_statements(set, statements, true)?;
        }
        Ok(())
    }

    fn compile_infix(
        &mut self,
        set: usize,
        operator: &str,
        left: &Expression,
        right: &Expression,
        line: u32,
    ) -> Result<(), SapphireError> {
        match operator {
            "&&" => {
                self.compile_expression(set, left)?;
                let branch = self.emit(set, Opcode::BranchUnless, line, vec![]);
                self.compile_expression(set, right)?;
                let jump_end = self.emit(set, Opcode::Jump, line, vec![]);
                let short = self.sets[set].next_index();
                self.sets[set].set_anchor(branch, short);
                self.emit(set, Opcode::PutObject, line, vec!["false".to_string()]);
                let end = self.sets[set].next_index();
                self.sets[set].set_anchor(jump_end, end);
            }
            "||" => {
                self.compile_expression(set, left)?;
                let branch = self.emit(set, Opcode::BranchUnless, line, vec![]);
                self.emit(set, Opcode::PutObject, line, vec!["true".to_string()]);
                let jump_end = self.emit(set, Opcode::Jump, line, vec![]);
                let rhs = self.sets[set].next_index();
                self.sets[set].set_anchor(branch, rhs);
                self.compile_expression(set, right)?;
                let end = self.sets[set].next_index();
                self.sets[set].set_anchor(jump_end, end);
            }
            _ => {
                self.compile_expression(set, left)?;
                self.compile_expression(set, right)?;
                self.emit(
                    set,
                    Opcode::Send,
                    line,
                    vec![operator.to_string(), "1".to_string()],
                );
            }
        }
        Ok(())
    }

    fn compile_assignment(
        &mut self,
        set: usize,
        target: &Expression,
        value: &Expression,
        line: u32,
    ) -> Result<(), SapphireError> {
        self.compile_expression(set, value)?;
        match target {
            Expression::Identifier { name, .. } => {
                let (slot, depth) = self.scopes.assign(name);
                self.emit(
                    set,
                    Opcode::SetLocal,
                    line,
                    vec![slot.to_string(), depth.to_string()],
                );
            }
            Expression::InstanceVariable { name, .. } => {
                self.emit(set, Opcode::SetInstanceVariable, line, vec![name.clone()]);
            }
            Expression::Constant { path, .. } => {
                self.emit(set, Opcode::SetConstant, line, vec![path[0].clone()]);
            }
            other => {
                // the parser only produces assignable targets
                debug_assert!(false, "unassignable target {:?}", other);
            }
        }
        Ok(())
    }

    /// Compile a block literal into its own set, returning the set name
    fn compile_block(&mut self, block: &BlockLiteral) -> Result<String, SapphireError> {
        let name = format!("Block:{}", self.block_count);
        self.block_count += 1;

        let mut args = ArgSet::new();
        for param in &block.params {
            args.push(param.clone(), ArgKind::Normal);
        }
        let block_set = self.alloc_set(&name, SetKind::Block, Some(args));

        self.scopes.push_block();
        for param in &block.params {
            self.scopes.define(param);
        }
        self.compile_scope_body(block_set, &block.body, block.line)?;
        self.scopes.pop();
        Ok(name)
    }

    // Plumbing ------------------------------------------------------------

    fn alloc_set(
        &mut self,
        name: impl Into<String>,
        kind: SetKind,
        arg_set: Option<ArgSet>,
    ) -> usize {
        let mut set = InstructionSet::new(name, kind);
        set.arg_set = arg_set;
        self.sets.push(set);
        self.sets.len() - 1
    }

    fn emit(&mut self, set: usize, action: Opcode, line: u32, params: Vec<String>) -> usize {
        self.sets[set].emit(action, line, params)
    }
}

impl Default for BytecodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
