//! Recursive descent parser for Sapphire
//!
//! Statements are dispatched on their leading token; expressions use
//! precedence climbing. The parser stops at the first structural error and
//! returns it as a value; it never panics on malformed input, and a depth
//! counter converts pathological nesting into a diagnosed parse error
//! instead of stack exhaustion.

use crate::ast::*;
use crate::error::*;
use crate::lexer::{Keyword, Lexer, Punctuator, Token, TokenKind};
use core_types::SapphireError;

/// Hard cap on expression/statement nesting depth
const MAX_NESTING_DEPTH: u32 = 512;

/// Binding strength of infix operators, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Assign,
    AndOr,
    Equals,
    LessGreater,
    Sum,
    Product,
    Power,
    Prefix,
    Call,
    Resolution,
}

fn token_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Punctuator(p) => match p {
            Punctuator::Assign => Precedence::Assign,
            Punctuator::And | Punctuator::Or => Precedence::AndOr,
            Punctuator::Eq | Punctuator::NotEq => Precedence::Equals,
            Punctuator::Lt | Punctuator::Lte | Punctuator::Gt | Punctuator::Gte => {
                Precedence::LessGreater
            }
            Punctuator::Plus | Punctuator::Minus => Precedence::Sum,
            Punctuator::Asterisk | Punctuator::Slash | Punctuator::Modulo => Precedence::Product,
            Punctuator::Pow => Precedence::Power,
            Punctuator::Dot => Precedence::Call,
            Punctuator::ResolutionOperator => Precedence::Resolution,
            _ => Precedence::Lowest,
        },
        _ => Precedence::Lowest,
    }
}

/// Sapphire parser
pub struct Parser {
    lexer: Lexer,
    cur: Token,
    peek: Token,
    depth: u32,
    /// Suppresses `do`-block attachment while parsing a `while` condition,
    /// where `do` terminates the condition instead
    suppress_do_block: bool,
}

impl Parser {
    /// Create a new parser for the given source code
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            cur,
            peek,
            depth: 0,
            suppress_do_block: false,
        }
    }

    /// Parse the source into a program.
    ///
    /// Returns the first structural error encountered; no partial AST is
    /// exposed on failure.
    pub fn parse_program(&mut self) -> Result<Program, SapphireError> {
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if self.cur_is(TokenKind::Punctuator(Punctuator::Semicolon)) {
                self.next_token();
                continue;
            }
            statements.push(self.parse_statement()?);
            self.next_token();
        }
        Ok(Program { statements })
    }

    // Statements ----------------------------------------------------------

    /// Parse one statement; leaves `cur` on the statement's last token
    fn parse_statement(&mut self) -> Result<Statement, SapphireError> {
        match self.cur.kind {
            TokenKind::Keyword(Keyword::Class) => self.parse_class_statement(),
            TokenKind::Keyword(Keyword::Module) => self.parse_module_statement(),
            TokenKind::Keyword(Keyword::Def) => self.parse_def_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            _ => Ok(Statement::Expression(
                self.parse_expression(Precedence::Lowest)?,
            )),
        }
    }

    fn parse_class_statement(&mut self) -> Result<Statement, SapphireError> {
        let line = self.cur.line;
        self.expect_peek(TokenKind::Constant, "a class name")?;
        let name = self.cur.literal.clone();

        let superclass = if self.peek_is(TokenKind::Punctuator(Punctuator::Lt)) {
            self.next_token();
            self.expect_peek(TokenKind::Constant, "a superclass name")?;
            Some(self.cur.literal.clone())
        } else {
            None
        };

        let body = self.parse_body()?;
        Ok(Statement::Class {
            name,
            superclass,
            body,
            line,
        })
    }

    fn parse_module_statement(&mut self) -> Result<Statement, SapphireError> {
        let line = self.cur.line;
        self.expect_peek(TokenKind::Constant, "a module name")?;
        let name = self.cur.literal.clone();
        let body = self.parse_body()?;
        Ok(Statement::Module { name, body, line })
    }

    fn parse_def_statement(&mut self) -> Result<Statement, SapphireError> {
        let line = self.cur.line;

        let receiver = if self.peek_is(TokenKind::Keyword(Keyword::SelfKw)) {
            self.next_token();
            self.expect_peek(TokenKind::Punctuator(Punctuator::Dot), "`.`")?;
            MethodReceiver::SelfSingleton
        } else {
            MethodReceiver::Instance
        };

        self.expect_peek(TokenKind::Ident, "a method name")?;
        let name = self.cur.literal.clone();

        let mut params = Vec::new();
        if self.peek_is(TokenKind::Punctuator(Punctuator::LParen)) {
            self.next_token();
            if self.peek_is(TokenKind::Punctuator(Punctuator::RParen)) {
                self.next_token();
            } else {
                self.expect_peek(TokenKind::Ident, "a parameter name")?;
                params.push(self.cur.literal.clone());
                while self.peek_is(TokenKind::Punctuator(Punctuator::Comma)) {
                    self.next_token();
                    self.expect_peek(TokenKind::Ident, "a parameter name")?;
                    params.push(self.cur.literal.clone());
                }
                self.expect_peek(TokenKind::Punctuator(Punctuator::RParen), "`)`")?;
            }
        }

        let body = self.parse_body()?;
        Ok(Statement::Def {
            name,
            receiver,
            params,
            body,
            line,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, SapphireError> {
        let line = self.cur.line;
        self.next_token();

        // `do` closes the condition here, so it must not start a block
        let saved = self.suppress_do_block;
        self.suppress_do_block = true;
        let condition = self.parse_expression(Precedence::Lowest);
        self.suppress_do_block = saved;
        let condition = condition?;

        self.expect_peek(TokenKind::Keyword(Keyword::Do), "`do`")?;
        let body = self.parse_statements_until(&[TokenKind::Keyword(Keyword::End)])?;
        Ok(Statement::While {
            condition,
            body,
            line,
        })
    }

    /// Parse a definition body, delimited either `... end` or `{ ... }`
    /// (the canonical printed form)
    fn parse_body(&mut self) -> Result<Vec<Statement>, SapphireError> {
        if self.peek_is(TokenKind::Punctuator(Punctuator::LBrace)) {
            self.next_token();
            self.parse_statements_until(&[TokenKind::Punctuator(Punctuator::RBrace)])
        } else {
            self.parse_statements_until(&[TokenKind::Keyword(Keyword::End)])
        }
    }

    /// Parse statements until one of `terminators`; `cur` is left on the
    /// terminating token. Expects `cur` to be the token before the body.
    fn parse_statements_until(
        &mut self,
        terminators: &[TokenKind],
    ) -> Result<Vec<Statement>, SapphireError> {
        self.guard_depth(self.cur.line)?;
        self.depth += 1;
        let result = self.parse_statements_until_inner(terminators);
        self.depth -= 1;
        result
    }

    fn parse_statements_until_inner(
        &mut self,
        terminators: &[TokenKind],
    ) -> Result<Vec<Statement>, SapphireError> {
        let mut statements = Vec::new();
        loop {
            self.next_token();
            if terminators.contains(&self.cur.kind) {
                return Ok(statements);
            }
            match self.cur.kind {
                TokenKind::Eof => return Err(unexpected_eof(self.cur.line)),
                TokenKind::Punctuator(Punctuator::Semicolon) => continue,
                _ => statements.push(self.parse_statement()?),
            }
        }
    }

    // Expressions ---------------------------------------------------------

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression, SapphireError> {
        self.guard_depth(self.cur.line)?;
        self.depth += 1;
        let result = self.parse_expression_inner(precedence);
        self.depth -= 1;
        result
    }

    fn parse_expression_inner(
        &mut self,
        precedence: Precedence,
    ) -> Result<Expression, SapphireError> {
        let mut left = self.parse_primary()?;

        while precedence < token_precedence(self.peek.kind) {
            left = match self.peek.kind {
                TokenKind::Punctuator(Punctuator::Assign) => self.parse_assignment(left)?,
                TokenKind::Punctuator(Punctuator::Dot) => self.parse_method_call(left)?,
                TokenKind::Punctuator(Punctuator::ResolutionOperator) => {
                    self.parse_scope_resolution(left)?
                }
                TokenKind::Punctuator(_) => self.parse_infix(left)?,
                _ => return Ok(left),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expression, SapphireError> {
        let line = self.cur.line;
        match self.cur.kind {
            TokenKind::Ident => self.parse_identifier_expression(),
            TokenKind::Constant => Ok(Expression::Constant {
                path: vec![self.cur.literal.clone()],
                line,
            }),
            TokenKind::InstanceVariable => Ok(Expression::InstanceVariable {
                name: self.cur.literal.clone(),
                line,
            }),
            TokenKind::Int => {
                let value = self
                    .cur
                    .literal
                    .parse::<i64>()
                    .map_err(|_| parse_error("integer literal out of range", line))?;
                Ok(Expression::Integer { value, line })
            }
            TokenKind::Float => {
                let value = self
                    .cur
                    .literal
                    .parse::<f64>()
                    .map_err(|_| parse_error("malformed float literal", line))?;
                Ok(Expression::Float { value, line })
            }
            TokenKind::Str => Ok(Expression::Str {
                value: self.cur.literal.clone(),
                line,
            }),
            TokenKind::Keyword(Keyword::True) => Ok(Expression::Boolean { value: true, line }),
            TokenKind::Keyword(Keyword::False) => Ok(Expression::Boolean { value: false, line }),
            TokenKind::Keyword(Keyword::Nil) => Ok(Expression::Nil { line }),
            TokenKind::Keyword(Keyword::SelfKw) => Ok(Expression::SelfRef { line }),
            TokenKind::Keyword(Keyword::GetBlock) => Ok(Expression::GetBlock { line }),
            TokenKind::Keyword(Keyword::Yield) => self.parse_yield_expression(),
            TokenKind::Keyword(Keyword::If) => self.parse_if_expression(),
            TokenKind::Punctuator(Punctuator::Bang) | TokenKind::Punctuator(Punctuator::Minus) => {
                let operator = self.cur.literal.clone();
                self.next_token();
                let right = self.parse_expression(Precedence::Prefix)?;
                Ok(Expression::Prefix {
                    operator,
                    right: Box::new(right),
                    line,
                })
            }
            TokenKind::Punctuator(Punctuator::LParen) => {
                self.next_token();
                let inner = self.parse_expression(Precedence::Lowest)?;
                self.expect_peek(TokenKind::Punctuator(Punctuator::RParen), "`)`")?;
                Ok(inner)
            }
            _ => Err(unexpected_token("an expression", &self.cur)),
        }
    }

    /// A leading identifier is a local reference, or an implicit-receiver
    /// method call when followed by parentheses, a bare argument list on
    /// the same line, or a block
    fn parse_identifier_expression(&mut self) -> Result<Expression, SapphireError> {
        let name = self.cur.literal.clone();
        let line = self.cur.line;

        if self.peek_is(TokenKind::Punctuator(Punctuator::LParen)) {
            self.next_token();
            let arguments = self.parse_paren_arguments()?;
            let block = self.parse_optional_block()?;
            return Ok(Expression::MethodCall {
                receiver: Receiver::Implicit,
                method: name,
                arguments,
                block,
                line,
            });
        }

        if self.peek_starts_block() {
            let block = self.parse_optional_block()?;
            return Ok(Expression::MethodCall {
                receiver: Receiver::Implicit,
                method: name,
                arguments: Vec::new(),
                block,
                line,
            });
        }

        if self.peek.line == line && starts_bare_argument(self.peek.kind) {
            let mut arguments = Vec::new();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
            while self.peek_is(TokenKind::Punctuator(Punctuator::Comma)) {
                self.next_token();
                self.next_token();
                arguments.push(self.parse_expression(Precedence::Lowest)?);
            }
            let block = self.parse_optional_block()?;
            return Ok(Expression::MethodCall {
                receiver: Receiver::Implicit,
                method: name,
                arguments,
                block,
                line,
            });
        }

        Ok(Expression::Identifier { name, line })
    }

    fn parse_yield_expression(&mut self) -> Result<Expression, SapphireError> {
        let line = self.cur.line;
        let arguments = if self.peek_is(TokenKind::Punctuator(Punctuator::LParen)) {
            self.next_token();
            self.parse_paren_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::Yield { arguments, line })
    }

    fn parse_if_expression(&mut self) -> Result<Expression, SapphireError> {
        let line = self.cur.line;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        let consequence = self.parse_statements_until(&[
            TokenKind::Keyword(Keyword::Else),
            TokenKind::Keyword(Keyword::End),
        ])?;
        let alternative = if self.cur_is(TokenKind::Keyword(Keyword::Else)) {
            Some(self.parse_statements_until(&[TokenKind::Keyword(Keyword::End)])?)
        } else {
            None
        };
        Ok(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
            line,
        })
    }

    // Infix and postfix forms ---------------------------------------------

    fn parse_assignment(&mut self, target: Expression) -> Result<Expression, SapphireError> {
        let assignable = matches!(
            target,
            Expression::Identifier { .. } | Expression::InstanceVariable { .. }
        ) || matches!(&target, Expression::Constant { path, .. } if path.len() == 1);
        if !assignable {
            return Err(parse_error("invalid assignment target", target.line()));
        }

        self.next_token();
        let line = self.cur.line;
        self.next_token();
        // assignment is right-associative: parse the value at the lowest
        // precedence so chains nest to the right
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(Expression::Assignment {
            target: Box::new(target),
            value: Box::new(value),
            line,
        })
    }

    fn parse_infix(&mut self, left: Expression) -> Result<Expression, SapphireError> {
        self.next_token();
        let operator = self.cur.literal.clone();
        let line = self.cur.line;
        let precedence = token_precedence(self.cur.kind);
        self.next_token();
        // `**` is right-associative; parse its right side one level looser
        let right_precedence = if operator == "**" {
            Precedence::Product
        } else {
            precedence
        };
        let right = self.parse_expression(right_precedence)?;
        Ok(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            line,
        })
    }

    fn parse_method_call(&mut self, receiver: Expression) -> Result<Expression, SapphireError> {
        self.next_token();
        self.expect_peek(TokenKind::Ident, "a method name")?;
        let method = self.cur.literal.clone();
        let line = self.cur.line;

        let arguments = if self.peek_is(TokenKind::Punctuator(Punctuator::LParen)) {
            self.next_token();
            self.parse_paren_arguments()?
        } else {
            Vec::new()
        };
        let block = self.parse_optional_block()?;

        Ok(Expression::MethodCall {
            receiver: Receiver::Explicit(Box::new(receiver)),
            method,
            arguments,
            block,
            line,
        })
    }

    fn parse_scope_resolution(&mut self, left: Expression) -> Result<Expression, SapphireError> {
        let mut path = match left {
            Expression::Constant { path, .. } => path,
            other => {
                return Err(parse_error(
                    "scope resolution requires a constant on the left",
                    other.line(),
                ))
            }
        };
        let line = self.peek.line;
        self.next_token();
        self.expect_peek(TokenKind::Constant, "a constant name")?;
        path.push(self.cur.literal.clone());
        Ok(Expression::Constant { path, line })
    }

    // Argument and block helpers ------------------------------------------

    /// Parse `( ... )` argument list; `cur` must be on the `(`
    fn parse_paren_arguments(&mut self) -> Result<Vec<Expression>, SapphireError> {
        let mut arguments = Vec::new();
        if self.peek_is(TokenKind::Punctuator(Punctuator::RParen)) {
            self.next_token();
            return Ok(arguments);
        }
        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Punctuator(Punctuator::Comma)) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(TokenKind::Punctuator(Punctuator::RParen), "`)`")?;
        Ok(arguments)
    }

    fn peek_starts_block(&self) -> bool {
        (self.peek_is(TokenKind::Keyword(Keyword::Do)) && !self.suppress_do_block)
            || self.peek_is(TokenKind::Punctuator(Punctuator::LBrace))
    }

    /// Attach a trailing `do ... end` or `{ ... }` block if one follows
    fn parse_optional_block(&mut self) -> Result<Option<BlockLiteral>, SapphireError> {
        if !self.peek_starts_block() {
            return Ok(None);
        }
        self.next_token();
        let line = self.cur.line;
        let terminator = if self.cur_is(TokenKind::Keyword(Keyword::Do)) {
            TokenKind::Keyword(Keyword::End)
        } else {
            TokenKind::Punctuator(Punctuator::RBrace)
        };

        let mut params = Vec::new();
        if self.peek_is(TokenKind::Punctuator(Punctuator::Bar)) {
            self.next_token();
            self.expect_peek(TokenKind::Ident, "a block parameter")?;
            params.push(self.cur.literal.clone());
            while self.peek_is(TokenKind::Punctuator(Punctuator::Comma)) {
                self.next_token();
                self.expect_peek(TokenKind::Ident, "a block parameter")?;
                params.push(self.cur.literal.clone());
            }
            self.expect_peek(TokenKind::Punctuator(Punctuator::Bar), "`|`")?;
        }

        let body = self.parse_statements_until(&[terminator])?;
        Ok(Some(BlockLiteral { params, body, line }))
    }

    // Token plumbing ------------------------------------------------------

    fn next_token(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn expect_peek(&mut self, kind: TokenKind, expected: &str) -> Result<(), SapphireError> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(unexpected_token(expected, &self.peek))
        }
    }

    fn guard_depth(&self, line: u32) -> Result<(), SapphireError> {
        if self.depth >= MAX_NESTING_DEPTH {
            Err(parse_error("nesting too deep", line))
        } else {
            Ok(())
        }
    }
}

/// Token kinds that may begin a bare (parenthesis-free) call argument
fn starts_bare_argument(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Constant
            | TokenKind::InstanceVariable
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Str
            | TokenKind::Keyword(Keyword::True)
            | TokenKind::Keyword(Keyword::False)
            | TokenKind::Keyword(Keyword::Nil)
            | TokenKind::Keyword(Keyword::SelfKw)
            | TokenKind::Keyword(Keyword::GetBlock)
    )
}
