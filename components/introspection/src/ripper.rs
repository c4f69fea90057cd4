//! The `Ripper` façade operations
//!
//! Each operation takes one source-text argument and returns a value:
//! `tokenize` the token table, `parse` the canonical rendering, `compile`
//! the instruction sets, `token` the flat literal list, and
//! `format_token_kind` the wire name of the first token. Argument guards
//! run before any stage; a parse failure surfaces as the fixed
//! `Invalid Sapphire code` message with the stage's error kind.

use crate::convert;
use core_types::{ErrorKind, SapphireError, Value};
use parser::ast::Program;
use parser::lexer::TokenKind;
use parser::{print, BytecodeGenerator, Lexer, Parser};

/// Tokenize source into `[line, kind, literal]` rows, ending with the
/// end-of-input row
pub fn tokenize(args: &[Value]) -> Result<Value, SapphireError> {
    let source = expect_source(args)?;
    let mut lexer = Lexer::new(source);
    let mut rows = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        rows.push(Value::Array(vec![
            Value::Integer(i64::from(token.line)),
            Value::string(token.kind.wire_name()),
            Value::Str(token.literal),
        ]));
        if done {
            return Ok(Value::Array(rows));
        }
    }
}

/// Parse source and return its canonical rendering
pub fn parse(args: &[Value]) -> Result<Value, SapphireError> {
    let source = expect_source(args)?;
    let program = parse_source(source, ErrorKind::ParseError)?;
    Ok(Value::string(print(&program)))
}

/// Compile source and return its instruction sets as nested values
pub fn compile(args: &[Value]) -> Result<Value, SapphireError> {
    let source = expect_source(args)?;
    let program = parse_source(source, ErrorKind::CompileError)?;
    let sets = BytecodeGenerator::new().generate(&program)?;
    Ok(convert::instruction_sets_to_value(&sets))
}

/// Tokenize source into the flat list of token literals, terminated by
/// `"EOF"`
pub fn token(args: &[Value]) -> Result<Value, SapphireError> {
    let source = expect_source(args)?;
    let mut lexer = Lexer::new(source);
    let mut literals = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            literals.push(Value::string("EOF"));
            return Ok(Value::Array(literals));
        }
        literals.push(Value::Str(token.literal));
    }
}

/// Return the wire name of the first token of `text` (`"on_eof"` for empty
/// input)
pub fn format_token_kind(args: &[Value]) -> Result<Value, SapphireError> {
    let source = expect_source(args)?;
    let first = Lexer::new(source).next_token();
    Ok(Value::string(first.kind.wire_name()))
}

/// Arity and type guard shared by every operation
fn expect_source(args: &[Value]) -> Result<&str, SapphireError> {
    if args.len() != 1 {
        return Err(SapphireError::new(
            ErrorKind::ArgumentError,
            0,
            format!("Expect 1 argument. got={}", args.len()),
        ));
    }
    args[0].as_str().ok_or_else(|| {
        SapphireError::new(
            ErrorKind::TypeError,
            0,
            format!("Expect argument to be String. got: {}", args[0].kind_name()),
        )
    })
}

fn parse_source(source: &str, kind: ErrorKind) -> Result<Program, SapphireError> {
    Parser::new(source)
        .parse_program()
        .map_err(|err| SapphireError::new(kind, err.line, "Invalid Sapphire code"))
}
