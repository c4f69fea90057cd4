//! Canonical output oracles for the introspection façade
//!
//! Fixed input/output pairs covering the rendering rules a host test suite
//! relies on: statements concatenate without separators, receivers and call
//! parentheses are always explicit, infix chains are fully parenthesized,
//! and superclass/singleton annotations stay out of the canonical text.

use core_types::{SapphireError, Value};
use introspection::ripper_registry;

fn parse(source: &str) -> String {
    match ripper_registry().call("Ripper", "parse", &[Value::string(source)]) {
        Ok(Value::Str(s)) => s,
        Ok(other) => panic!("expected string, got {}", other),
        Err(err) => panic!("parse failed: {}", err),
    }
}

fn tokenize(source: &str) -> Result<Value, SapphireError> {
    ripper_registry().call("Ripper", "tokenize", &[Value::string(source)])
}

#[test]
fn test_classes_concatenate_without_separator() {
    let source = "class Bar\ndef foo\n10\nend\nend\nclass Foo < Bar\nend\nclass FooBar\nend\nFooBar.foo";
    assert_eq!(
        parse(source),
        "class Bar {\ndef foo() {\n10\n}\n}class Foo {\n\n}class FooBar {\n\n}FooBar.foo()"
    );
}

#[test]
fn test_yield_and_block_rendering() {
    let source = "def foo(x)\nyield(x + 10)\nend\ndef bar(y)\nfoo(y) do |f|\nyield(f)\nend\nend";
    assert_eq!(
        parse(source),
        "def foo(x) {\nyield((x + 10))\n}def bar(y) {\nself.foo(y) do |f|\nyield(f)\nend\n}"
    );
}

#[test]
fn test_get_block_and_parameterless_blocks() {
    let source =
        "def bar(block)\nblock.call + get_block.call\nend\ndef foo\nbar(get_block) do\n20\nend\nend\nfoo do\n10\nend";
    assert_eq!(
        parse(source),
        "def bar(block) {\n(block.call() + get_block.call())\n}def foo() {\nself.bar(get_block) do\n20\nend\n}self.foo() do\n10\nend"
    );
}

#[test]
fn test_qualified_constant_chain() {
    assert_eq!(
        parse("Baz::Bar.new.bar + a"),
        "((Baz :: Bar).new().bar() + a)"
    );
}

#[test]
fn test_singleton_receiver_not_printed() {
    assert_eq!(
        parse("def self.foo(x)\nx\nend"),
        "def foo(x) {\nx\n}"
    );
}

#[test]
fn test_control_flow_rendering() {
    assert_eq!(
        parse("if a\n1\nelse\n2\nend"),
        "if a\n1\nelse\n2\nend"
    );
    assert_eq!(
        parse("while i < 3 do\ni = i + 1\nend"),
        "while (i < 3) do\ni = (i + 1)\nend"
    );
}

#[test]
fn test_tokenize_operator_table() {
    let rows = tokenize("1 + 2.5 ** x").expect("tokenize failed");
    let Value::Array(rows) = rows else {
        panic!("expected array");
    };
    let kinds: Vec<&Value> = rows
        .iter()
        .map(|row| match row {
            Value::Array(cells) => &cells[1],
            other => panic!("expected row, got {}", other),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            &Value::string("on_int"),
            &Value::string("on_plus"),
            &Value::string("on_float"),
            &Value::string("on_pow"),
            &Value::string("on_ident"),
            &Value::string("on_eof"),
        ]
    );
}

#[test]
fn test_token_literal_stream() {
    let result = ripper_registry()
        .call("Ripper", "token", &[Value::string("class Bar\nend")])
        .expect("token failed");
    assert_eq!(
        result,
        Value::Array(vec![
            Value::string("class"),
            Value::string("Bar"),
            Value::string("end"),
            Value::string("EOF"),
        ])
    );
}
