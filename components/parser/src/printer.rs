//! Canonical AST-to-source printer
//!
//! A pure, deterministic rendering of the tree with every ambiguity made
//! explicit: call receivers are always printed (implicit receivers as
//! `self.`), call parentheses are always printed, and infix expressions are
//! fully parenthesized. Structurally equal trees always print identically,
//! and printing is idempotent under re-parsing, which makes the printer
//! usable as a test oracle.

use crate::ast::{BlockLiteral, Expression, Program, Receiver, Statement};

/// Render a program to its canonical source form
pub fn print(program: &Program) -> String {
    print_statements(&program.statements)
}

fn print_statements(statements: &[Statement]) -> String {
    statements.iter().map(print_statement).collect()
}

fn print_statement(statement: &Statement) -> String {
    match statement {
        Statement::Class { name, body, .. } => {
            // the superclass is recorded in the AST but not part of the
            // canonical body text
            format!("class {} {{\n{}\n}}", name, print_statements(body))
        }
        Statement::Module { name, body, .. } => {
            format!("module {} {{\n{}\n}}", name, print_statements(body))
        }
        Statement::Def {
            name, params, body, ..
        } => format!(
            "def {}({}) {{\n{}\n}}",
            name,
            params.join(", "),
            print_statements(body)
        ),
        Statement::While {
            condition, body, ..
        } => format!(
            "while {} do\n{}\nend",
            print_expression(condition),
            print_statements(body)
        ),
        Statement::Expression(e) => print_expression(e),
    }
}

fn print_expression(expression: &Expression) -> String {
    match expression {
        Expression::Identifier { name, .. } => name.clone(),
        Expression::Constant { path, .. } => {
            if path.len() == 1 {
                path[0].clone()
            } else {
                format!("({})", path.join(" :: "))
            }
        }
        Expression::InstanceVariable { name, .. } => name.clone(),
        Expression::Integer { value, .. } => value.to_string(),
        Expression::Float { value, .. } => {
            let mut buffer = ryu::Buffer::new();
            buffer.format(*value).to_string()
        }
        Expression::Str { value, .. } => format!("\"{}\"", value),
        Expression::Boolean { value, .. } => value.to_string(),
        Expression::Nil { .. } => "nil".to_string(),
        Expression::SelfRef { .. } => "self".to_string(),
        Expression::GetBlock { .. } => "get_block".to_string(),
        Expression::Prefix {
            operator, right, ..
        } => format!("({}{})", operator, print_expression(right)),
        Expression::Infix {
            operator,
            left,
            right,
            ..
        } => format!(
            "({} {} {})",
            print_expression(left),
            operator,
            print_expression(right)
        ),
        Expression::Assignment { target, value, .. } => {
            format!("{} = {}", print_expression(target), print_expression(value))
        }
        Expression::MethodCall {
            receiver,
            method,
            arguments,
            block,
            ..
        } => {
            let receiver = match receiver {
                Receiver::Implicit => "self".to_string(),
                Receiver::Explicit(e) => print_expression(e),
            };
            let args: Vec<String> = arguments.iter().map(print_expression).collect();
            let mut out = format!("{}.{}({})", receiver, method, args.join(", "));
            if let Some(block) = block {
                out.push_str(&print_block(block));
            }
            out
        }
        Expression::Yield { arguments, .. } => {
            let args: Vec<String> = arguments.iter().map(print_expression).collect();
            format!("yield({})", args.join(", "))
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => match alternative {
            Some(alternative) => format!(
                "if {}\n{}\nelse\n{}\nend",
                print_expression(condition),
                print_statements(consequence),
                print_statements(alternative)
            ),
            None => format!(
                "if {}\n{}\nend",
                print_expression(condition),
                print_statements(consequence)
            ),
        },
    }
}

fn print_block(block: &BlockLiteral) -> String {
    if block.params.is_empty() {
        format!(" do\n{}\nend", print_statements(&block.body))
    } else {
        format!(
            " do |{}|\n{}\nend",
            block.params.join(", "),
            print_statements(&block.body)
        )
    }
}
