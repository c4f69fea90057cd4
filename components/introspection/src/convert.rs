//! Conversion of compiled instruction sets to host-embeddable values
//!
//! `Ripper.compile` hands its result back as nested [`Value`]s so embedded
//! programs can walk it without a serialization round trip. Field names
//! match the serialized IR: `name`, `type`, `arg_set` (`names` / `types`),
//! `instructions` (`action`, `line`, `source_line`, `params`, `anchor`).
//! Optional fields are omitted, never nil.

use bytecode_system::{ArgSet, Instruction, InstructionSet};
use core_types::Value;

fn pair(key: &str, value: Value) -> (String, Value) {
    (key.to_string(), value)
}

/// Convert a compiled program to an array of instruction-set hashes
pub fn instruction_sets_to_value(sets: &[InstructionSet]) -> Value {
    Value::Array(sets.iter().map(set_to_value).collect())
}

fn set_to_value(set: &InstructionSet) -> Value {
    let mut pairs = vec![
        pair("name", Value::Str(set.name.clone())),
        pair("type", Value::string(set.kind.as_str())),
    ];
    if let Some(args) = &set.arg_set {
        pairs.push(pair("arg_set", arg_set_to_value(args)));
    }
    pairs.push(pair(
        "instructions",
        Value::Array(set.instructions.iter().map(instruction_to_value).collect()),
    ));
    Value::Hash(pairs)
}

fn arg_set_to_value(args: &ArgSet) -> Value {
    Value::Hash(vec![
        pair(
            "names",
            Value::Array(args.names().iter().map(|n| Value::Str(n.clone())).collect()),
        ),
        pair(
            "types",
            Value::Array(args.types().iter().map(|&t| Value::Integer(t)).collect()),
        ),
    ])
}

fn instruction_to_value(instruction: &Instruction) -> Value {
    let mut pairs = vec![
        pair("action", Value::string(instruction.action.as_str())),
        pair("line", Value::Integer(instruction.line as i64)),
        pair(
            "source_line",
            Value::Integer(i64::from(instruction.source_line)),
        ),
        pair(
            "params",
            Value::Array(
                instruction
                    .params
                    .iter()
                    .map(|p| Value::Str(p.clone()))
                    .collect(),
            ),
        ),
    ];
    if let Some(anchor) = instruction.anchor {
        pairs.push(pair("anchor", Value::Integer(anchor as i64)));
    }
    Value::Hash(pairs)
}
