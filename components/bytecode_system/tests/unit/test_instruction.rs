//! Tests for Instruction, ArgSet and InstructionSet

use bytecode_system::{ArgKind, ArgSet, InstructionSet, Opcode, SetKind};

#[test]
fn test_arg_kind_tags() {
    assert_eq!(ArgKind::Normal.tag(), 0);
    assert_eq!(ArgKind::Optional.tag(), 1);
    assert_eq!(ArgKind::Splat.tag(), 2);
    assert_eq!(ArgKind::Keyword.tag(), 3);
    assert_eq!(ArgKind::Block.tag(), 4);
}

#[test]
fn test_arg_set_push_keeps_arrays_parallel() {
    let mut args = ArgSet::new();
    args.push("a", ArgKind::Normal);
    args.push("b", ArgKind::Optional);
    args.push("rest", ArgKind::Splat);
    assert_eq!(args.names().len(), args.types().len());
    assert_eq!(args.types(), &[0, 1, 2]);
}

#[test]
fn test_set_kind_names() {
    assert_eq!(SetKind::Program.as_str(), "Program");
    assert_eq!(SetKind::Def.as_str(), "Def");
    assert_eq!(SetKind::DefClass.as_str(), "DefClass");
    assert_eq!(SetKind::Block.as_str(), "Block");
}

#[test]
fn test_emit_returns_sequential_indices() {
    let mut set = InstructionSet::new("foo", SetKind::Def);
    assert_eq!(set.emit(Opcode::PutSelf, 1, vec![]), 0);
    assert_eq!(set.emit(Opcode::Send, 1, vec!["bar".into(), "0".into()]), 1);
    assert_eq!(set.emit(Opcode::Leave, 2, vec![]), 2);
    assert_eq!(set.next_index(), 3);
}

#[test]
fn test_bytecode_line_tracks_position_not_source() {
    let mut set = InstructionSet::new("ProgramStart", SetKind::Program);
    set.emit(Opcode::PutObject, 5, vec!["10".into()]);
    set.emit(Opcode::Pop, 5, vec![]);
    assert_eq!(set.instructions[0].source_line, 5);
    assert_eq!(set.instructions[1].source_line, 5);
    assert_eq!(set.instructions[0].line, 0);
    assert_eq!(set.instructions[1].line, 1);
}

#[test]
fn test_set_anchor_resolves_jump() {
    let mut set = InstructionSet::new("ProgramStart", SetKind::Program);
    set.emit(Opcode::PutObject, 1, vec!["true".into()]);
    let branch = set.emit(Opcode::BranchUnless, 1, vec![]);
    set.emit(Opcode::PutString, 2, vec!["yes".into()]);
    let join = set.emit(Opcode::Leave, 3, vec![]);
    set.set_anchor(branch, join);
    assert_eq!(set.instructions[branch].anchor, Some(join));
    assert!(set.validate().is_ok());
}

#[test]
fn test_validate_flags_missing_anchor() {
    let mut set = InstructionSet::new("ProgramStart", SetKind::Program);
    set.emit(Opcode::BranchUnless, 1, vec![]);
    let err = set.validate().unwrap_err();
    assert!(err.contains("unresolved"));
}

#[test]
fn test_program_set_has_no_arg_set() {
    let set = InstructionSet::new("ProgramStart", SetKind::Program);
    assert!(set.arg_set.is_none());
}

#[test]
fn test_serialized_field_names() {
    let mut set = InstructionSet::new("foo", SetKind::Def);
    let mut args = ArgSet::new();
    args.push("x", ArgKind::Normal);
    set.arg_set = Some(args);
    set.emit(Opcode::GetLocal, 1, vec!["0".into(), "0".into()]);
    set.emit(Opcode::Leave, 1, vec![]);

    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["name"], "foo");
    assert_eq!(json["type"], "Def");
    assert_eq!(json["arg_set"]["names"][0], "x");
    assert_eq!(json["arg_set"]["types"][0], 0);
    let first = &json["instructions"][0];
    assert_eq!(first["action"], "getlocal");
    assert_eq!(first["line"], 0);
    assert_eq!(first["source_line"], 1);
    assert_eq!(first["params"][1], "0");
    // anchor key is omitted for non-branch instructions
    assert!(first.get("anchor").is_none());
}
