//! Contract compliance tests for bytecode_system
//!
//! Verifies the IR upholds the invariants the compiler and execution engine
//! rely on: parallel ArgSet arrays, resolved anchors, stable action names.

use bytecode_system::{ArgKind, ArgSet, InstructionSet, Opcode, SetKind};

/// Every action in the closed opcode set keeps its wire name
#[test]
fn test_contract_action_vocabulary() {
    let expected = [
        (Opcode::PutSelf, "putself"),
        (Opcode::PutObject, "putobject"),
        (Opcode::PutString, "putstring"),
        (Opcode::PutNil, "putnil"),
        (Opcode::GetLocal, "getlocal"),
        (Opcode::SetLocal, "setlocal"),
        (Opcode::GetConstant, "getconstant"),
        (Opcode::SetConstant, "setconstant"),
        (Opcode::GetInstanceVariable, "getinstancevariable"),
        (Opcode::SetInstanceVariable, "setinstancevariable"),
        (Opcode::Send, "send"),
        (Opcode::InvokeBlock, "invokeblock"),
        (Opcode::GetBlock, "getblock"),
        (Opcode::DefMethod, "def_method"),
        (Opcode::DefSingletonMethod, "def_singleton_method"),
        (Opcode::DefClass, "def_class"),
        (Opcode::BranchUnless, "branchunless"),
        (Opcode::Jump, "jump"),
        (Opcode::Pop, "pop"),
        (Opcode::Leave, "leave"),
    ];
    for (op, name) in expected {
        assert_eq!(op.as_str(), name);
    }
}

/// ArgSet cannot be grown out of lockstep
#[test]
fn test_contract_arg_set_shape() {
    let mut args = ArgSet::new();
    for (i, kind) in [
        ArgKind::Normal,
        ArgKind::Optional,
        ArgKind::Splat,
        ArgKind::Keyword,
        ArgKind::Block,
    ]
    .into_iter()
    .enumerate()
    {
        args.push(format!("p{}", i), kind);
    }
    assert_eq!(args.names().len(), 5);
    assert_eq!(args.types(), &[0, 1, 2, 3, 4]);
}

/// A completed set with back-filled anchors passes validation; anchors
/// always land inside the same set
#[test]
fn test_contract_anchor_resolution() {
    let mut set = InstructionSet::new("ProgramStart", SetKind::Program);
    // while-style loop skeleton: cond, branchunless end, body, jump start
    let start = set.next_index();
    set.emit(Opcode::GetLocal, 1, vec!["0".into(), "0".into()]);
    let exit = set.emit(Opcode::BranchUnless, 1, vec![]);
    set.emit(Opcode::PutSelf, 2, vec![]);
    set.emit(Opcode::Send, 2, vec!["tick".into(), "0".into()]);
    set.emit(Opcode::Pop, 2, vec![]);
    let back = set.emit(Opcode::Jump, 3, vec![]);
    set.set_anchor(back, start);
    let end = set.emit(Opcode::PutNil, 3, vec![]);
    set.set_anchor(exit, end);
    set.emit(Opcode::Leave, 3, vec![]);

    assert!(set.validate().is_ok());
    for inst in &set.instructions {
        if let Some(anchor) = inst.anchor {
            assert!(anchor < set.instructions.len());
        }
    }
}
