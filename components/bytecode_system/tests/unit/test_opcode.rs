//! Tests for the Opcode action set

use bytecode_system::Opcode;

#[test]
fn test_literal_action_names() {
    assert_eq!(Opcode::PutSelf.as_str(), "putself");
    assert_eq!(Opcode::PutObject.as_str(), "putobject");
    assert_eq!(Opcode::PutString.as_str(), "putstring");
    assert_eq!(Opcode::PutNil.as_str(), "putnil");
}

#[test]
fn test_variable_action_names() {
    assert_eq!(Opcode::GetLocal.as_str(), "getlocal");
    assert_eq!(Opcode::SetLocal.as_str(), "setlocal");
    assert_eq!(Opcode::GetConstant.as_str(), "getconstant");
    assert_eq!(Opcode::SetConstant.as_str(), "setconstant");
    assert_eq!(Opcode::GetInstanceVariable.as_str(), "getinstancevariable");
    assert_eq!(Opcode::SetInstanceVariable.as_str(), "setinstancevariable");
}

#[test]
fn test_call_action_names() {
    assert_eq!(Opcode::Send.as_str(), "send");
    assert_eq!(Opcode::InvokeBlock.as_str(), "invokeblock");
    assert_eq!(Opcode::GetBlock.as_str(), "getblock");
}

#[test]
fn test_definition_action_names() {
    assert_eq!(Opcode::DefMethod.as_str(), "def_method");
    assert_eq!(Opcode::DefSingletonMethod.as_str(), "def_singleton_method");
    assert_eq!(Opcode::DefClass.as_str(), "def_class");
}

#[test]
fn test_branch_classification() {
    let branching = [Opcode::Jump, Opcode::BranchUnless];
    for op in branching {
        assert!(op.is_branch(), "{} should branch", op);
    }
    let straight = [Opcode::Send, Opcode::Leave, Opcode::Pop, Opcode::PutSelf];
    for op in straight {
        assert!(!op.is_branch(), "{} should not branch", op);
    }
}

#[test]
fn test_serializes_as_action_string() {
    let json = serde_json::to_string(&Opcode::DefSingletonMethod).unwrap();
    assert_eq!(json, "\"def_singleton_method\"");
}
