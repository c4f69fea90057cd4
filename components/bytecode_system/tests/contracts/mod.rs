//! Contract test entry point for bytecode_system

mod test_contract_compliance;
