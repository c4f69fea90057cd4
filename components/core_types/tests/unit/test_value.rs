//! Unit tests for the host-embeddable value model

use core_types::Value;

#[test]
fn test_kind_names_match_error_wording() {
    let cases: [(Value, &str); 7] = [
        (Value::Integer(42), "Integer"),
        (Value::Float(3.5), "Float"),
        (Value::string("x"), "String"),
        (Value::Boolean(false), "Boolean"),
        (Value::Nil, "Nil"),
        (Value::Array(vec![]), "Array"),
        (Value::Hash(vec![]), "Hash"),
    ];
    for (value, name) in cases {
        assert_eq!(value.kind_name(), name);
    }
}

#[test]
fn test_as_str_only_for_text() {
    assert_eq!(Value::string("source").as_str(), Some("source"));
    assert_eq!(Value::Integer(1).as_str(), None);
    assert_eq!(Value::Nil.as_str(), None);
}

#[test]
fn test_nested_rows_compare_structurally() {
    let row = |line: i64, kind: &str, literal: &str| {
        Value::Array(vec![
            Value::Integer(line),
            Value::string(kind),
            Value::string(literal),
        ])
    };
    assert_eq!(row(1, "on_class", "class"), row(1, "on_class", "class"));
    assert_ne!(row(1, "on_class", "class"), row(2, "on_class", "class"));
}

#[test]
fn test_hash_preserves_insertion_order() {
    let hash = Value::Hash(vec![
        ("name".to_string(), Value::string("ProgramStart")),
        ("type".to_string(), Value::string("Program")),
        ("instructions".to_string(), Value::Array(vec![])),
    ]);
    let Value::Hash(pairs) = &hash else {
        panic!("not a hash");
    };
    let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["name", "type", "instructions"]);
}

#[test]
fn test_display_is_readable() {
    let value = Value::Hash(vec![(
        "params".to_string(),
        Value::Array(vec![Value::string("0"), Value::string("1")]),
    )]);
    assert_eq!(value.to_string(), "{ params: [\"0\", \"1\"] }");
}
