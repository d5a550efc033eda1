#![allow(non_snake_case)]

use super::*;
use serde_json::json;

// Deserialization tests

#[test]
fn SchemaNode___deserialize___primitive_kinds() {
    let node: SchemaNode = serde_json::from_value(json!({"kind": "date"})).unwrap();

    assert_eq!(node, SchemaNode::Date);
}

#[test]
fn SchemaNode___deserialize___object_keeps_field_order() {
    let node: SchemaNode = serde_json::from_value(json!({
        "kind": "object",
        "fields": {
            "zeta": {"kind": "string"},
            "alpha": {"kind": "int"},
            "mid": {"kind": "optional", "of": {"kind": "bool"}}
        }
    }))
    .unwrap();

    let SchemaNode::Object { name, fields } = node else {
        panic!("expected object");
    };
    let keys: Vec<&str> = fields.keys().map(String::as_str).collect();

    assert!(name.is_none());
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn SchemaNode___deserialize___dictionary_key_defaults_to_string() {
    let node: SchemaNode = serde_json::from_value(json!({
        "kind": "dictionary",
        "value": {"kind": "int"}
    }))
    .unwrap();

    assert_eq!(node, SchemaNode::dictionary(SchemaNode::Int));
}

#[test]
fn SchemaNode___deserialize___union_with_literals() {
    let node: SchemaNode = serde_json::from_value(json!({
        "kind": "union",
        "name": "Status",
        "variants": [
            {"kind": "literal", "value": "active"},
            {"kind": "literal", "value": 3},
            {"kind": "literal", "value": true}
        ]
    }))
    .unwrap();

    let SchemaNode::Union { name, variants } = node else {
        panic!("expected union");
    };

    assert_eq!(name.as_deref(), Some("Status"));
    assert_eq!(
        variants,
        vec![
            SchemaNode::literal(LiteralValue::String("active".into())),
            SchemaNode::literal(LiteralValue::Integer(3)),
            SchemaNode::literal(LiteralValue::Bool(true)),
        ]
    );
}

#[test]
fn SchemaNode___deserialize___unknown_kind_is_rejected() {
    let result = serde_json::from_value::<SchemaNode>(json!({"kind": "bigint"}));

    assert!(result.is_err());
}

// Helper tests

#[test]
fn SchemaNode___declared_name___only_for_models() {
    assert_eq!(
        SchemaNode::named_object("User", [("id", SchemaNode::String)]).declared_name(),
        Some("User")
    );
    assert_eq!(SchemaNode::reference("User").declared_name(), None);
    assert_eq!(SchemaNode::String.declared_name(), None);
}

#[test]
fn SchemaNode___is_model___objects_enums_unions() {
    assert!(SchemaNode::object([("a", SchemaNode::Int)]).is_model());
    assert!(SchemaNode::string_enum(None, ["a", "b"]).is_model());
    assert!(SchemaNode::union([SchemaNode::Int, SchemaNode::String]).is_model());
    assert!(!SchemaNode::array(SchemaNode::Int).is_model());
    assert!(!SchemaNode::reference("User").is_model());
}

#[test]
fn LiteralValue___primitive___maps_to_schema_kind() {
    assert_eq!(LiteralValue::Bool(true).primitive(), SchemaNode::Bool);
    assert_eq!(LiteralValue::Integer(1).primitive(), SchemaNode::Int);
    assert_eq!(LiteralValue::Float(1.5).primitive(), SchemaNode::Double);
    assert_eq!(
        LiteralValue::String("x".into()).primitive(),
        SchemaNode::String
    );
}

#[test]
fn LiteralValue___display___quotes_strings() {
    assert_eq!(LiteralValue::String("on".into()).to_string(), "\"on\"");
    assert_eq!(LiteralValue::Integer(-4).to_string(), "-4");
}
