//! Property-based tests for client generation
//!
//! Generates arbitrary acyclic schemas and router trees and checks that
//! generation succeeds, is deterministic and keeps model names unique.

use proptest::prelude::*;
use std::collections::HashSet;
use trpc_swift_codegen::indent::indent_swift_code;
use trpc_swift_codegen::template::BUNDLED_TEMPLATE;
use trpc_swift_codegen::{ClientAssembler, generate_client};
use trpc_swift_core::{ApiDefinition, GeneratorFlags, ProcedureDef, RouterNode, SchemaNode};

// Strategy: Generate wire keys, including snake_case and Swift keywords
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z][a-zA-Z0-9_]{0,8}",
        1 => prop::sample::select(vec!["in", "class", "default", "self", "Type", "url"])
            .prop_map(str::to_string),
    ]
}

fn arb_leaf() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        Just(SchemaNode::String),
        Just(SchemaNode::Int),
        Just(SchemaNode::Double),
        Just(SchemaNode::Bool),
        Just(SchemaNode::Date),
        prop::collection::btree_set("[a-z]{1,6}", 1..4)
            .prop_map(|values| SchemaNode::string_enum(None, values)),
    ]
}

// Strategy: Generate acyclic schemas a few levels deep
fn arb_schema() -> impl Strategy<Value = SchemaNode> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaNode::array),
            inner.clone().prop_map(SchemaNode::optional),
            inner.clone().prop_map(SchemaNode::dictionary),
            inner
                .clone()
                .prop_map(|schema| SchemaNode::union([schema, SchemaNode::Null])),
            prop::collection::btree_map(arb_key(), inner, 0..4).prop_map(SchemaNode::object),
        ]
    })
}

fn arb_procedure() -> impl Strategy<Value = ProcedureDef> {
    (
        any::<bool>(),
        prop::option::of(arb_schema()),
        prop::option::of(arb_schema()),
    )
        .prop_map(|(is_query, input, output)| {
            let mut procedure = if is_query {
                ProcedureDef::query()
            } else {
                ProcedureDef::mutation()
            };
            if let Some(input) = input {
                procedure = procedure.with_input(input);
            }
            if let Some(output) = output {
                procedure = procedure.with_output(output);
            }
            procedure
        })
}

// Strategy: Generate a root router with one optional nested router
fn arb_api() -> impl Strategy<Value = ApiDefinition> {
    (
        prop::collection::btree_map(arb_key(), arb_procedure(), 0..5),
        prop::option::of((
            arb_key(),
            prop::collection::btree_map(arb_key(), arb_procedure(), 1..4),
        )),
    )
        .prop_map(|(procedures, nested)| {
            let mut root = RouterNode::new();
            for (key, procedure) in procedures {
                root = root.procedure(key, procedure);
            }
            if let Some((key, children)) = nested {
                let mut router = RouterNode::new();
                for (child, procedure) in children {
                    router = router.procedure(child, procedure);
                }
                root = root.router(key, router);
            }
            ApiDefinition::new(root)
        })
}

/// Type names declared after the runtime template.
fn declared_types(source: &str) -> Vec<String> {
    let template = indent_swift_code(BUNDLED_TEMPLATE);
    source[template.len()..]
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let line = line.strip_prefix("final ").unwrap_or(line);
            let line = line.strip_prefix("indirect ").unwrap_or(line);
            ["struct ", "enum ", "class "]
                .iter()
                .find_map(|keyword| line.strip_prefix(keyword))
                .and_then(|rest| rest.split(':').next())
                .map(str::to_string)
        })
        .filter(|name| name != "CodingKeys")
        .collect()
}

proptest! {
    /// Property: Generation is a pure function of its inputs
    #[test]
    fn proptest_generation_is_deterministic(api in arb_api(), aliases in any::<bool>()) {
        let flags = GeneratorFlags::new().with_type_aliases(aliases);

        let first = generate_client("API", &api, &flags)
            .expect("Acyclic typed schemas should always generate");
        let second = generate_client("API", &api, &flags)
            .expect("Acyclic typed schemas should always generate");

        prop_assert_eq!(first, second);
    }

    /// Property: Every declared type name is unique across the file
    #[test]
    fn proptest_declared_names_are_unique(api in arb_api()) {
        let source = generate_client("API", &api, &GeneratorFlags::default())
            .expect("Acyclic typed schemas should always generate");

        let names = declared_types(&source);
        let unique: HashSet<&String> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len(), "duplicate names in {:?}", names);
    }

    /// Property: Wrapping an optional in another optional changes nothing
    #[test]
    fn proptest_optional_is_idempotent(schema in arb_schema()) {
        let once = RouterNode::new().procedure(
            "get",
            ProcedureDef::query().with_output(SchemaNode::optional(schema.clone())),
        );
        let twice = RouterNode::new().procedure(
            "get",
            ProcedureDef::query().with_output(SchemaNode::optional(SchemaNode::optional(schema))),
        );

        let flags = GeneratorFlags::default();
        let once = generate_client("API", &ApiDefinition::from(once), &flags).expect("should generate");
        let twice = generate_client("API", &ApiDefinition::from(twice), &flags).expect("should generate");

        prop_assert_eq!(once, twice);
    }

    /// Property: One alias per model, each pointing into the root class
    #[test]
    fn proptest_aliases_match_models(api in arb_api()) {
        let client = ClientAssembler::new(GeneratorFlags::new().with_type_aliases(true))
            .assemble("API", &api)
            .expect("Acyclic typed schemas should always generate");

        let template = indent_swift_code(BUNDLED_TEMPLATE);
        let aliases = client.source[template.len()..]
            .lines()
            .filter(|line| line.starts_with("typealias "))
            .count();

        prop_assert_eq!(aliases, client.models.len());
    }
}
