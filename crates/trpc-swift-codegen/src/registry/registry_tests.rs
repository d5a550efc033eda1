#![allow(non_snake_case)]

use super::*;
use trpc_swift_core::{SchemaDefinitions, SchemaNode};

fn fingerprint(schema: &SchemaNode) -> Fingerprint {
    Fingerprint::of(schema, &SchemaDefinitions::new(), "test").unwrap()
}

fn user() -> SchemaNode {
    SchemaNode::object([("id", SchemaNode::String)])
}

fn post() -> SchemaNode {
    SchemaNode::object([("title", SchemaNode::String)])
}

#[test]
fn ModelRegistry___register___assigns_desired_name() {
    let mut registry = ModelRegistry::new();

    let name = registry
        .register(fingerprint(&user()), "User", &BTreeSet::new())
        .unwrap();

    assert_eq!(name, "User");
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.lookup(&fingerprint(&user())), Some("User"));
}

#[test]
fn ModelRegistry___register___is_idempotent_per_fingerprint() {
    let mut registry = ModelRegistry::new();

    let first = registry
        .register(fingerprint(&user()), "User", &BTreeSet::new())
        .unwrap();
    let second = registry
        .register(fingerprint(&user()), "Account", &BTreeSet::new())
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(registry.len(), 1);
}

#[test]
fn ModelRegistry___register___suffixes_distinct_shapes_with_same_name() {
    let mut registry = ModelRegistry::new();

    let first = registry
        .register(fingerprint(&user()), "Item", &BTreeSet::new())
        .unwrap();
    let second = registry
        .register(fingerprint(&post()), "Item", &BTreeSet::new())
        .unwrap();

    assert_eq!(first, "Item");
    assert_eq!(second, "Item2");
}

#[test]
fn ModelRegistry___register___avoids_visible_names() {
    let mut registry = ModelRegistry::new();
    let visible: BTreeSet<String> = ["User".to_string()].into();

    let name = registry
        .register(fingerprint(&user()), "User", &visible)
        .unwrap();

    assert_eq!(name, "User2");
}

#[test]
fn ModelRegistry___register___avoids_template_names() {
    let mut registry = ModelRegistry::new();

    let name = registry
        .register(fingerprint(&user()), "TRPCError", &BTreeSet::new())
        .unwrap();

    assert_eq!(name, "TRPCError2");
}

#[test]
fn ModelRegistry___claim___fails_after_max_attempts() {
    let mut registry = ModelRegistry::new();
    registry.reserve("Item");
    for n in 2..=MAX_NAME_ATTEMPTS {
        registry.reserve(&format!("Item{n}"));
    }

    let err = registry.claim("Item", &BTreeSet::new()).unwrap_err();

    assert!(matches!(
        err,
        GenerationError::NameCollisionUnresolvable { attempts, .. } if attempts == MAX_NAME_ATTEMPTS
    ));
}

#[test]
fn ModelRegistry___define___completes_in_progress_entry() {
    let mut registry = ModelRegistry::new();
    let fp = fingerprint(&user());
    registry.register(fp.clone(), "User", &BTreeSet::new()).unwrap();

    assert!(registry.entry(&fp).unwrap().is_in_progress());

    registry.define(&fp, "struct User: Codable {\n}\n".to_string());

    let entry = registry.entry(&fp).unwrap();
    assert!(!entry.is_in_progress());
    assert_eq!(entry.definition(), Some("struct User: Codable {\n}\n"));
}

#[test]
fn ModelRegistry___define___keeps_first_definition() {
    let mut registry = ModelRegistry::new();
    let fp = fingerprint(&user());
    registry.register(fp.clone(), "User", &BTreeSet::new()).unwrap();

    registry.define(&fp, "first".to_string());
    registry.define(&fp, "second".to_string());

    assert_eq!(registry.render(), "first");
}

#[test]
fn ModelRegistry___declaration_order___follows_discovery_and_marks_cycles() {
    let mut registry = ModelRegistry::new();
    let user_fp = fingerprint(&user());
    let post_fp = fingerprint(&post());
    registry.register(post_fp.clone(), "Post", &BTreeSet::new()).unwrap();
    registry.register(user_fp, "User", &BTreeSet::new()).unwrap();
    registry.mark_forward_referenced(&post_fp);

    let order = registry.declaration_order();

    assert_eq!(
        order,
        vec![
            ModelDeclaration {
                name: "Post".into(),
                forward_referenced: true
            },
            ModelDeclaration {
                name: "User".into(),
                forward_referenced: false
            },
        ]
    );
}

#[test]
fn ModelRegistry___render___joins_definitions_in_discovery_order() {
    let mut registry = ModelRegistry::new();
    let user_fp = fingerprint(&user());
    let post_fp = fingerprint(&post());
    registry.register(user_fp.clone(), "User", &BTreeSet::new()).unwrap();
    registry.register(post_fp.clone(), "Post", &BTreeSet::new()).unwrap();

    // Inner models usually finish first; order must still follow discovery.
    registry.define(&post_fp, "struct Post {}\n".to_string());
    registry.define(&user_fp, "struct User {}\n".to_string());

    assert_eq!(registry.render(), "struct User {}\n\nstruct Post {}\n");
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["User", "Post"]);
}

#[test]
fn claim_member_name___suffixes_within_scope() {
    let mut taken: HashSet<String> = ["url".to_string()].into();

    let first = claim_member_name("url", &mut taken).unwrap();
    let second = claim_member_name("url", &mut taken).unwrap();

    assert_eq!(first, "url2");
    assert_eq!(second, "url3");
}

#[test]
fn ModelRegistry___claim_member___avoids_type_names() {
    let mut registry = ModelRegistry::new();
    registry.register(fingerprint(&user()), "User", &BTreeSet::new()).unwrap();
    let mut taken = HashSet::new();

    let name = registry.claim_member("User", &mut taken).unwrap();

    assert_eq!(name, "User2");
    assert!(taken.contains("User2"));
}

#[test]
fn ModelRegistry___mark_internal___tracks_names() {
    let mut registry = ModelRegistry::new();
    registry.register(fingerprint(&user()), "User", &BTreeSet::new()).unwrap();

    registry.mark_internal("User");

    assert!(registry.internal_models().contains("User"));
    assert!(!registry.internal_models().contains("Post"));
}
