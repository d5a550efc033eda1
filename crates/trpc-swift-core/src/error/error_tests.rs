#![allow(non_snake_case)]

use super::*;

#[test]
fn GenerationError___unresolvable___displays_path_and_reason() {
    let err = GenerationError::unresolvable("API.getUser.input", "untyped schema");

    let display = err.to_string();

    assert_eq!(
        display,
        "unresolvable schema at API.getUser.input: untyped schema"
    );
}

#[test]
fn GenerationError___non_string_key___displays_key_type() {
    let err = GenerationError::NonStringDictionaryKey {
        path: "API.stats.output".into(),
        key: "int".into(),
    };

    let display = err.to_string();

    assert!(display.contains("API.stats.output"));
    assert!(display.contains("int"));
}

#[test]
fn GenerationError___missing_template___keeps_io_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = GenerationError::MissingTemplateResource {
        path: PathBuf::from("templates/Missing.swift"),
        source: io,
    };

    let source = std::error::Error::source(&err);

    assert!(source.is_some());
    assert!(err.to_string().contains("Missing.swift"));
}

#[test]
fn GenerationError___all_variants___have_unique_codes() {
    let errors = vec![
        GenerationError::unresolvable("a", "b"),
        GenerationError::NonStringDictionaryKey {
            path: "a".into(),
            key: "b".into(),
        },
        GenerationError::UnknownReference {
            path: "a".into(),
            id: "b".into(),
        },
        GenerationError::InvalidReference {
            path: "a".into(),
            id: "b".into(),
        },
        GenerationError::NameCollisionUnresolvable {
            name: "a".into(),
            attempts: 1,
        },
        GenerationError::MissingTemplateResource {
            path: PathBuf::new(),
            source: std::io::Error::other("x"),
        },
        GenerationError::WriteFailed {
            path: PathBuf::new(),
            source: std::io::Error::other("x"),
        },
        GenerationError::InvalidDefinition("x".into()),
    ];

    let codes: Vec<u8> = errors.iter().map(|e| e.error_code()).collect();
    let unique: std::collections::HashSet<u8> = codes.iter().copied().collect();

    assert_eq!(codes.len(), unique.len(), "All error codes should be unique");
}

#[test]
fn GenerationError___from_serde_error___converts_to_invalid_definition() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let err: GenerationError = json_err.into();

    assert!(matches!(err, GenerationError::InvalidDefinition(_)));
}
