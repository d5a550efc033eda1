//! Error types for client generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Error type for generation operations
///
/// Every variant is fatal: a run that hits one of these produces no output.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A schema kind the target language cannot represent
    #[error("unresolvable schema at {path}: {reason}")]
    UnresolvableSchemaKind { path: String, reason: String },

    /// A dictionary whose key schema is not a string
    #[error("dictionary at {path} has a non-string key type: {key}")]
    NonStringDictionaryKey { path: String, key: String },

    /// A `ref` to an id missing from the shared definitions
    #[error("unknown schema reference '{id}' at {path}")]
    UnknownReference { path: String, id: String },

    /// A `ref` whose target is not an object, enum or union
    #[error("schema reference '{id}' at {path} must point at an object, enum or union")]
    InvalidReference { path: String, id: String },

    /// Suffixing ran out of candidates for a name
    #[error("could not find a free name for '{name}' after {attempts} attempts")]
    NameCollisionUnresolvable { name: String, attempts: usize },

    /// A root class name that cannot be declared next to the template
    #[error("client name '{name}' cannot name the root class: {reason}")]
    InvalidClientName { name: String, reason: String },

    /// The client runtime template could not be read
    #[error("client template {path:?} is unreadable: {source}")]
    MissingTemplateResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the generated client failed
    #[error("failed to write {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed API definition input
    #[error("invalid API definition: {0}")]
    InvalidDefinition(String),
}

impl GenerationError {
    /// Returns a stable numeric code, used as the CLI exit status
    pub fn error_code(&self) -> u8 {
        match self {
            GenerationError::UnresolvableSchemaKind { .. } => 10,
            GenerationError::NonStringDictionaryKey { .. } => 11,
            GenerationError::UnknownReference { .. } => 12,
            GenerationError::InvalidReference { .. } => 13,
            GenerationError::NameCollisionUnresolvable { .. } => 14,
            GenerationError::InvalidClientName { .. } => 15,
            GenerationError::MissingTemplateResource { .. } => 20,
            GenerationError::WriteFailed { .. } => 21,
            GenerationError::InvalidDefinition(_) => 30,
        }
    }

    /// Shorthand for [`GenerationError::UnresolvableSchemaKind`]
    pub fn unresolvable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerationError::UnresolvableSchemaKind {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::InvalidDefinition(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
