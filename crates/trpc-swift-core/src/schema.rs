//! Schema description types
//!
//! A [`SchemaNode`] is the closed, recursive description of a procedure's
//! input or output. Definitions are usually loaded from JSON:
//!
//! ```json
//! { "kind": "object", "fields": { "id": { "kind": "string" } } }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Shared named schemas that `ref` nodes resolve against
pub type SchemaDefinitions = IndexMap<String, SchemaNode>;

/// A recursive type description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaNode {
    String,
    Int,
    Double,
    Bool,
    /// Timestamp, carried on the wire in the fixed millisecond date format
    Date,
    Null,

    /// A single constant value
    Literal { value: LiteralValue },

    Array { of: Box<SchemaNode> },

    Optional { of: Box<SchemaNode> },

    /// Fields keep their declaration order
    Object {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        fields: IndexMap<String, SchemaNode>,
    },

    /// String-keyed map; any other key type is rejected at generation time
    Dictionary {
        #[serde(default = "default_dictionary_key")]
        key: Box<SchemaNode>,
        value: Box<SchemaNode>,
    },

    /// Shorthand for a union of string literals
    Enum {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        values: Vec<String>,
    },

    /// Variants are tried in declaration order
    Union {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        variants: Vec<SchemaNode>,
    },

    /// Reference to an entry of [`SchemaDefinitions`]
    Ref { id: String },

    /// An untyped schema (`any`/`unknown` on the source side)
    Unknown,
}

fn default_dictionary_key() -> Box<SchemaNode> {
    Box::new(SchemaNode::String)
}

/// A literal constant inside a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl LiteralValue {
    /// Schema of the primitive this literal belongs to
    pub fn primitive(&self) -> SchemaNode {
        match self {
            LiteralValue::Bool(_) => SchemaNode::Bool,
            LiteralValue::Integer(_) => SchemaNode::Int,
            LiteralValue::Float(_) => SchemaNode::Double,
            LiteralValue::String(_) => SchemaNode::String,
        }
    }
}

impl std::fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralValue::Bool(b) => write!(f, "{b}"),
            LiteralValue::Integer(i) => write!(f, "{i}"),
            LiteralValue::Float(x) => write!(f, "{x:?}"),
            LiteralValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl SchemaNode {
    pub fn array(of: SchemaNode) -> Self {
        SchemaNode::Array { of: Box::new(of) }
    }

    pub fn optional(of: SchemaNode) -> Self {
        SchemaNode::Optional { of: Box::new(of) }
    }

    /// Anonymous object from `(field, schema)` pairs
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, SchemaNode)>) -> Self {
        SchemaNode::Object {
            name: None,
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Object carrying a declared identifier
    pub fn named_object<K: Into<String>>(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, SchemaNode)>,
    ) -> Self {
        SchemaNode::Object {
            name: Some(name.into()),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// String-keyed dictionary
    pub fn dictionary(value: SchemaNode) -> Self {
        SchemaNode::Dictionary {
            key: default_dictionary_key(),
            value: Box::new(value),
        }
    }

    pub fn string_enum<S: Into<String>>(
        name: Option<&str>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        SchemaNode::Enum {
            name: name.map(str::to_string),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn union(variants: impl IntoIterator<Item = SchemaNode>) -> Self {
        SchemaNode::Union {
            name: None,
            variants: variants.into_iter().collect(),
        }
    }

    pub fn literal(value: LiteralValue) -> Self {
        SchemaNode::Literal { value }
    }

    pub fn reference(id: impl Into<String>) -> Self {
        SchemaNode::Ref { id: id.into() }
    }

    /// Short kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            SchemaNode::String => "string",
            SchemaNode::Int => "int",
            SchemaNode::Double => "double",
            SchemaNode::Bool => "bool",
            SchemaNode::Date => "date",
            SchemaNode::Null => "null",
            SchemaNode::Literal { .. } => "literal",
            SchemaNode::Array { .. } => "array",
            SchemaNode::Optional { .. } => "optional",
            SchemaNode::Object { .. } => "object",
            SchemaNode::Dictionary { .. } => "dictionary",
            SchemaNode::Enum { .. } => "enum",
            SchemaNode::Union { .. } => "union",
            SchemaNode::Ref { .. } => "ref",
            SchemaNode::Unknown => "unknown",
        }
    }

    /// Whether resolving this node produces a named model
    pub fn is_model(&self) -> bool {
        matches!(
            self,
            SchemaNode::Object { .. } | SchemaNode::Enum { .. } | SchemaNode::Union { .. }
        )
    }

    /// Declared identifier of an object, enum or union
    pub fn declared_name(&self) -> Option<&str> {
        match self {
            SchemaNode::Object { name, .. }
            | SchemaNode::Enum { name, .. }
            | SchemaNode::Union { name, .. } => name.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "schema/schema_tests.rs"]
mod schema_tests;
