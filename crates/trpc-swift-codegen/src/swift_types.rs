//! Swift type expressions.
//!
//! # Type Mappings
//!
//! | Schema | Swift |
//! |--------|-------|
//! | `string` | `String` |
//! | `int` | `Int` |
//! | `double` | `Double` |
//! | `bool` | `Bool` |
//! | `date` | `Date` |
//! | `array(T)` | `[T]` |
//! | `dictionary(V)` | `[String: V]` |
//! | `optional(T)` | `T?` |
//! | no payload | `TRPCClient.EmptyObject` |
//! | object / enum / union | model name |

use crate::naming::to_camel_case;
use std::collections::HashSet;
use std::fmt;

/// Spelling of the no-payload type defined by the client template.
pub const NO_PAYLOAD: &str = "TRPCClient.EmptyObject";

/// A resolved Swift type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SwiftType {
    String,
    Int,
    Double,
    Bool,
    Date,
    Array(Box<SwiftType>),
    /// Always keyed by `String`.
    Dictionary(Box<SwiftType>),
    Optional(Box<SwiftType>),
    /// A generated model declared inside the root class.
    Model(String),
    /// The shared "no payload" sentinel.
    NoPayload,
}

impl SwiftType {
    /// Wrap in an optional; an optional stays a single optional layer.
    pub fn optional(inner: SwiftType) -> Self {
        match inner {
            SwiftType::Optional(_) => inner,
            other => SwiftType::Optional(Box::new(other)),
        }
    }

    pub fn array(element: SwiftType) -> Self {
        SwiftType::Array(Box::new(element))
    }

    pub fn dictionary(value: SwiftType) -> Self {
        SwiftType::Dictionary(Box::new(value))
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, SwiftType::Optional(_))
    }

    /// The type with one optional layer removed.
    pub fn unwrapped(&self) -> &SwiftType {
        match self {
            SwiftType::Optional(inner) => inner,
            other => other,
        }
    }

    /// Whether the expression names a type a `public` signature cannot
    /// mention.
    ///
    /// The template declares everything `internal`, and so does every model
    /// listed in `internal_models`.
    pub fn mentions_internal(&self, internal_models: &HashSet<String>) -> bool {
        match self {
            SwiftType::NoPayload => true,
            SwiftType::Model(name) => internal_models.contains(name),
            SwiftType::Array(inner) | SwiftType::Dictionary(inner) | SwiftType::Optional(inner) => {
                inner.mentions_internal(internal_models)
            }
            _ => false,
        }
    }

    /// Lower-camel stem used to name a union case holding this type.
    pub fn case_stem(&self) -> String {
        match self {
            SwiftType::String => "string".to_string(),
            SwiftType::Int => "int".to_string(),
            SwiftType::Double => "double".to_string(),
            SwiftType::Bool => "bool".to_string(),
            SwiftType::Date => "date".to_string(),
            SwiftType::Array(_) => "array".to_string(),
            SwiftType::Dictionary(_) => "dictionary".to_string(),
            SwiftType::Optional(inner) => inner.case_stem(),
            SwiftType::Model(name) => to_camel_case(name),
            SwiftType::NoPayload => "empty".to_string(),
        }
    }
}

impl fmt::Display for SwiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwiftType::String => write!(f, "String"),
            SwiftType::Int => write!(f, "Int"),
            SwiftType::Double => write!(f, "Double"),
            SwiftType::Bool => write!(f, "Bool"),
            SwiftType::Date => write!(f, "Date"),
            SwiftType::Array(element) => write!(f, "[{element}]"),
            SwiftType::Dictionary(value) => write!(f, "[String: {value}]"),
            SwiftType::Optional(inner) => write!(f, "{inner}?"),
            SwiftType::Model(name) => write!(f, "{name}"),
            SwiftType::NoPayload => write!(f, "{NO_PAYLOAD}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn SwiftType___display___primitives() {
        assert_eq!(SwiftType::String.to_string(), "String");
        assert_eq!(SwiftType::Int.to_string(), "Int");
        assert_eq!(SwiftType::Double.to_string(), "Double");
        assert_eq!(SwiftType::Bool.to_string(), "Bool");
        assert_eq!(SwiftType::Date.to_string(), "Date");
    }

    #[test]
    fn SwiftType___display___containers() {
        let nested = SwiftType::array(SwiftType::dictionary(SwiftType::optional(SwiftType::Int)));

        assert_eq!(nested.to_string(), "[[String: Int?]]");
    }

    #[test]
    fn SwiftType___display___no_payload() {
        assert_eq!(SwiftType::NoPayload.to_string(), "TRPCClient.EmptyObject");
        assert_eq!(
            SwiftType::optional(SwiftType::NoPayload).to_string(),
            "TRPCClient.EmptyObject?"
        );
    }

    #[test]
    fn SwiftType___optional___collapses_nested_optionals() {
        let once = SwiftType::optional(SwiftType::String);
        let twice = SwiftType::optional(once.clone());

        assert_eq!(once, twice);
        assert_eq!(twice.to_string(), "String?");
    }

    #[test]
    fn SwiftType___optional_array___keeps_optional_outside() {
        let ty = SwiftType::optional(SwiftType::array(SwiftType::optional(SwiftType::Bool)));

        assert_eq!(ty.to_string(), "[Bool?]?");
    }

    #[test]
    fn SwiftType___unwrapped___strips_one_layer() {
        let ty = SwiftType::optional(SwiftType::Model("User".into()));

        assert_eq!(ty.unwrapped(), &SwiftType::Model("User".into()));
        assert_eq!(SwiftType::Int.unwrapped(), &SwiftType::Int);
    }

    #[test]
    fn SwiftType___mentions_internal___looks_through_containers() {
        let none = HashSet::new();

        assert!(SwiftType::NoPayload.mentions_internal(&none));
        assert!(SwiftType::array(SwiftType::optional(SwiftType::NoPayload)).mentions_internal(&none));
        assert!(!SwiftType::dictionary(SwiftType::Model("User".into())).mentions_internal(&none));
    }

    #[test]
    fn SwiftType___mentions_internal___internal_model() {
        let internal = HashSet::from(["Payload".to_string()]);

        assert!(SwiftType::optional(SwiftType::Model("Payload".into())).mentions_internal(&internal));
        assert!(!SwiftType::Model("User".into()).mentions_internal(&internal));
    }

    #[test]
    fn SwiftType___case_stem___uses_model_name() {
        assert_eq!(SwiftType::Model("UserProfile".into()).case_stem(), "userProfile");
        assert_eq!(SwiftType::array(SwiftType::Int).case_stem(), "array");
        assert_eq!(SwiftType::optional(SwiftType::Date).case_stem(), "date");
    }
}
