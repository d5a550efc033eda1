//! Model declarations and their Swift rendering.
//!
//! The resolver builds a [`ModelDecl`] once all nested types of a schema are
//! known, then renders it into the registry. Rendering is unindented; the
//! assembler re-indents the whole file in one pass.

use crate::naming::{escape_keyword, string_literal};
use crate::swift_types::SwiftType;
use std::collections::HashSet;
use std::fmt;
use trpc_swift_core::GeneratorFlags;

/// One stored property of a struct or class model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelField {
    /// Key on the wire.
    pub key: String,
    /// Swift property name, before keyword escaping.
    pub property: String,
    pub ty: SwiftType,
}

/// Raw value type of a literal enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValueType {
    String,
    Int,
}

impl fmt::Display for RawValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValueType::String => write!(f, "String"),
            RawValueType::Int => write!(f, "Int"),
        }
    }
}

/// A case of a literal enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    pub name: String,
    /// Swift literal for the raw value; `None` when it equals the case name.
    pub raw_value: Option<String>,
}

/// A case of a union enum, holding one variant's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionCase {
    pub name: String,
    pub ty: SwiftType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelKind {
    /// Object schema.
    Struct(Vec<ModelField>),
    /// Union of string or integer literals.
    RawEnum {
        raw_type: RawValueType,
        cases: Vec<EnumCase>,
    },
    /// Union of arbitrary types, decoded by trying each case in order.
    Union(Vec<UnionCase>),
}

/// A fully resolved model, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDecl {
    pub name: String,
    pub kind: ModelKind,
}

impl ModelDecl {
    /// Whether the model has to stay internal under public access: a union
    /// with a case holding an internal type cannot be public.
    pub fn is_internal(&self, internal_models: &HashSet<String>) -> bool {
        match &self.kind {
            ModelKind::Union(cases) => cases
                .iter()
                .any(|case| case.ty.mentions_internal(internal_models)),
            ModelKind::Struct(_) | ModelKind::RawEnum { .. } => false,
        }
    }

    /// Render the declaration.
    ///
    /// `recursive` models were referenced while still being resolved: objects
    /// become final classes and unions become `indirect` enums. Members whose
    /// signature mentions one of `internal_models` stay internal.
    pub fn render(
        &self,
        recursive: bool,
        flags: &GeneratorFlags,
        internal_models: &HashSet<String>,
    ) -> String {
        match &self.kind {
            ModelKind::Struct(fields) => {
                self.render_struct(fields, recursive, flags, internal_models)
            }
            ModelKind::RawEnum { raw_type, cases } => self.render_raw_enum(*raw_type, cases, flags),
            ModelKind::Union(cases) => self.render_union(cases, recursive, flags, internal_models),
        }
    }

    fn render_struct(
        &self,
        fields: &[ModelField],
        recursive: bool,
        flags: &GeneratorFlags,
        internal_models: &HashSet<String>,
    ) -> String {
        let access = flags.access_prefix();
        let mut code = String::new();

        if recursive {
            code.push_str(&format!("{access}final class {}: Codable {{\n", self.name));
        } else {
            code.push_str(&format!("{access}struct {}: Codable {{\n", self.name));
        }

        for field in fields {
            code.push_str(&format!(
                "{}var {}: {}\n",
                member_access(flags, internal_models, [&field.ty]),
                escape_keyword(&field.property),
                field.ty
            ));
        }

        if fields.iter().any(|field| field.property != field.key) {
            code.push_str("\nenum CodingKeys: String, CodingKey {\n");
            for field in fields {
                let case = escape_keyword(&field.property);
                if field.property == field.key {
                    code.push_str(&format!("case {case}\n"));
                } else {
                    code.push_str(&format!("case {case} = {}\n", string_literal(&field.key)));
                }
            }
            code.push_str("}\n");
        }

        // Classes get no synthesized memberwise initializer, and the one
        // synthesized for structs is never public.
        if recursive || flags.public_access {
            let init_access = member_access(flags, internal_models, fields.iter().map(|field| &field.ty));
            let parameters = fields
                .iter()
                .map(|field| {
                    let default = if field.ty.is_optional() { " = nil" } else { "" };
                    format!("{}: {}{default}", escape_keyword(&field.property), field.ty)
                })
                .collect::<Vec<_>>()
                .join(", ");

            code.push_str(&format!("\n{init_access}init({parameters}) {{\n"));
            for field in fields {
                let property = escape_keyword(&field.property);
                code.push_str(&format!("self.{property} = {property}\n"));
            }
            code.push_str("}\n");
        }

        code.push_str("}\n");
        code
    }

    fn render_raw_enum(&self, raw_type: RawValueType, cases: &[EnumCase], flags: &GeneratorFlags) -> String {
        let mut code = format!(
            "{}enum {}: {raw_type}, Codable {{\n",
            flags.access_prefix(),
            self.name
        );
        for case in cases {
            let name = escape_keyword(&case.name);
            match &case.raw_value {
                Some(raw) => code.push_str(&format!("case {name} = {raw}\n")),
                None => code.push_str(&format!("case {name}\n")),
            }
        }
        code.push_str("}\n");
        code
    }

    fn render_union(
        &self,
        cases: &[UnionCase],
        recursive: bool,
        flags: &GeneratorFlags,
        internal_models: &HashSet<String>,
    ) -> String {
        let access = member_access(flags, internal_models, cases.iter().map(|case| &case.ty));
        let indirect = if recursive { "indirect " } else { "" };
        let mut code = format!("{access}{indirect}enum {}: Codable {{\n", self.name);

        for case in cases {
            code.push_str(&format!("case {}({})\n", escape_keyword(&case.name), case.ty));
        }

        code.push_str(&format!("\n{access}init(from decoder: Decoder) throws {{\n"));
        code.push_str("let container = try decoder.singleValueContainer()\n");
        for case in cases {
            code.push_str(&format!(
                "if let value = try? container.decode({}.self) {{\n",
                case.ty
            ));
            code.push_str(&format!("self = .{}(value)\n", escape_keyword(&case.name)));
            code.push_str("return\n");
            code.push_str("}\n");
        }
        code.push_str(&format!(
            "throw DecodingError.dataCorruptedError(in: container, debugDescription: \"No case of {} matches the decoded value.\")\n",
            self.name
        ));
        code.push_str("}\n");

        code.push_str(&format!("\n{access}func encode(to encoder: Encoder) throws {{\n"));
        code.push_str("var container = encoder.singleValueContainer()\n");
        code.push_str("switch self {\n");
        for case in cases {
            code.push_str(&format!("case .{}(let value):\n", escape_keyword(&case.name)));
            code.push_str("try container.encode(value)\n");
        }
        code.push_str("}\n");
        code.push_str("}\n");

        code.push_str("}\n");
        code
    }
}

/// Access prefix for a member whose signature mentions `types`.
///
/// Falls back to internal access when a type comes from the client template
/// or is one of `internal_models`.
pub fn member_access<'t>(
    flags: &GeneratorFlags,
    internal_models: &HashSet<String>,
    types: impl IntoIterator<Item = &'t SwiftType>,
) -> &'static str {
    if types
        .into_iter()
        .any(|ty| ty.mentions_internal(internal_models))
    {
        ""
    } else {
        flags.access_prefix()
    }
}
