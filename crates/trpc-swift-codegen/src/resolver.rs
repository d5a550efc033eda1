//! Schema to Swift type resolution.
//!
//! Primitives and containers map straight to a [`SwiftType`]. Objects, enums
//! and unions are *named*: they are fingerprinted, looked up in the
//! [`ModelRegistry`] and, when new, registered, resolved post-order and
//! rendered. A lookup that hits a model still in progress is a cycle and
//! returns a reference to that model instead of recursing.

use crate::context::GenerationContext;
use crate::fingerprint::Fingerprinter;
use crate::model::{EnumCase, ModelDecl, ModelField, ModelKind, RawValueType, UnionCase};
use crate::naming::{member_name, string_literal, type_name};
use crate::registry::{ModelEntry, ModelRegistry, claim_member_name};
use crate::swift_types::SwiftType;
use std::collections::HashSet;
use trpc_swift_core::{
    GenerationError, GenerationResult, LiteralValue, SchemaDefinitions, SchemaNode,
};

/// Where a schema sits: its diagnostic path and the model name to fall back
/// on when the schema declares none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub path: String,
    pub hint: String,
}

impl Site {
    pub fn new(path: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hint: hint.into(),
        }
    }

    fn field(&self, key: &str, owner: &str) -> Self {
        Self {
            path: format!("{}.{key}", self.path),
            hint: format!("{owner}{}", type_name(key)),
        }
    }

    fn item(&self) -> Self {
        Self {
            path: format!("{}[]", self.path),
            hint: format!("{}Item", self.hint),
        }
    }

    fn value(&self) -> Self {
        Self {
            path: format!("{}[:]", self.path),
            hint: format!("{}Value", self.hint),
        }
    }

    fn variant(&self, index: usize, owner: &str) -> Self {
        Self {
            path: format!("{}|{index}", self.path),
            hint: format!("{owner}Option{}", index + 1),
        }
    }
}

/// Resolves schemas against shared definitions, accumulating models.
#[derive(Debug)]
pub struct TypeResolver<'a> {
    definitions: &'a SchemaDefinitions,
    fingerprinter: Fingerprinter<'a>,
    registry: ModelRegistry,
    /// Reference ids whose single-member union is being collapsed, since the
    /// innermost model started.
    collapsing: Vec<String>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(definitions: &'a SchemaDefinitions) -> Self {
        Self {
            definitions,
            fingerprinter: Fingerprinter::new(definitions),
            registry: ModelRegistry::new(),
            collapsing: Vec::new(),
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ModelRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> ModelRegistry {
        self.registry
    }

    /// Map `schema` to a Swift type, registering any models it declares.
    pub fn resolve(
        &mut self,
        schema: &SchemaNode,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<SwiftType> {
        match schema {
            SchemaNode::String => Ok(SwiftType::String),
            SchemaNode::Int => Ok(SwiftType::Int),
            SchemaNode::Double => Ok(SwiftType::Double),
            SchemaNode::Bool => Ok(SwiftType::Bool),
            SchemaNode::Date => Ok(SwiftType::Date),
            SchemaNode::Null => Ok(SwiftType::optional(SwiftType::NoPayload)),
            SchemaNode::Literal { value } => self.resolve(&value.primitive(), site, ctx),
            SchemaNode::Array { of } => Ok(SwiftType::array(self.resolve(of, &site.item(), ctx)?)),
            SchemaNode::Optional { of } => Ok(SwiftType::optional(self.resolve(of, site, ctx)?)),
            SchemaNode::Dictionary { key, value } => {
                self.check_dictionary_key(key, site)?;
                Ok(SwiftType::dictionary(
                    self.resolve(value, &site.value(), ctx)?,
                ))
            }
            SchemaNode::Object { .. } | SchemaNode::Enum { .. } | SchemaNode::Union { .. } => {
                self.resolve_named(schema, schema, None, site, ctx)
            }
            SchemaNode::Ref { id } => {
                let definitions = self.definitions;
                let target =
                    definitions
                        .get(id)
                        .ok_or_else(|| GenerationError::UnknownReference {
                            path: site.path.clone(),
                            id: id.clone(),
                        })?;
                if !target.is_model() {
                    return Err(GenerationError::InvalidReference {
                        path: site.path.clone(),
                        id: id.clone(),
                    });
                }
                self.resolve_named(schema, target, Some(id.as_str()), site, ctx)
            }
            SchemaNode::Unknown => Err(GenerationError::unresolvable(
                &site.path,
                "untyped schema has no Swift representation",
            )),
        }
    }

    /// Resolve a named schema. `source` is what gets fingerprinted (the `ref`
    /// node itself for references), `target` is the definition behind it.
    fn resolve_named(
        &mut self,
        source: &SchemaNode,
        target: &SchemaNode,
        reference: Option<&str>,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<SwiftType> {
        let SchemaNode::Union { variants, .. } = target else {
            return self.resolve_model(source, target, reference, site, ctx);
        };

        let (members, nullable) = split_nullable(variants);
        let resolved = match members.as_slice() {
            [] if nullable => SwiftType::NoPayload,
            [] => return Err(GenerationError::unresolvable(&site.path, "union has no variants")),
            [single] => self.resolve_collapsed(single, reference, site, ctx)?,
            _ => self.resolve_model(source, target, reference, site, ctx)?,
        };
        Ok(if nullable {
            SwiftType::optional(resolved)
        } else {
            resolved
        })
    }

    /// Resolve the only member of a union in place of the union.
    fn resolve_collapsed(
        &mut self,
        member: &SchemaNode,
        reference: Option<&str>,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<SwiftType> {
        let Some(id) = reference else {
            return self.resolve(member, site, ctx);
        };
        if self.collapsing.iter().any(|c| c == id) {
            return Err(GenerationError::unresolvable(
                &site.path,
                format!("union '{id}' collapses onto itself"),
            ));
        }
        self.collapsing.push(id.to_string());
        // The member declares the model the reference stands for.
        let resolved = match member {
            SchemaNode::Object { .. } | SchemaNode::Enum { .. } => {
                self.resolve_named(member, member, Some(id), site, ctx)
            }
            _ => self.resolve(member, site, ctx),
        };
        self.collapsing.pop();
        resolved
    }

    /// Resolve a model. A reference met inside it starts a new collapse
    /// chain: reaching the same union again through a model is a cycle the
    /// registry terminates, not a union collapsing onto itself.
    fn resolve_model(
        &mut self,
        source: &SchemaNode,
        target: &SchemaNode,
        reference: Option<&str>,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<SwiftType> {
        let collapsing = std::mem::take(&mut self.collapsing);
        let resolved = self.define_model(source, target, reference, site, ctx);
        self.collapsing = collapsing;
        resolved
    }

    fn define_model(
        &mut self,
        source: &SchemaNode,
        target: &SchemaNode,
        reference: Option<&str>,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<SwiftType> {
        let fingerprint = self.fingerprinter.fingerprint(source, &site.path)?;

        if let Some(entry) = self.registry.entry(&fingerprint) {
            let name = entry.name.clone();
            if entry.is_in_progress() {
                tracing::trace!(model = %name, path = %site.path, "forward reference to model in progress");
                self.registry.mark_forward_referenced(&fingerprint);
            }
            return Ok(SwiftType::Model(name));
        }

        let desired = target
            .declared_name()
            .or(reference)
            .map(type_name)
            .unwrap_or_else(|| site.hint.clone());
        let name = self
            .registry
            .register(fingerprint.clone(), &desired, &ctx.visible_model_names)?;

        let kind = self.model_kind(target, &name, site, ctx)?;
        let recursive = self
            .registry
            .entry(&fingerprint)
            .is_some_and(ModelEntry::is_forward_referenced);
        let declaration = ModelDecl {
            name: name.clone(),
            kind,
        };
        if declaration.is_internal(self.registry.internal_models()) {
            self.registry.mark_internal(&name);
        }
        let rendered =
            declaration.render(recursive, ctx.flags, self.registry.internal_models());
        self.registry.define(&fingerprint, rendered);

        Ok(SwiftType::Model(name))
    }

    fn model_kind(
        &mut self,
        target: &SchemaNode,
        name: &str,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<ModelKind> {
        match target {
            SchemaNode::Object { fields, .. } => {
                let mut properties = HashSet::new();
                let mut model_fields = Vec::with_capacity(fields.len());
                for (key, schema) in fields {
                    let ty = self.resolve(schema, &site.field(key, name), ctx)?;
                    let property = claim_member_name(&member_name(key), &mut properties)?;
                    model_fields.push(ModelField {
                        key: key.clone(),
                        property,
                        ty,
                    });
                }
                Ok(ModelKind::Struct(model_fields))
            }
            SchemaNode::Enum { values, .. } => {
                string_cases(values.iter().map(String::as_str), site)
            }
            SchemaNode::Union { variants, .. } => self.union_kind(variants, name, site, ctx),
            other => Err(GenerationError::unresolvable(
                &site.path,
                format!("'{}' schema cannot declare a model", other.kind_name()),
            )),
        }
    }

    fn union_kind(
        &mut self,
        variants: &[SchemaNode],
        name: &str,
        site: &Site,
        ctx: &GenerationContext<'_>,
    ) -> GenerationResult<ModelKind> {
        let (members, _) = split_nullable(variants);

        let literals: Option<Vec<&LiteralValue>> = members
            .iter()
            .map(|member| match member {
                SchemaNode::Literal { value } => Some(value),
                _ => None,
            })
            .collect();
        if let Some(literals) = literals {
            let strings: Option<Vec<&str>> = literals
                .iter()
                .map(|literal| match literal {
                    LiteralValue::String(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            if let Some(strings) = strings {
                return string_cases(strings, site);
            }

            let integers: Option<Vec<i64>> = literals
                .iter()
                .map(|literal| match literal {
                    LiteralValue::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect();
            if let Some(integers) = integers {
                return integer_cases(&integers, site);
            }

            if let Some((first, rest)) = literals.split_first()
                && rest.iter().any(|l| l.primitive() != first.primitive())
            {
                return Err(GenerationError::unresolvable(
                    &site.path,
                    "union mixes literals of different types",
                ));
            }
        }

        let mut cases: Vec<UnionCase> = Vec::with_capacity(members.len());
        let mut case_names = HashSet::new();
        for (index, member) in members.into_iter().enumerate() {
            let ty = self.resolve(member, &site.variant(index, name), ctx)?;
            if cases.iter().any(|case| case.ty == ty) {
                continue;
            }
            let case_name = claim_member_name(&ty.case_stem(), &mut case_names)?;
            cases.push(UnionCase { name: case_name, ty });
        }
        Ok(ModelKind::Union(cases))
    }

    fn check_dictionary_key(&self, key: &SchemaNode, site: &Site) -> GenerationResult<()> {
        let string_keyed = match key {
            SchemaNode::String | SchemaNode::Enum { .. } => true,
            SchemaNode::Literal { value } => matches!(value, LiteralValue::String(_)),
            SchemaNode::Union { variants, .. } => variants.iter().all(|variant| {
                matches!(
                    variant,
                    SchemaNode::Literal {
                        value: LiteralValue::String(_)
                    }
                )
            }),
            SchemaNode::Ref { id } => self
                .definitions
                .get(id)
                .is_some_and(|target| matches!(target, SchemaNode::Enum { .. })),
            _ => false,
        };

        if string_keyed {
            Ok(())
        } else {
            Err(GenerationError::NonStringDictionaryKey {
                path: site.path.clone(),
                key: key.kind_name().to_string(),
            })
        }
    }
}

/// Union members without `null`, plus whether a `null` (or optional member)
/// was present.
pub(crate) fn split_nullable(variants: &[SchemaNode]) -> (Vec<&SchemaNode>, bool) {
    let mut nullable = false;
    let mut members = Vec::with_capacity(variants.len());
    for variant in variants {
        let mut member = variant;
        while let SchemaNode::Optional { of } = member {
            nullable = true;
            member = of.as_ref();
        }
        if matches!(member, SchemaNode::Null) {
            nullable = true;
        } else {
            members.push(member);
        }
    }
    (members, nullable)
}

fn string_cases<'s>(
    values: impl IntoIterator<Item = &'s str>,
    site: &Site,
) -> GenerationResult<ModelKind> {
    let mut seen = HashSet::new();
    let mut names = HashSet::new();
    let mut cases = Vec::new();
    for value in values {
        if !seen.insert(value) {
            continue;
        }
        let name = claim_member_name(&member_name(value), &mut names)?;
        let raw_value = (name != value).then(|| string_literal(value));
        cases.push(EnumCase { name, raw_value });
    }

    if cases.is_empty() {
        return Err(GenerationError::unresolvable(&site.path, "enum has no values"));
    }
    Ok(ModelKind::RawEnum {
        raw_type: RawValueType::String,
        cases,
    })
}

fn integer_cases(values: &[i64], site: &Site) -> GenerationResult<ModelKind> {
    let mut seen = HashSet::new();
    let mut names = HashSet::new();
    let mut cases = Vec::new();
    for &value in values {
        if !seen.insert(value) {
            continue;
        }
        let desired = if value < 0 {
            format!("valueMinus{}", value.unsigned_abs())
        } else {
            format!("value{value}")
        };
        let name = claim_member_name(&desired, &mut names)?;
        cases.push(EnumCase {
            name,
            raw_value: Some(value.to_string()),
        });
    }

    if cases.is_empty() {
        return Err(GenerationError::unresolvable(&site.path, "enum has no values"));
    }
    Ok(ModelKind::RawEnum {
        raw_type: RawValueType::Int,
        cases,
    })
}
