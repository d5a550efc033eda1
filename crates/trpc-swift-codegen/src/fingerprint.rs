//! Structural fingerprints of schemas.
//!
//! Two schemas with the same fingerprint generate the same Swift model, so the
//! registry emits it once. The canonical text behind a fingerprint:
//!
//! - ignores declared names and descriptions
//! - sorts object fields by key (field order does not matter)
//! - keeps union variants in order (variant order decides decoding)
//! - describes the model itself: a top-level optional or `null` union member
//!   is left out, nested ones are written as `optional(..)` once
//! - collapses single-member unions onto their member
//! - expands `ref` nodes, writing `rec(n)` when a reference points back at the
//!   n-th enclosing reference so cyclic schemas terminate
//! - writes nested objects, enums and unions that do not depend on an
//!   enclosing reference as `#` plus the digest of their own text, which
//!   keeps the text small for deeply shared definitions

use crate::resolver::split_nullable;
use sha2::{Digest, Sha256};
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use trpc_swift_core::{GenerationError, GenerationResult, SchemaDefinitions, SchemaNode};

/// Lowercase hex SHA-256 of a schema's canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint `schema`, expanding references through `definitions`.
    ///
    /// `path` only labels errors for references missing from `definitions`.
    pub fn of(
        schema: &SchemaNode,
        definitions: &SchemaDefinitions,
        path: &str,
    ) -> GenerationResult<Self> {
        Fingerprinter::new(definitions).fingerprint(schema, path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical structural text of a schema.
pub fn canonical_text(
    schema: &SchemaNode,
    definitions: &SchemaDefinitions,
    path: &str,
) -> GenerationResult<String> {
    Fingerprinter::new(definitions).canonical_text(schema, path)
}

/// Fingerprints schemas against one set of definitions, reusing the text of
/// every reference expansion that does not depend on where it appears.
#[derive(Debug)]
pub struct Fingerprinter<'d> {
    definitions: &'d SchemaDefinitions,
    expansions: HashMap<String, Expansion>,
}

impl<'d> Fingerprinter<'d> {
    pub fn new(definitions: &'d SchemaDefinitions) -> Self {
        Self {
            definitions,
            expansions: HashMap::new(),
        }
    }

    pub fn fingerprint(&mut self, schema: &SchemaNode, path: &str) -> GenerationResult<Fingerprint> {
        let text = self.canonical_text(schema, path)?;
        Ok(Fingerprint(digest(&text)))
    }

    pub fn canonical_text(&mut self, schema: &SchemaNode, path: &str) -> GenerationResult<String> {
        let mut canonicalizer = Canonicalizer {
            definitions: self.definitions,
            path,
            references: Vec::new(),
            reach: BTreeSet::new(),
            expansions: &mut self.expansions,
            top: true,
        };
        let mut out = String::new();
        canonicalizer.write_required(schema, &mut out)?;
        Ok(out)
    }
}

/// Text written for part of a schema.
#[derive(Debug, Clone)]
struct Expansion {
    text: String,
    nullable: bool,
    /// Reference ids the text depends on.
    reach: BTreeSet<String>,
}

fn digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

struct Canonicalizer<'n> {
    definitions: &'n SchemaDefinitions,
    path: &'n str,
    /// Reference ids currently being expanded, outermost first.
    references: Vec<&'n str>,
    /// Reference ids met since the innermost capture started.
    reach: BTreeSet<String>,
    expansions: &'n mut HashMap<String, Expansion>,
    /// Set until the outermost object, enum or union is entered.
    top: bool,
}

impl<'n> Canonicalizer<'n> {
    /// Write the full type: the required part, wrapped once when nullable.
    fn write(&mut self, node: &'n SchemaNode, out: &mut String) -> GenerationResult<()> {
        let mut required = String::new();
        if self.write_required(node, &mut required)? {
            out.push_str("optional(");
            out.push_str(&required);
            out.push(')');
        } else {
            out.push_str(&required);
        }
        Ok(())
    }

    /// Write the type without its nullability; returns whether it was nullable.
    fn write_required(&mut self, node: &'n SchemaNode, out: &mut String) -> GenerationResult<bool> {
        match node {
            SchemaNode::String => out.push_str("string"),
            SchemaNode::Int => out.push_str("int"),
            SchemaNode::Double => out.push_str("double"),
            SchemaNode::Bool => out.push_str("bool"),
            SchemaNode::Date => out.push_str("date"),
            SchemaNode::Unknown => out.push_str("unknown"),
            SchemaNode::Null => {
                out.push_str("empty");
                return Ok(true);
            }
            SchemaNode::Literal { value } => {
                let _ = write!(out, "lit({value})");
            }
            SchemaNode::Array { of } => {
                out.push_str("array(");
                self.write(of, out)?;
                out.push(')');
            }
            SchemaNode::Optional { of } => {
                self.write_required(of, out)?;
                return Ok(true);
            }
            SchemaNode::Dictionary { key, value } => {
                out.push_str("dictionary(");
                self.write(key, out)?;
                out.push(',');
                self.write(value, out)?;
                out.push(')');
            }
            SchemaNode::Object { .. } | SchemaNode::Enum { .. } => self.write_compound(node, out)?,
            SchemaNode::Union { variants, .. } => {
                let (members, nullable) = split_nullable(variants);
                match members.as_slice() {
                    [] => out.push_str("empty"),
                    [single] => {
                        let inner = self.write_required(single, out)?;
                        return Ok(nullable || inner);
                    }
                    _ => self.write_compound(node, out)?,
                }
                return Ok(nullable);
            }
            SchemaNode::Ref { id } => return self.write_reference(id, out),
        }
        Ok(false)
    }

    fn write_compound(&mut self, node: &'n SchemaNode, out: &mut String) -> GenerationResult<()> {
        let nested = !std::mem::replace(&mut self.top, false);
        let body = self.capture(|this, text| this.write_body(node, text).map(|()| false))?;

        if nested && !self.depends_on_enclosing(&body.reach) {
            out.push('#');
            out.push_str(&digest(&body.text));
        } else {
            out.push_str(&body.text);
        }
        Ok(())
    }

    fn write_body(&mut self, node: &'n SchemaNode, out: &mut String) -> GenerationResult<()> {
        match node {
            SchemaNode::Object { fields, .. } => {
                let mut sorted: Vec<_> = fields.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(b.0));

                out.push_str("object{");
                for (i, (key, field)) in sorted.into_iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    let _ = write!(out, "{key:?}:");
                    self.write(field, out)?;
                }
                out.push('}');
            }
            // Same text as a union of string literals: both render identically.
            SchemaNode::Enum { values, .. } => {
                out.push_str("union[");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    let _ = write!(out, "lit({value:?})");
                }
                out.push(']');
            }
            SchemaNode::Union { variants, .. } => {
                let (members, _) = split_nullable(variants);
                out.push_str("union[");
                for (i, member) in members.into_iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    self.write(member, out)?;
                }
                out.push(']');
            }
            other => {
                self.write_required(other, out)?;
            }
        }
        Ok(())
    }

    fn write_reference(&mut self, id: &'n str, out: &mut String) -> GenerationResult<bool> {
        if let Some(position) = self.references.iter().rposition(|r| *r == id) {
            let depth = self.references.len() - 1 - position;
            let _ = write!(out, "rec({depth})");
            self.reach.insert(id.to_string());
            return Ok(false);
        }

        if !self.top
            && let Some(expansion) = self.expansions.get(id)
            && !self.depends_on_enclosing(&expansion.reach)
        {
            out.push_str(&expansion.text);
            let nullable = expansion.nullable;
            let reach = expansion.reach.clone();
            self.reach.extend(reach);
            return Ok(nullable);
        }

        let target = self
            .definitions
            .get(id)
            .ok_or_else(|| GenerationError::UnknownReference {
                path: self.path.to_string(),
                id: id.to_string(),
            })?;
        let top = self.top;
        self.references.push(id);
        let expansion = self.capture(|this, text| this.write_required(target, text));
        self.references.pop();
        let mut expansion = expansion?;
        self.reach.insert(id.to_string());
        expansion.reach.insert(id.to_string());

        out.push_str(&expansion.text);
        let nullable = expansion.nullable;
        // Top-level text keeps its outermost model undigested, so only nested
        // expansions are reusable.
        if !top && !self.depends_on_enclosing(&expansion.reach) {
            self.expansions.insert(id.to_string(), expansion);
        }
        Ok(nullable)
    }

    /// Whether text reaching `reach` contains a `rec(n)` pointing outside it.
    fn depends_on_enclosing(&self, reach: &BTreeSet<String>) -> bool {
        self.references.iter().any(|r| reach.contains(*r))
    }

    /// Run `write` into a fresh buffer, recording the reference ids it meets.
    fn capture(
        &mut self,
        write: impl FnOnce(&mut Self, &mut String) -> GenerationResult<bool>,
    ) -> GenerationResult<Expansion> {
        let outer = std::mem::take(&mut self.reach);
        let mut text = String::new();
        let result = write(self, &mut text);
        let reach = std::mem::replace(&mut self.reach, outer);
        let nullable = result?;
        self.reach.extend(reach.iter().cloned());
        Ok(Expansion {
            text,
            nullable,
            reach,
        })
    }
}
