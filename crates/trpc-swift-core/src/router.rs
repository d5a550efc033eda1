//! Router and procedure definitions

use crate::error::GenerationResult;
use crate::schema::{SchemaDefinitions, SchemaNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Request kind of a procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcedureKind {
    Query,
    Mutation,
    Subscription,
}

impl std::fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcedureKind::Query => write!(f, "query"),
            ProcedureKind::Mutation => write!(f, "mutation"),
            ProcedureKind::Subscription => write!(f, "subscription"),
        }
    }
}

/// One remotely callable procedure
///
/// A missing input or output means "no payload", not `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDef {
    pub kind: ProcedureKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<SchemaNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<SchemaNode>,

    /// Rendered as a doc comment on the generated method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProcedureDef {
    pub fn new(kind: ProcedureKind) -> Self {
        Self {
            kind,
            input: None,
            output: None,
            description: None,
        }
    }

    pub fn query() -> Self {
        Self::new(ProcedureKind::Query)
    }

    pub fn mutation() -> Self {
        Self::new(ProcedureKind::Mutation)
    }

    pub fn subscription() -> Self {
        Self::new(ProcedureKind::Subscription)
    }

    pub fn with_input(mut self, schema: SchemaNode) -> Self {
        self.input = Some(schema);
        self
    }

    pub fn with_output(mut self, schema: SchemaNode) -> Self {
        self.output = Some(schema);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A child of a router: either a nested router or a procedure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouterEntry {
    Router(RouterNode),
    Procedure(ProcedureDef),
}

/// A named grouping of procedures and nested routers
///
/// A child's name is its key in `children`; the root's name is chosen by the
/// caller at generation time. Children keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouterNode {
    #[serde(default)]
    pub children: IndexMap<String, RouterEntry>,
}

impl RouterNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a procedure child, replacing any sibling with the same name
    pub fn procedure(mut self, name: impl Into<String>, procedure: ProcedureDef) -> Self {
        self.children
            .insert(name.into(), RouterEntry::Procedure(procedure));
        self
    }

    /// Add a nested router child, replacing any sibling with the same name
    pub fn router(mut self, name: impl Into<String>, router: RouterNode) -> Self {
        self.children.insert(name.into(), RouterEntry::Router(router));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of procedures in this router and all nested routers
    pub fn procedure_count(&self) -> usize {
        self.children
            .values()
            .map(|entry| match entry {
                RouterEntry::Router(router) => router.procedure_count(),
                RouterEntry::Procedure(_) => 1,
            })
            .sum()
    }

    /// Number of nested routers below this one
    pub fn router_count(&self) -> usize {
        self.children
            .values()
            .map(|entry| match entry {
                RouterEntry::Router(router) => 1 + router.router_count(),
                RouterEntry::Procedure(_) => 0,
            })
            .sum()
    }
}

/// A complete generation input: the router tree plus shared schema definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDefinition {
    #[serde(default)]
    pub definitions: SchemaDefinitions,

    pub router: RouterNode,
}

impl ApiDefinition {
    pub fn new(router: RouterNode) -> Self {
        Self {
            definitions: SchemaDefinitions::new(),
            router,
        }
    }

    /// Register a shared schema that `ref` nodes can point at
    pub fn with_definition(mut self, id: impl Into<String>, schema: SchemaNode) -> Self {
        self.definitions.insert(id.into(), schema);
        self
    }

    /// Parse a definition from JSON text
    pub fn from_json(content: &str) -> GenerationResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a definition from JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> GenerationResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl From<RouterNode> for ApiDefinition {
    fn from(router: RouterNode) -> Self {
        Self::new(router)
    }
}
