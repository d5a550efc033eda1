//! trpc-swift-core - Input model for the tRPC Swift client generator
//!
//! This crate provides the types a generation run consumes:
//! - [`SchemaNode`] for procedure input/output schemas
//! - [`RouterNode`], [`RouterEntry`] and [`ProcedureDef`] for the router tree
//! - [`ApiDefinition`] bundling the tree with shared schema definitions
//! - [`GeneratorFlags`] for output options
//! - [`GenerationError`] for error handling

mod config;
mod error;
mod router;
mod schema;

pub use config::GeneratorFlags;
pub use error::{GenerationError, GenerationResult};
pub use router::{ApiDefinition, ProcedureDef, ProcedureKind, RouterEntry, RouterNode};
pub use schema::{LiteralValue, SchemaDefinitions, SchemaNode};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiDefinition, GenerationError, GenerationResult, GeneratorFlags, LiteralValue,
        ProcedureDef, ProcedureKind, RouterEntry, RouterNode, SchemaDefinitions, SchemaNode,
    };
}
