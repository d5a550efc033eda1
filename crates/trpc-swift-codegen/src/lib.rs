//! trpc-swift-codegen - Swift client generation for tRPC routers
//!
//! Turns an [`ApiDefinition`](trpc_swift_core::ApiDefinition) into one Swift
//! source file: the bundled runtime template, a root client class with one
//! nested class per router and one method per procedure, every model the
//! procedure schemas need, and optionally top-level type aliases.
//!
//! # Pipeline
//!
//! 1. [`router`] walks the router tree in declaration order
//! 2. [`procedure`] emits a method per procedure
//! 3. [`resolver`] maps schemas to Swift types, registering models in the
//!    per-run [`registry`] keyed by structural [`fingerprint`]
//! 4. [`assembler`] joins template, root class and aliases, then [`indent`]
//!    normalizes indentation
//!
//! Generation is pure and single-threaded; the only I/O is loading a
//! non-bundled [`template`] before the walk and the atomic [`output`] write
//! after it.
//!
//! # Example
//!
//! ```
//! use trpc_swift_codegen::ClientAssembler;
//! use trpc_swift_core::{ApiDefinition, GeneratorFlags, ProcedureDef, RouterNode, SchemaNode};
//!
//! let router = RouterNode::new().procedure(
//!     "getUser",
//!     ProcedureDef::query()
//!         .with_input(SchemaNode::object([("id", SchemaNode::String)]))
//!         .with_output(SchemaNode::named_object("User", [("name", SchemaNode::String)])),
//! );
//!
//! let client = ClientAssembler::new(GeneratorFlags::new().with_type_aliases(true))
//!     .assemble("API", &ApiDefinition::from(router))?;
//!
//! assert!(client.source.contains("func getUser(input: GetUserInputType) async throws -> User {"));
//! assert!(client.source.contains("typealias User = API.User"));
//! # Ok::<(), trpc_swift_core::GenerationError>(())
//! ```

pub mod assembler;
pub mod context;
pub mod fingerprint;
pub mod indent;
pub mod model;
pub mod naming;
pub mod output;
pub mod procedure;
pub mod registry;
pub mod resolver;
pub mod router;
pub mod swift_types;
pub mod template;

pub use assembler::{
    ClientAssembler, GeneratedClient, generate_client, generate_client_file, root_class_name,
};
pub use fingerprint::Fingerprint;
pub use registry::{ModelDeclaration, ModelRegistry};
pub use swift_types::SwiftType;
pub use template::ClientTemplate;
