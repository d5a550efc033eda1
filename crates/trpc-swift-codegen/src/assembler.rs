//! Whole-client assembly: template, root class, models and aliases.

use crate::context::GenerationContext;
use crate::indent::indent_swift_code;
use crate::naming::{is_identifier, is_keyword, type_name};
use crate::output::write_atomic;
use crate::registry::{ModelDeclaration, ModelRegistry};
use crate::resolver::TypeResolver;
use crate::router::{emit_router_members, render_root_class};
use crate::template::ClientTemplate;
use std::path::Path;
use trpc_swift_core::{ApiDefinition, GenerationError, GenerationResult, GeneratorFlags};

/// Result of one generation run.
#[derive(Debug, Clone)]
pub struct GeneratedClient {
    /// Swift name of the root class.
    pub root_name: String,
    /// The complete, indented Swift file.
    pub source: String,
    /// Every model in discovery order, flagged when it was forward referenced.
    pub models: Vec<ModelDeclaration>,
}

/// Generates complete client files.
///
/// Each call to [`ClientAssembler::assemble`] runs with its own model
/// registry, so one assembler can generate any number of clients.
#[derive(Debug, Clone, Default)]
pub struct ClientAssembler {
    flags: GeneratorFlags,
    template: ClientTemplate,
}

impl ClientAssembler {
    pub fn new(flags: GeneratorFlags) -> Self {
        Self {
            flags,
            template: ClientTemplate::Bundled,
        }
    }

    pub fn with_template(mut self, template: ClientTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn flags(&self) -> &GeneratorFlags {
        &self.flags
    }

    /// Generate the client for `api` with root class `name`.
    pub fn assemble(&self, name: &str, api: &ApiDefinition) -> GenerationResult<GeneratedClient> {
        let template = self.template.load()?;

        let root_name = root_class_name(name)?;
        let mut resolver = TypeResolver::new(&api.definitions);
        if !resolver.registry_mut().reserve(&root_name) {
            return Err(invalid_client_name(name, "the name is already declared"));
        }
        let ctx = GenerationContext::root(&root_name, &self.flags);

        let members = emit_router_members(&mut resolver, &api.router, &ctx)?;
        let registry = resolver.into_registry();
        let class = render_root_class(&root_name, &members, &registry.render(), &ctx);

        let mut source = String::with_capacity(template.len() + class.len() + 64);
        source.push_str(&template);
        if !source.ends_with('\n') {
            source.push('\n');
        }
        source.push('\n');
        source.push_str(&class);

        if self.flags.create_type_aliases && !registry.is_empty() {
            source.push('\n');
            for model in registry.names() {
                let access = if registry.internal_models().contains(model) {
                    ""
                } else {
                    self.flags.access_prefix()
                };
                source.push_str(&format!("{access}typealias {model} = {root_name}.{model}\n"));
            }
        }

        tracing::info!(
            client = %root_name,
            procedures = api.router.procedure_count(),
            models = registry.len(),
            "assembled client"
        );

        Ok(GeneratedClient {
            source: indent_swift_code(&source),
            models: registry.declaration_order(),
            root_name,
        })
    }

    /// Generate the client and write it to `out`.
    ///
    /// Nothing is written unless generation succeeds, and the file is
    /// replaced atomically.
    pub fn write(
        &self,
        name: &str,
        api: &ApiDefinition,
        out: &Path,
    ) -> GenerationResult<GeneratedClient> {
        let client = self.assemble(name, api)?;
        write_atomic(out, &client.source)?;
        tracing::info!(client = %client.root_name, path = %out.display(), "wrote client");
        Ok(client)
    }
}

/// Swift name of the root class generated for `name`.
///
/// Fails when the name has no letters or digits, is a keyword, or would
/// shadow a template or standard library type.
pub fn root_class_name(name: &str) -> GenerationResult<String> {
    let root_name = type_name(name);
    if root_name.trim_start_matches('_').is_empty() {
        Err(invalid_client_name(name, "it has no letters or digits"))
    } else if !is_identifier(&root_name) || is_keyword(&root_name) {
        Err(invalid_client_name(name, "it is not a Swift identifier"))
    } else if ModelRegistry::is_reserved(&root_name) {
        Err(invalid_client_name(name, "the template or Swift already declares it"))
    } else {
        Ok(root_name)
    }
}

fn invalid_client_name(name: &str, reason: &str) -> GenerationError {
    GenerationError::InvalidClientName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Generate the Swift client source for `api` with the bundled template.
///
/// # Examples
///
/// ```
/// use trpc_swift_codegen::generate_client;
/// use trpc_swift_core::{ApiDefinition, GeneratorFlags, ProcedureDef, RouterNode, SchemaNode};
///
/// let router = RouterNode::new().procedure(
///     "hello",
///     ProcedureDef::query().with_output(SchemaNode::String),
/// );
///
/// let swift = generate_client("API", &ApiDefinition::from(router), &GeneratorFlags::default())?;
/// assert!(swift.contains("class API: TRPCClientData {"));
/// # Ok::<(), trpc_swift_core::GenerationError>(())
/// ```
pub fn generate_client(
    name: &str,
    api: &ApiDefinition,
    flags: &GeneratorFlags,
) -> GenerationResult<String> {
    ClientAssembler::new(flags.clone())
        .assemble(name, api)
        .map(|client| client.source)
}

/// Generate the Swift client for `api` and write it to `out`.
pub fn generate_client_file(
    name: &str,
    api: &ApiDefinition,
    flags: &GeneratorFlags,
    out: &Path,
) -> GenerationResult<()> {
    ClientAssembler::new(flags.clone())
        .write(name, api, out)
        .map(|_| ())
}
