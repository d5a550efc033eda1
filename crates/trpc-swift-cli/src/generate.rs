//! `generate` and `check` commands

use crate::manifest::{self, DEFAULT_MANIFEST, Manifest};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use trpc_swift_codegen::{ClientAssembler, ClientTemplate, GeneratedClient};
use trpc_swift_core::{ApiDefinition, GeneratorFlags};

/// Command-line options of `generate`, before a manifest is merged in.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub manifest: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub name: Option<String>,
    pub output: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub type_aliases: bool,
    pub public: bool,
    pub dry_run: bool,
}

/// Everything one generation run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    pub name: String,
    pub input: PathBuf,
    pub output: PathBuf,
    pub template: ClientTemplate,
    pub flags: GeneratorFlags,
}

impl GenerationJob {
    /// Build a job from a manifest, letting command-line values win.
    pub fn resolve(options: &GenerateOptions) -> Result<Self> {
        let manifest = match (&options.manifest, &options.input) {
            (Some(path), _) => Some(Manifest::from_file(path)?),
            (None, None) if Path::new(DEFAULT_MANIFEST).exists() => {
                Some(Manifest::from_file(DEFAULT_MANIFEST)?)
            }
            _ => None,
        };

        let job = match manifest {
            Some(manifest) => {
                manifest.validate()?;
                let client = manifest.client;
                GenerationJob {
                    name: options.name.clone().unwrap_or(client.name),
                    input: options.input.clone().unwrap_or(client.input),
                    output: options.output.clone().unwrap_or(client.output),
                    template: template_source(options.template.clone().or(client.template)),
                    flags: GeneratorFlags {
                        create_type_aliases: manifest.flags.create_type_aliases
                            || options.type_aliases,
                        public_access: manifest.flags.public_access || options.public,
                    },
                }
            }
            None => GenerationJob {
                name: options
                    .name
                    .clone()
                    .context("--name is required without a manifest")?,
                input: options
                    .input
                    .clone()
                    .with_context(|| format!("--input is required without {DEFAULT_MANIFEST}"))?,
                output: options
                    .output
                    .clone()
                    .context("--output is required without a manifest")?,
                template: template_source(options.template.clone()),
                flags: GeneratorFlags::new()
                    .with_type_aliases(options.type_aliases)
                    .with_public_access(options.public),
            },
        };

        manifest::validate_client_name(&job.name)?;
        manifest::validate_output_path(&job.output)?;
        Ok(job)
    }

    fn assembler(&self) -> ClientAssembler {
        ClientAssembler::new(self.flags.clone()).with_template(self.template.clone())
    }
}

fn template_source(path: Option<PathBuf>) -> ClientTemplate {
    path.map(ClientTemplate::File).unwrap_or_default()
}

/// Read and parse a JSON router definition.
pub fn load_definition(path: &Path) -> Result<ApiDefinition> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read definition: {}", path.display()))?;
    ApiDefinition::from_json_slice(&content)
        .with_context(|| format!("Invalid definition: {}", path.display()))
}

/// Run the job; with `dry_run` the client is returned but not written.
pub fn execute(job: &GenerationJob, dry_run: bool) -> Result<GeneratedClient> {
    let api = load_definition(&job.input)?;
    let assembler = job.assembler();

    if dry_run {
        return assembler
            .assemble(&job.name, &api)
            .with_context(|| format!("Failed to generate client '{}'", job.name));
    }

    assembler
        .write(&job.name, &api, &job.output)
        .with_context(|| format!("Failed to generate {}", job.output.display()))
}

/// Generate command implementation
pub fn run(options: GenerateOptions) -> Result<()> {
    let job = GenerationJob::resolve(&options)?;
    tracing::debug!(?job, "resolved generation job");

    let client = execute(&job, options.dry_run)?;

    if options.dry_run {
        print!("{}", client.source);
    } else {
        println!(
            "✓ Generated {} ({} models) -> {}",
            client.root_name,
            client.models.len(),
            job.output.display()
        );
    }

    Ok(())
}

/// Check command implementation
pub fn check(manifest_path: Option<PathBuf>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));

    println!("Checking manifest: {}", path.display());

    let job = GenerationJob::resolve(&GenerateOptions {
        manifest: Some(path),
        ..GenerateOptions::default()
    })?;
    let api = load_definition(&job.input)?;
    let client = job
        .assembler()
        .assemble(&job.name, &api)
        .with_context(|| format!("Failed to generate client '{}'", job.name))?;

    println!("✓ Client: {}", client.root_name);
    println!("✓ Routers: {}", api.router.router_count());
    println!("✓ Procedures: {}", api.router.procedure_count());
    println!("✓ Models: {}", client.models.len());
    println!("\nManifest is valid!");

    Ok(())
}
