//! Manifest parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trpc_swift_codegen::root_class_name;
use trpc_swift_core::GeneratorFlags;

/// Manifest looked up in the working directory when none is given.
pub const DEFAULT_MANIFEST: &str = "trpc-swift.toml";

/// trpc-swift.toml manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub client: ClientSection,

    #[serde(default)]
    pub flags: GeneratorFlags,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSection {
    /// Root class name
    pub name: String,

    /// JSON router definition
    pub input: PathBuf,

    /// Swift file to write
    pub output: PathBuf,

    /// Replacement for the bundled runtime template
    #[serde(default)]
    pub template: Option<PathBuf>,
}

impl Manifest {
    /// Load manifest from a file, resolving its paths against the file's directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

        let manifest = Self::from_str(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))?;
        Ok(match path.parent() {
            Some(base) => manifest.relative_to(base),
            None => manifest,
        })
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Resolve relative paths against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let resolve = |path: &Path| {
            if path.is_relative() {
                base.join(path)
            } else {
                path.to_path_buf()
            }
        };
        self.client.input = resolve(&self.client.input);
        self.client.output = resolve(&self.client.output);
        self.client.template = self.client.template.as_deref().map(resolve);
        self
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        validate_client_name(&self.client.name)?;

        if self.client.input.as_os_str().is_empty() {
            anyhow::bail!("Input definition path cannot be empty");
        }

        validate_output_path(&self.client.output)?;

        if let Some(template) = &self.client.template
            && template.as_os_str().is_empty()
        {
            anyhow::bail!("Template path cannot be empty when specified");
        }

        Ok(())
    }
}

/// Check that `name` can become the root class name.
pub fn validate_client_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Client name cannot be empty");
    }

    root_class_name(name)
        .with_context(|| format!("Client name '{name}' does not yield a valid Swift type name"))?;

    Ok(())
}

/// Check that `path` names a Swift source file.
pub fn validate_output_path(path: &Path) -> Result<()> {
    if path.extension().and_then(|ext| ext.to_str()) != Some("swift") {
        anyhow::bail!(
            "Output path should be a .swift file, got {}",
            path.display()
        );
    }
    Ok(())
}
