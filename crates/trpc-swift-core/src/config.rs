//! Generator configuration flags

use serde::{Deserialize, Serialize};

/// Flags that shape the generated client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorFlags {
    /// Emit a top-level `typealias` for every generated model
    #[serde(default, alias = "createTypeAliases")]
    pub create_type_aliases: bool,

    /// Mark generated declarations and aliases `public`
    #[serde(default, alias = "publicAccess")]
    pub public_access: bool,
}

impl GeneratorFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_aliases(mut self, enabled: bool) -> Self {
        self.create_type_aliases = enabled;
        self
    }

    pub fn with_public_access(mut self, enabled: bool) -> Self {
        self.public_access = enabled;
        self
    }

    /// Access modifier prefix for generated declarations (`"public "` or `""`)
    pub fn access_prefix(&self) -> &'static str {
        if self.public_access { "public " } else { "" }
    }
}
