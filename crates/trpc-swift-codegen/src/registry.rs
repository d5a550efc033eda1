//! Per-run store of generated models.
//!
//! Entries are arena-style: addressed by [`Fingerprint`], kept in discovery
//! order, and never referenced through pointers. An entry is created
//! "in progress" when resolution of its schema starts and receives its
//! rendered definition when resolution finishes; a lookup that hits an
//! in-progress entry is a cycle and gets a forward reference instead of
//! recursing again.

use crate::fingerprint::Fingerprint;
use crate::naming::disambiguate;
use std::collections::{BTreeSet, HashMap, HashSet};
use trpc_swift_core::{GenerationError, GenerationResult};

/// Candidates tried per name before giving up.
pub const MAX_NAME_ATTEMPTS: usize = 1000;

/// Names a model may never take: the client template's top-level
/// declarations and the standard types generated code refers to.
const RESERVED_NAMES: &[&str] = &[
    "TRPCClient",
    "TRPCClientData",
    "TRPCError",
    "TRPCErrorCode",
    "TRPCMiddleware",
    "TRPCRequest",
    "TRPCResponse",
    "DecodableValue",
    "Any",
    "Self",
    "Array",
    "Bool",
    "Codable",
    "Data",
    "Date",
    "DateFormatter",
    "Decoder",
    "DecodingError",
    "Dictionary",
    "Double",
    "Encoder",
    "Error",
    "Int",
    "Optional",
    "Protocol",
    "String",
    "Type",
    "URL",
    "URLRequest",
];

/// Claim the first free variant of `desired` within one member scope.
pub fn claim_member_name(desired: &str, taken: &mut HashSet<String>) -> GenerationResult<String> {
    let name = disambiguate(desired, MAX_NAME_ATTEMPTS, |candidate| taken.contains(candidate))
        .ok_or_else(|| GenerationError::NameCollisionUnresolvable {
            name: desired.to_string(),
            attempts: MAX_NAME_ATTEMPTS,
        })?;
    taken.insert(name.clone());
    Ok(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ModelState {
    InProgress,
    Defined(String),
}

/// One registered model.
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub name: String,
    pub fingerprint: Fingerprint,
    state: ModelState,
    forward_referenced: bool,
}

impl ModelEntry {
    /// Rendered Swift declaration, once resolution finished.
    pub fn definition(&self) -> Option<&str> {
        match &self.state {
            ModelState::Defined(source) => Some(source),
            ModelState::InProgress => None,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.state == ModelState::InProgress
    }

    /// Whether the model was referenced before its definition was complete.
    pub fn is_forward_referenced(&self) -> bool {
        self.forward_referenced
    }
}

/// Declaration-order view of the registry for targets that need
/// pre-declarations of forward-referenced types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDeclaration {
    pub name: String,
    pub forward_referenced: bool,
}

/// Model registry scoped to one generation run.
#[derive(Debug)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
    by_fingerprint: HashMap<Fingerprint, usize>,
    taken_names: HashSet<String>,
    /// Models that stay internal even under public access.
    internal: HashSet<String>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_fingerprint: HashMap::new(),
            taken_names: RESERVED_NAMES.iter().map(|n| n.to_string()).collect(),
            internal: HashSet::new(),
        }
    }

    /// Mark a name as used by something other than a model.
    ///
    /// Returns `false` when the name was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.taken_names.insert(name.to_string())
    }

    /// Whether `name` belongs to the template or the standard library.
    pub fn is_reserved(name: &str) -> bool {
        RESERVED_NAMES.contains(&name)
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken_names.contains(name)
    }

    /// Record that the model named `name` cannot be declared public.
    pub fn mark_internal(&mut self, name: &str) {
        self.internal.insert(name.to_string());
    }

    /// Names of the models that stay internal under public access.
    pub fn internal_models(&self) -> &HashSet<String> {
        &self.internal
    }

    /// Reserve the first free variant of `desired`, also avoiding `visible`.
    pub fn claim(&mut self, desired: &str, visible: &BTreeSet<String>) -> GenerationResult<String> {
        let name = disambiguate(desired, MAX_NAME_ATTEMPTS, |candidate| {
            self.taken_names.contains(candidate) || visible.contains(candidate)
        })
        .ok_or_else(|| GenerationError::NameCollisionUnresolvable {
            name: desired.to_string(),
            attempts: MAX_NAME_ATTEMPTS,
        })?;
        self.taken_names.insert(name.clone());
        Ok(name)
    }

    /// Claim a member name within one scope that also differs from every
    /// taken type name, so a member never shadows a model.
    pub fn claim_member(&self, desired: &str, taken: &mut HashSet<String>) -> GenerationResult<String> {
        let name = disambiguate(desired, MAX_NAME_ATTEMPTS, |candidate| {
            taken.contains(candidate) || self.taken_names.contains(candidate)
        })
        .ok_or_else(|| GenerationError::NameCollisionUnresolvable {
            name: desired.to_string(),
            attempts: MAX_NAME_ATTEMPTS,
        })?;
        taken.insert(name.clone());
        Ok(name)
    }

    /// Assign a name to `fingerprint`, starting its registration.
    ///
    /// Idempotent: a fingerprint that is already registered keeps its name
    /// and its entry is left untouched.
    pub fn register(
        &mut self,
        fingerprint: Fingerprint,
        desired: &str,
        visible: &BTreeSet<String>,
    ) -> GenerationResult<String> {
        if let Some(name) = self.lookup(&fingerprint) {
            return Ok(name.to_string());
        }
        let name = self.claim(desired, visible)?;
        tracing::debug!(model = %name, %fingerprint, "registering model");

        self.by_fingerprint
            .insert(fingerprint.clone(), self.entries.len());
        self.entries.push(ModelEntry {
            name: name.clone(),
            fingerprint,
            state: ModelState::InProgress,
            forward_referenced: false,
        });
        Ok(name)
    }

    pub fn lookup(&self, fingerprint: &Fingerprint) -> Option<&str> {
        self.entry(fingerprint).map(|entry| entry.name.as_str())
    }

    pub fn entry(&self, fingerprint: &Fingerprint) -> Option<&ModelEntry> {
        self.by_fingerprint
            .get(fingerprint)
            .map(|&index| &self.entries[index])
    }

    /// Record that a reference to an in-progress model was handed out.
    pub fn mark_forward_referenced(&mut self, fingerprint: &Fingerprint) {
        if let Some(&index) = self.by_fingerprint.get(fingerprint) {
            self.entries[index].forward_referenced = true;
        }
    }

    /// Store the rendered definition of an in-progress model.
    ///
    /// A model that is already defined keeps its first definition.
    pub fn define(&mut self, fingerprint: &Fingerprint, definition: String) {
        if let Some(&index) = self.by_fingerprint.get(fingerprint) {
            let entry = &mut self.entries[index];
            if entry.is_in_progress() {
                entry.state = ModelState::Defined(definition);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Model names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    /// `(name, forward referenced)` pairs in discovery order.
    pub fn declaration_order(&self) -> Vec<ModelDeclaration> {
        self.entries
            .iter()
            .map(|entry| ModelDeclaration {
                name: entry.name.clone(),
                forward_referenced: entry.forward_referenced,
            })
            .collect()
    }

    /// All definitions as one block, in discovery order.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .filter_map(ModelEntry::definition)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
#[path = "registry/registry_tests.rs"]
mod registry_tests;
