//! The Swift runtime template generated clients are appended to.
//!
//! The template declares the error taxonomy, the wire envelopes and the
//! `TRPCClient.sendQuery`/`sendMutation` transport primitives that generated
//! call sites invoke. It is copied verbatim; only indentation is normalized.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use trpc_swift_core::{GenerationError, GenerationResult};

/// The template bundled with this crate.
pub const BUNDLED_TEMPLATE: &str = include_str!("../templates/TRPCClient.swift");

/// Where the runtime template comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClientTemplate {
    #[default]
    Bundled,
    /// A replacement template read from disk.
    File(PathBuf),
}

impl ClientTemplate {
    /// Load the template text.
    ///
    /// # Errors
    ///
    /// [`GenerationError::MissingTemplateResource`] when a file template
    /// cannot be read.
    pub fn load(&self) -> GenerationResult<Cow<'static, str>> {
        match self {
            ClientTemplate::Bundled => Ok(Cow::Borrowed(BUNDLED_TEMPLATE)),
            ClientTemplate::File(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| GenerationError::MissingTemplateResource {
                    path: path.clone(),
                    source,
                }),
        }
    }
}
