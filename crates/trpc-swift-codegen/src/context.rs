//! Per-scope generation context.

use std::collections::BTreeSet;
use trpc_swift_core::GeneratorFlags;

/// State threaded down the router walk.
///
/// Each nested router gets its own derived copy, so names introduced in one
/// branch never leak into a sibling branch while ancestors stay visible.
#[derive(Debug, Clone)]
pub struct GenerationContext<'a> {
    /// Nesting level; the root router is 0.
    pub route_depth: usize,
    /// Name of the root class, first segment of every diagnostic path.
    pub root_name: String,
    /// Router keys from the root down to the current scope.
    pub route_path: Vec<String>,
    /// Type names in scope at this level that a model must not shadow.
    pub visible_model_names: BTreeSet<String>,
    pub flags: &'a GeneratorFlags,
}

impl<'a> GenerationContext<'a> {
    pub fn root(root_name: &str, flags: &'a GeneratorFlags) -> Self {
        Self {
            route_depth: 0,
            root_name: root_name.to_string(),
            route_path: Vec::new(),
            visible_model_names: BTreeSet::from([root_name.to_string()]),
            flags,
        }
    }

    /// Context for the child router stored under `key`.
    pub fn child(&self, key: &str) -> Self {
        let mut route_path = self.route_path.clone();
        route_path.push(key.to_string());
        Self {
            route_depth: self.route_depth + 1,
            root_name: self.root_name.clone(),
            route_path,
            visible_model_names: self.visible_model_names.clone(),
            flags: self.flags,
        }
    }

    /// The same scope with additional names in view.
    pub fn with_visible(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.visible_model_names.extend(names);
        self
    }

    /// Dotted procedure path sent to the server, e.g. `users.get`.
    pub fn procedure_path(&self, key: &str) -> String {
        let mut segments = self.route_path.clone();
        segments.push(key.to_string());
        segments.join(".")
    }

    /// Dotted diagnostic path, e.g. `API.users.get`.
    pub fn diagnostic_path(&self, key: &str) -> String {
        format!("{}.{}", self.root_name, self.procedure_path(key))
    }

    pub fn access(&self) -> &'static str {
        self.flags.access_prefix()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn GenerationContext___root___sees_its_own_name() {
        let flags = GeneratorFlags::default();

        let ctx = GenerationContext::root("API", &flags);

        assert_eq!(ctx.route_depth, 0);
        assert!(ctx.visible_model_names.contains("API"));
        assert_eq!(ctx.procedure_path("getUser"), "getUser");
    }

    #[test]
    fn GenerationContext___child___extends_depth_and_path() {
        let flags = GeneratorFlags::default();
        let root = GenerationContext::root("API", &flags);

        let child = root.child("users").child("admin");

        assert_eq!(child.route_depth, 2);
        assert_eq!(child.procedure_path("ban"), "users.admin.ban");
        assert_eq!(child.diagnostic_path("ban"), "API.users.admin.ban");
    }

    #[test]
    fn GenerationContext___siblings___do_not_share_visible_names() {
        let flags = GeneratorFlags::default();
        let root = GenerationContext::root("API", &flags);

        let left = root.child("left").with_visible(["LeftOnly".to_string()]);
        let right = root.child("right");

        assert!(left.visible_model_names.contains("LeftOnly"));
        assert!(!right.visible_model_names.contains("LeftOnly"));
        assert!(right.visible_model_names.contains("API"));
    }
}
