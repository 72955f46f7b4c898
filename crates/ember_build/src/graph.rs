//! The target arena and build primitives.

use std::collections::BTreeMap;
use std::path::PathBuf;

use ember_common::{Language, TargetId};
use serde::Serialize;

use crate::error::BuildGraphError;

/// The kind of a build target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// A compiled static library.
    StaticLibrary,
    /// A linked executable.
    Executable,
}

/// A single target in the build graph.
#[derive(Debug, Serialize)]
pub struct Target {
    /// The arena ID of this target.
    pub id: TargetId,
    /// The unique target name.
    pub name: String,
    /// Whether this is a library or an executable.
    pub kind: TargetKind,
    /// Source files, in the order they were attached.
    pub sources: Vec<PathBuf>,
    /// Include directories visible to this target and its consumers.
    pub public_include_dirs: Vec<PathBuf>,
    /// Per-language compile flags, private to this target.
    pub compile_flags: BTreeMap<Language, String>,
    /// Linker flags, if set.
    pub link_flags: Option<String>,
    /// Targets this target depends on.
    pub dependencies: Vec<TargetId>,
}

/// An arena of build targets with name-based lookup.
///
/// IDs are issued by this graph and are only meaningful against it. The
/// graph never removes targets; generation is append-only.
#[derive(Debug, Default, Serialize)]
pub struct BuildGraph {
    targets: Vec<Target>,
    #[serde(skip)]
    by_name: BTreeMap<String, TargetId>,
}

impl BuildGraph {
    /// Creates an empty build graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a static-library target with the given sources.
    ///
    /// Fails if any target with this name already exists — library names are
    /// derived from configuration keys and must be unique.
    pub fn create_static_library(
        &mut self,
        name: &str,
        sources: Vec<PathBuf>,
    ) -> Result<TargetId, BuildGraphError> {
        if self.by_name.contains_key(name) {
            return Err(BuildGraphError::DuplicateTarget(name.to_string()));
        }
        Ok(self.push(name, TargetKind::StaticLibrary, sources))
    }

    /// Creates an executable target, or returns the existing one.
    ///
    /// Executables may be declared by several generation phases; redeclaring
    /// an existing executable returns its handle unchanged.
    pub fn create_executable(&mut self, name: &str) -> Result<TargetId, BuildGraphError> {
        if let Some(&id) = self.by_name.get(name) {
            if self.target(id).kind != TargetKind::Executable {
                return Err(BuildGraphError::DuplicateTarget(name.to_string()));
            }
            return Ok(id);
        }
        Ok(self.push(name, TargetKind::Executable, Vec::new()))
    }

    /// Looks up a target handle by name.
    pub fn lookup(&self, name: &str) -> Option<TargetId> {
        self.by_name.get(name).copied()
    }

    /// Returns the target for an ID issued by this graph.
    pub fn target(&self, id: TargetId) -> &Target {
        &self.targets[id.as_raw() as usize]
    }

    /// Appends a source file to a target.
    pub fn add_source(&mut self, id: TargetId, path: impl Into<PathBuf>) {
        self.target_mut(id).sources.push(path.into());
    }

    /// Appends a public include directory to a target.
    pub fn add_public_include_dir(&mut self, id: TargetId, dir: impl Into<PathBuf>) {
        self.target_mut(id).public_include_dirs.push(dir.into());
    }

    /// Sets the compile flags for one language scope of a target.
    pub fn set_compile_flags(&mut self, id: TargetId, language: Language, flags: impl Into<String>) {
        self.target_mut(id).compile_flags.insert(language, flags.into());
    }

    /// Sets the linker flags of a target.
    pub fn set_link_flags(&mut self, id: TargetId, flags: impl Into<String>) {
        self.target_mut(id).link_flags = Some(flags.into());
    }

    /// Declares that `consumer` depends on `provider`.
    ///
    /// Adding an edge that already exists is a no-op.
    pub fn add_dependency(&mut self, consumer: TargetId, provider: TargetId) {
        let deps = &mut self.target_mut(consumer).dependencies;
        if !deps.contains(&provider) {
            deps.push(provider);
        }
    }

    /// Returns whether `consumer` already depends on `provider`.
    pub fn has_dependency(&self, consumer: TargetId, provider: TargetId) -> bool {
        self.target(consumer).dependencies.contains(&provider)
    }

    /// Iterates over all targets in creation order.
    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    /// Renders the graph as pretty-printed JSON for inspection.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    fn push(&mut self, name: &str, kind: TargetKind, sources: Vec<PathBuf>) -> TargetId {
        let id = TargetId::from_raw(self.targets.len() as u32);
        self.targets.push(Target {
            id,
            name: name.to_string(),
            kind,
            sources,
            public_include_dirs: Vec::new(),
            compile_flags: BTreeMap::new(),
            link_flags: None,
            dependencies: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    fn target_mut(&mut self, id: TargetId) -> &mut Target {
        &mut self.targets[id.as_raw() as usize]
    }
}
