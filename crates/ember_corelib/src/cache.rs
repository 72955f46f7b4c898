//! The memoized core-library registry.
//!
//! One static library exists per distinct (core, variant) configuration,
//! however many boards or firmware targets reference it. The key is the
//! resolved configuration, never the raw board ID: two boards sharing a
//! core and variant share one artifact.
//!
//! Generation is single-threaded, so the check-then-insert sequence in
//! [`CoreLibCache::get_or_create`] needs no locking; sequential execution
//! alone upholds the at-most-one-artifact invariant.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use ember_build::BuildGraph;
use ember_common::{BoardId, Language, TargetId};
use ember_platform::{HostContext, PlatformDescriptor, PropertyStore};

use crate::discover::discover;
use crate::error::{ConfigurationError, GenError};
use crate::flags;
use crate::resolver;

/// The identity of a core-library artifact: a resolved (core, variant) pair.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigKey {
    /// The core name, lowercase.
    pub core: String,
    /// The variant name, lowercase.
    pub variant: String,
}

impl ConfigKey {
    /// Creates a key from resolved core and variant names.
    pub fn new(core: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            core: core.into(),
            variant: variant.into(),
        }
    }

    /// The build-target name for this configuration's library.
    pub fn library_name(&self) -> String {
        format!("ember_core_{}_{}", self.core, self.variant)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.core, self.variant)
    }
}

/// A constructed core-library artifact.
///
/// Created exactly once per [`ConfigKey`] and never mutated afterwards;
/// dependent firmware targets accumulate edges in the build graph, not here.
#[derive(Debug)]
pub struct CoreLibArtifact {
    /// The configuration this artifact was built for.
    pub key: ConfigKey,
    /// The static-library target in the build graph.
    pub target: TargetId,
    /// Public include directories (core root, then variant root), propagated
    /// to every firmware target that links this artifact.
    pub include_dirs: Vec<PathBuf>,
}

/// Process-wide registry of core-library artifacts, keyed by configuration.
///
/// Grows monotonically over a generation session and is torn down with it.
#[derive(Debug, Default)]
pub struct CoreLibCache {
    entries: BTreeMap<ConfigKey, CoreLibArtifact>,
}

impl CoreLibCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the artifact for a board's configuration, creating it on first
    /// request.
    ///
    /// A hit returns the existing artifact unchanged: no re-discovery, no
    /// re-flagging. A miss resolves the board, discovers the core and variant
    /// sources, creates the library target with its include directories and
    /// all four flag scopes, and registers the artifact. Fatal errors leave
    /// the cache unchanged — no partially constructed artifact is ever
    /// observable.
    pub fn get_or_create(
        &mut self,
        board: &BoardId,
        descriptor: &PlatformDescriptor,
        props: &dyn PropertyStore,
        host: &HostContext,
        graph: &mut BuildGraph,
    ) -> Result<&CoreLibArtifact, GenError> {
        let config = resolver::resolve(board, props, descriptor)?;
        let key = ConfigKey::new(&config.core, &config.variant);

        if self.entries.contains_key(&key) {
            return Ok(&self.entries[&key]);
        }

        // Validation guarantees both paths exist in the descriptor.
        let core_root = descriptor
            .core_path(&config.core)
            .ok_or_else(|| ConfigurationError::UnknownCore {
                board: board.clone(),
                core: config.core.clone(),
            })?
            .to_path_buf();
        let variant_root = descriptor
            .variant_path(&config.variant)
            .ok_or_else(|| ConfigurationError::UnknownVariant {
                board: board.clone(),
                variant: config.variant.clone(),
            })?
            .to_path_buf();

        let mut sources = discover(&core_root, host)?;
        sources.extend(discover(&variant_root, host)?);

        let target = graph.create_static_library(&key.library_name(), sources)?;
        graph.add_public_include_dir(target, &core_root);
        graph.add_public_include_dir(target, &variant_root);
        for language in [Language::Asm, Language::C, Language::Cpp] {
            graph.set_compile_flags(target, language, flags::compose(board, language, props));
        }
        graph.set_link_flags(target, flags::compose_link(board, props));

        let artifact = CoreLibArtifact {
            key: key.clone(),
            target,
            include_dirs: vec![core_root, variant_root],
        };
        Ok(self.entries.entry(key).or_insert(artifact))
    }

    /// Returns the artifact for a configuration, if one has been created.
    pub fn get(&self, key: &ConfigKey) -> Option<&CoreLibArtifact> {
        self.entries.get(key)
    }

    /// Returns the number of distinct artifacts created so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no artifact has been created yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
