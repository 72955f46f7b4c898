//! Core build-graph generation for embedded firmware.
//!
//! Given a platform (known cores and variants with source roots, plus
//! layered board properties), this crate turns board requests into build
//! targets: one memoized static core library per distinct (core, variant)
//! configuration, linked into every firmware executable that requests a
//! board with that configuration.
//!
//! The public surface is [`Generator::ensure_core_library_linked`]; the
//! components behind it are:
//!
//! 1. [`resolver`] — validates a board's declared core and variant
//! 2. [`discover`](discover()) — enumerates compilable sources deterministically
//! 3. [`flags`] — composes per-language and linker flags
//! 4. [`CoreLibCache`] — get-or-create registry keyed by configuration
//! 5. [`linker`] — wires artifacts to firmware targets
//!
//! Generation is strictly sequential; the cache needs no locking.

#![warn(missing_docs)]

pub mod cache;
pub mod discover;
pub mod error;
pub mod flags;
pub mod linker;
pub mod resolver;

use ember_build::BuildGraph;
use ember_common::{BoardId, TargetId};
use ember_platform::{HostContext, PlatformDescriptor, PropertyStore};

pub use cache::{ConfigKey, CoreLibArtifact, CoreLibCache};
pub use discover::discover;
pub use error::{ConfigurationError, DiscoveryError, GenError};
pub use linker::{link, LinkOutcome};
pub use resolver::{resolve, BoardConfig};

/// A single generation session over one platform.
///
/// Owns the build graph and the core-library cache; borrows the read-only
/// platform descriptor and property store. Firmware targets carry their
/// board explicitly at every call — there is no ambient board state.
pub struct Generator<'a> {
    descriptor: &'a PlatformDescriptor,
    props: &'a dyn PropertyStore,
    host: HostContext,
    graph: BuildGraph,
    cache: CoreLibCache,
}

impl<'a> Generator<'a> {
    /// Creates a generation session for a platform on the given host.
    pub fn new(
        descriptor: &'a PlatformDescriptor,
        props: &'a dyn PropertyStore,
        host: HostContext,
    ) -> Self {
        Self {
            descriptor,
            props,
            host,
            graph: BuildGraph::new(),
            cache: CoreLibCache::new(),
        }
    }

    /// Declares a firmware executable target.
    ///
    /// Idempotent: redeclaring an existing firmware target returns its
    /// handle unchanged.
    pub fn declare_firmware(&mut self, name: &str) -> Result<TargetId, GenError> {
        Ok(self.graph.create_executable(name)?)
    }

    /// Ensures the core library for `board` exists and is linked into the
    /// named firmware target.
    ///
    /// Callable any number of times for any number of firmware targets;
    /// idempotent per (firmware target, board) pair. The library is created
    /// at most once per distinct (core, variant) configuration. If the
    /// firmware target is not declared yet the result is
    /// [`LinkOutcome::Deferred`] and the caller re-invokes after declaring
    /// it; the library itself is still created.
    pub fn ensure_core_library_linked(
        &mut self,
        firmware: &str,
        board: &BoardId,
    ) -> Result<LinkOutcome, GenError> {
        let artifact = self.cache.get_or_create(
            board,
            self.descriptor,
            self.props,
            &self.host,
            &mut self.graph,
        )?;
        Ok(linker::link(firmware, artifact, &mut self.graph))
    }

    /// Returns the build graph constructed so far.
    pub fn graph(&self) -> &BuildGraph {
        &self.graph
    }

    /// Returns the build graph for direct mutation, e.g. attaching
    /// application sources to declared firmware targets.
    pub fn graph_mut(&mut self) -> &mut BuildGraph {
        &mut self.graph
    }

    /// Returns the core-library cache.
    pub fn cache(&self) -> &CoreLibCache {
        &self.cache
    }

    /// Consumes the session, yielding the finished build graph.
    pub fn into_graph(self) -> BuildGraph {
        self.graph
    }
}
