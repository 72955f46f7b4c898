//! Wiring core-library artifacts into firmware targets.

use ember_build::{BuildGraph, TargetKind};

use crate::cache::CoreLibArtifact;

/// The result of a link request.
///
/// Deferral is a state, not a failure: generation may stage board metadata
/// before the executable is declared, and the caller re-invokes once it
/// exists. A link request is never silently dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkOutcome {
    /// The dependency edge was added and include directories propagated.
    Linked,
    /// The edge already existed; nothing was changed.
    AlreadyLinked,
    /// The firmware target is not declared yet; nothing was changed.
    Deferred,
}

impl LinkOutcome {
    /// Returns whether the firmware target now depends on the artifact.
    pub fn is_linked(self) -> bool {
        matches!(self, Self::Linked | Self::AlreadyLinked)
    }
}

/// Links a core-library artifact into a firmware target.
///
/// Adds the dependency edge and propagates the artifact's public include
/// directories so the firmware sources can compile against the core's
/// headers. Idempotent: linking an already linked pair changes nothing.
pub fn link(firmware: &str, artifact: &CoreLibArtifact, graph: &mut BuildGraph) -> LinkOutcome {
    let Some(app) = graph.lookup(firmware) else {
        return LinkOutcome::Deferred;
    };
    if graph.target(app).kind != TargetKind::Executable {
        // Name collisions with non-executables are treated as undeclared.
        return LinkOutcome::Deferred;
    }
    if graph.has_dependency(app, artifact.target) {
        return LinkOutcome::AlreadyLinked;
    }

    graph.add_dependency(app, artifact.target);
    for dir in &artifact.include_dirs {
        graph.add_public_include_dir(app, dir);
    }
    LinkOutcome::Linked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ConfigKey;
    use ember_common::TargetId;
    use std::path::PathBuf;

    fn artifact(graph: &mut BuildGraph) -> CoreLibArtifact {
        let target = graph
            .create_static_library("ember_core_avr_standard", vec![PathBuf::from("wiring.c")])
            .unwrap();
        CoreLibArtifact {
            key: ConfigKey::new("avr", "standard"),
            target,
            include_dirs: vec![
                PathBuf::from("/platform/cores/avr"),
                PathBuf::from("/platform/variants/standard"),
            ],
        }
    }

    #[test]
    fn link_adds_edge_and_includes() {
        let mut graph = BuildGraph::new();
        let artifact = artifact(&mut graph);
        let app = graph.create_executable("blink").unwrap();

        assert_eq!(link("blink", &artifact, &mut graph), LinkOutcome::Linked);
        assert!(graph.has_dependency(app, artifact.target));
        assert_eq!(graph.target(app).public_include_dirs.len(), 2);
    }

    #[test]
    fn relink_is_noop() {
        let mut graph = BuildGraph::new();
        let artifact = artifact(&mut graph);
        let app = graph.create_executable("blink").unwrap();

        assert_eq!(link("blink", &artifact, &mut graph), LinkOutcome::Linked);
        assert_eq!(
            link("blink", &artifact, &mut graph),
            LinkOutcome::AlreadyLinked
        );

        // No duplicated edge or include dirs
        assert_eq!(graph.target(app).dependencies.len(), 1);
        assert_eq!(graph.target(app).public_include_dirs.len(), 2);
    }

    #[test]
    fn undeclared_target_defers() {
        let mut graph = BuildGraph::new();
        let artifact = artifact(&mut graph);

        let outcome = link("not_yet", &artifact, &mut graph);
        assert_eq!(outcome, LinkOutcome::Deferred);
        assert!(!outcome.is_linked());
    }

    #[test]
    fn deferral_then_declaration_links_once() {
        let mut graph = BuildGraph::new();
        let artifact = artifact(&mut graph);

        assert_eq!(link("blink", &artifact, &mut graph), LinkOutcome::Deferred);
        let app = graph.create_executable("blink").unwrap();
        assert_eq!(link("blink", &artifact, &mut graph), LinkOutcome::Linked);
        assert_eq!(graph.target(app).dependencies, vec![artifact.target]);
    }

    #[test]
    fn library_name_collision_defers() {
        let mut graph = BuildGraph::new();
        let artifact = artifact(&mut graph);
        assert_eq!(
            link("ember_core_avr_standard", &artifact, &mut graph),
            LinkOutcome::Deferred
        );
    }

    #[test]
    fn artifact_ids_are_graph_scoped() {
        // A stale ID from another graph must not be reachable through lookup.
        let mut graph = BuildGraph::new();
        let foreign = CoreLibArtifact {
            key: ConfigKey::new("avr", "standard"),
            target: TargetId::from_raw(7),
            include_dirs: Vec::new(),
        };
        assert_eq!(link("app", &foreign, &mut graph), LinkOutcome::Deferred);
    }
}
