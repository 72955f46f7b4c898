//! Error types for build-graph construction.

/// Errors that can occur while constructing the build graph.
#[derive(Debug, thiserror::Error)]
pub enum BuildGraphError {
    /// A target with this name already exists with an incompatible kind.
    #[error("target '{0}' already exists")]
    DuplicateTarget(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_target_display() {
        let err = BuildGraphError::DuplicateTarget("ember_core_avr_standard".to_string());
        assert_eq!(
            format!("{err}"),
            "target 'ember_core_avr_standard' already exists"
        );
    }
}
