//! Board-configuration resolution.
//!
//! Looks up a board's declared core and variant through the property store
//! and validates both against the platform descriptor. Pure: no side
//! effects beyond the lookups.

use ember_common::BoardId;
use ember_platform::{PlatformDescriptor, PropertyStore};

use crate::error::ConfigurationError;

/// Property key naming a board's core package.
const CORE_KEY: &str = "build.core";

/// Property key naming a board's variant package.
const VARIANT_KEY: &str = "build.variant";

/// A board's validated (core, variant) configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// The board this configuration was resolved for.
    pub board: BoardId,
    /// The validated core name, lowercase.
    pub core: String,
    /// The validated variant name, lowercase.
    pub variant: String,
}

/// Resolves and validates a board's core and variant.
///
/// Both values are normalized to lowercase before validation. A missing
/// property or a value outside the platform's known sets is a fatal
/// [`ConfigurationError`] naming the board and the offending value.
pub fn resolve(
    board: &BoardId,
    props: &dyn PropertyStore,
    descriptor: &PlatformDescriptor,
) -> Result<BoardConfig, ConfigurationError> {
    let core = require(board, props, CORE_KEY)?;
    let variant = require(board, props, VARIANT_KEY)?;

    if !descriptor.has_core(&core) {
        return Err(ConfigurationError::UnknownCore {
            board: board.clone(),
            core,
        });
    }
    if !descriptor.has_variant(&variant) {
        return Err(ConfigurationError::UnknownVariant {
            board: board.clone(),
            variant,
        });
    }

    Ok(BoardConfig {
        board: board.clone(),
        core,
        variant,
    })
}

/// Looks up a required property, lowercased.
fn require(
    board: &BoardId,
    props: &dyn PropertyStore,
    key: &str,
) -> Result<String, ConfigurationError> {
    props
        .get_board_property(board, key)
        .map(|value| value.to_lowercase())
        .ok_or_else(|| ConfigurationError::MissingProperty {
            board: board.clone(),
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_platform::TomlPropertyStore;

    fn descriptor() -> PlatformDescriptor {
        let mut d = PlatformDescriptor::new();
        d.insert_core("avr", "/platform/cores/avr");
        d.insert_variant("standard", "/platform/variants/standard");
        d.insert_variant("mega", "/platform/variants/mega");
        d
    }

    fn props(toml: &str) -> TomlPropertyStore {
        TomlPropertyStore::load_from_str(toml).unwrap()
    }

    #[test]
    fn resolves_valid_board() {
        let store = props(
            r#"
[boards.uno.build]
core = "AVR"
variant = "Standard"
"#,
        );
        let config = resolve(&BoardId::new("uno"), &store, &descriptor()).unwrap();
        assert_eq!(config.core, "avr");
        assert_eq!(config.variant, "standard");
        assert_eq!(config.board, BoardId::new("uno"));
    }

    #[test]
    fn unknown_core_is_fatal() {
        let store = props(
            r#"
[boards.esp_thing.build]
core = "esp32"
variant = "standard"
"#,
        );
        let err = resolve(&BoardId::new("esp_thing"), &store, &descriptor()).unwrap_err();
        match err {
            ConfigurationError::UnknownCore { board, core } => {
                assert_eq!(board, BoardId::new("esp_thing"));
                assert_eq!(core, "esp32");
            }
            other => panic!("expected UnknownCore, got {other:?}"),
        }
    }

    #[test]
    fn unknown_variant_is_fatal() {
        let store = props(
            r#"
[boards.uno.build]
core = "avr"
variant = "micro"
"#,
        );
        let err = resolve(&BoardId::new("uno"), &store, &descriptor()).unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownVariant { .. }));
    }

    #[test]
    fn missing_core_property_is_fatal() {
        let store = props(
            r#"
[boards.uno.build]
variant = "standard"
"#,
        );
        let err = resolve(&BoardId::new("uno"), &store, &descriptor()).unwrap_err();
        match err {
            ConfigurationError::MissingProperty { key, .. } => assert_eq!(key, "build.core"),
            other => panic!("expected MissingProperty, got {other:?}"),
        }
    }

    #[test]
    fn undeclared_board_reports_missing_core() {
        let store = props("");
        let err = resolve(&BoardId::new("ghost"), &store, &descriptor()).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingProperty { .. }));
    }

    #[test]
    fn defaults_layer_supplies_core() {
        let store = props(
            r#"
[defaults.build]
core = "avr"

[boards.uno.build]
variant = "standard"
"#,
        );
        let config = resolve(&BoardId::new("uno"), &store, &descriptor()).unwrap();
        assert_eq!(config.core, "avr");
    }
}
