//! Layered board properties.
//!
//! Board definitions are hierarchical key/value properties (`build.core`,
//! `build.flags.c`, ...). The platform ships defaults; each board overlays
//! its own values on top. Consumers only ever see the merged view through
//! [`PropertyStore::get_board_property`].

use std::collections::BTreeMap;
use std::path::Path;

use ember_common::BoardId;
use serde::Deserialize;

use crate::error::PlatformError;

/// Read access to a board's layered property mapping.
///
/// `get_board_property` is the only operation: a dotted key is looked up in
/// the board's own properties first, then in the platform defaults. Absence
/// is `None`, never an error — whether a missing property is fatal is the
/// caller's policy.
pub trait PropertyStore {
    /// Looks up a dotted property key for a board.
    ///
    /// Returns `None` if the board is not declared or neither layer defines
    /// the key.
    fn get_board_property(&self, board: &BoardId, key: &str) -> Option<String>;
}

/// The raw shape of a `boards.toml` file.
#[derive(Debug, Deserialize)]
struct BoardsFile {
    /// Platform-wide default properties.
    #[serde(default)]
    defaults: toml::Table,
    /// Per-board property tables keyed by board ID.
    #[serde(default)]
    boards: BTreeMap<String, toml::Table>,
}

/// A [`PropertyStore`] backed by a platform's `boards.toml`.
///
/// Layering: board-specific values override `[defaults]` per key. A board
/// that is not declared in `[boards.<id>]` has no properties at all — the
/// defaults never apply to undeclared boards.
#[derive(Debug)]
pub struct TomlPropertyStore {
    defaults: toml::Table,
    boards: BTreeMap<String, toml::Table>,
}

impl TomlPropertyStore {
    /// Loads board properties from `<platform_root>/boards.toml`.
    pub fn load(platform_root: &Path) -> Result<Self, PlatformError> {
        let path = platform_root.join("boards.toml");
        let content = std::fs::read_to_string(&path)
            .map_err(|source| PlatformError::Io { path, source })?;
        Self::load_from_str(&content)
    }

    /// Parses board properties from a string.
    ///
    /// Useful for testing without filesystem dependencies.
    pub fn load_from_str(content: &str) -> Result<Self, PlatformError> {
        let file: BoardsFile =
            toml::from_str(content).map_err(|e| PlatformError::Parse(e.to_string()))?;
        let boards = file
            .boards
            .into_iter()
            .map(|(id, table)| (id.to_lowercase(), table))
            .collect();
        Ok(Self {
            defaults: file.defaults,
            boards,
        })
    }

    /// Returns whether a board is declared.
    pub fn has_board(&self, board: &BoardId) -> bool {
        self.boards.contains_key(board.as_str())
    }

    /// Iterates over declared board IDs in sorted order.
    pub fn known_boards(&self) -> impl Iterator<Item = BoardId> + '_ {
        self.boards.keys().map(|id| BoardId::new(id.clone()))
    }
}

impl PropertyStore for TomlPropertyStore {
    fn get_board_property(&self, board: &BoardId, key: &str) -> Option<String> {
        let table = self.boards.get(board.as_str())?;
        lookup(table, key)
            .or_else(|| lookup(&self.defaults, key))
            .and_then(value_to_string)
    }
}

/// Walks a dotted key (`build.flags.c`) through nested tables.
fn lookup<'a>(table: &'a toml::Table, key: &str) -> Option<&'a toml::Value> {
    let mut segments = key.split('.');
    let mut value = table.get(segments.next()?)?;
    for segment in segments {
        value = value.as_table()?.get(segment)?;
    }
    Some(value)
}

/// Renders a scalar property value as a string.
///
/// Tables and arrays are not property values and yield `None`.
fn value_to_string(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
[defaults.build]
core = "avr"

[defaults.build.flags]
c = "-Os -ffunction-sections"
link = "-Wl,--gc-sections"

[boards.uno.build]
variant = "standard"
mcu = "atmega328p"

[boards.Mega2560.build]
core = "avr"
variant = "mega"

[boards.Mega2560.build.flags]
c = "-Os -mmcu=atmega2560"

[boards.chip.build]
f_cpu = 16000000
"#;

    fn store() -> TomlPropertyStore {
        TomlPropertyStore::load_from_str(FIXTURE).unwrap()
    }

    #[test]
    fn board_value_found() {
        let s = store();
        assert_eq!(
            s.get_board_property(&BoardId::new("uno"), "build.variant"),
            Some("standard".to_string())
        );
    }

    #[test]
    fn falls_back_to_defaults() {
        let s = store();
        assert_eq!(
            s.get_board_property(&BoardId::new("uno"), "build.core"),
            Some("avr".to_string())
        );
        assert_eq!(
            s.get_board_property(&BoardId::new("uno"), "build.flags.link"),
            Some("-Wl,--gc-sections".to_string())
        );
    }

    #[test]
    fn board_overrides_defaults() {
        let s = store();
        assert_eq!(
            s.get_board_property(&BoardId::new("mega2560"), "build.flags.c"),
            Some("-Os -mmcu=atmega2560".to_string())
        );
        // uno has no override, so the default applies
        assert_eq!(
            s.get_board_property(&BoardId::new("uno"), "build.flags.c"),
            Some("-Os -ffunction-sections".to_string())
        );
    }

    #[test]
    fn undeclared_board_has_no_properties() {
        let s = store();
        assert_eq!(
            s.get_board_property(&BoardId::new("nano"), "build.core"),
            None
        );
    }

    #[test]
    fn absent_key_is_none() {
        let s = store();
        assert_eq!(
            s.get_board_property(&BoardId::new("uno"), "build.flags.asm"),
            None
        );
    }

    #[test]
    fn board_ids_are_case_normalized() {
        let s = store();
        assert!(s.has_board(&BoardId::new("Mega2560")));
        assert_eq!(
            s.get_board_property(&BoardId::new("MEGA2560"), "build.variant"),
            Some("mega".to_string())
        );
    }

    #[test]
    fn scalar_values_stringify() {
        let s = store();
        assert_eq!(
            s.get_board_property(&BoardId::new("chip"), "build.f_cpu"),
            Some("16000000".to_string())
        );
    }

    #[test]
    fn table_values_are_not_properties() {
        let s = store();
        assert_eq!(s.get_board_property(&BoardId::new("uno"), "build"), None);
    }

    #[test]
    fn known_boards_sorted() {
        let s = store();
        let ids: Vec<_> = s.known_boards().map(|b| b.as_str().to_string()).collect();
        assert_eq!(ids, vec!["chip", "mega2560", "uno"]);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = TomlPropertyStore::load_from_str("boards = [broken").unwrap_err();
        assert!(matches!(err, PlatformError::Parse(_)));
    }

    #[test]
    fn load_reads_boards_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("boards.toml"), FIXTURE).unwrap();
        let s = TomlPropertyStore::load(dir.path()).unwrap();
        assert!(s.has_board(&BoardId::new("uno")));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlPropertyStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, PlatformError::Io { .. }));
    }
}
