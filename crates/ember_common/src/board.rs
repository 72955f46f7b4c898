//! Board identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable, opaque identifier for a board definition (e.g., `"uno"`).
///
/// Board IDs are compared case-insensitively by normalizing to lowercase at
/// construction. The ID names a board in the platform's property store; it
/// says nothing about which core or variant the board uses — that is resolved
/// through its `build.core` / `build.variant` properties.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(String);

impl BoardId {
    /// Creates a board ID, normalizing to lowercase.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().to_lowercase())
    }

    /// Returns the normalized ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BoardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases() {
        assert_eq!(BoardId::new("Uno").as_str(), "uno");
        assert_eq!(BoardId::new("MEGA2560").as_str(), "mega2560");
    }

    #[test]
    fn equality_after_normalization() {
        assert_eq!(BoardId::new("Uno"), BoardId::from("uno"));
    }

    #[test]
    fn display_matches_as_str() {
        let id = BoardId::new("nano");
        assert_eq!(format!("{id}"), "nano");
    }

    #[test]
    fn serde_is_transparent() {
        let id = BoardId::new("uno");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"uno\"");
        let back: BoardId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
