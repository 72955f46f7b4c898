//! Compilation-unit languages recognized by the generator.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The language of a single compilation unit, detected from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Assembly (`.s`, `.S`).
    Asm,
    /// C (`.c`).
    C,
    /// C++ (`.cpp`, `.cc`, `.cxx`).
    Cpp,
}

impl Language {
    /// Detects the language from a file's extension.
    ///
    /// Returns `None` for headers and anything else that is not a
    /// compilable implementation unit.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext {
            "s" | "S" => Some(Self::Asm),
            "c" => Some(Self::C),
            "cpp" | "cc" | "cxx" => Some(Self::Cpp),
            _ => None,
        }
    }
}
