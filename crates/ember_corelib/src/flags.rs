//! Flag composition from layered board properties.
//!
//! Each language scope has one property key; the board-over-defaults
//! layering itself lives in the property store. Composition happens exactly
//! once per artifact, at creation time — cache hits never re-compose.

use ember_common::{BoardId, Language};
use ember_platform::PropertyStore;

/// Returns the property key for a language's compile flags.
fn flag_key(language: Language) -> &'static str {
    match language {
        Language::Asm => "build.flags.asm",
        Language::C => "build.flags.c",
        Language::Cpp => "build.flags.cpp",
    }
}

/// Property key for linker flags.
const LINK_FLAG_KEY: &str = "build.flags.link";

/// Composes the compile flags for one language scope of a board.
///
/// An absent flag property composes to the empty string — flags are
/// optional, unlike `build.core` and `build.variant`.
pub fn compose(board: &BoardId, language: Language, props: &dyn PropertyStore) -> String {
    props
        .get_board_property(board, flag_key(language))
        .unwrap_or_default()
}

/// Composes the linker flags for a board.
pub fn compose_link(board: &BoardId, props: &dyn PropertyStore) -> String {
    props
        .get_board_property(board, LINK_FLAG_KEY)
        .unwrap_or_default()
}
