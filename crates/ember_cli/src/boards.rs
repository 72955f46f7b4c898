//! `ember boards` — list the boards the project's platform declares.
//!
//! Each board is printed with its resolved core and variant. Boards that
//! fail resolution are listed with the failure instead of aborting: this
//! command is a diagnostic surface, not a generation run.

use ember_corelib::resolver;
use ember_platform::{PlatformDescriptor, TomlPropertyStore};

use crate::manifest::{load_manifest, platform_dir, resolve_project_root};
use crate::GlobalArgs;

/// Runs the `ember boards` command.
///
/// Returns exit code 0 if every board resolves, 1 if any is invalid.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let manifest = load_manifest(&project_dir)?;
    let platform_root = platform_dir(&project_dir, &manifest);

    let descriptor = PlatformDescriptor::discover(&platform_root)?;
    let props = TomlPropertyStore::load(&platform_root)?;

    let mut invalid = 0usize;
    for board in props.known_boards() {
        match resolver::resolve(&board, &props, &descriptor) {
            Ok(config) => {
                println!("{board}  core={} variant={}", config.core, config.variant);
            }
            Err(e) => {
                invalid += 1;
                println!("{board}  invalid: {e}");
            }
        }
    }

    Ok(if invalid == 0 { 0 } else { 1 })
}
