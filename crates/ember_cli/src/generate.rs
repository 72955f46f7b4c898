//! `ember generate` — build-graph generation for a project.
//!
//! The full pipeline:
//!
//! 1. Find project root (walk up looking for `ember.toml`)
//! 2. Load the manifest and the platform (descriptor + board properties)
//! 3. Detect the host context
//! 4. Declare every firmware executable with its application sources
//! 5. Run `ensure_core_library_linked` for each firmware target
//! 6. Print a summary (or dump the graph as JSON)
//!
//! Any configuration or discovery error is fatal: generation stops at the
//! first one and the process exits non-zero.

use ember_common::BoardId;
use ember_corelib::Generator;
use ember_platform::{HostContext, PlatformDescriptor, TomlPropertyStore};

use crate::manifest::{load_manifest, platform_dir, resolve_project_root};
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// Runs the `ember generate` command.
///
/// Returns exit code 0 on success; fatal generation errors propagate to the
/// caller, which exits non-zero.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let manifest = load_manifest(&project_dir)?;

    if manifest.firmware.is_empty() {
        if !global.quiet {
            eprintln!("warning: no firmware targets declared in ember.toml");
        }
        return Ok(0);
    }

    let platform_root = platform_dir(&project_dir, &manifest);
    let descriptor = PlatformDescriptor::discover(&platform_root)?;
    let props = TomlPropertyStore::load(&platform_root)?;
    let host = HostContext::detect();

    if !global.quiet {
        eprintln!(
            "   Generating {} ({} firmware target(s))",
            manifest.project.name,
            manifest.firmware.len()
        );
    }

    let mut generator = Generator::new(&descriptor, &props, host);

    // Declare all executables up front so linking never defers.
    for (name, spec) in &manifest.firmware {
        let target = generator.declare_firmware(name)?;
        for source in &spec.sources {
            generator.graph_mut().add_source(target, project_dir.join(source));
        }
    }

    for (name, spec) in &manifest.firmware {
        let board = BoardId::new(spec.board.clone());
        generator.ensure_core_library_linked(name, &board)?;
        if !global.quiet {
            eprintln!("   Linked {name} (board {board})");
        }
    }

    let libraries = generator.cache().len();
    let graph = generator.into_graph();

    match args.format {
        ReportFormat::Text => {
            if !global.quiet {
                eprintln!(
                    "   Result: {} core librar{} for {} firmware target(s)",
                    libraries,
                    if libraries == 1 { "y" } else { "ies" },
                    manifest.firmware.len()
                );
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
    }

    Ok(0)
}
