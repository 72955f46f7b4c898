//! Ember CLI — build-target generation for embedded firmware projects.
//!
//! Provides `ember generate` to produce the build graph for every firmware
//! target declared in `ember.toml`, and `ember boards` to list the boards
//! the project's platform can resolve.

#![warn(missing_docs)]

mod boards;
mod generate;
mod manifest;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Ember — a build-target generator for embedded firmware.
#[derive(Parser, Debug)]
#[command(name = "ember", version, about = "Ember firmware build generator")]
pub struct Cli {
    /// Global options shared by all commands.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by all commands.
#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a custom `ember.toml` manifest file.
    #[arg(long, global = true)]
    pub manifest: Option<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate build targets for every firmware target in the manifest.
    Generate(GenerateArgs),
    /// List the boards declared by the project's platform.
    Boards,
}

/// Arguments for the `ember generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output format for the generated build graph.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Output format for generation results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary on stderr.
    Text,
    /// Full build-graph dump as JSON on stdout.
    Json,
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Generate(args) => generate::run(args, &cli.global),
        Command::Boards => boards::run(&cli.global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
