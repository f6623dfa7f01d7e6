//! # Enum Lookup CLI
//!
//! Command-line interface for enum lookup synchronization.
//!
//! ## Commands
//!
//! - `script` - Write the migration script for a model file
//! - `plan` - Print the synchronization plan as JSON
//! - `check` - Validate a model file and report skipped fields
//!

pub mod commands;
pub mod config;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

// Re-export dependencies for use in main.rs
pub use enumlookup_codegen;
pub use enumlookup_core;
pub use enumlookup_ir;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "enum-lookup")]
#[command(version, about = "Keep database lookup tables in sync with enum definitions")]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true, env = "ENUM_LOOKUP_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Table name prefix [default: Enum_]
    #[arg(long, global = true, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Table name suffix [default: none]
    #[arg(long, global = true, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Length of the Name column [default: 255]
    #[arg(long, global = true, value_name = "N")]
    pub name_length: Option<u32>,

    /// Keep member identifiers as written instead of splitting PascalCase
    #[arg(long, global = true)]
    pub no_split_words: bool,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the migration script for a model
    Script {
        /// Model file (JSON)
        model: PathBuf,

        /// Write the script to this file instead of stdout
        #[arg(short, long, value_name = "FILE", conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Write a timestamped script into this directory
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Print the synchronization plan as JSON
    Plan {
        /// Model file (JSON)
        model: PathBuf,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate a model and report fields discovery would skip
    Check {
        /// Model file (JSON)
        model: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Run a parsed command line.
///
/// Returns `Ok(false)` when the command ran but found problems (`check`
/// with errors).
pub fn run(cli: &Cli) -> anyhow::Result<bool> {
    let settings = config::resolve(cli)?;

    match &cli.command {
        Commands::Script {
            model,
            output,
            out_dir,
        } => commands::script(
            &settings,
            model,
            commands::ScriptTarget::from_args(output.as_deref(), out_dir.as_deref()),
        ),
        Commands::Plan { model, compact } => commands::plan(&settings, model, *compact),
        Commands::Check { model } => commands::check(&settings, model),
    }
}

// ============================================================================
// Tests
// ============================================================================
