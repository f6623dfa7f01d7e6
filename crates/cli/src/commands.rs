//! Command implementations.
//!
//! Generated SQL and JSON go to stdout; status lines go to stderr so output
//! can be redirected.

use anyhow::Context;
use colored::Colorize;
use enumlookup_codegen::{EnumToLookup, LookupConfig};
use enumlookup_ir::{DataModel, Validator, load_model};
use std::path::{Path, PathBuf};

/// File name suffix of timestamped scripts
pub const SCRIPT_SUFFIX: &str = "sync_enum_lookups.sql";

/// Where `script` writes its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptTarget {
    Stdout,
    File(PathBuf),
    /// Directory for a `<timestamp>_sync_enum_lookups.sql` file
    Directory(PathBuf),
}

impl ScriptTarget {
    pub fn from_args(output: Option<&Path>, out_dir: Option<&Path>) -> Self {
        match (output, out_dir) {
            (Some(file), _) => ScriptTarget::File(file.to_path_buf()),
            (None, Some(dir)) => ScriptTarget::Directory(dir.to_path_buf()),
            (None, None) => ScriptTarget::Stdout,
        }
    }
}

/// Timestamped script file name, e.g. `20260101120000_sync_enum_lookups.sql`
pub fn timestamped_file_name(now: chrono::DateTime<chrono::Local>) -> String {
    format!("{}_{}", now.format("%Y%m%d%H%M%S"), SCRIPT_SUFFIX)
}

fn load(path: &Path) -> anyhow::Result<DataModel> {
    let model =
        load_model(path).with_context(|| format!("Failed to load model {}", path.display()))?;
    tracing::info!(
        "Loaded model '{}' ({} types) from {}",
        model.name,
        model.type_count(),
        path.display()
    );
    Ok(model)
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// ============================================================================
// script
// ============================================================================

pub fn script(config: &LookupConfig, model: &Path, target: ScriptTarget) -> anyhow::Result<bool> {
    let model = load(model)?;
    let sql = EnumToLookup::new(config.clone()).generate_migration_sql(&model)?;

    if sql.is_empty() {
        eprintln!(
            "{} no enum-backed fields found in '{}'",
            "note:".yellow().bold(),
            model.name
        );
    }

    match target {
        ScriptTarget::Stdout => print!("{}", sql),
        ScriptTarget::File(path) => {
            write_file(&path, &sql)?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
        ScriptTarget::Directory(dir) => {
            let path = dir.join(timestamped_file_name(chrono::Local::now()));
            write_file(&path, &sql)?;
            eprintln!("{} {}", "Wrote".green().bold(), path.display());
        }
    }

    Ok(true)
}

// ============================================================================
// plan
// ============================================================================

pub fn plan(config: &LookupConfig, model: &Path, compact: bool) -> anyhow::Result<bool> {
    let model = load(model)?;
    let plan = EnumToLookup::new(config.clone()).build_plan(&model)?;

    let json = if compact {
        serde_json::to_string(&plan)?
    } else {
        serde_json::to_string_pretty(&plan)?
    };
    println!("{}", json);
    Ok(true)
}

// ============================================================================
// check
// ============================================================================

pub fn check(config: &LookupConfig, model: &Path) -> anyhow::Result<bool> {
    let path = model;
    let model = load(path)?;
    let sync = EnumToLookup::new(config.clone());

    let validation = Validator::with_default_rules().validate(&model);
    for error in &validation.errors {
        eprintln!("{} {}", "error:".red().bold(), error);
    }
    for warning in &validation.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }

    let discovery = sync.discover(&model);
    for skipped in &discovery.skipped {
        eprintln!("{} {}", "warning:".yellow().bold(), skipped);
    }

    let mut ok = validation.valid;
    if ok {
        match sync.plan_discovery(&model, &discovery) {
            Ok(plan) => eprintln!(
                "{} {}: {} lookup table(s), {} foreign key(s)",
                "ok:".green().bold(),
                path.display(),
                plan.lookups.len(),
                plan.references.len()
            ),
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                ok = false;
            }
        }
    }

    if !ok {
        eprintln!(
            "{} {} has {} error(s)",
            "failed:".red().bold(),
            path.display(),
            validation.errors.len().max(1)
        );
    }
    Ok(ok)
}

// ============================================================================
// Tests
// ============================================================================
