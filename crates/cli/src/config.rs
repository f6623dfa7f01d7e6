//! Settings resolution.
//!
//! Precedence, lowest first: built-in defaults, the TOML settings file
//! (`--config` or `ENUM_LOOKUP_CONFIG`), command-line flags.

use crate::Cli;
use anyhow::Context;
use enumlookup_codegen::LookupConfig;
use enumlookup_core::{LookupError, LookupResult, Validatable};
use std::path::Path;

/// Read a settings file. Missing keys keep their defaults.
pub fn load_file(path: &Path) -> LookupResult<LookupConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| LookupError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(toml::from_str(&text)?)
}

/// Apply command-line overrides on top of `config`
pub fn apply_overrides(mut config: LookupConfig, cli: &Cli) -> LookupConfig {
    if let Some(prefix) = &cli.prefix {
        config.table_name_prefix = prefix.clone();
    }
    if let Some(suffix) = &cli.suffix {
        config.table_name_suffix = suffix.clone();
    }
    if let Some(length) = cli.name_length {
        config.name_field_length = length;
    }
    if cli.no_split_words {
        config.split_words = false;
    }
    config
}

/// Effective settings for a command line
pub fn resolve(cli: &Cli) -> anyhow::Result<LookupConfig> {
    let base = match &cli.config {
        Some(path) => load_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => LookupConfig::default(),
    };

    let config = apply_overrides(base, cli);
    config.validate()?;
    tracing::debug!("Effective settings: {:?}", config);
    Ok(config)
}

// ============================================================================
// Tests
// ============================================================================
