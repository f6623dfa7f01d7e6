//! Serialization and deserialization of model files
//!
//! A model file is a JSON document describing the host data model. It is
//! normally wrapped with a schema version; a bare `DataModel` document is
//! accepted as well.

use crate::{DataModel, SCHEMA_VERSION};
use enumlookup_core::{LookupError, LookupResult, Persistable};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Model File Wrapper
// ============================================================================

/// Wrapper for model files that includes version information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// The model data
    pub model: DataModel,
}

impl ModelFile {
    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.schema_version < Self::schema_version()
    }

    /// Migrate to the latest schema version
    pub fn migrate(&mut self) -> LookupResult<()> {
        let supported = Self::schema_version();
        if self.schema_version > supported {
            return Err(LookupError::validation(format!(
                "Model file schema version {} is newer than supported version {}",
                self.schema_version, supported
            )));
        }
        // Version 1 is the only format so far.
        self.schema_version = supported;
        Ok(())
    }
}

impl Persistable for ModelFile {
    fn schema_version() -> u32 {
        SCHEMA_VERSION
    }
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a model from a file
///
/// # Example
///
/// ```rust,ignore
/// use enumlookup_ir::load_model;
///
/// let model = load_model("rabbits.json")?;
/// println!("Loaded model: {}", model.name);
/// ```
pub fn load_model(path: impl AsRef<Path>) -> LookupResult<DataModel> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LookupError::ModelNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| LookupError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_model_from_string(&json).map_err(|e| match e {
        LookupError::Json(je) => LookupError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid model file format: {}", je),
        },
        other => other,
    })
}

/// Load a model from a JSON string
pub fn load_model_from_string(json: &str) -> LookupResult<DataModel> {
    if let Ok(mut file) = ModelFile::from_json(json) {
        if file.needs_migration() || file.schema_version > ModelFile::schema_version() {
            file.migrate()?;
        }
        return Ok(file.model);
    }

    let model: DataModel = serde_json::from_str(json)?;
    Ok(model)
}

// ============================================================================
// Tests
// ============================================================================
