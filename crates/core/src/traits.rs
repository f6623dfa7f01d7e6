//! Core traits for enum lookup synchronization
//!
//! This module defines the seams the rest of the workspace plugs into:
//! validation of definitions and configuration, loading of model
//! files, and the SQL executor capability supplied by the host.

use crate::error::{ExecutorError, LookupResult};
use crate::types::SqlParameter;
use serde::de::DeserializeOwned;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use enumlookup_core::{LookupError, LookupResult, Validatable};
///
/// struct Settings {
///     name_field_length: u32,
/// }
///
/// impl Validatable for Settings {
///     fn validate(&self) -> LookupResult<()> {
///         if self.name_field_length == 0 {
///             return Err(LookupError::invalid_config("name length must be positive"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `LookupError` describing the problem.
    fn validate(&self) -> LookupResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Persistable Trait
// ============================================================================

/// Versioned documents read from JSON files
pub trait Persistable: DeserializeOwned + Sized {
    /// Newest schema version this build understands
    fn schema_version() -> u32 {
        1
    }

    /// Load from a JSON string
    fn from_json(json: &str) -> LookupResult<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }
}

// ============================================================================
// SqlExecutor Trait
// ============================================================================

/// Capability to run a SQL batch with named parameters
///
/// The executor owns the connection and the transaction. A batch is
/// expected to run as one atomic unit; whatever the executor reports is
/// propagated to the caller untouched.
///
/// Closures with a matching signature are executors too:
///
/// ```rust,ignore
/// let mut seen = Vec::new();
/// let mut executor = |sql: &str, params: &[SqlParameter]| {
///     seen.push((sql.to_string(), params.len()));
///     Ok(())
/// };
/// handler.apply(&plan, &mut executor)?;
/// ```
pub trait SqlExecutor {
    /// Run the SQL text with the given parameters
    fn run(&mut self, sql: &str, params: &[SqlParameter]) -> Result<(), ExecutorError>;
}

impl<F> SqlExecutor for F
where
    F: FnMut(&str, &[SqlParameter]) -> Result<(), ExecutorError>,
{
    fn run(&mut self, sql: &str, params: &[SqlParameter]) -> Result<(), ExecutorError> {
        self(sql, params)
    }
}

// ============================================================================
// Named Trait
// ============================================================================

/// Trait for types that have a name
pub trait Named {
    /// Get the name
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
