//! Error types for enum lookup synchronization
//!
//! This module provides unified error handling across the workspace,
//! covering introspection failures, discovery diagnostics, executor
//! failures, configuration problems, and model file loading.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a SQL executor, kept intact as the error source
pub type ExecutorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for enum lookup synchronization
#[derive(Debug, Error)]
pub enum LookupError {
    // ========================================================================
    // Introspection Errors
    // ========================================================================
    /// A non-enum type was handed to the enum introspector
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An enum member value does not fit its underlying type or a 32-bit
    /// lookup id
    #[error("Value {value} of '{enum_name}.{member}' does not fit in {target}")]
    IdOutOfRange {
        enum_name: String,
        member: String,
        value: i64,
        target: String,
    },

    // ========================================================================
    // Discovery Errors
    // ========================================================================
    /// A field type could not be classified; the field is skipped
    #[error("Skipped '{entity}.{field}': {reason}")]
    DiscoveryIncomplete {
        entity: String,
        field: String,
        reason: String,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// The external executor failed while running generated SQL
    #[error("SQL execution failed: {0}")]
    Execution(#[source] ExecutorError),

    // ========================================================================
    // Validation / Configuration Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // File Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// Model file not found
    #[error("Model file not found at path: {0}")]
    ModelNotFound(PathBuf),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (a broken invariant, not a user mistake)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        LookupError::InvalidArgument(msg.into())
    }

    /// Create a discovery diagnostic for a skipped field
    pub fn discovery(
        entity: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        LookupError::DiscoveryIncomplete {
            entity: entity.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        LookupError::Validation(msg.into())
    }

    /// Create an invalid configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        LookupError::InvalidConfig(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        LookupError::Internal(msg.into())
    }

    /// Check if this error is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            LookupError::InvalidArgument(_) | LookupError::IdOutOfRange { .. }
        )
    }

    /// Check if this error is a discovery diagnostic
    pub fn is_discovery(&self) -> bool {
        matches!(self, LookupError::DiscoveryIncomplete { .. })
    }

    /// Check if this error came from the SQL executor
    pub fn is_execution(&self) -> bool {
        matches!(self, LookupError::Execution(_))
    }
}

/// Result type alias using LookupError
pub type LookupResult<T> = Result<T, LookupError>;

// ============================================================================
// Tests
// ============================================================================
