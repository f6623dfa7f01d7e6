//! # Enum Lookup Codegen
//!
//! The lookup table synchronization engine.
//!
//! This crate turns a host data model into idempotent SQL that keeps one
//! lookup table per referenced enum in sync with its definition, plus the
//! foreign keys pointing at those tables.
//!
//! ## Pipeline
//!
//! - **Reference Discovery** ([`discover`]): walk the model from its entity
//!   sets and collect every field stored as an enum
//! - **Enum Introspection** ([`introspect`]): derive `(id, name)` rows per enum
//! - **Model Building** ([`builder`]): assemble the [`SynchronizationPlan`]
//! - **SQL Generation** ([`sql`]): render the plan through a dialect handler,
//!   either parameterized for execution or with inline literals as a
//!   migration script
//!
//! [`SynchronizationPlan`]: enumlookup_ir::SynchronizationPlan

// ============================================================================
// Modules
// ============================================================================

pub mod builder;
pub mod discover;
pub mod generator;
pub mod introspect;
pub mod sql;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::LookupModelBuilder;
pub use discover::{Discovery, ReferenceDiscoverer};
pub use generator::EnumToLookup;
pub use introspect::{EnumParser, split_camel_case};
pub use sql::{DbHandler, RenderedSql, SqlDialect, SqlServerHandler, Statement, SyncBatch, ValueMode};

use enumlookup_core::{LookupError, LookupResult, Validatable};
use serde::{Deserialize, Serialize};

/// Largest declared length SQL Server accepts for `nvarchar(n)`
pub const MAX_NAME_FIELD_LENGTH: u32 = 4000;

// ============================================================================
// LookupConfig
// ============================================================================

/// Configuration for lookup table generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Prefix for generated table names, may be empty
    pub table_name_prefix: String,

    /// Suffix for generated table names, may be empty
    pub table_name_suffix: String,

    /// Declared length of the `Name` column
    pub name_field_length: u32,

    /// Split PascalCase identifiers into words when a member has no
    /// description
    pub split_words: bool,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            table_name_prefix: "Enum_".to_string(),
            table_name_suffix: String::new(),
            name_field_length: 255,
            split_words: true,
        }
    }
}

impl LookupConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table name prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.table_name_prefix = prefix.into();
        self
    }

    /// Set the table name suffix
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.table_name_suffix = suffix.into();
        self
    }

    /// Set the `Name` column length
    pub fn with_name_field_length(mut self, length: u32) -> Self {
        self.name_field_length = length;
        self
    }

    /// Keep member identifiers as written
    pub fn without_split_words(mut self) -> Self {
        self.split_words = false;
        self
    }

    /// Lookup table name for an enum
    pub fn table_name(&self, enum_name: &str) -> String {
        format!(
            "{}{}{}",
            self.table_name_prefix, enum_name, self.table_name_suffix
        )
    }

    /// Introspector configured from these settings
    pub fn enum_parser(&self) -> EnumParser {
        EnumParser::new().with_split_words(self.split_words)
    }
}

impl Validatable for LookupConfig {
    fn validate(&self) -> LookupResult<()> {
        if self.name_field_length == 0 || self.name_field_length > MAX_NAME_FIELD_LENGTH {
            return Err(LookupError::invalid_config(format!(
                "name_field_length must be between 1 and {}, got {}",
                MAX_NAME_FIELD_LENGTH, self.name_field_length
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
