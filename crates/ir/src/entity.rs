//! Entity and value object definitions
//!
//! Entities map to tables. Value objects have no table of their own; their
//! fields are stored inline in the owning entity's table.

use crate::field::FieldDefinition;
use enumlookup_core::Named;
use serde::{Deserialize, Serialize};

// ============================================================================
// EntityDefinition
// ============================================================================

/// A storage entity (maps to a database table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefinition {
    /// Type name (e.g. "Rabbit")
    pub name: String,

    /// Table name override; the type name is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Declared fields
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl EntityDefinition {
    /// Create a new entity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            fields: Vec::new(),
        }
    }

    /// Set the table name
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Get the storage table name
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(&self.name)
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Named for EntityDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// ValueObjectDefinition
// ============================================================================

/// A value object (complex type) stored inline in its owner's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueObjectDefinition {
    /// Type name (e.g. "Address")
    pub name: String,

    /// Declared fields
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl ValueObjectDefinition {
    /// Create a new value object
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }
}

impl Named for ValueObjectDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Tests
// ============================================================================
