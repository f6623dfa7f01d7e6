//! Field definitions for entity and value object properties
//!
//! This module contains the `FieldDefinition` struct and the `FieldType`
//! descriptor the reference discoverer classifies.

use serde::{Deserialize, Serialize};

// ============================================================================
// FieldType
// ============================================================================

/// Declared type of a field
///
/// `Named` types are resolved against the model: they can be an enum, an
/// entity (a navigation), or a value object stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A primitive column type (`int`, `string`, `datetime`, ...)
    Scalar(String),

    /// A reference to a type declared in the model
    Named(String),

    /// Optional/nullable wrapper
    Optional(Box<FieldType>),

    /// Collection of items
    Collection(Box<FieldType>),
}

impl FieldType {
    /// Create a scalar type
    pub fn scalar(name: impl Into<String>) -> Self {
        FieldType::Scalar(name.into())
    }

    /// Create a named type reference
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    /// Wrap a type as optional
    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    /// Wrap a type as a collection
    pub fn collection(inner: FieldType) -> Self {
        FieldType::Collection(Box::new(inner))
    }

    /// Check if the type is optional
    pub fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }

    /// Check if the type is a collection
    pub fn is_collection(&self) -> bool {
        matches!(self, FieldType::Collection(_))
    }

    /// Get the referenced type name, looking through one optional wrapper
    pub fn referenced_name(&self) -> Option<&str> {
        match self {
            FieldType::Named(name) => Some(name),
            FieldType::Optional(inner) => match inner.as_ref() {
                FieldType::Named(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Scalar(name) | FieldType::Named(name) => write!(f, "{}", name),
            FieldType::Optional(inner) => write!(f, "{}?", inner),
            FieldType::Collection(inner) => write!(f, "[{}]", inner),
        }
    }
}

// ============================================================================
// FieldDefinition
// ============================================================================

/// A field of an entity or value object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name as declared in the application
    pub name: String,

    /// Column name override; the field name is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            column: None,
            field_type,
        }
    }

    /// Set the column name
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Get the storage column name
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

// ============================================================================
// Tests
// ============================================================================
