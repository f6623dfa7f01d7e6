//! Synchronization plan
//!
//! The plan is the only artifact passed from model discovery to SQL
//! generation. It is plain data: the lookup tables to maintain (each with
//! its rows) and the foreign keys to ensure.

use enumlookup_core::{LookupError, LookupResult, NumericStorageType, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One lookup row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnumValue {
    pub id: i32,
    pub name: String,
}

impl EnumValue {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A lookup table and the rows it must contain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupTable {
    /// Enum type name the table is named after
    pub enum_name: String,

    /// Column type of `Id`
    pub numeric_type: NumericStorageType,

    /// Rows in enum declaration order
    pub values: Vec<EnumValue>,
}

impl LookupTable {
    pub fn new(
        enum_name: impl Into<String>,
        numeric_type: NumericStorageType,
        values: Vec<EnumValue>,
    ) -> Self {
        Self {
            enum_name: enum_name.into(),
            numeric_type,
            values,
        }
    }

    /// Get a row by id
    pub fn value(&self, id: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.id == id)
    }
}

/// A storage field that must reference a lookup table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    pub referencing_table: String,
    pub referencing_field: String,
    pub enum_name: String,
}

impl ForeignKeyEdge {
    pub fn new(
        referencing_table: impl Into<String>,
        referencing_field: impl Into<String>,
        enum_name: impl Into<String>,
    ) -> Self {
        Self {
            referencing_table: referencing_table.into(),
            referencing_field: referencing_field.into(),
            enum_name: enum_name.into(),
        }
    }
}

/// Everything one synchronization run reconciles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizationPlan {
    pub lookups: Vec<LookupTable>,
    pub references: Vec<ForeignKeyEdge>,
}

impl SynchronizationPlan {
    pub fn new(lookups: Vec<LookupTable>, references: Vec<ForeignKeyEdge>) -> Self {
        Self {
            lookups,
            references,
        }
    }

    /// Check if there is nothing to synchronize
    pub fn is_empty(&self) -> bool {
        self.lookups.is_empty() && self.references.is_empty()
    }

    /// Get a lookup table by enum name
    pub fn lookup(&self, enum_name: &str) -> Option<&LookupTable> {
        self.lookups.iter().find(|l| l.enum_name == enum_name)
    }

    /// Total number of lookup rows across all tables
    pub fn value_count(&self) -> usize {
        self.lookups.iter().map(|l| l.values.len()).sum()
    }
}

impl Validatable for SynchronizationPlan {
    /// Every edge must point at a lookup table in the same plan, and lookup
    /// tables must be unique with unique ids.
    fn validate(&self) -> LookupResult<()> {
        let mut names = HashSet::new();
        for lookup in &self.lookups {
            if !names.insert(lookup.enum_name.as_str()) {
                return Err(LookupError::internal(format!(
                    "lookup table for '{}' appears more than once",
                    lookup.enum_name
                )));
            }
            let mut ids = HashSet::new();
            for value in &lookup.values {
                if !ids.insert(value.id) {
                    return Err(LookupError::internal(format!(
                        "lookup table for '{}' has duplicate id {}",
                        lookup.enum_name, value.id
                    )));
                }
            }
        }

        for edge in &self.references {
            if !names.contains(edge.enum_name.as_str()) {
                return Err(LookupError::internal(format!(
                    "'{}.{}' references '{}' which has no lookup table",
                    edge.referencing_table, edge.referencing_field, edge.enum_name
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
