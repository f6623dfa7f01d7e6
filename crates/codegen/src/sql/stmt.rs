//! Structured statement fragments.
//!
//! A [`SyncBatch`] is a synchronization plan lowered to an ordered list of
//! dialect-neutral statements. Everything a renderer needs (table names,
//! column lengths, constraint names) is resolved here, so rendering is a
//! pure function of the statement and the value mode.

use crate::LookupConfig;
use enumlookup_core::NumericStorageType;
use enumlookup_ir::{EnumValue, SynchronizationPlan};

/// Phase a statement belongs to. Phases run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    CreateTables,
    SyncContents,
    AddForeignKeys,
}

/// A single statement fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Create a lookup table unless it already exists
    CreateLookupTable {
        table: String,
        id_type: NumericStorageType,
        name_length: u32,
    },

    /// Create an empty staging table, dropping one left by an earlier run
    CreateStaging { name_length: u32 },

    /// Insert one row into the staging table
    StageValue(EnumValue),

    /// Merge the staging table into a lookup table: insert missing rows,
    /// rename changed rows, delete rows that are no longer staged
    MergeStaging { table: String },

    /// Empty the staging table
    TruncateStaging,

    /// Drop the staging table
    DropStaging,

    /// Add a foreign key unless a constraint with that name already exists
    AddForeignKey {
        name: String,
        table: String,
        column: String,
        references: String,
    },
}

impl Statement {
    pub fn phase(&self) -> Phase {
        match self {
            Statement::CreateLookupTable { .. } => Phase::CreateTables,
            Statement::CreateStaging { .. }
            | Statement::StageValue(_)
            | Statement::MergeStaging { .. }
            | Statement::TruncateStaging
            | Statement::DropStaging => Phase::SyncContents,
            Statement::AddForeignKey { .. } => Phase::AddForeignKeys,
        }
    }
}

/// Deterministic constraint name for a referencing column
pub fn foreign_key_name(table: &str, column: &str) -> String {
    format!("FK_{}_{}", table, column)
}

/// An ordered list of statements covering one synchronization run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncBatch {
    pub statements: Vec<Statement>,
}

impl SyncBatch {
    /// Lower a plan to statements.
    ///
    /// Table creation comes first, then content synchronization (one
    /// stage/merge/truncate cycle per lookup table through a single staging
    /// table), then foreign keys. The staging table is only created when
    /// there is at least one lookup table.
    pub fn from_plan(plan: &SynchronizationPlan, config: &LookupConfig) -> Self {
        let name_length = config.name_field_length;
        let mut statements = Vec::with_capacity(
            plan.lookups.len() * 4 + plan.value_count() + plan.references.len() + 2,
        );

        for lookup in &plan.lookups {
            statements.push(Statement::CreateLookupTable {
                table: config.table_name(&lookup.enum_name),
                id_type: lookup.numeric_type,
                name_length,
            });
        }

        if !plan.lookups.is_empty() {
            statements.push(Statement::CreateStaging { name_length });
            for lookup in &plan.lookups {
                statements.extend(lookup.values.iter().cloned().map(Statement::StageValue));
                statements.push(Statement::MergeStaging {
                    table: config.table_name(&lookup.enum_name),
                });
                statements.push(Statement::TruncateStaging);
            }
            statements.push(Statement::DropStaging);
        }

        for edge in &plan.references {
            statements.push(Statement::AddForeignKey {
                name: foreign_key_name(&edge.referencing_table, &edge.referencing_field),
                table: edge.referencing_table.clone(),
                column: edge.referencing_field.clone(),
                references: config.table_name(&edge.enum_name),
            });
        }

        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Number of statements in a phase
    pub fn phase_len(&self, phase: Phase) -> usize {
        self.statements.iter().filter(|s| s.phase() == phase).count()
    }
}

// ============================================================================
// Tests
// ============================================================================
