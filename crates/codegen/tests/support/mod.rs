//! In-memory model of the SQL Server objects a sync batch touches.
//!
//! Executes [`Statement`] fragments with the semantics the rendered SQL
//! has on a real server: `OBJECT_ID` guards, a session staging table and a
//! three-way `MERGE` with a binary name comparison.

#![allow(dead_code)]

use enumlookup_codegen::{LookupConfig, Statement, SyncBatch};
use enumlookup_core::NumericStorageType;
use enumlookup_ir::{
    DataModel, EntityDefinition, EnumDefinition, FieldDefinition, FieldType, SynchronizationPlan,
};
use std::collections::{BTreeMap, BTreeSet};

/// Row counts touched by one MERGE
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub table: String,
    pub column: String,
    pub references: String,
}

#[derive(Debug, Default)]
pub struct SimDatabase {
    tables: BTreeMap<String, (NumericStorageType, BTreeMap<i32, String>)>,
    constraints: BTreeMap<String, Constraint>,
    staging: Option<Vec<(i32, String)>>,

    /// Number of CREATE TABLE statements that actually ran
    pub tables_created: usize,
    /// Number of ALTER TABLE ... ADD CONSTRAINT statements that actually ran
    pub constraints_added: usize,
    /// Every MERGE, in execution order
    pub merges: Vec<(String, MergeStats)>,
}

impl SimDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower and execute a plan
    pub fn sync(&mut self, plan: &SynchronizationPlan, config: &LookupConfig) -> Result<(), String> {
        self.execute(&SyncBatch::from_plan(plan, config))
    }

    /// Execute the first `count` statements of a batch, as if the session
    /// was cut off there
    pub fn execute_prefix(&mut self, batch: &SyncBatch, count: usize) -> Result<(), String> {
        for statement in batch.iter().take(count) {
            self.run(statement)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, batch: &SyncBatch) -> Result<(), String> {
        for statement in batch.iter() {
            self.run(statement)?;
        }
        Ok(())
    }

    fn run(&mut self, statement: &Statement) -> Result<(), String> {
        match statement {
            Statement::CreateLookupTable { table, id_type, .. } => {
                if !self.tables.contains_key(table) {
                    self.tables
                        .insert(table.clone(), (*id_type, BTreeMap::new()));
                    self.tables_created += 1;
                }
            }
            Statement::CreateStaging { .. } => {
                self.staging = Some(Vec::new());
            }
            Statement::StageValue(value) => {
                let staging = self.staging.as_mut().ok_or("Invalid object name '#lookups'")?;
                staging.push((value.id, value.name.clone()));
            }
            Statement::MergeStaging { table } => {
                let staged = self
                    .staging
                    .as_ref()
                    .ok_or("Invalid object name '#lookups'")?
                    .clone();
                let (id_type, rows) = self
                    .tables
                    .get_mut(table)
                    .ok_or_else(|| format!("Invalid object name '{}'", table))?;

                let mut stats = MergeStats::default();
                let mut seen = BTreeSet::new();
                for (id, name) in &staged {
                    if !seen.insert(*id) {
                        return Err(format!(
                            "The MERGE statement attempted to UPDATE or DELETE the same row more than once (Id {})",
                            id
                        ));
                    }
                    if *id_type == NumericStorageType::Byte && !(0..=255).contains(id) {
                        return Err(format!("Arithmetic overflow converting {} to tinyint", id));
                    }
                    match rows.get_mut(id) {
                        Some(existing) if existing != name => {
                            *existing = name.clone();
                            stats.updated += 1;
                        }
                        Some(_) => {}
                        None => {
                            rows.insert(*id, name.clone());
                            stats.inserted += 1;
                        }
                    }
                }
                let before = rows.len();
                rows.retain(|id, _| seen.contains(id));
                stats.deleted = before - rows.len();

                self.merges.push((table.clone(), stats));
            }
            Statement::TruncateStaging => {
                self.staging
                    .as_mut()
                    .ok_or("Invalid object name '#lookups'")?
                    .clear();
            }
            Statement::DropStaging => {
                self.staging
                    .take()
                    .ok_or("Cannot drop the table '#lookups'")?;
            }
            Statement::AddForeignKey {
                name,
                table,
                column,
                references,
            } => {
                if !self.constraints.contains_key(name) {
                    if !self.tables.contains_key(references) {
                        return Err(format!(
                            "Foreign key '{}' references invalid table '{}'",
                            name, references
                        ));
                    }
                    self.constraints.insert(
                        name.clone(),
                        Constraint {
                            table: table.clone(),
                            column: column.clone(),
                            references: references.clone(),
                        },
                    );
                    self.constraints_added += 1;
                }
            }
        }
        Ok(())
    }

    pub fn rows(&self, table: &str) -> Vec<(i32, String)> {
        self.tables
            .get(table)
            .map(|(_, rows)| rows.iter().map(|(id, name)| (*id, name.clone())).collect())
            .unwrap_or_default()
    }

    pub fn id_type(&self, table: &str) -> Option<NumericStorageType> {
        self.tables.get(table).map(|(id_type, _)| *id_type)
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    pub fn staging_exists(&self) -> bool {
        self.staging.is_some()
    }

    /// Stats of the last MERGE into `table`
    pub fn last_merge(&self, table: &str) -> Option<MergeStats> {
        self.merges
            .iter()
            .rev()
            .find(|(t, _)| t == table)
            .map(|(_, stats)| *stats)
    }
}

/// Parse one `N'...'` literal at the start of `sql`, returning the value
/// and the remaining text
pub fn parse_unicode_literal(sql: &str) -> Option<(String, &str)> {
    let body = sql.strip_prefix("N'")?;
    let mut value = String::new();
    let mut chars = body.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\'' {
            if let Some((_, '\'')) = chars.peek() {
                value.push('\'');
                chars.next();
            } else {
                return Some((value, &body[i + 1..]));
            }
        } else {
            value.push(c);
        }
    }
    None
}

/// The rabbit model used across the integration tests
pub fn rabbits() -> DataModel {
    DataModel::new("RabbitContext")
        .with_entity_set(
            EntityDefinition::new("Rabbit")
                .with_field(FieldDefinition::new("Id", FieldType::scalar("int")))
                .with_field(FieldDefinition::new("Name", FieldType::scalar("string")))
                .with_field(FieldDefinition::new("TehEars", FieldType::named("Ears")))
                .with_field(FieldDefinition::new(
                    "SpeedyLegs",
                    FieldType::optional(FieldType::named("Legs")),
                ))
                .with_field(FieldDefinition::new(
                    "Offspring",
                    FieldType::optional(FieldType::named("Relation")),
                ))
                .with_field(
                    FieldDefinition::new("Pedigree", FieldType::named("Pedigree"))
                        .with_column("Lineage"),
                ),
        )
        .with_enum(
            EnumDefinition::new("Ears")
                .with_member("Unknown", 0)
                .with_member("Floppy", 1)
                .with_member("Pointy", 2)
                .with_member("SuperFloppy", 3)
                .with_runtime_only("Unknown"),
        )
        .with_enum(
            EnumDefinition::new("Legs")
                .with_underlying(enumlookup_core::UnderlyingType::U8)
                .with_member("Stubby", 1)
                .with_member("ReallyLong", 255),
        )
        .with_enum(
            EnumDefinition::new("Relation")
                .with_member("Kit", 1)
                .with_member("Doe", 2)
                .with_description("Doe", "Doe (mother)"),
        )
        .with_enum(
            EnumDefinition::new("Pedigree")
                .with_member("Mixed", 1)
                .with_member("Pure", 2)
                .with_description("Pure", "O'Brien's Pure Line"),
        )
}
