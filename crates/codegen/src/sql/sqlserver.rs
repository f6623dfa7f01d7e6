//! SQL Server dialect.
//!
//! Every statement is safe to replay: tables and constraints are guarded by
//! `OBJECT_ID` checks, and lookup contents are reconciled with `MERGE`
//! instead of being dropped and reloaded.

use super::render::{SqlDialect, ValueBinder};
use super::stmt::Statement;
use super::DbHandler;
use crate::LookupConfig;
use enumlookup_core::{NumericStorageType, SqlValue};

/// Name of the session-scoped staging table
pub const STAGING_TABLE: &str = "#lookups";

/// Extended property attached to every generated lookup table
const TABLE_DESCRIPTION: &str = "Automatically generated. Contents will be overwritten on every synchronization.";

/// Parameters SQL Server accepts in a single request
pub const MAX_REQUEST_PARAMETERS: usize = 2100;

/// Collation used to compare names, so case-only renames are applied
const NAME_COMPARE_COLLATION: &str = "Latin1_General_BIN2";

/// Handler for Microsoft SQL Server
#[derive(Debug, Clone, Default)]
pub struct SqlServerHandler {
    config: LookupConfig,
}

impl SqlServerHandler {
    pub fn new(config: LookupConfig) -> Self {
        Self { config }
    }

    fn numeric_type(id_type: NumericStorageType) -> &'static str {
        match id_type {
            NumericStorageType::Byte => "tinyint",
            NumericStorageType::Int => "int",
        }
    }

    /// `N'...'` literal
    fn unicode_literal(value: &str) -> String {
        format!("N'{}'", escape_string(value))
    }

    fn create_lookup_table(&self, table: &str, id_type: NumericStorageType, name_length: u32) -> String {
        let quoted = self.quote_ident(table);
        format!(
            "IF OBJECT_ID({object}, N'U') IS NULL\n\
             BEGIN\n\
             \x20   CREATE TABLE {quoted} (Id {id_type} PRIMARY KEY, Name nvarchar({name_length}));\n\
             \x20   EXEC sys.sp_addextendedproperty @name = N'MS_Description', @value = {description},\n\
             \x20       @level0type = N'SCHEMA', @level0name = N'dbo', @level1type = N'TABLE', @level1name = {table_literal};\n\
             END;",
            object = Self::unicode_literal(&quoted),
            id_type = Self::numeric_type(id_type),
            description = Self::unicode_literal(TABLE_DESCRIPTION),
            table_literal = Self::unicode_literal(table),
        )
    }

    fn merge_staging(&self, table: &str) -> String {
        format!(
            "MERGE INTO {target} dst\n\
             \x20   USING {STAGING_TABLE} src ON src.Id = dst.Id\n\
             \x20   WHEN MATCHED AND (dst.Name IS NULL OR src.Name COLLATE {NAME_COMPARE_COLLATION} <> dst.Name COLLATE {NAME_COMPARE_COLLATION}) THEN\n\
             \x20       UPDATE SET Name = src.Name\n\
             \x20   WHEN NOT MATCHED THEN\n\
             \x20       INSERT (Id, Name) VALUES (src.Id, src.Name)\n\
             \x20   WHEN NOT MATCHED BY SOURCE THEN\n\
             \x20       DELETE;",
            target = self.quote_ident(table),
        )
    }

    fn add_foreign_key(&self, name: &str, table: &str, column: &str, references: &str) -> String {
        let constraint = self.quote_ident(name);
        format!(
            "IF OBJECT_ID({object}, N'F') IS NULL\n\
             \x20   ALTER TABLE {table} ADD CONSTRAINT {constraint} FOREIGN KEY ({column}) REFERENCES {references} (Id);",
            object = Self::unicode_literal(&constraint),
            table = self.quote_ident(table),
            column = self.quote_ident(column),
            references = self.quote_ident(references),
        )
    }
}

/// Double embedded single quotes.
///
/// This is the only escaping applied to literals; it is enough for
/// `N'...'` literals and nothing else.
pub fn escape_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Bracket-quote an identifier, doubling embedded `]`
pub fn quote_ident(ident: &str) -> String {
    format!("[{}]", ident.replace(']', "]]"))
}

impl SqlDialect for SqlServerHandler {
    fn quote_ident(&self, ident: &str) -> String {
        quote_ident(ident)
    }

    fn literal(&self, value: &SqlValue) -> String {
        match value {
            SqlValue::Int(v) => v.to_string(),
            SqlValue::Text(s) => Self::unicode_literal(s),
        }
    }

    fn placeholder(&self, name: &str) -> String {
        format!("@{}", name)
    }

    fn render_statement(&self, statement: &Statement, values: &mut ValueBinder) -> String {
        match statement {
            Statement::CreateLookupTable {
                table,
                id_type,
                name_length,
            } => self.create_lookup_table(table, *id_type, *name_length),
            // A staging table left behind by an abandoned batch still holds rows
            Statement::CreateStaging { name_length } => format!(
                "IF OBJECT_ID('tempdb..{STAGING_TABLE}') IS NOT NULL\n\
                 \x20   DROP TABLE {STAGING_TABLE};\n\
                 CREATE TABLE {STAGING_TABLE} (Id int, Name nvarchar({name_length}) COLLATE database_default);"
            ),
            Statement::StageValue(value) => {
                let id = values.bind(self, "id", value.id);
                let name = values.bind(self, "name", value.name.as_str());
                format!("INSERT INTO {STAGING_TABLE} (Id, Name) VALUES ({id}, {name});")
            }
            Statement::MergeStaging { table } => self.merge_staging(table),
            Statement::TruncateStaging => format!("TRUNCATE TABLE {STAGING_TABLE};"),
            Statement::DropStaging => format!("DROP TABLE {STAGING_TABLE};"),
            Statement::AddForeignKey {
                name,
                table,
                column,
                references,
            } => self.add_foreign_key(name, table, column, references),
        }
    }
}

impl DbHandler for SqlServerHandler {
    fn name(&self) -> &'static str {
        "sqlserver"
    }

    fn config(&self) -> &LookupConfig {
        &self.config
    }

    fn max_parameters(&self) -> Option<usize> {
        Some(MAX_REQUEST_PARAMETERS)
    }
}

// ============================================================================
// Tests
// ============================================================================
