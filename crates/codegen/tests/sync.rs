mod support;

use enumlookup_codegen::sql::sqlserver::quote_ident;
use enumlookup_codegen::{
    DbHandler, EnumToLookup, LookupConfig, SqlServerHandler, Statement, SyncBatch, ValueMode,
};
use enumlookup_core::{ExecutorError, NumericStorageType, SqlParameter};
use enumlookup_ir::{EnumValue, ForeignKeyEdge, LookupTable, SynchronizationPlan};
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use support::{MergeStats, SimDatabase, parse_unicode_literal, rabbits};

fn color(values: &[(i32, &str)]) -> SynchronizationPlan {
    SynchronizationPlan::new(
        vec![LookupTable::new(
            "Color",
            NumericStorageType::Int,
            values.iter().map(|(id, name)| EnumValue::new(*id, *name)).collect(),
        )],
        vec![ForeignKeyEdge::new("Paint", "Color", "Color")],
    )
}

fn rows(values: &[(i32, &str)]) -> Vec<(i32, String)> {
    values.iter().map(|(id, name)| (*id, name.to_string())).collect()
}

// ============================================================================
// Content synchronization
// ============================================================================

#[test]
fn test_merge_inserts_updates_and_deletes() {
    let config = LookupConfig::default();
    let mut db = SimDatabase::new();

    db.sync(&color(&[(1, "Red"), (2, "Blue")]), &config).unwrap();
    assert_eq!(db.rows("Enum_Color"), rows(&[(1, "Red"), (2, "Blue")]));

    db.sync(&color(&[(1, "Red"), (3, "Green")]), &config).unwrap();
    assert_eq!(db.rows("Enum_Color"), rows(&[(1, "Red"), (3, "Green")]));
    assert_eq!(
        db.last_merge("Enum_Color"),
        Some(MergeStats {
            inserted: 1,
            updated: 0,
            deleted: 1,
        })
    );
}

#[test]
fn test_rename_keeps_id() {
    let config = LookupConfig::default();
    let mut db = SimDatabase::new();

    db.sync(&color(&[(1, "red")]), &config).unwrap();
    db.sync(&color(&[(1, "Red")]), &config).unwrap();

    assert_eq!(db.rows("Enum_Color"), rows(&[(1, "Red")]));
    assert_eq!(db.last_merge("Enum_Color").map(|s| s.updated), Some(1));
}

#[test]
fn test_removing_every_member_empties_the_table() {
    let config = LookupConfig::default();
    let mut db = SimDatabase::new();

    db.sync(&color(&[(1, "Red"), (2, "Blue")]), &config).unwrap();
    db.sync(&color(&[]), &config).unwrap();

    assert!(db.has_table("Enum_Color"));
    assert!(db.rows("Enum_Color").is_empty());
}

#[test]
fn test_staging_is_drained_between_lookups() {
    let plan = SynchronizationPlan::new(
        vec![
            LookupTable::new(
                "Color",
                NumericStorageType::Int,
                vec![EnumValue::new(1, "Red"), EnumValue::new(2, "Blue")],
            ),
            LookupTable::new("Shade", NumericStorageType::Byte, vec![EnumValue::new(1, "Light")]),
        ],
        Vec::new(),
    );
    let mut db = SimDatabase::new();
    db.sync(&plan, &LookupConfig::default()).unwrap();

    // Color rows must not leak into Shade
    assert_eq!(db.rows("Enum_Shade"), rows(&[(1, "Light")]));
    assert!(!db.staging_exists());
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_rerun_after_abandoned_batch() {
    let config = LookupConfig::default();
    let plan = SynchronizationPlan::new(
        vec![
            LookupTable::new("Color", NumericStorageType::Int, vec![EnumValue::new(1, "Red")]),
            LookupTable::new("Shade", NumericStorageType::Int, vec![EnumValue::new(10, "Light")]),
        ],
        Vec::new(),
    );
    let batch = SyncBatch::from_plan(&plan, &config);
    let shade_merge = batch
        .iter()
        .position(|s| *s == Statement::MergeStaging { table: "Enum_Shade".into() })
        .unwrap();

    // Cut off with Shade's row still staged
    let mut db = SimDatabase::new();
    db.execute_prefix(&batch, shade_merge).unwrap();
    assert!(db.staging_exists());

    db.execute(&batch).unwrap();
    assert_eq!(db.rows("Enum_Color"), rows(&[(1, "Red")]));
    assert_eq!(db.rows("Enum_Shade"), rows(&[(10, "Light")]));
    assert!(!db.staging_exists());
}

#[test]
fn test_replay_is_a_no_op() {
    let config = LookupConfig::default();
    let plan = color(&[(1, "Red"), (2, "Blue")]);
    let mut db = SimDatabase::new();

    db.sync(&plan, &config).unwrap();
    assert_eq!(db.tables_created, 1);
    assert_eq!(db.constraints_added, 1);

    db.sync(&plan, &config).unwrap();
    assert_eq!(db.tables_created, 1);
    assert_eq!(db.constraints_added, 1);
    assert_eq!(db.last_merge("Enum_Color"), Some(MergeStats::default()));
    assert_eq!(db.rows("Enum_Color"), rows(&[(1, "Red"), (2, "Blue")]));
}

#[test]
fn test_script_is_byte_identical_across_runs() {
    let sync = EnumToLookup::default();
    let first = sync.generate_migration_sql(&rabbits()).unwrap();
    let second = sync.generate_migration_sql(&rabbits()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Full pipeline
// ============================================================================

#[test]
fn test_rabbit_model_end_to_end() {
    let sync = EnumToLookup::default();
    let plan = sync.build_plan(&rabbits()).unwrap();
    let mut db = SimDatabase::new();
    db.sync(&plan, sync.config()).unwrap();

    assert_eq!(
        db.rows("Enum_Ears"),
        rows(&[(1, "Floppy"), (2, "Pointy"), (3, "Super Floppy")])
    );
    assert_eq!(db.id_type("Enum_Legs"), Some(NumericStorageType::Byte));
    assert_eq!(db.rows("Enum_Legs"), rows(&[(1, "Stubby"), (255, "Really Long")]));
    assert_eq!(db.rows("Enum_Relation"), rows(&[(1, "Kit"), (2, "Doe (mother)")]));

    let lineage = db.constraint("FK_Rabbit_Lineage").unwrap();
    assert_eq!(lineage.table, "Rabbit");
    assert_eq!(lineage.column, "Lineage");
    assert_eq!(lineage.references, "Enum_Pedigree");
    assert!(db.constraint("FK_Rabbit_SpeedyLegs").is_some());
    assert!(db.constraint("FK_Rabbit_Offspring").is_some());
    assert!(db.constraint("FK_Rabbit_TehEars").is_some());
}

#[test]
fn test_custom_table_names() {
    let config = LookupConfig::new().with_prefix("").with_suffix("Lookup");
    let sync = EnumToLookup::new(config);
    let plan = sync.build_plan(&rabbits()).unwrap();
    let mut db = SimDatabase::new();
    db.sync(&plan, sync.config()).unwrap();

    assert!(db.has_table("EarsLookup"));
    assert_eq!(
        db.constraint("FK_Rabbit_TehEars").map(|c| c.references.as_str()),
        Some("EarsLookup")
    );
}

// ============================================================================
// Rendered SQL
// ============================================================================

#[test]
fn test_migration_script_text() {
    let sql =
        SqlServerHandler::default().generate_migration_sql(&color(&[(1, "Red"), (2, "O'Brien")]));

    let expected = r#"IF OBJECT_ID(N'[Enum_Color]', N'U') IS NULL
BEGIN
    CREATE TABLE [Enum_Color] (Id int PRIMARY KEY, Name nvarchar(255));
    EXEC sys.sp_addextendedproperty @name = N'MS_Description', @value = N'Automatically generated. Contents will be overwritten on every synchronization.',
        @level0type = N'SCHEMA', @level0name = N'dbo', @level1type = N'TABLE', @level1name = N'Enum_Color';
END;

IF OBJECT_ID('tempdb..#lookups') IS NOT NULL
    DROP TABLE #lookups;
CREATE TABLE #lookups (Id int, Name nvarchar(255) COLLATE database_default);
INSERT INTO #lookups (Id, Name) VALUES (1, N'Red');
INSERT INTO #lookups (Id, Name) VALUES (2, N'O''Brien');
MERGE INTO [Enum_Color] dst
    USING #lookups src ON src.Id = dst.Id
    WHEN MATCHED AND (dst.Name IS NULL OR src.Name COLLATE Latin1_General_BIN2 <> dst.Name COLLATE Latin1_General_BIN2) THEN
        UPDATE SET Name = src.Name
    WHEN NOT MATCHED THEN
        INSERT (Id, Name) VALUES (src.Id, src.Name)
    WHEN NOT MATCHED BY SOURCE THEN
        DELETE;
TRUNCATE TABLE #lookups;
DROP TABLE #lookups;

IF OBJECT_ID(N'[FK_Paint_Color]', N'F') IS NULL
    ALTER TABLE [Paint] ADD CONSTRAINT [FK_Paint_Color] FOREIGN KEY ([Color]) REFERENCES [Enum_Color] (Id);
"#;
    assert_eq!(sql, expected);
}

#[test]
fn test_quoted_literal_round_trips() {
    let sql = EnumToLookup::default()
        .generate_migration_sql(&rabbits())
        .unwrap();

    let line = sql
        .lines()
        .find(|l| l.starts_with("INSERT INTO #lookups") && l.contains("Brien"))
        .unwrap();
    assert_eq!(line, "INSERT INTO #lookups (Id, Name) VALUES (2, N'O''Brien''s Pure Line');");

    let literal = &line[line.find("N'").unwrap()..];
    let (value, rest) = parse_unicode_literal(literal).unwrap();
    assert_eq!(value, "O'Brien's Pure Line");
    assert_eq!(rest, ");");
}

#[test]
fn test_parameter_names_are_unique_across_the_batch() {
    let sync = EnumToLookup::default();
    let plan = sync.build_plan(&rabbits()).unwrap();
    let rendered = sync.handler().build_sql(&plan, ValueMode::Parameters);

    assert_eq!(rendered.params.len(), plan.value_count() * 2);
    let names: HashSet<&str> = rendered.params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.len(), rendered.params.len());
    for param in &rendered.params {
        let placeholder = format!("@{}", param.name);
        assert!(
            rendered.sql.contains(&format!("{},", placeholder))
                || rendered.sql.contains(&format!("{})", placeholder))
        );
    }
}

#[test]
fn test_apply_hands_the_parameterized_batch_to_the_executor() {
    let sync = EnumToLookup::default();
    let plan = sync.build_plan(&rabbits()).unwrap();
    let expected = sync.handler().build_sql(&plan, ValueMode::Parameters);

    let mut received = Vec::new();
    let mut executor = |sql: &str, params: &[SqlParameter]| -> Result<(), ExecutorError> {
        received.push((sql.to_string(), params.to_vec()));
        Ok(())
    };
    sync.apply(&rabbits(), &mut executor).unwrap();

    assert_eq!(received, vec![(expected.sql, expected.params)]);
}

#[test]
fn test_odd_identifiers_are_bracket_quoted() {
    let plan = SynchronizationPlan::new(
        vec![LookupTable::new("Odd]Name", NumericStorageType::Int, Vec::new())],
        vec![ForeignKeyEdge::new("My Table", "Col", "Odd]Name")],
    );
    let sql = SqlServerHandler::default().generate_migration_sql(&plan);

    assert!(sql.contains(&format!("CREATE TABLE {} ", quote_ident("Enum_Odd]Name"))));
    assert!(sql.contains("CREATE TABLE [Enum_Odd]]Name] "));
    assert!(sql.contains("ALTER TABLE [My Table] ADD CONSTRAINT [FK_My Table_Col]"));
}
