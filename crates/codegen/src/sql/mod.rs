//! # SQL Generation
//!
//! Lowers a [`SynchronizationPlan`] to statement fragments ([`stmt`]),
//! renders them through a dialect ([`render`]), and either hands the
//! result to an executor or returns it as a migration script.
//!
//! The generated batch has three phases, each safe to replay:
//!
//! 1. create missing lookup tables
//! 2. reconcile every lookup table with its enum through a staging table
//! 3. add missing foreign keys

pub mod render;
pub mod sqlserver;
pub mod stmt;

pub use render::{ParamCounter, RenderedSql, SqlDialect, ValueBinder, ValueMode};
pub use sqlserver::SqlServerHandler;
pub use stmt::{Phase, Statement, SyncBatch, foreign_key_name};

use crate::LookupConfig;
use enumlookup_core::{LookupError, LookupResult, SqlExecutor};
use enumlookup_ir::SynchronizationPlan;

/// A database engine the plan can be applied to
pub trait DbHandler: SqlDialect {
    /// Short engine name, used in logs
    fn name(&self) -> &'static str;

    /// Naming and column settings
    fn config(&self) -> &LookupConfig;

    /// Most parameters the engine accepts in one request, if it has a limit
    fn max_parameters(&self) -> Option<usize> {
        None
    }

    /// Render the full batch for a plan
    fn build_sql(&self, plan: &SynchronizationPlan, mode: ValueMode) -> RenderedSql {
        let batch = SyncBatch::from_plan(plan, self.config());
        tracing::debug!(
            "Rendering {} statement(s) for {} ({:?})",
            batch.len(),
            self.name(),
            mode
        );
        self.render_batch(&batch, mode)
    }

    /// Run the parameterized batch through an executor.
    ///
    /// The whole plan goes out as one batch. Executor failures are returned
    /// as [`LookupError::Execution`] with the original error as source; an
    /// empty plan does not call the executor.
    ///
    /// Every lookup row is bound as two parameters (`Id` and `Name`), and
    /// the batch is not split. SQL Server accepts at most 2100 parameters
    /// per request, so a plan with more than 1050 rows is rejected by the
    /// server; use [`generate_migration_sql`](Self::generate_migration_sql)
    /// for models that large.
    fn apply(&self, plan: &SynchronizationPlan, executor: &mut dyn SqlExecutor) -> LookupResult<()> {
        if plan.is_empty() {
            tracing::info!("Nothing to synchronize");
            return Ok(());
        }

        let rendered = self.build_sql(plan, ValueMode::Parameters);
        tracing::info!(
            "Applying {} lookup table(s), {} foreign key(s) with {} parameter(s)",
            plan.lookups.len(),
            plan.references.len(),
            rendered.params.len()
        );
        if let Some(max) = self.max_parameters() {
            if rendered.params.len() > max {
                tracing::warn!(
                    "Batch binds {} parameters, {} accepts at most {}",
                    rendered.params.len(),
                    self.name(),
                    max
                );
            }
        }
        executor
            .run(&rendered.sql, &rendered.params)
            .map_err(LookupError::Execution)
    }

    /// The same batch with values inlined, for review or a migration file
    fn generate_migration_sql(&self, plan: &SynchronizationPlan) -> String {
        self.build_sql(plan, ValueMode::Literals).sql
    }
}

// ============================================================================
// Tests
// ============================================================================
