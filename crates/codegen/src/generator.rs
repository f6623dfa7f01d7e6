//! # Synchronization Orchestrator
//!
//! `EnumToLookup` is the top-level entry point. It walks a model, builds the
//! synchronization plan and hands it to a [`DbHandler`].
//!
//! ## Pipeline
//!
//! ```text
//! ModelReflector
//!         │
//!         ▼
//!   ReferenceDiscoverer::discover()   → enum types + edges (+ skipped fields)
//!         │
//!         ▼
//!   LookupModelBuilder::build()       → SynchronizationPlan
//!         │
//!         ├──► DbHandler::apply()                   → executor
//!         └──► DbHandler::generate_migration_sql()  → String
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use enumlookup_codegen::{EnumToLookup, LookupConfig};
//! use enumlookup_ir::load_model;
//!
//! let model = load_model("rabbits.json")?;
//! let sync = EnumToLookup::new(LookupConfig::default());
//!
//! let script = sync.generate_migration_sql(&model)?;
//! std::fs::write("sync_enum_lookups.sql", script)?;
//! ```

use enumlookup_core::{LookupResult, SqlExecutor, Validatable};
use enumlookup_ir::{ModelReflector, SynchronizationPlan};

use crate::LookupConfig;
use crate::builder::LookupModelBuilder;
use crate::discover::{Discovery, ReferenceDiscoverer};
use crate::sql::{DbHandler, SqlServerHandler};

// ============================================================================
// EnumToLookup
// ============================================================================

/// Keeps lookup tables in sync with the enums a model stores.
///
/// Stateless apart from its handler; every call rebuilds the plan from the
/// model.
pub struct EnumToLookup {
    handler: Box<dyn DbHandler>,
}

impl EnumToLookup {
    // ====================================================================
    // Construction
    // ====================================================================

    /// SQL Server synchronization with the given settings
    pub fn new(config: LookupConfig) -> Self {
        Self::with_handler(SqlServerHandler::new(config))
    }

    /// Synchronization through a custom handler
    pub fn with_handler(handler: impl DbHandler + 'static) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }

    pub fn handler(&self) -> &dyn DbHandler {
        self.handler.as_ref()
    }

    pub fn config(&self) -> &LookupConfig {
        self.handler.config()
    }

    // ====================================================================
    // Planning
    // ====================================================================

    /// Walk the model without building lookup rows
    pub fn discover(&self, model: &dyn ModelReflector) -> Discovery {
        ReferenceDiscoverer::new(model).discover()
    }

    /// Build the synchronization plan for a model.
    ///
    /// # Errors
    ///
    /// Invalid configuration, or an enum that cannot be introspected.
    /// Fields that cannot be classified are skipped and logged, not
    /// reported as errors.
    pub fn build_plan(&self, model: &dyn ModelReflector) -> LookupResult<SynchronizationPlan> {
        self.config().validate()?;
        let discovery = self.discover(model);
        self.plan_discovery(model, &discovery)
    }

    /// Build the plan from an earlier [`discover`](Self::discover) of the
    /// same model, without walking it again
    pub fn plan_discovery(
        &self,
        model: &dyn ModelReflector,
        discovery: &Discovery,
    ) -> LookupResult<SynchronizationPlan> {
        self.config().validate()?;
        if discovery.has_skipped() {
            tracing::warn!(
                "{} field(s) skipped during discovery",
                discovery.skipped.len()
            );
        }

        let builder = LookupModelBuilder::new(self.config().enum_parser());
        let plan = builder.build_from_discovery(model, discovery)?;

        tracing::info!(
            "Planned {} lookup table(s) with {} value(s) and {} foreign key(s)",
            plan.lookups.len(),
            plan.value_count(),
            plan.references.len()
        );
        Ok(plan)
    }

    // ====================================================================
    // Synchronization
    // ====================================================================

    /// Synchronize the database through an executor
    pub fn apply(
        &self,
        model: &dyn ModelReflector,
        executor: &mut dyn SqlExecutor,
    ) -> LookupResult<()> {
        let plan = self.build_plan(model)?;
        self.handler.apply(&plan, executor)
    }

    /// Migration script for the model, with values inlined
    pub fn generate_migration_sql(&self, model: &dyn ModelReflector) -> LookupResult<String> {
        let plan = self.build_plan(model)?;
        Ok(self.handler.generate_migration_sql(&plan))
    }
}

impl Default for EnumToLookup {
    fn default() -> Self {
        Self::new(LookupConfig::default())
    }
}

impl std::fmt::Debug for EnumToLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumToLookup")
            .field("handler", &self.handler.name())
            .field("config", self.config())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
