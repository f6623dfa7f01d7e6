//! # Lookup Model Builder
//!
//! Assembles discovered enum types and foreign-key edges into a
//! [`SynchronizationPlan`]. Knows nothing about SQL.

use crate::discover::Discovery;
use crate::introspect::EnumParser;
use enumlookup_core::{LookupError, LookupResult, Validatable};
use enumlookup_ir::{ForeignKeyEdge, LookupTable, ModelReflector, SynchronizationPlan};
use std::collections::BTreeSet;

/// Builds synchronization plans
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupModelBuilder {
    parser: EnumParser,
}

impl LookupModelBuilder {
    pub fn new(parser: EnumParser) -> Self {
        Self { parser }
    }

    /// Build a plan from a discovery result
    pub fn build_from_discovery(
        &self,
        model: &dyn ModelReflector,
        discovery: &Discovery,
    ) -> LookupResult<SynchronizationPlan> {
        self.build(model, &discovery.enum_types, &discovery.edges)
    }

    /// Build a plan.
    ///
    /// One lookup table is produced for every enum in `enum_types` and
    /// every enum named by an edge, sorted by enum name. Edges keep their
    /// order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a name does not resolve to an enum or the enum
    /// definition is inconsistent (duplicate identifiers or persisted
    /// values, metadata for unknown members), `IdOutOfRange` if a member
    /// value does not fit.
    pub fn build(
        &self,
        model: &dyn ModelReflector,
        enum_types: &BTreeSet<String>,
        edges: &[ForeignKeyEdge],
    ) -> LookupResult<SynchronizationPlan> {
        let names: BTreeSet<&str> = enum_types
            .iter()
            .map(String::as_str)
            .chain(edges.iter().map(|e| e.enum_name.as_str()))
            .collect();

        let mut lookups = Vec::with_capacity(names.len());
        for name in names {
            let resolved = model.resolve(name).ok_or_else(|| {
                LookupError::invalid_argument(format!(
                    "Lookup type '{}' is not declared in the model",
                    name
                ))
            })?;
            let values = self.parser.lookup_values(resolved)?;
            let definition = resolved.as_enum().ok_or_else(|| {
                LookupError::internal(format!("'{}' introspected but is not an enum", name))
            })?;
            definition.validate().map_err(|e| match e {
                LookupError::Validation(message) => LookupError::InvalidArgument(message),
                other => other,
            })?;
            let numeric_type = definition.underlying.storage_type();

            tracing::debug!(
                "Lookup '{}': {} value(s), {:?} ids",
                name,
                values.len(),
                numeric_type
            );
            lookups.push(LookupTable::new(name, numeric_type, values));
        }

        let plan = SynchronizationPlan::new(lookups, edges.to_vec());
        plan.validate()?;
        Ok(plan)
    }
}

// ============================================================================
// Tests
// ============================================================================
