//! The host data model and the reflection capability over it
//!
//! `ModelReflector` is the narrow interface the synchronization engine
//! consumes: the entity sets exposed by the model (traversal roots) and a
//! way to resolve a type name to its definition. `DataModel` is the
//! declarative implementation loaded from model files; hosts with their own
//! metadata can implement the trait directly.

use crate::entity::{EntityDefinition, ValueObjectDefinition};
use crate::enumeration::EnumDefinition;
use enumlookup_core::Named;
use serde::{Deserialize, Serialize};

// ============================================================================
// ResolvedType
// ============================================================================

/// A type name resolved against the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedType<'a> {
    /// An enumerated type
    Enum(&'a EnumDefinition),
    /// A storage entity
    Entity(&'a EntityDefinition),
    /// A value object stored inline
    ValueObject(&'a ValueObjectDefinition),
}

impl<'a> ResolvedType<'a> {
    /// Name of the resolved type
    pub fn name(&self) -> &'a str {
        match *self {
            ResolvedType::Enum(e) => &e.name,
            ResolvedType::Entity(e) => &e.name,
            ResolvedType::ValueObject(v) => &v.name,
        }
    }

    /// Human-readable kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ResolvedType::Enum(_) => "enum",
            ResolvedType::Entity(_) => "entity",
            ResolvedType::ValueObject(_) => "value object",
        }
    }

    /// Get the enum definition, if this is an enum
    pub fn as_enum(&self) -> Option<&'a EnumDefinition> {
        match *self {
            ResolvedType::Enum(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// ModelReflector
// ============================================================================

/// Reflection capability over a host data model
pub trait ModelReflector {
    /// Names of the entity types exposed directly by the model
    fn entity_sets(&self) -> Vec<&str>;

    /// Resolve a type name
    fn resolve(&self, type_name: &str) -> Option<ResolvedType<'_>>;
}

// ============================================================================
// DataModel
// ============================================================================

/// Declarative description of a host data model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    /// Model name (e.g. the application's context type)
    pub name: String,

    /// Entity types exposed directly by the model
    #[serde(default)]
    pub entity_sets: Vec<String>,

    /// Entity definitions
    #[serde(default)]
    pub entities: Vec<EntityDefinition>,

    /// Value object definitions
    #[serde(default)]
    pub value_objects: Vec<ValueObjectDefinition>,

    /// Enum definitions
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
}

impl DataModel {
    /// Create a new, empty model
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add an entity and expose it as an entity set
    pub fn with_entity_set(mut self, entity: EntityDefinition) -> Self {
        self.entity_sets.push(entity.name.clone());
        self.entities.push(entity);
        self
    }

    /// Add an entity that is only reachable through navigation
    pub fn with_entity(mut self, entity: EntityDefinition) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add a value object
    pub fn with_value_object(mut self, value_object: ValueObjectDefinition) -> Self {
        self.value_objects.push(value_object);
        self
    }

    /// Add an enum
    pub fn with_enum(mut self, definition: EnumDefinition) -> Self {
        self.enums.push(definition);
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Get an enum by name
    pub fn enum_by_name(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.iter().find(|e| e.name() == name)
    }

    /// Get an entity by name
    pub fn entity_by_name(&self, name: &str) -> Option<&EntityDefinition> {
        self.entities.iter().find(|e| e.name() == name)
    }

    /// Get a value object by name
    pub fn value_object_by_name(&self, name: &str) -> Option<&ValueObjectDefinition> {
        self.value_objects.iter().find(|v| v.name() == name)
    }

    /// Total number of declared types
    pub fn type_count(&self) -> usize {
        self.entities.len() + self.value_objects.len() + self.enums.len()
    }
}

impl ModelReflector for DataModel {
    fn entity_sets(&self) -> Vec<&str> {
        self.entity_sets.iter().map(String::as_str).collect()
    }

    fn resolve(&self, type_name: &str) -> Option<ResolvedType<'_>> {
        if let Some(definition) = self.enum_by_name(type_name) {
            return Some(ResolvedType::Enum(definition));
        }
        if let Some(entity) = self.entity_by_name(type_name) {
            return Some(ResolvedType::Entity(entity));
        }
        self.value_object_by_name(type_name)
            .map(ResolvedType::ValueObject)
    }
}

// ============================================================================
// Tests
// ============================================================================
