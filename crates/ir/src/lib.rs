//! # Enum Lookup IR (Intermediate Representation)
//!
//! This crate provides the intermediate representation consumed and produced
//! by the lookup synchronization engine.
//!
//! ## Core Concepts
//!
//! - **EnumDefinition**: an enumerated type with its members and a metadata
//!   side-table (descriptions, runtime-only flags)
//! - **EntityDefinition**: a storage entity that maps to a table
//! - **ValueObjectDefinition**: a complex type stored inline in its owner's table
//! - **DataModel / ModelReflector**: the host model and the capability to walk it
//! - **SynchronizationPlan**: lookup tables plus foreign-key edges to reconcile
//!

// Module declarations
pub mod entity;
pub mod enumeration;
pub mod field;
pub mod model;
pub mod plan;
pub mod serialization;
pub mod validation;

// Re-export commonly used types at crate root
pub use entity::{EntityDefinition, ValueObjectDefinition};
pub use enumeration::{EnumDefinition, EnumMember, MemberMetadata};
pub use field::{FieldDefinition, FieldType};
pub use model::{DataModel, ModelReflector, ResolvedType};
pub use plan::{EnumValue, ForeignKeyEdge, LookupTable, SynchronizationPlan};
pub use serialization::{ModelFile, load_model, load_model_from_string};
pub use validation::{ValidationResult, ValidationRule, Validator};

// Re-export core types that are commonly used with IR
pub use enumlookup_core::{LookupError, LookupResult, NumericStorageType, UnderlyingType};

/// Current schema version for model files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================
