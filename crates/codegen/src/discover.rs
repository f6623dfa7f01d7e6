//! # Reference Discovery
//!
//! Walks a host data model and finds every storage field whose type is an
//! enum.
//!
//! Traversal starts at the model's entity sets and follows navigation
//! fields (single, optional and collection-valued) to reach further
//! entities. Each entity is visited once, so cyclic entity graphs
//! terminate. Value objects are stored inline in their owner's table: an
//! enum inside a value object reached through field `Home` lands in column
//! `Home_<column>` of the owning table.
//!
//! Fields that cannot be classified are skipped with a
//! [`LookupError::DiscoveryIncomplete`] diagnostic; discovery itself never
//! fails.

use enumlookup_core::LookupError;
use enumlookup_ir::{
    EntityDefinition, FieldDefinition, FieldType, ForeignKeyEdge, ModelReflector, ResolvedType,
};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

// ============================================================================
// Discovery
// ============================================================================

/// Result of walking a model
#[derive(Debug, Default)]
pub struct Discovery {
    /// Distinct enum types stored by at least one field
    pub enum_types: BTreeSet<String>,

    /// Foreign-key edges, in discovery order
    pub edges: Vec<ForeignKeyEdge>,

    /// Fields that were skipped, as `DiscoveryIncomplete` errors
    pub skipped: Vec<LookupError>,
}

impl Discovery {
    /// Check if no enum-backed field was found
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check if any field was skipped
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

// ============================================================================
// ReferenceDiscoverer
// ============================================================================

/// Finds enum references in a model
#[derive(Clone, Copy)]
pub struct ReferenceDiscoverer<'a> {
    model: &'a dyn ModelReflector,
}

impl<'a> ReferenceDiscoverer<'a> {
    pub fn new(model: &'a dyn ModelReflector) -> Self {
        Self { model }
    }

    /// Walk the model from its entity sets
    pub fn discover(&self) -> Discovery {
        let model = self.model;
        let mut walk = Walk {
            model,
            visited: HashSet::new(),
            queue: VecDeque::new(),
            columns: HashMap::new(),
            discovery: Discovery::default(),
        };

        for set in model.entity_sets() {
            match model.resolve(set) {
                Some(ResolvedType::Entity(entity)) => walk.enqueue(entity),
                Some(other) => {
                    tracing::warn!(
                        "Entity set '{}' resolves to an {}, not an entity; ignoring it",
                        set,
                        other.kind()
                    );
                }
                None => {
                    tracing::warn!("Entity set '{}' is not declared in the model", set);
                }
            }
        }

        while let Some(entity) = walk.queue.pop_front() {
            walk.visit_entity(entity);
        }

        tracing::debug!(
            "Discovered {} enum type(s) across {} field(s) in {} entity type(s)",
            walk.discovery.enum_types.len(),
            walk.discovery.edges.len(),
            walk.visited.len()
        );

        walk.discovery
    }
}

impl std::fmt::Debug for ReferenceDiscoverer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceDiscoverer").finish_non_exhaustive()
    }
}

// ============================================================================
// Walk state
// ============================================================================

struct Walk<'a> {
    model: &'a dyn ModelReflector,
    visited: HashSet<&'a str>,
    queue: VecDeque<&'a EntityDefinition>,
    /// `(table, column)` → enum already recorded for that column
    columns: HashMap<(String, String), String>,
    discovery: Discovery,
}

/// Where a field is stored
struct Owner<'a> {
    entity: &'a str,
    table: &'a str,
    prefix: String,
}

impl<'a> Walk<'a> {
    fn enqueue(&mut self, entity: &'a EntityDefinition) {
        if self.visited.insert(entity.name.as_str()) {
            self.queue.push_back(entity);
        }
    }

    fn visit_entity(&mut self, entity: &'a EntityDefinition) {
        tracing::debug!("Visiting entity '{}' (table '{}')", entity.name, entity.table_name());
        let owner = Owner {
            entity: &entity.name,
            table: entity.table_name(),
            prefix: String::new(),
        };
        let mut inline = Vec::new();
        for field in &entity.fields {
            self.visit_field(&owner, field, &mut inline);
        }
    }

    /// `inline` holds the value objects currently being expanded
    fn visit_field(
        &mut self,
        owner: &Owner<'a>,
        field: &'a FieldDefinition,
        inline: &mut Vec<&'a str>,
    ) {
        let column = format!("{}{}", owner.prefix, field.column_name());
        match &field.field_type {
            FieldType::Scalar(_) => {}
            FieldType::Named(name) => self.visit_named(owner, &column, name, inline),
            FieldType::Optional(inner) => match inner.as_ref() {
                FieldType::Scalar(_) => {}
                FieldType::Named(name) => self.visit_named(owner, &column, name, inline),
                other => self.skip(
                    owner,
                    &column,
                    format!("unsupported wrapper around '{}'", other),
                ),
            },
            FieldType::Collection(inner) => match inner.as_ref() {
                FieldType::Scalar(_) => {}
                FieldType::Named(name) => self.visit_collection(owner, &column, name),
                other => self.skip(
                    owner,
                    &column,
                    format!("unsupported collection of '{}'", other),
                ),
            },
        }
    }

    fn visit_named(
        &mut self,
        owner: &Owner<'a>,
        column: &str,
        type_name: &str,
        inline: &mut Vec<&'a str>,
    ) {
        let model = self.model;
        match model.resolve(type_name) {
            Some(ResolvedType::Enum(definition)) => {
                self.add_edge(owner, column, &definition.name);
            }
            Some(ResolvedType::Entity(entity)) => self.enqueue(entity),
            Some(ResolvedType::ValueObject(value_object)) => {
                if inline.contains(&value_object.name.as_str()) {
                    self.skip(
                        owner,
                        column,
                        format!("value object '{}' contains itself", value_object.name),
                    );
                    return;
                }
                inline.push(&value_object.name);
                let nested = Owner {
                    entity: owner.entity,
                    table: owner.table,
                    prefix: format!("{}_", column),
                };
                for field in &value_object.fields {
                    self.visit_field(&nested, field, inline);
                }
                inline.pop();
            }
            None => self.skip(
                owner,
                column,
                format!("type '{}' is not declared in the model", type_name),
            ),
        }
    }

    fn visit_collection(&mut self, owner: &Owner<'a>, column: &str, type_name: &str) {
        let model = self.model;
        match model.resolve(type_name) {
            Some(ResolvedType::Entity(entity)) => self.enqueue(entity),
            Some(ResolvedType::Enum(definition)) => self.skip(
                owner,
                column,
                format!(
                    "collection of '{}' values has no single column to reference a lookup table",
                    definition.name
                ),
            ),
            Some(ResolvedType::ValueObject(value_object)) => self.skip(
                owner,
                column,
                format!(
                    "collection of value object '{}' is not stored in the owning table",
                    value_object.name
                ),
            ),
            None => self.skip(
                owner,
                column,
                format!("type '{}' is not declared in the model", type_name),
            ),
        }
    }

    fn add_edge(&mut self, owner: &Owner<'a>, column: &str, enum_name: &str) {
        let key = (owner.table.to_string(), column.to_string());
        if let Some(existing) = self.columns.get(&key) {
            if existing != enum_name {
                let reason = format!(
                    "column '{}.{}' already references '{}'",
                    owner.table, column, existing
                );
                self.skip(owner, column, reason);
            }
            return;
        }

        tracing::debug!("Field '{}.{}' stores enum '{}'", owner.table, column, enum_name);
        self.columns.insert(key, enum_name.to_string());
        self.discovery.enum_types.insert(enum_name.to_string());
        self.discovery
            .edges
            .push(ForeignKeyEdge::new(owner.table, column, enum_name));
    }

    fn skip(&mut self, owner: &Owner<'a>, column: &str, reason: String) {
        let diagnostic = LookupError::discovery(owner.entity, column, reason);
        tracing::warn!("{}", diagnostic);
        self.discovery.skipped.push(diagnostic);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use enumlookup_ir::{DataModel, EnumDefinition, ValueObjectDefinition};
    use pretty_assertions::assert_eq;

    fn rabbits() -> DataModel {
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
            .with_enum(EnumDefinition::new("Ears").with_member("Floppy", 1))
            .with_enum(EnumDefinition::new("Legs").with_member("Short", 1))
            .with_enum(EnumDefinition::new("Relation").with_member("Kit", 1))
            .with_enum(EnumDefinition::new("Pedigree").with_member("Pure", 1))
            .with_enum(EnumDefinition::new("Unused").with_member("Nothing", 1))
    }

    fn discover(model: &DataModel) -> Discovery {
        ReferenceDiscoverer::new(model).discover()
    }

    #[test]
    fn test_discovers_direct_and_optional_enum_fields() {
        let discovery = discover(&rabbits());

        assert_eq!(
            discovery.edges,
            vec![
                ForeignKeyEdge::new("Rabbit", "TehEars", "Ears"),
                ForeignKeyEdge::new("Rabbit", "SpeedyLegs", "Legs"),
                ForeignKeyEdge::new("Rabbit", "Offspring", "Relation"),
                ForeignKeyEdge::new("Rabbit", "Lineage", "Pedigree"),
            ]
        );
        assert_eq!(
            discovery.enum_types.iter().collect::<Vec<_>>(),
            vec!["Ears", "Legs", "Pedigree", "Relation"]
        );
        assert!(!discovery.has_skipped());
    }

    #[test]
    fn test_unreferenced_enums_are_not_discovered() {
        let discovery = discover(&rabbits());
        assert!(!discovery.enum_types.contains("Unused"));
    }

    #[test]
    fn test_follows_navigation_and_survives_cycles() {
        let model = DataModel::new("Farm")
            .with_entity_set(
                EntityDefinition::new("Warren")
                    .with_table("Warrens")
                    .with_field(FieldDefinition::new(
                        "Rabbits",
                        FieldType::collection(FieldType::named("Rabbit")),
                    )),
            )
            .with_entity(
                EntityDefinition::new("Rabbit")
                    .with_field(FieldDefinition::new("Home", FieldType::named("Warren")))
                    .with_field(FieldDefinition::new(
                        "Mother",
                        FieldType::optional(FieldType::named("Rabbit")),
                    ))
                    .with_field(FieldDefinition::new("TehEars", FieldType::named("Ears"))),
            )
            .with_enum(EnumDefinition::new("Ears").with_member("Floppy", 1));

        let discovery = discover(&model);
        assert_eq!(
            discovery.edges,
            vec![ForeignKeyEdge::new("Rabbit", "TehEars", "Ears")]
        );
    }

    #[test]
    fn test_value_object_columns_are_prefixed() {
        let model = DataModel::new("Farm")
            .with_entity_set(
                EntityDefinition::new("Rabbit")
                    .with_field(FieldDefinition::new("Burrow", FieldType::named("Burrow"))),
            )
            .with_value_object(
                ValueObjectDefinition::new("Burrow")
                    .with_field(FieldDefinition::new("Soil", FieldType::named("Soil")))
                    .with_field(FieldDefinition::new("Entrance", FieldType::named("Entrance"))),
            )
            .with_value_object(ValueObjectDefinition::new("Entrance").with_field(
                FieldDefinition::new("Facing", FieldType::optional(FieldType::named("Compass")))
                    .with_column("Dir"),
            ))
            .with_enum(EnumDefinition::new("Soil").with_member("Clay", 1))
            .with_enum(EnumDefinition::new("Compass").with_member("North", 1));

        let discovery = discover(&model);
        assert_eq!(
            discovery.edges,
            vec![
                ForeignKeyEdge::new("Rabbit", "Burrow_Soil", "Soil"),
                ForeignKeyEdge::new("Rabbit", "Burrow_Entrance_Dir", "Compass"),
            ]
        );
    }

    #[test]
    fn test_self_containing_value_object_is_skipped() {
        let model = DataModel::new("Farm")
            .with_entity_set(
                EntityDefinition::new("Rabbit")
                    .with_field(FieldDefinition::new("Tree", FieldType::named("Tree"))),
            )
            .with_value_object(
                ValueObjectDefinition::new("Tree")
                    .with_field(FieldDefinition::new("Kind", FieldType::named("Kind")))
                    .with_field(FieldDefinition::new("Child", FieldType::named("Tree"))),
            )
            .with_enum(EnumDefinition::new("Kind").with_member("Oak", 1));

        let discovery = discover(&model);
        assert_eq!(
            discovery.edges,
            vec![ForeignKeyEdge::new("Rabbit", "Tree_Kind", "Kind")]
        );
        assert_eq!(discovery.skipped.len(), 1);
        assert!(
            discovery.skipped[0]
                .to_string()
                .contains("value object 'Tree' contains itself")
        );
    }

    #[test]
    fn test_unclassifiable_fields_are_skipped() {
        let model = DataModel::new("Farm")
            .with_entity_set(
                EntityDefinition::new("Rabbit")
                    .with_field(FieldDefinition::new(
                        "Moods",
                        FieldType::collection(FieldType::named("Ears")),
                    ))
                    .with_field(FieldDefinition::new(
                        "Maybe",
                        FieldType::optional(FieldType::optional(FieldType::named("Ears"))),
                    ))
                    .with_field(FieldDefinition::new("Carrot", FieldType::named("Carrot")))
                    .with_field(FieldDefinition::new("TehEars", FieldType::named("Ears"))),
            )
            .with_enum(EnumDefinition::new("Ears").with_member("Floppy", 1));

        let discovery = discover(&model);
        assert_eq!(discovery.edges.len(), 1);
        assert_eq!(discovery.skipped.len(), 3);
        assert!(discovery.skipped.iter().all(LookupError::is_discovery));
        assert_eq!(
            discovery.skipped[0].to_string(),
            "Skipped 'Rabbit.Moods': collection of 'Ears' values has no single column to reference a lookup table"
        );
        assert!(discovery.skipped[2].to_string().contains("'Carrot'"));
    }

    #[test]
    fn test_shared_table_columns_are_deduplicated() {
        let model = DataModel::new("Farm")
            .with_entity_set(
                EntityDefinition::new("Rabbit")
                    .with_table("Animals")
                    .with_field(FieldDefinition::new("TehEars", FieldType::named("Ears"))),
            )
            .with_entity_set(
                EntityDefinition::new("Hare")
                    .with_table("Animals")
                    .with_field(FieldDefinition::new("TehEars", FieldType::named("Ears")))
                    .with_field(
                        FieldDefinition::new("Stride", FieldType::named("Legs"))
                            .with_column("TehEars"),
                    ),
            )
            .with_enum(EnumDefinition::new("Ears").with_member("Floppy", 1))
            .with_enum(EnumDefinition::new("Legs").with_member("Long", 1));

        let discovery = discover(&model);
        assert_eq!(
            discovery.edges,
            vec![ForeignKeyEdge::new("Animals", "TehEars", "Ears")]
        );
        assert_eq!(discovery.skipped.len(), 1);
        assert!(!discovery.enum_types.contains("Legs"));
    }

    #[test]
    fn test_model_without_entities_is_empty() {
        let model = DataModel::new("Empty")
            .with_enum(EnumDefinition::new("Ears").with_member("Floppy", 1));
        let discovery = discover(&model);
        assert!(discovery.is_empty());
        assert!(discovery.enum_types.is_empty());
    }

    #[test]
    fn test_bad_entity_sets_are_ignored() {
        let mut model = rabbits();
        model.entity_sets.insert(0, "Ears".to_string());
        model.entity_sets.push("Ghost".to_string());

        let discovery = discover(&model);
        assert_eq!(discovery.edges.len(), 4);
        assert!(!discovery.has_skipped());
    }
}
