//! Validation rules and utilities for data models
//!
//! Model files are written by hand or exported by a host application, so
//! they are checked before synchronization: duplicate names, enum members
//! that do not fit their backing type, dangling metadata, and entity sets
//! that name nothing.

use crate::DataModel;
use enumlookup_core::Validatable;
use std::collections::HashSet;

// ============================================================================
// ValidationResult
// ============================================================================

/// Result of a validation operation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the validation passed
    pub valid: bool,

    /// List of errors (empty if valid)
    pub errors: Vec<ValidationError>,

    /// List of warnings (non-fatal issues)
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: ValidationError) {
        self.valid = false;
        self.errors.push(error);
    }

    /// Add a warning to the result
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.valid {
            self.valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

// ============================================================================
// ValidationError
// ============================================================================

/// A validation error
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Error code for programmatic handling
    pub code: ValidationErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Path to the problematic element (e.g., "enums.Ears")
    pub path: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path to the error
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] {}", path, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

/// Error codes for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    EmptyTypeName,
    DuplicateTypeName,
    DuplicateFieldName,
    InvalidEnum,
}

// ============================================================================
// ValidationWarning
// ============================================================================

/// A validation warning (non-fatal issue)
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning code
    pub code: ValidationWarningCode,

    /// Human-readable warning message
    pub message: String,

    /// Path to the element
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Create a new warning
    pub fn new(code: ValidationWarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Add a path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "[{}] Warning: {}", path, self.message)
        } else {
            write!(f, "Warning: {}", self.message)
        }
    }
}

/// Warning codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    UnknownEntitySet,
    NoEntitySets,
    NoPersistedMembers,
}

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Validate a model and return the result
    fn validate(&self, model: &DataModel) -> ValidationResult;
}

// ============================================================================
// Validator
// ============================================================================

/// Model validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with default rules
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(TypeNamesRule));
        validator.add_rule(Box::new(FieldNamesRule));
        validator.add_rule(Box::new(EnumDefinitionsRule));
        validator.add_rule(Box::new(EntitySetsRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Validate a model with all rules
    pub fn validate(&self, model: &DataModel) -> ValidationResult {
        let mut result = ValidationResult::ok();
        for rule in &self.rules {
            result.merge(rule.validate(model));
        }
        result
    }
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: type names are non-empty and unique across enums, entities and value objects
pub struct TypeNamesRule;

impl ValidationRule for TypeNamesRule {
    fn validate(&self, model: &DataModel) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let mut seen: HashSet<&str> = HashSet::new();

        let names = model
            .enums
            .iter()
            .map(|e| ("enums", e.name.as_str()))
            .chain(model.entities.iter().map(|e| ("entities", e.name.as_str())))
            .chain(
                model
                    .value_objects
                    .iter()
                    .map(|v| ("value_objects", v.name.as_str())),
            );

        for (section, name) in names {
            if name.trim().is_empty() {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::EmptyTypeName,
                        "Type name cannot be empty",
                    )
                    .with_path(section),
                );
                continue;
            }
            if !seen.insert(name) {
                result.add_error(
                    ValidationError::new(
                        ValidationErrorCode::DuplicateTypeName,
                        format!("Type name '{}' is declared more than once", name),
                    )
                    .with_path(format!("{}.{}", section, name)),
                );
            }
        }

        result
    }
}

/// Rule: field names are unique within each entity and value object
pub struct FieldNamesRule;

impl ValidationRule for FieldNamesRule {
    fn validate(&self, model: &DataModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        let owners = model
            .entities
            .iter()
            .map(|e| (format!("entities.{}", e.name), &e.fields))
            .chain(
                model
                    .value_objects
                    .iter()
                    .map(|v| (format!("value_objects.{}", v.name), &v.fields)),
            );

        for (path, fields) in owners {
            let mut seen: HashSet<&str> = HashSet::new();
            for field in fields {
                if !seen.insert(field.name.as_str()) {
                    result.add_error(
                        ValidationError::new(
                            ValidationErrorCode::DuplicateFieldName,
                            format!("Field '{}' is declared more than once", field.name),
                        )
                        .with_path(format!("{}.{}", path, field.name)),
                    );
                }
            }
        }

        result
    }
}

/// Rule: every enum definition is internally consistent
pub struct EnumDefinitionsRule;

impl ValidationRule for EnumDefinitionsRule {
    fn validate(&self, model: &DataModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        for definition in &model.enums {
            let path = format!("enums.{}", definition.name);
            if let Err(e) = Validatable::validate(definition) {
                result.add_error(
                    ValidationError::new(ValidationErrorCode::InvalidEnum, e.to_string())
                        .with_path(&path),
                );
            }
            if !definition.members.is_empty() && definition.persisted_members().next().is_none()
            {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::NoPersistedMembers,
                        format!(
                            "Every member of '{}' is runtime-only; its lookup table will be emptied",
                            definition.name
                        ),
                    )
                    .with_path(&path),
                );
            }
        }

        result
    }
}

/// Rule: entity sets name declared entities
pub struct EntitySetsRule;

impl ValidationRule for EntitySetsRule {
    fn validate(&self, model: &DataModel) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if model.entity_sets.is_empty() {
            result.add_warning(ValidationWarning::new(
                ValidationWarningCode::NoEntitySets,
                "Model exposes no entity sets; nothing will be synchronized",
            ));
        }

        for set in &model.entity_sets {
            if model.entity_by_name(set).is_none() {
                result.add_warning(
                    ValidationWarning::new(
                        ValidationWarningCode::UnknownEntitySet,
                        format!("Entity set '{}' does not name a declared entity", set),
                    )
                    .with_path(format!("entity_sets.{}", set)),
                );
            }
        }

        result
    }
}

// ============================================================================
// Tests
// ============================================================================
