//! Enum definitions
//!
//! An `EnumDefinition` describes one enumerated type compiled into the
//! application: its members in declaration order plus a metadata side-table
//! keyed by member identifier. The side-table carries the optional
//! description (used verbatim as the lookup name) and the runtime-only flag
//! (members that must never be persisted).

use enumlookup_core::{LookupError, LookupResult, Named, UnderlyingType, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// EnumMember
// ============================================================================

/// A single enum member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Identifier as written in code (e.g. "SomeValue")
    pub identifier: String,

    /// Underlying numeric value
    pub value: i64,
}

impl EnumMember {
    /// Create a new member
    pub fn new(identifier: impl Into<String>, value: i64) -> Self {
        Self {
            identifier: identifier.into(),
            value,
        }
    }
}

// ============================================================================
// MemberMetadata
// ============================================================================

/// Per-member metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberMetadata {
    /// Human-readable description, used verbatim as the lookup name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value exists only for in-process logic and is never persisted
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub runtime_only: bool,
}

// ============================================================================
// EnumDefinition
// ============================================================================

/// An enumerated type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDefinition {
    /// Type name (e.g. "Ears"); the lookup table is named after it
    pub name: String,

    /// Integral backing type
    #[serde(default)]
    pub underlying: UnderlyingType,

    /// Members in declaration order
    pub members: Vec<EnumMember>,

    /// Metadata side-table keyed by member identifier
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MemberMetadata>,
}

impl EnumDefinition {
    /// Create a new, empty `i32`-backed enum
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            underlying: UnderlyingType::default(),
            members: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the backing type
    pub fn with_underlying(mut self, underlying: UnderlyingType) -> Self {
        self.underlying = underlying;
        self
    }

    /// Append a member
    pub fn with_member(mut self, identifier: impl Into<String>, value: i64) -> Self {
        self.members.push(EnumMember::new(identifier, value));
        self
    }

    /// Attach a description to a member
    pub fn with_description(
        mut self,
        identifier: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.metadata.entry(identifier.into()).or_default().description =
            Some(description.into());
        self
    }

    /// Flag a member as runtime-only
    pub fn with_runtime_only(mut self, identifier: impl Into<String>) -> Self {
        self.metadata.entry(identifier.into()).or_default().runtime_only = true;
        self
    }

    // ========================================================================
    // Query methods
    // ========================================================================

    /// Get a member's metadata, if any
    pub fn metadata_for(&self, identifier: &str) -> Option<&MemberMetadata> {
        self.metadata.get(identifier)
    }

    /// Get a member's description, if any
    pub fn description_of(&self, identifier: &str) -> Option<&str> {
        self.metadata_for(identifier)
            .and_then(|m| m.description.as_deref())
    }

    /// Check if a member is runtime-only
    pub fn is_runtime_only(&self, identifier: &str) -> bool {
        self.metadata_for(identifier)
            .map(|m| m.runtime_only)
            .unwrap_or(false)
    }

    /// Members that are persisted as lookup rows
    pub fn persisted_members(&self) -> impl Iterator<Item = &EnumMember> {
        self.members
            .iter()
            .filter(|m| !self.is_runtime_only(&m.identifier))
    }

    /// Get a member by identifier
    pub fn member(&self, identifier: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.identifier == identifier)
    }
}

impl Named for EnumDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Validatable for EnumDefinition {
    fn validate(&self) -> LookupResult<()> {
        if self.name.trim().is_empty() {
            return Err(LookupError::validation("Enum name cannot be empty"));
        }

        let mut identifiers = HashSet::new();
        let mut values = HashSet::new();
        for member in &self.members {
            if !identifiers.insert(member.identifier.as_str()) {
                return Err(LookupError::validation(format!(
                    "Enum '{}' declares member '{}' more than once",
                    self.name, member.identifier
                )));
            }
            if !self.underlying.contains(member.value) {
                return Err(LookupError::validation(format!(
                    "Value {} of '{}.{}' is out of range for {}",
                    member.value, self.name, member.identifier, self.underlying
                )));
            }
            if !self.is_runtime_only(&member.identifier) && !values.insert(member.value) {
                return Err(LookupError::validation(format!(
                    "Enum '{}' has more than one persisted member with value {}",
                    self.name, member.value
                )));
            }
        }

        for identifier in self.metadata.keys() {
            if self.member(identifier).is_none() {
                return Err(LookupError::validation(format!(
                    "Metadata for '{}.{}' does not match any member",
                    self.name, identifier
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
