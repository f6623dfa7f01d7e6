//! # Enum Introspection
//!
//! Turns an enum definition into the ordered `(id, name)` rows of its
//! lookup table.
//!
//! Per member, in declaration order:
//!
//! 1. members flagged runtime-only are skipped;
//! 2. the underlying value is converted to an `i32` id;
//! 3. the name is the member's description when it has one, otherwise its
//!    identifier, split into words at lowercase→uppercase boundaries unless
//!    word splitting is disabled.

use enumlookup_core::{LookupError, LookupResult};
use enumlookup_ir::{EnumDefinition, EnumMember, EnumValue, ResolvedType};

// ============================================================================
// EnumParser
// ============================================================================

/// Derives lookup rows from enum definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumParser {
    /// Insert spaces between PascalCase words, e.g. `SomeValue` is stored
    /// as "Some Value"
    pub split_words: bool,
}

impl Default for EnumParser {
    fn default() -> Self {
        Self { split_words: true }
    }
}

impl EnumParser {
    /// Create a parser with word splitting enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether identifiers are split into words
    pub fn with_split_words(mut self, split_words: bool) -> Self {
        self.split_words = split_words;
        self
    }

    /// Lookup rows for a resolved type.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the type is not an enum, `IdOutOfRange` if a
    /// persisted member does not fit its underlying type or an `i32`.
    pub fn lookup_values(&self, lookup: ResolvedType<'_>) -> LookupResult<Vec<EnumValue>> {
        match lookup {
            ResolvedType::Enum(definition) => self.values(definition),
            other => Err(LookupError::invalid_argument(format!(
                "Lookup type must be an enum, '{}' is an {}",
                other.name(),
                other.kind()
            ))),
        }
    }

    /// Lookup rows for an enum definition, in declaration order
    pub fn values(&self, definition: &EnumDefinition) -> LookupResult<Vec<EnumValue>> {
        definition
            .persisted_members()
            .map(|member| {
                Ok(EnumValue {
                    id: lookup_id(definition, member)?,
                    name: self.display_name(definition, member),
                })
            })
            .collect()
    }

    /// Display name for a member
    pub fn display_name(&self, definition: &EnumDefinition, member: &EnumMember) -> String {
        if let Some(description) = definition.description_of(&member.identifier) {
            return description.to_string();
        }
        if self.split_words {
            split_camel_case(&member.identifier)
        } else {
            member.identifier.clone()
        }
    }
}

/// Widen-then-narrow conversion of a member value to a lookup id.
///
/// The value must fit the enum's underlying type first, so a `u8` enum
/// never produces an id its `tinyint` column cannot hold.
fn lookup_id(definition: &EnumDefinition, member: &EnumMember) -> LookupResult<i32> {
    let out_of_range = |target: String| LookupError::IdOutOfRange {
        enum_name: definition.name.clone(),
        member: member.identifier.clone(),
        value: member.value,
        target,
    };

    if !definition.underlying.contains(member.value) {
        return Err(out_of_range(format!("{}", definition.underlying)));
    }
    i32::try_from(member.value).map_err(|_| out_of_range("a 32-bit lookup id".to_string()))
}

/// Insert a space before every uppercase letter that directly follows a
/// lowercase letter.
///
/// Runs of capitals are left alone: `ABCValue` stays `ABCValue`.
pub fn split_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for c in name.chars() {
        if previous_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        previous_lower = c.is_ascii_lowercase();
        out.push(c);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
