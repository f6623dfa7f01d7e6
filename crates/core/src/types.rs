//! Core types used throughout enum lookup synchronization
//!
//! This module contains the small value types shared by the IR, the
//! synchronization engine, and SQL executors.

use serde::{Deserialize, Serialize};

// ============================================================================
// Underlying Types
// ============================================================================

/// Integral type backing an enum definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnderlyingType {
    /// Unsigned 8-bit
    U8,
    /// Signed 8-bit
    I8,
    /// Signed 16-bit
    I16,
    /// Unsigned 16-bit
    U16,
    /// Signed 32-bit (the default backing)
    #[default]
    I32,
    /// Unsigned 32-bit
    U32,
    /// Signed 64-bit
    I64,
    /// Unsigned 64-bit
    U64,
}

impl UnderlyingType {
    /// Inclusive range of values representable by this type.
    ///
    /// Values are held as `i64`, so the `u64` upper bound is clamped to
    /// `i64::MAX`.
    pub fn range(&self) -> (i64, i64) {
        match self {
            UnderlyingType::U8 => (0, u8::MAX as i64),
            UnderlyingType::I8 => (i8::MIN as i64, i8::MAX as i64),
            UnderlyingType::I16 => (i16::MIN as i64, i16::MAX as i64),
            UnderlyingType::U16 => (0, u16::MAX as i64),
            UnderlyingType::I32 => (i32::MIN as i64, i32::MAX as i64),
            UnderlyingType::U32 => (0, u32::MAX as i64),
            UnderlyingType::I64 => (i64::MIN, i64::MAX),
            UnderlyingType::U64 => (0, i64::MAX),
        }
    }

    /// Check whether a value fits this type
    pub fn contains(&self, value: i64) -> bool {
        let (min, max) = self.range();
        value >= min && value <= max
    }

    /// Column storage type used for lookup table ids
    pub fn storage_type(&self) -> NumericStorageType {
        match self {
            UnderlyingType::U8 => NumericStorageType::Byte,
            _ => NumericStorageType::Int,
        }
    }

    /// Get the type name as written in model files
    pub fn as_str(&self) -> &'static str {
        match self {
            UnderlyingType::U8 => "u8",
            UnderlyingType::I8 => "i8",
            UnderlyingType::I16 => "i16",
            UnderlyingType::U16 => "u16",
            UnderlyingType::I32 => "i32",
            UnderlyingType::U32 => "u32",
            UnderlyingType::I64 => "i64",
            UnderlyingType::U64 => "u64",
        }
    }
}

impl std::fmt::Display for UnderlyingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Numeric column type of a lookup table's `Id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericStorageType {
    /// Smallest unsigned integer column
    Byte,
    /// Standard 32-bit integer column
    #[default]
    Int,
}

// ============================================================================
// SQL Parameters
// ============================================================================

/// A value bound to a SQL parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SqlValue {
    /// 32-bit integer
    Int(i32),
    /// Unicode string
    Text(String),
}

impl SqlValue {
    /// Get the integer value, if this is one
    pub fn as_int(&self) -> Option<i32> {
        match self {
            SqlValue::Int(v) => Some(*v),
            SqlValue::Text(_) => None,
        }
    }

    /// Get the string value, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            SqlValue::Int(_) => None,
        }
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

/// A named parameter carried alongside a SQL batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlParameter {
    /// Parameter name without the dialect's placeholder sigil
    pub name: String,

    /// Bound value
    pub value: SqlValue,
}

impl SqlParameter {
    /// Create a new parameter
    pub fn new(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
