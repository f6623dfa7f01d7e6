//! # Enum Lookup Core
//!
//! Core types, traits, and error handling for enum lookup synchronization.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: Underlying enum types, lookup id storage types, SQL parameters
//! - **Traits**: `Validatable`, `Persistable`, and the `SqlExecutor` capability
//! - **Errors**: Unified error handling with `LookupError` and `LookupResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{ExecutorError, LookupError, LookupResult};
pub use traits::{Named, Persistable, SqlExecutor, Validatable};
pub use types::{NumericStorageType, SqlParameter, SqlValue, UnderlyingType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
