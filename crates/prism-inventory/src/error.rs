//! Error types for prism-inventory

use thiserror::Error;

/// Errors that can occur while building or querying the inventory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A required field is absent from a record
    #[error("missing field `{path}` in {record}")]
    MissingField {
        /// Dotted path that failed to resolve
        path: String,
        /// Name or uuid of the offending record
        record: String,
    },

    /// A field is present but holds the wrong JSON type
    #[error("field `{path}` in {record} is not {expected}")]
    InvalidField {
        /// Dotted path of the field
        path: String,
        /// Name or uuid of the offending record
        record: String,
        /// Expected JSON type
        expected: &'static str,
    },

    /// Requested host is not in the inventory
    #[error("unknown host: {0}")]
    UnknownHost(String),

    /// Inventory could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
