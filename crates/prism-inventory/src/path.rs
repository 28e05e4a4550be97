//! Named-path lookups on raw records
//!
//! Records are schema-less JSON documents. Fields are addressed with dotted
//! paths such as `spec.cluster_reference.name`; numeric segments index into
//! arrays (`status.resources.nic_list.0.ip_endpoint_list.0.ip`).

use serde_json::Value;

use crate::error::{InventoryError, Result};

/// Resolve `path` against `value`
///
/// Returns `None` when any segment is missing or the value at that point has
/// the wrong shape to continue.
#[must_use]
pub fn lookup<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Short human-readable identity of a record, for error messages
#[must_use]
pub fn describe(record: &Value) -> String {
    if let Some(name) = lookup(record, "spec.name").and_then(Value::as_str) {
        return format!("record `{name}`");
    }
    if let Some(uuid) = lookup(record, "metadata.uuid").and_then(Value::as_str) {
        return format!("record {uuid}");
    }
    if let Some(value) = lookup(record, "value").and_then(Value::as_str) {
        return format!("record `{value}`");
    }
    "unnamed record".to_string()
}

/// Typed field access on records
pub trait RecordExt {
    /// Resolve a required path
    ///
    /// # Errors
    /// Returns [`InventoryError::MissingField`] if the path does not resolve.
    fn require(&self, path: &str) -> Result<&Value>;

    /// Resolve a required string
    ///
    /// # Errors
    /// Returns an error if the path is missing or not a string.
    fn require_str(&self, path: &str) -> Result<&str>;

    /// Resolve a required unsigned integer
    ///
    /// # Errors
    /// Returns an error if the path is missing or not a non-negative integer.
    fn require_u64(&self, path: &str) -> Result<u64>;

    /// Resolve an optional string; absent and `null` both yield `None`
    ///
    /// # Errors
    /// Returns an error if the value is present but not a string.
    fn optional_str(&self, path: &str) -> Result<Option<&str>>;
}

impl RecordExt for Value {
    fn require(&self, path: &str) -> Result<&Value> {
        lookup(self, path).ok_or_else(|| InventoryError::MissingField {
            path: path.to_string(),
            record: describe(self),
        })
    }

    fn require_str(&self, path: &str) -> Result<&str> {
        self.require(path)?
            .as_str()
            .ok_or_else(|| invalid(self, path, "a string"))
    }

    fn require_u64(&self, path: &str) -> Result<u64> {
        self.require(path)?
            .as_u64()
            .ok_or_else(|| invalid(self, path, "an unsigned integer"))
    }

    fn optional_str(&self, path: &str) -> Result<Option<&str>> {
        match lookup(self, path) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(self, path, "a string")),
        }
    }
}

fn invalid(record: &Value, path: &str, expected: &'static str) -> InventoryError {
    InventoryError::InvalidField {
        path: path.to_string(),
        record: describe(record),
        expected,
    }
}
