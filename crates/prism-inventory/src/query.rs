//! Inventory queries
//!
//! Renders either the whole inventory (`--list`) or one host's variables
//! (`--host NAME`) as JSON.

use serde::Serialize;

use crate::error::{InventoryError, Result};
use crate::types::{HostMetadata, InventoryGraph};

/// What to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// Full inventory with groups and `_meta.hostvars`
    List,
    /// Variables of a single host
    Host(String),
}

/// Look up a host's variables
///
/// # Errors
/// Returns [`InventoryError::UnknownHost`] if the host is not in the inventory.
pub fn host_vars<'g>(graph: &'g InventoryGraph, host: &str) -> Result<&'g HostMetadata> {
    graph
        .host(host)
        .ok_or_else(|| InventoryError::UnknownHost(host.to_string()))
}

/// Render the query result as JSON
///
/// `pretty` only changes whitespace.
///
/// # Errors
/// Returns an error if the host is unknown or serialization fails.
pub fn render(graph: &InventoryGraph, mode: &QueryMode, pretty: bool) -> Result<String> {
    match mode {
        QueryMode::List => to_json(graph, pretty),
        QueryMode::Host(host) => to_json(host_vars(graph, host)?, pretty),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| InventoryError::Serialization(e.to_string()))
}
