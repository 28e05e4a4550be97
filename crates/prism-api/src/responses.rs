//! Response types for the listing API

use serde::Deserialize;
use serde_json::Value;

/// One raw entity as returned by a listing endpoint
pub type Record = Value;

/// Every record of one resource kind, in server order
pub type Collection = Vec<Record>;

/// One page returned by a listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub entities: Vec<Record>,
    #[serde(default)]
    pub metadata: ListMetadata,
}

/// Pagination metadata attached to a listing page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMetadata {
    /// Number of entities returned in this page; some endpoints omit it
    #[serde(default)]
    pub length: Option<u64>,
    /// Total entities matching the filter across all pages
    #[serde(default)]
    pub total_matches: Option<u64>,
}

/// The four drained collections the inventory is built from
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    pub vms: Collection,
    pub clusters: Collection,
    pub projects: Collection,
    pub os_types: Collection,
}
