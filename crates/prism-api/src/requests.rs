//! Request types for the listing API

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::kind::ResourceKind;

/// One page request against a listing endpoint
///
/// Serializes as a flat JSON object: the filter keys followed by `offset`
/// and `length`. Pagination keys take precedence over same-named filter keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRequest {
    pub kind: ResourceKind,
    pub filter: Map<String, Value>,
    pub offset: u64,
    pub length: u64,
}

impl ListingRequest {
    /// Create a request for one page with the default `{"kind": ...}` filter
    #[must_use]
    pub fn new(kind: ResourceKind, offset: u64, length: u64) -> Self {
        Self {
            kind,
            filter: Self::kind_filter(kind),
            offset,
            length,
        }
    }

    /// Replace the filter payload
    #[must_use]
    pub fn with_filter(mut self, filter: Map<String, Value>) -> Self {
        self.filter = filter;
        self
    }

    /// The filter the inventory sends for `kind`
    #[must_use]
    pub fn kind_filter(kind: ResourceKind) -> Map<String, Value> {
        let mut filter = Map::new();
        filter.insert("kind".to_string(), Value::from(kind.api_kind()));
        filter
    }
}

impl Serialize for ListingRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.filter {
            if key == "offset" || key == "length" {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("offset", &self.offset)?;
        map.serialize_entry("length", &self.length)?;
        map.end()
    }
}
