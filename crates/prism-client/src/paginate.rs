//! Paginated fetcher
//!
//! Drains one listing endpoint page by page into a complete collection.
//! Pages are requested strictly in order since each offset depends on the
//! pages before it.

use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use prism_api::{Collection, ListingRequest, ResourceKind};

use crate::error::{ClientError, Result};
use crate::transport::ListingTransport;

/// Number of entities requested per page
pub const PAGE_SIZE: u64 = 50;

/// Fetch every entity of `kind`
///
/// `filter` is merged into each page request; when `None`, the default
/// `{"kind": ...}` filter for the resource is used.
///
/// Pagination stops when `offset + metadata.length` reaches
/// `metadata.total_matches`, or after the first page that carries no
/// `length` at all.
///
/// # Errors
/// Returns the first transport error; no partial collection is returned.
#[instrument(skip_all, fields(kind = %kind))]
pub async fn fetch_all<T>(
    transport: &T,
    kind: ResourceKind,
    filter: Option<Map<String, Value>>,
) -> Result<Collection>
where
    T: ListingTransport + ?Sized,
{
    let filter = filter.unwrap_or_else(|| ListingRequest::kind_filter(kind));
    let mut entities = Collection::new();
    let mut offset = 0;
    let mut pages = 0usize;

    loop {
        let request = ListingRequest::new(kind, offset, PAGE_SIZE).with_filter(filter.clone());
        let page = transport.list(&request).await?;
        pages += 1;

        let received = page.entities.len();
        let metadata = page.metadata;
        entities.extend(page.entities);

        let Some(length) = metadata.length else {
            debug!(offset, "no page length reported, stopping");
            break;
        };

        if usize::try_from(length).ok() != Some(received) {
            warn!(length, received, offset, "page length does not match entity count");
        }

        let total = metadata.total_matches.ok_or_else(|| {
            ClientError::InvalidResponse(format!(
                "{kind} page at offset {offset} reports length but no total_matches"
            ))
        })?;

        let end = offset.checked_add(length).ok_or_else(|| {
            ClientError::InvalidResponse(format!(
                "{kind} page at offset {offset} reports out-of-range length {length}"
            ))
        })?;

        if end >= total {
            break;
        }

        if received == 0 {
            warn!(offset, total, "empty page before total_matches reached, stopping");
            break;
        }

        offset += PAGE_SIZE;
    }

    debug!(pages, count = entities.len(), "collection drained");
    Ok(entities)
}
