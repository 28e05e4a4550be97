//! Listing transport trait

use async_trait::async_trait;
use prism_api::{ListingRequest, ListingResponse};

use crate::error::Result;

/// Anything that can answer one listing page request
///
/// Implemented by [`PrismClient`](crate::PrismClient) over HTTPS; tests use
/// in-memory implementations.
#[async_trait]
pub trait ListingTransport: Send + Sync {
    /// Fetch a single page
    async fn list(&self, request: &ListingRequest) -> Result<ListingResponse>;
}
