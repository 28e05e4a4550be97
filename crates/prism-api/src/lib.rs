//! prism-api: Shared wire types for the Prism Central v3 listing API
//!
//! Contains the listing request/response shapes, the resource kinds the
//! inventory reads, and the raw record collections passed between the client
//! and the inventory builder.

pub mod kind;
pub mod requests;
pub mod responses;

pub use kind::ResourceKind;
pub use requests::ListingRequest;
pub use responses::{Collection, ListMetadata, ListingResponse, Record, ResourceSet};
