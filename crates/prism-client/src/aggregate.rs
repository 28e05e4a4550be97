//! Resource aggregation
//!
//! Drains the four collections the inventory is built from.

use tracing::{info, instrument};

use prism_api::{ResourceKind, ResourceSet};

use crate::error::Result;
use crate::paginate::fetch_all;
use crate::transport::ListingTransport;

/// Fetch vms, clusters, projects and `OSType` category values
///
/// The four drains run concurrently. The first failure is returned at once
/// and the remaining drains are dropped.
///
/// # Errors
/// Returns the first error raised by any of the drains.
#[instrument(skip(transport))]
pub async fn aggregate<T>(transport: &T) -> Result<ResourceSet>
where
    T: ListingTransport + ?Sized,
{
    let (vms, clusters, projects, os_types) = tokio::try_join!(
        fetch_all(transport, ResourceKind::Vm, None),
        fetch_all(transport, ResourceKind::Cluster, None),
        fetch_all(transport, ResourceKind::Project, None),
        fetch_all(transport, ResourceKind::OsTypeCategory, None),
    )?;

    info!(
        vms = vms.len(),
        clusters = clusters.len(),
        projects = projects.len(),
        os_types = os_types.len(),
        "resources collected"
    );

    Ok(ResourceSet {
        vms,
        clusters,
        projects,
        os_types,
    })
}
