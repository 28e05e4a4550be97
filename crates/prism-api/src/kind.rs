//! Resource kinds exposed by the listing API

use std::fmt;

/// A resource collection the inventory reads from Prism Central
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Virtual machines
    Vm,
    /// Clusters registered with Prism Central
    Cluster,
    /// Projects
    Project,
    /// Values of the `OSType` category
    OsTypeCategory,
}

impl ResourceKind {
    /// Listing endpoint path, relative to the `api/nutanix/v3/` base
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Vm => "vms/list",
            ResourceKind::Cluster => "clusters/list",
            ResourceKind::Project => "projects/list",
            ResourceKind::OsTypeCategory => "categories/OSType/list",
        }
    }

    /// Value of the `kind` field in the listing filter
    #[must_use]
    pub fn api_kind(self) -> &'static str {
        match self {
            ResourceKind::Vm => "vm",
            ResourceKind::Cluster => "cluster",
            ResourceKind::Project => "project",
            ResourceKind::OsTypeCategory => "category",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Vm => "vms",
            ResourceKind::Cluster => "clusters",
            ResourceKind::Project => "projects",
            ResourceKind::OsTypeCategory => "os_types",
        };
        f.write_str(name)
    }
}
