//! Inventory assembly
//!
//! Seeds one group per cluster, `OSType` value and project, then files every
//! vm into `all`, its cluster group, its project group and (when tagged) its
//! `OSType` group, recording its host variables along the way.
//!
//! Group names are the raw resource names. A cluster and a project with the
//! same name share one group.

use tracing::{debug, info, instrument, warn};

use prism_api::{Record, ResourceSet};

use crate::error::{InventoryError, Result};
use crate::path::{RecordExt, describe};
use crate::types::{GuestCustomization, HostMetadata, InventoryGraph};

/// Group holding every host
pub const ALL_GROUP: &str = "all";
/// Always-present empty group
pub const INTERNAL_GROUP: &str = "_internal";
/// Category whose value becomes a group
pub const OS_TYPE_CATEGORY: &str = "OSType";

/// Incremental inventory builder
#[derive(Debug, Clone)]
pub struct InventoryBuilder {
    graph: InventoryGraph,
}

impl Default for InventoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryBuilder {
    /// Create a builder holding only the `all` and `_internal` groups
    #[must_use]
    pub fn new() -> Self {
        let mut graph = InventoryGraph::default();
        graph.group_mut(ALL_GROUP);
        graph.group_mut(INTERNAL_GROUP);
        Self { graph }
    }

    /// Seed one empty group per cluster `spec.name`
    ///
    /// # Errors
    /// Returns an error if a cluster has no name.
    pub fn seed_clusters(&mut self, clusters: &[Record]) -> Result<()> {
        self.seed(clusters, "spec.name")
    }

    /// Seed one empty group per `OSType` category `value`
    ///
    /// # Errors
    /// Returns an error if a category entry has no value.
    pub fn seed_os_types(&mut self, os_types: &[Record]) -> Result<()> {
        self.seed(os_types, "value")
    }

    /// Seed one empty group per project `spec.name`
    ///
    /// # Errors
    /// Returns an error if a project has no name.
    pub fn seed_projects(&mut self, projects: &[Record]) -> Result<()> {
        self.seed(projects, "spec.name")
    }

    fn seed(&mut self, records: &[Record], name_path: &str) -> Result<()> {
        for record in records {
            let name = record.require_str(name_path)?;
            self.graph.group_mut(name);
        }
        Ok(())
    }

    /// File one vm into its groups and record its host variables
    ///
    /// Every field is resolved before the graph is touched, so a failing vm
    /// leaves the builder unchanged.
    ///
    /// # Errors
    /// Returns an error if a required field is missing or malformed.
    pub fn add_vm(&mut self, vm: &Record) -> Result<()> {
        let name = vm.require_str("spec.name")?;
        let metadata = host_metadata(vm)?;
        let os_type = vm.optional_str(&format!("metadata.categories.{OS_TYPE_CATEGORY}"))?;

        if !self.graph.groups.contains_key(&metadata.cluster) {
            warn!(host = name, cluster = %metadata.cluster, "vm references unlisted cluster");
        }
        if !self.graph.groups.contains_key(&metadata.project) {
            warn!(host = name, project = %metadata.project, "vm references unlisted project");
        }

        self.graph.group_mut(ALL_GROUP).add_host(name);
        self.graph.group_mut(&metadata.cluster).add_host(name);
        self.graph.group_mut(&metadata.project).add_host(name);
        if let Some(os_type) = os_type {
            self.graph.group_mut(os_type).add_host(name);
        }

        if self.graph.hostvars.contains_key(name) {
            warn!(host = name, "duplicate vm name, host variables overwritten");
        }
        debug!(host = name, "vm added");
        self.graph.hostvars.insert(name.to_string(), metadata);

        Ok(())
    }

    /// Finish and return the inventory
    #[must_use]
    pub fn finish(self) -> InventoryGraph {
        self.graph
    }
}

/// Build the inventory from drained collections
///
/// Pure: the same input always yields the same inventory.
///
/// # Errors
/// Returns the first missing or malformed field; no partial inventory is
/// produced.
#[instrument(skip_all, fields(vms = resources.vms.len()))]
pub fn build(resources: &ResourceSet) -> Result<InventoryGraph> {
    let mut builder = InventoryBuilder::new();
    builder.seed_clusters(&resources.clusters)?;
    builder.seed_os_types(&resources.os_types)?;
    builder.seed_projects(&resources.projects)?;

    for vm in &resources.vms {
        builder.add_vm(vm)?;
    }

    let graph = builder.finish();
    info!(
        groups = graph.groups.len(),
        hosts = graph.hostvars.len(),
        "inventory built"
    );
    Ok(graph)
}

/// Extract the host variables of one vm
///
/// # Errors
/// Returns an error if a required field is missing or malformed. Only the
/// description and guest customization are optional.
pub fn host_metadata(vm: &Record) -> Result<HostMetadata> {
    let cluster = vm.require_str("spec.cluster_reference.name")?;
    let project = vm.require_str("metadata.project_reference.name")?;

    let categories = vm.require("metadata.categories")?;
    if !categories.is_object() {
        return Err(InventoryError::InvalidField {
            path: "metadata.categories".to_string(),
            record: describe(vm),
            expected: "an object",
        });
    }

    let resources = vm.require("status.resources")?;
    let guest_customization =
        GuestCustomization::classify(resources.get("guest_customization"));

    Ok(HostMetadata {
        ansible_host: vm
            .require_str("status.resources.nic_list.0.ip_endpoint_list.0.ip")?
            .to_string(),
        categories: categories.clone(),
        cluster: cluster.to_string(),
        project: project.to_string(),
        owner: vm.require_str("metadata.owner_reference.name")?.to_string(),
        description: vm.optional_str("status.description")?.map(str::to_string),
        power_state: vm.require_str("status.resources.power_state")?.to_string(),
        num_sockets: vm.require_u64("status.resources.num_sockets")?,
        num_vcpus_per_socket: vm.require_u64("status.resources.num_vcpus_per_socket")?,
        memory_size_mib: vm.require_u64("status.resources.memory_size_mib")?,
        machine_type: vm.require_str("status.resources.machine_type")?.to_string(),
        guest_customization,
        subnet_name: vm
            .require_str("status.resources.nic_list.0.subnet_reference.name")?
            .to_string(),
    })
}
