//! Inventory type definitions

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::Value;

// ============================================================================
// Host variables
// ============================================================================

/// How a vm is customized at first boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuestCustomization {
    /// Windows sysprep answer file
    Sysprep,
    /// cloud-init user data
    CloudInit,
}

impl GuestCustomization {
    /// Classify a `guest_customization` block
    ///
    /// `sysprep` wins over `cloud_init` when both keys exist. A missing,
    /// `null` or empty block classifies as `None`.
    #[must_use]
    pub fn classify(guest_customization: Option<&Value>) -> Option<Self> {
        let block = guest_customization?.as_object()?;
        if block.contains_key("sysprep") {
            Some(GuestCustomization::Sysprep)
        } else if block.contains_key("cloud_init") {
            Some(GuestCustomization::CloudInit)
        } else {
            None
        }
    }
}

/// Variables exposed for one host
///
/// Field names match the variables the inventory has always published to
/// Ansible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostMetadata {
    /// First IP of the first NIC
    pub ansible_host: String,
    /// Raw category map of the vm
    pub categories: Value,
    #[serde(rename = "nutanix_cluster")]
    pub cluster: String,
    #[serde(rename = "nutanix_project")]
    pub project: String,
    #[serde(rename = "nutanix_owner")]
    pub owner: String,
    #[serde(rename = "nutanix_description")]
    pub description: Option<String>,
    #[serde(rename = "nutanix_power_state")]
    pub power_state: String,
    #[serde(rename = "nutanix_num_sockets")]
    pub num_sockets: u64,
    #[serde(rename = "nutanix_num_vcpus_per_socket")]
    pub num_vcpus_per_socket: u64,
    #[serde(rename = "nutanix_memory_size_mib")]
    pub memory_size_mib: u64,
    #[serde(rename = "nutanix_machine_type")]
    pub machine_type: String,
    #[serde(rename = "nutanix_guest_customization_type")]
    pub guest_customization: Option<GuestCustomization>,
    /// Subnet of the first NIC
    #[serde(rename = "nutanix_subnet_name")]
    pub subnet_name: String,
}

// ============================================================================
// Groups
// ============================================================================

/// A named bucket of hosts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Member hosts, in first-insertion order
    hosts: Vec<String>,
    /// Child group names
    pub children: Vec<String>,
    #[serde(skip)]
    members: HashSet<String>,
}

impl Group {
    /// Add a host, ignoring repeats
    pub fn add_host(&mut self, host: &str) {
        if self.members.insert(host.to_string()) {
            self.hosts.push(host.to_string());
        }
    }

    /// Member hosts, in first-insertion order
    #[must_use]
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Check membership
    #[must_use]
    pub fn contains(&self, host: &str) -> bool {
        self.members.contains(host)
    }
}

/// The complete inventory
///
/// Serializes in the Ansible dynamic inventory layout: a `_meta.hostvars`
/// map followed by one top-level key per group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryGraph {
    /// Groups keyed by name
    pub groups: BTreeMap<String, Group>,
    /// Host variables keyed by host name
    pub hostvars: BTreeMap<String, HostMetadata>,
}

impl InventoryGraph {
    /// Get a group by name
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Get a group, creating it empty if needed
    pub fn group_mut(&mut self, name: &str) -> &mut Group {
        self.groups.entry(name.to_string()).or_default()
    }

    /// Get the variables of a host
    #[must_use]
    pub fn host(&self, name: &str) -> Option<&HostMetadata> {
        self.hostvars.get(name)
    }
}

impl Serialize for InventoryGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Meta<'a> {
            hostvars: &'a BTreeMap<String, HostMetadata>,
        }

        let mut map = serializer.serialize_map(Some(self.groups.len() + 1))?;
        map.serialize_entry(
            "_meta",
            &Meta {
                hostvars: &self.hostvars,
            },
        )?;
        for (name, group) in &self.groups {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}
