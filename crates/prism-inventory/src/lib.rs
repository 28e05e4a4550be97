//! prism-inventory: Ansible inventory assembly
//!
//! Turns the raw vm, cluster, project and `OSType` category collections into a
//! grouped inventory plus per-host variables, and renders it for the
//! `--list` and `--host` query modes.

pub mod builder;
pub mod error;
pub mod path;
pub mod query;
pub mod types;

pub use builder::{InventoryBuilder, build};
pub use error::{InventoryError, Result};
pub use query::{QueryMode, host_vars, render};
pub use types::{GuestCustomization, Group, HostMetadata, InventoryGraph};
