//! prism-client: Prism Central listing client
//!
//! Provides the HTTP transport, connection configuration, the paginated
//! fetcher that drains one listing endpoint, and the aggregator that drains
//! every collection the inventory needs.
//!
//! # Example
//!
//! ```no_run
//! use prism_client::{ConnectionConfig, PrismClient, aggregate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConnectionConfig::from_env()?;
//! let client = PrismClient::new(&config)?;
//!
//! let resources = aggregate(&client).await?;
//! println!("{} vms", resources.vms.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod http;
pub mod paginate;
mod retry;
pub mod transport;

pub use aggregate::aggregate;
pub use config::{ConfigError, ConnectionConfig};
pub use error::{ClientError, Result};
pub use http::PrismClient;
pub use paginate::{PAGE_SIZE, fetch_all};
pub use transport::ListingTransport;
