//! prism-inventory
//!
//! Ansible dynamic inventory for Nutanix Prism Central. Connection settings
//! come from the environment (see `prism_client::config`).

use clap::Parser;
use color_eyre::Result;
use eyre::WrapErr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use prism_client::{ConnectionConfig, PrismClient, aggregate};
use prism_inventory::{QueryMode, build, render};

/// Produce an Ansible inventory from Nutanix Prism Central
#[derive(Parser, Debug)]
#[command(name = "prism-inventory", version, about)]
struct Args {
    /// List all hosts (the default)
    #[arg(long)]
    list: bool,

    /// Print the variables of a single host; wins over `--list`
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase log verbosity (repeatable); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn mode(&self) -> QueryMode {
        match &self.host {
            Some(host) => QueryMode::Host(host.clone()),
            None => QueryMode::List,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_tracing(args.verbose);
    debug!(list = args.list, host = ?args.host, "query mode");

    let config = ConnectionConfig::from_env().wrap_err("invalid Prism Central settings")?;
    debug!(?config, "loaded connection settings");

    let client = PrismClient::new(&config)?;
    let resources = aggregate(&client)
        .await
        .wrap_err_with(|| format!("failed to list resources from {}", config.host))?;

    let graph = build(&resources).wrap_err("failed to build inventory")?;
    info!(hosts = graph.hostvars.len(), "inventory ready");

    let output = render(&graph, &args.mode(), args.pretty)?;
    println!("{output}");

    Ok(())
}

/// Log to stderr so stdout carries only the inventory
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
