//! nameip CLI
//!
//! Command-line interface for resolving managed entity names to IP
//! addresses through a management engine.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nameip_cache::AddressCache;
use nameip_core::types::EntityKind;
use nameip_engine::{EngineClient, EngineConfig, VmQuery};
use nameip_resolver::{NameResolver, PrefixMacMapper, ResolverConfig};

/// nameip - name-to-IP resolution for virtualization test labs
#[derive(Parser)]
#[command(name = "nameip")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base engine API URL, e.g. https://engine.lab/ovirt-engine/api
    #[arg(long, global = true, env = "NAMEIP_API_URL")]
    api_url: Option<String>,

    /// Engine API user
    #[arg(long, global = true, env = "NAMEIP_USERNAME", default_value = "admin@internal")]
    username: String,

    /// Engine API password
    #[arg(long, global = true, env = "NAMEIP_PASSWORD", default_value = "")]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve entity names to IP addresses
    Resolve {
        /// Names to resolve, each either `name` or `kind:name`
        #[arg(required = true)]
        names: Vec<String>,

        /// Pin every lookup to one entity kind (vm or host)
        #[arg(short, long)]
        kind: Option<String>,

        /// First two octets of the MAC fallback network
        #[arg(long, env = "NAMEIP_MAC_PREFIX", default_value = "10.0")]
        mac_prefix: String,
    },

    /// List a VM's NICs with their reported addresses
    Nics {
        /// VM name
        vm: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "nameip=debug,info"
    } else {
        "nameip=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = engine_client(&cli)?;

    match cli.command {
        Commands::Resolve {
            names,
            kind,
            mac_prefix,
        } => cmd_resolve(client, names, kind.as_deref(), &mac_prefix).await,
        Commands::Nics { vm } => cmd_nics(client, &vm).await,
    }
}

fn engine_client(cli: &Cli) -> Result<Arc<EngineClient>> {
    let api_url = cli
        .api_url
        .clone()
        .context("engine API URL required (--api-url or NAMEIP_API_URL)")?;

    let config = EngineConfig::new(api_url, cli.username.clone(), cli.password.clone());
    let client = EngineClient::with_config(config).context("Failed to build engine client")?;
    Ok(Arc::new(client))
}

fn mac_mapper(prefix: &str) -> Result<PrefixMacMapper> {
    let (first, second) = prefix
        .split_once('.')
        .context("MAC prefix must look like `10.0`")?;
    Ok(PrefixMacMapper::new(
        first.parse().context("Invalid first prefix octet")?,
        second.parse().context("Invalid second prefix octet")?,
    ))
}

/// Resolve one or more names
async fn cmd_resolve(
    client: Arc<EngineClient>,
    names: Vec<String>,
    kind: Option<&str>,
    mac_prefix: &str,
) -> Result<()> {
    let kind: Option<EntityKind> = kind
        .map(|k| k.parse())
        .transpose()
        .context("Invalid --kind")?;

    let resolver = NameResolver::with_config(
        ResolverConfig::default(),
        Arc::new(AddressCache::new()),
        client.clone(),
        client,
        Arc::new(mac_mapper(mac_prefix)?),
    );

    let mut failures = 0usize;
    for name in &names {
        let outcome = match kind {
            Some(kind) => resolver.resolve_kind(kind, name).await,
            None => resolver.look_up(name).await,
        };

        match outcome {
            Ok(ip) => println!("{}  {}", name.cyan().bold(), ip.to_string().green()),
            Err(e) => {
                failures += 1;
                println!("{}  {}", name.cyan().bold(), e.to_string().red());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} lookups failed", failures, names.len());
    }
    Ok(())
}

/// Show a VM's NICs and reported addresses
async fn cmd_nics(client: Arc<EngineClient>, vm: &str) -> Result<()> {
    let nics = client.vm_nics(vm).await.context("Failed to fetch NICs")?;

    if nics.is_empty() {
        println!("{}", "VM has no NICs.".yellow());
        return Ok(());
    }

    for nic in nics {
        let mac = nic
            .mac
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".into());
        println!("{}  {}", nic.name.cyan().bold(), mac.dimmed());

        for device in &nic.reported_devices {
            let device_name = device.name.as_deref().unwrap_or("-");
            for ip in &device.ips {
                println!("   {} {}", device_name.dimmed(), ip.address.green());
            }
        }
    }

    Ok(())
}
