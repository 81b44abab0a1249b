use anyhow::{anyhow, Result};
use cepgeo_application::prelude::{ProviderPool, Resolver, ResolverConfig};
use cepgeo_core::{entities::PostalCode, repositories::AddressCacheStore as _};
use cepgeo_db_sqlite::Connections;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};

use crate::{config::Config, gateways};

#[derive(Debug, Parser)]
#[command(version, about = "Resolve Brazilian postal codes (CEP) into coordinates")]
pub struct Args {
    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// URL to the database
    #[arg(long, value_name = "DATABASE_URL")]
    pub db_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the coordinate of a postal code
    Resolve {
        /// The postal code, e.g. 01310-100
        postal_code: String,
        /// An optional house number
        #[arg(long = "number", value_name = "NUMBER")]
        house_number: Option<String>,
    },
    /// List the active geocoding providers
    Providers,
    /// Show the cached entry of a postal code
    Cache {
        /// The postal code, e.g. 01310-100
        postal_code: String,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn connect_db(cfg: &Config) -> Result<Connections> {
    log::info!(
        "Connecting to SQLite database '{}' (pool size = {})",
        cfg.db.conn_sqlite,
        cfg.db.conn_pool_size
    );
    let connections =
        Connections::init(&cfg.db.conn_sqlite, u32::from(cfg.db.conn_pool_size))?;
    cepgeo_db_sqlite::run_embedded_database_migrations(connections.exclusive()?)?;
    Ok(connections)
}

fn resolver(cfg: &Config, connections: Connections) -> Result<Resolver> {
    let postal_lookup = gateways::postal_lookup_gateway(&cfg.postal_lookup)?;
    let providers = gateways::geocoding_gateways(&cfg.geocoding)?;
    let pool = ProviderPool::new(providers, cfg.geocoding.pool, cfg.bbox);
    Ok(Resolver::new(
        Arc::new(connections),
        Arc::new(postal_lookup),
        pool,
        ResolverConfig {
            bbox: cfg.bbox,
            consensus: cfg.consensus,
            early_exit: cfg.geocoding.early_exit,
        },
    ))
}

pub async fn run(args: Args) -> Result<()> {
    let Args {
        config,
        db_url,
        command,
    } = args;
    let mut cfg = Config::try_load_from_file_or_default(config)?;
    if let Some(db_url) = db_url {
        cfg.db.conn_sqlite = db_url;
    }

    match command {
        Command::Resolve {
            postal_code,
            house_number,
        } => {
            let connections = connect_db(&cfg)?;
            let resolver = resolver(&cfg, connections)?;
            let result = resolver
                .resolve(&postal_code, house_number.as_deref())
                .await?;
            print_json(&cepgeo_boundary::ResolutionResult::from(result))
        }
        Command::Providers => {
            for id in cepgeo_gateways::registry::active_provider_ids(&cfg.geocoding.credentials) {
                println!("{id}");
            }
            Ok(())
        }
        Command::Cache { postal_code } => {
            let postal_code = PostalCode::normalize(&postal_code)?;
            let connections = connect_db(&cfg)?;
            let entry = connections
                .get(&postal_code)?
                .ok_or_else(|| anyhow!("No cached entry for {}", postal_code.formatted()))?;
            print_json(&cepgeo_boundary::CacheEntry::from(entry))
        }
    }
}
