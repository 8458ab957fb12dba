//! authz-worker - authorization core background worker
//!
//! Seeds the permission catalog, keeps the permission cache warm and runs the
//! audit log drain and lock reconciliation loops until interrupted.

#![allow(missing_docs)]

use anyhow::Context;
use backoffice_authz::config::AuthzConfig;
use backoffice_authz::storage::{Database, FastPermissionStore, MemoryStore};
use backoffice_authz::utils::logging::init_tracing;
use backoffice_authz::AuthzRuntime;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "authz-worker", version, about)]
struct Cli {
    /// Configuration file; environment variables are used when omitted
    #[arg(short, long, env = "AUTHZ_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // tracing may not be installed yet
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AuthzConfig::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => AuthzConfig::from_env().context("loading configuration from environment")?,
    };
    init_tracing(&config.logging)?;
    info!("Starting authz-worker {}", backoffice_authz::VERSION);

    let database = Arc::new(
        Database::new(&config.storage.database)
            .await
            .context("connecting to database")?,
    );
    database.migrate().await.context("running migrations")?;

    let fast_store = connect_fast_store(&config).await;

    let mut runtime = AuthzRuntime::new(config, database.clone(), fast_store, database);
    runtime.start().await?;
    info!("authz-worker running, press Ctrl+C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }

    let report = runtime.shutdown().await?;
    info!(
        written = report.drain.written,
        remaining = report.drain.remaining,
        "authz-worker stopped"
    );
    Ok(())
}

/// Redis when enabled and reachable, a no-op pool when enabled but down, and
/// an in-process mirror otherwise.
#[cfg(feature = "redis")]
async fn connect_fast_store(config: &AuthzConfig) -> Arc<dyn FastPermissionStore> {
    use backoffice_authz::storage::redis::RedisPool;
    use tracing::warn;

    if !config.storage.redis.enabled {
        info!("Redis disabled, mirroring locked users in process");
        return Arc::new(MemoryStore::new());
    }

    match RedisPool::new(&config.storage.redis).await {
        Ok(pool) => Arc::new(pool),
        Err(e) => {
            warn!(error = %e, "Redis connection failed, continuing with relational lookups only");
            Arc::new(RedisPool::create_noop())
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn connect_fast_store(_config: &AuthzConfig) -> Arc<dyn FastPermissionStore> {
    info!("Built without Redis, mirroring locked users in process");
    Arc::new(MemoryStore::new())
}
