//! Callsink server entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use callsink::adapters::cache::{preload, LookupCache};
use callsink::adapters::http::{CallsHttpConfig, CallsHttpServer};
use callsink::adapters::postgres::{
    create_pool, verify_connection, PgCallRepository, PgLookupRepository, PoolConfig,
};
use callsink::infrastructure::config::ConfigLoader;
use callsink::infrastructure::logging::LoggerImpl;
use callsink::services::CallService;

#[derive(Parser, Debug)]
#[command(name = "callsink")]
#[command(about = "Call event ingestion service")]
struct Args {
    /// YAML configuration file
    #[arg(long, env = "CALLSINK_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on, overriding configuration
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = ConfigLoader::load_env_file(None)?;
    let args = Args::parse();

    let mut config = ConfigLoader::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let _logger = LoggerImpl::init(&config.logging).context("Failed to initialize logging")?;
    match env_file {
        Some(path) => info!(path = %path.display(), "loaded environment file"),
        None => info!("no .env file found; using process environment"),
    }

    let options = config.database.connect_options()?;
    let pool = create_pool(options, Some(PoolConfig::from(&config.database)))
        .await
        .context("Failed to connect to database")?;
    verify_connection(&pool)
        .await
        .context("Failed to ping database")?;
    info!("Database connected successfully");

    let lookups = Arc::new(PgLookupRepository::new(pool.clone()));
    let calls = Arc::new(PgCallRepository::new(pool.clone()));

    let cache = Arc::new(LookupCache::new(lookups));
    let report = preload(&cache).await;
    if !report.is_complete() {
        warn!(?report, "lookup cache partially preloaded; missing tables resolve on demand");
    }
    let stats = cache.stats().await;
    info!(
        campaigns = stats.campaigns,
        voices = stats.voices,
        categories = stats.categories,
        "lookup cache ready"
    );

    let service = CallService::new(cache, calls);
    let server = CallsHttpServer::new(service, CallsHttpConfig::from(&config.server));

    server
        .serve_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    info!("Server stopped; closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
