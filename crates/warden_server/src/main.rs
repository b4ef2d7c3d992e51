//! keywarden HTTP verification server.
//!
//! Exposes two endpoints:
//!
//! - `POST /api/verify` - classify and verify one credential, optionally
//!   wrapped in the replay-guarded transport envelope
//! - `POST /api/execute` - rate-limited, SSRF-guarded outbound request proxy

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod app;
mod ratelimit;
mod routes;

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use warden_adapters::{AdapterRegistry, LeakChecker, Pipeline};
use warden_core::{CONFIG_FILENAME, WardenConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env())
        .init();

    let config_path = Path::new(CONFIG_FILENAME);
    let config = if config_path.exists() {
        WardenConfig::load(config_path)?
    } else {
        WardenConfig::from_env()
    };

    if config.shared_key.is_none() {
        warn!("no shared key configured; encrypted payloads will be rejected");
    }

    let registry = AdapterRegistry::with_verification(Duration::from_secs(config.provider_timeout_secs))
        .context("failed to build the adapter registry")?;
    let leak_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_secs))
        .build()
        .context("failed to build the leak-check HTTP client")?;
    let pipeline = Pipeline::new(registry)
        .with_leak_checker(LeakChecker::new(leak_client, config.leak_search_url.clone()));

    let state = app::AppState::from_config(&config, pipeline)?;
    let router = app::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "keywarden server listening");
    axum::serve(listener, router).await?;

    Ok(())
}
