//! Router assembly and shared application state.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use axum::Router;
use axum::routing::post;
use tower_http::trace::TraceLayer;
use warden_adapters::Pipeline;
use warden_core::{Cipher, WardenConfig};

use crate::ratelimit::RateLimiter;
use crate::routes;

/// Shared state injected into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The verification pipeline behind `/api/verify`.
    pub pipeline: Arc<Pipeline>,
    /// Envelope cipher; `None` when no shared key is configured.
    pub cipher: Option<Arc<Cipher>>,
    /// HTTP client used by the execute proxy.
    pub client: reqwest::Client,
    /// Hard cap on the execute proxy's per-request timeout.
    pub execute_timeout_cap: Duration,
    /// Rate limiter guarding the execute proxy.
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Builds state from configuration and a ready pipeline.
    pub fn from_config(config: &WardenConfig, pipeline: Pipeline) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("failed to build the execute proxy HTTP client")?;
        Ok(Self {
            pipeline: Arc::new(pipeline),
            cipher: config.shared_key.as_deref().map(|key| Arc::new(Cipher::new(key))),
            client,
            execute_timeout_cap: Duration::from_millis(config.execute_timeout_cap_ms),
            limiter: Arc::new(RateLimiter::new(&config.rate_limit)),
        })
    }
}

/// Assembles the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/verify", post(routes::verify::handle))
        .route("/api/execute", post(routes::execute::handle))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use warden_adapters::AdapterRegistry;
    use warden_core::RateLimitConfig;

    use super::*;

    /// State over an empty registry: classification always misses, nothing
    /// touches the network.
    pub fn state(shared_key: Option<&str>, max_requests: u32) -> AppState {
        let registry = AdapterRegistry::with_adapters(vec![], Some(reqwest::Client::new()));
        AppState {
            pipeline: Arc::new(Pipeline::new(registry)),
            cipher: shared_key.map(|key| Arc::new(Cipher::new(key))),
            client: reqwest::Client::new(),
            execute_timeout_cap: Duration::from_millis(30_000),
            limiter: Arc::new(RateLimiter::new(&RateLimitConfig {
                window_ms: 60_000,
                max_requests,
            })),
        }
    }
}
