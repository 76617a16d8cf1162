//! Polman - embeddable yr.no weather forecast widget
//!
//! Fetches forecast XML from yr.no, caches the converted JSON for a while
//! and serves it as an HTML table or as a JSON/JSONP script.

mod config;
mod error;
mod render;
mod server;
mod types;

use crate::config::{CacheBackend, Config};
use crate::error::Result;
use crate::server::{start_server, ServerState, SharedState};
use forecast_cache::{ForecastCache, KeyValueStore, MemoryStore, RedisStore};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};
use yr_forecast::YrClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("polman_widget=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Polman forecast widget...");

    let config = Config::from_env();
    let client = Arc::new(YrClient::with_base_url(&config.yr_base_url));
    info!("Port: {}", config.port);
    info!("Forecast host: {}", client.base_url());
    info!("Cache TTL: {} seconds", config.cache_ttl.as_secs());
    info!("Public dir: {:?}", config.public_dir);

    let store = open_store(&config).await;
    let cache = ForecastCache::new(store, client);

    let state: SharedState = Arc::new(ServerState::new(cache, config.public_dir));

    // Start HTTP server (blocking)
    start_server(state, config.port).await?;

    Ok(())
}

/// Open the configured cache store. An unreachable Redis falls back to the
/// in-process store so forecasts are still served.
async fn open_store(config: &Config) -> Arc<dyn KeyValueStore> {
    match config.cache_backend {
        CacheBackend::Redis => {
            info!("Cache backend: redis at {}", config.redacted_redis_url());
            match RedisStore::connect(&config.redis_url, config.cache_ttl).await {
                Ok(store) => return Arc::new(store),
                Err(e) => warn!(
                    "Redis unavailable ({}), using in-process memory cache instead",
                    e
                ),
            }
        }
        CacheBackend::Memory => info!("Cache backend: in-process memory"),
    }

    Arc::new(MemoryStore::new(config.cache_ttl))
}
