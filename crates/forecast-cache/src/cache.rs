//! Read-through forecast cache

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use yr_forecast::{ForecastKey, ForecastRecord};

use crate::error::Result;
use crate::source::ForecastSource;
use crate::store::KeyValueStore;
use crate::types::CacheStats;

/// How long forecasts stay cached unless configured otherwise
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Forecast cache in front of a [`ForecastSource`]
///
/// Concurrent misses on one key are not coalesced: each caller fetches and
/// writes back on its own, and the last write wins.
pub struct ForecastCache {
    store: Arc<dyn KeyValueStore>,
    source: Arc<dyn ForecastSource>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ForecastCache {
    pub fn new(store: Arc<dyn KeyValueStore>, source: Arc<dyn ForecastSource>) -> Self {
        Self {
            store,
            source,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the cached forecast for `key`, fetching it on a miss
    ///
    /// The flag is `true` when the record came from the store. Source errors
    /// are returned as-is and leave the store untouched.
    pub async fn get_or_fetch(
        &self,
        key: &ForecastKey,
    ) -> yr_forecast::Result<(ForecastRecord, bool)> {
        if let Some(record) = self.lookup(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Forecast cache hit");
            return Ok((record, true));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Forecast cache miss");

        let record = self.source.fetch_forecast(key).await?;

        if let Err(e) = self.set(key, &record).await {
            warn!(key = %key, error = %e, "Failed to cache forecast");
            // The caller still gets the fresh record
        }

        Ok((record, false))
    }

    /// Store `record` under `key` with a fresh TTL
    pub async fn set(&self, key: &ForecastKey, record: &ForecastRecord) -> Result<()> {
        let value = serde_json::to_string(record)?;
        self.store.set(key.as_str(), value).await
    }

    /// Read from the store; unreadable entries and store failures count as misses
    async fn lookup(&self, key: &ForecastKey) -> Option<ForecastRecord> {
        let value = match self.store.get(key.as_str()).await {
            Ok(value) => value?,
            Err(e) => {
                warn!(key = %key, error = %e, "Forecast cache read failed");
                return None;
            }
        };

        match serde_json::from_str(&value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            backend: self.store.backend().to_string(),
            ttl_secs: self.store.ttl().as_secs(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
