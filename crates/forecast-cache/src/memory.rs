//! In-process store backed by moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use crate::error::Result;
use crate::store::KeyValueStore;

const MAX_ENTRIES: u64 = 10_000;

/// In-memory store; entries expire `ttl` after their last write
pub struct MemoryStore {
    cache: Cache<String, String>,
    ttl: Duration,
}

impl MemoryStore {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
