//! Redis-backed store

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use tracing::info;

use crate::error::Result;
use crate::store::KeyValueStore;

const CONNECT_RETRIES: usize = 2;
const RETRY_MAX_DELAY_MS: u64 = 500;
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(2);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Store backed by a Redis server
///
/// Writes use `SET key value EX ttl`, so value and expiry land together.
pub struct RedisStore {
    conn: ConnectionManager,
    ttl: Duration,
}

impl RedisStore {
    /// Connect to the server at `url` (`redis://[:password@]host[:port][/db]`)
    ///
    /// Gives up after a couple of short retries so an unreachable server is
    /// reported within seconds. Commands time out the same way, which turns a
    /// stalled server into store errors instead of hung requests.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(CONNECT_RETRIES)
            .set_max_delay(RETRY_MAX_DELAY_MS)
            .set_connection_timeout(CONNECTION_TIMEOUT)
            .set_response_timeout(RESPONSE_TIMEOUT);
        let conn = client.get_connection_manager_with_config(config).await?;
        info!(ttl_secs = ttl.as_secs(), "Connected to Redis");

        Ok(Self { conn, ttl })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set_ex(key, value, self.ttl.as_secs().max(1)).await?;
        Ok(())
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
