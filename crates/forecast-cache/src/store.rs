use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// String key-value store with a fixed per-entry TTL
///
/// The TTL is chosen when the store is built and enforced by the store
/// itself. Individual calls are atomic; nothing spans a get and a set.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, resetting its expiry to now + TTL
    async fn set(&self, key: &str, value: String) -> Result<()>;

    fn ttl(&self) -> Duration;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}
