//! Read-through forecast cache with TTL expiration
//!
//! [`ForecastCache`] looks forecasts up in a [`KeyValueStore`] and, on a miss,
//! pulls them from a [`ForecastSource`] and writes them back. Entries expire
//! after the store's TTL; there is no explicit delete.

mod cache;
mod error;
mod memory;
mod redis_store;
mod source;
mod store;
mod types;

pub use cache::{ForecastCache, DEFAULT_TTL};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use source::ForecastSource;
pub use store::KeyValueStore;
pub use types::CacheStats;
