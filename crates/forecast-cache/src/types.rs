//! Cache types

use serde::{Deserialize, Serialize};

/// Statistics about the forecast cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub backend: String,
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
}
