use std::env;
use std::path::PathBuf;
use std::time::Duration;

use forecast_cache::DEFAULT_TTL;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379/";
const DEFAULT_YR_BASE_URL: &str = "http://www.yr.no";

/// Where cached forecasts live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cache_backend: CacheBackend,
    pub redis_url: String,
    pub cache_ttl: Duration,
    pub yr_base_url: String,
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            cache_backend: CacheBackend::Redis,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            yr_base_url: DEFAULT_YR_BASE_URL.to_string(),
            public_dir: PathBuf::from("./public"),
        }
    }
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let cache_backend = match lookup("CACHE_BACKEND").as_deref() {
            Some("memory") => CacheBackend::Memory,
            _ => CacheBackend::Redis,
        };

        // REDISTOGO_URL is what the Heroku add-on sets
        let redis_url = lookup("REDIS_URL")
            .or_else(|| lookup("REDISTOGO_URL"))
            .unwrap_or(defaults.redis_url);

        let cache_ttl = lookup("CACHE_TTL_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let yr_base_url = lookup("YR_BASE_URL").unwrap_or(defaults.yr_base_url);

        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.public_dir);

        Self {
            port,
            cache_backend,
            redis_url,
            cache_ttl,
            yr_base_url,
            public_dir,
        }
    }

    /// The Redis URL with any password masked, for logging
    pub fn redacted_redis_url(&self) -> String {
        match url::Url::parse(&self.redis_url) {
            Ok(mut parsed) => {
                if parsed.password().is_some() {
                    let _ = parsed.set_password(Some("***"));
                }
                parsed.to_string()
            }
            Err(_) => "<invalid redis url>".to_string(),
        }
    }
}
