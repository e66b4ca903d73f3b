//! Construction-time settings for the access layer.

use crate::retry::RetryPolicy;
use std::time::Duration;
use url::Url;

/// Base URL of the public PokeAPI.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// How many listing entries one batch request asks for.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Sliding TTL for fetched resources.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Knobs for the access layer, built once at start-up and passed by
/// reference to whatever needs them. Nothing in this crate reads a file,
/// an environment variable, or a global.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the upstream API. Override for mirrors and test servers.
    pub base_url: Url,
    /// Batch size used when walking paginated listings.
    pub page_size: u32,
    /// Sliding TTL for the per-accessor result caches.
    pub cache_ttl: Duration,
    /// Backoff policy shared by single-resource and batch fetches.
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl: DEFAULT_CACHE_TTL,
            retry: RetryPolicy::default(),
        }
    }
}
