use std::time::Duration;

use pagewise_core::DEFAULT_LIMIT;

/// One week, the lifetime of cached pages and of the dirty flag.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(604_800);

/// Pagination engine configuration.
///
/// Controls page sizing for requests that do not supply `first`/`last`.
#[derive(Debug, Clone)]
pub struct PagingConfig {
    /// Page size used when neither `first` nor `last` is supplied.
    pub default_limit: u32,
    /// Upper bound applied to `first`/`last`. `None` leaves them uncapped.
    pub max_limit: Option<u32>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

/// Read-through cache configuration.
///
/// Passed explicitly to the cache; nothing here is read from globals.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Namespace prepended to every page key (`<prefix>:<signature>`).
    pub key_prefix: String,
    /// Key of the shared dirty flag guarding the whole namespace.
    pub dirty_flag_key: String,
    /// Lifetime of cached pages and of the dirty flag.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: "connection".to_string(),
            dirty_flag_key: "isUpdated".to_string(),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_config_defaults() {
        let config = PagingConfig::default();
        assert_eq!(config.default_limit, 20);
        assert!(config.max_limit.is_none());
    }

    #[test]
    fn cache_config_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.key_prefix, "connection");
        assert_eq!(config.dirty_flag_key, "isUpdated");
        assert_eq!(config.ttl, Duration::from_secs(7 * 24 * 60 * 60));
    }
}
