//! Engine configuration read from the process environment.

use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::feed_cache::DEFAULT_FRESHNESS_WINDOW;
use crate::infrastructure::youtube::YouTubeConfig;
use crate::use_cases::admin::DEFAULT_ADMIN_PIN;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STORE_DB: &str = "loothub.db";

/// Which key-value store adapter backs the repositories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" | "mem" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub store_db: String,
    pub youtube: YouTubeConfig,
    pub feed_cache_ttl: Duration,
    pub admin_pin: String,
    /// Whether `ADMIN_PIN` was explicitly set.
    pub admin_pin_configured: bool,
    pub simulate_latency: bool,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let youtube_defaults = YouTubeConfig::default();
        let store_backend = match var("STORE_BACKEND").map(|s| s.parse::<StoreBackend>()) {
            Some(Ok(backend)) => backend,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Falling back to sqlite store");
                StoreBackend::Sqlite
            }
            None => StoreBackend::default(),
        };
        let admin_pin = var("ADMIN_PIN");

        Self {
            server_host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            server_port: var("SERVER_PORT")
                .or_else(|| var("PORT"))
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            store_backend,
            store_db: var("STORE_DB").unwrap_or_else(|| DEFAULT_STORE_DB.into()),
            youtube: YouTubeConfig {
                base_url: var("YOUTUBE_BASE_URL").unwrap_or(youtube_defaults.base_url),
                api_key: var("YOUTUBE_API_KEY"),
                channel_id: var("YOUTUBE_CHANNEL_ID").unwrap_or(youtube_defaults.channel_id),
                max_results: var("YOUTUBE_MAX_RESULTS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(youtube_defaults.max_results),
            },
            feed_cache_ttl: var("FEED_CACHE_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_FRESHNESS_WINDOW),
            admin_pin_configured: admin_pin.is_some(),
            admin_pin: admin_pin.unwrap_or_else(|| DEFAULT_ADMIN_PIN.into()),
            simulate_latency: var("SIMULATE_LATENCY")
                .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> EngineConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config(&[]);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.store_backend, StoreBackend::Sqlite);
        assert_eq!(config.store_db, "loothub.db");
        assert_eq!(config.youtube, YouTubeConfig::default());
        assert_eq!(config.feed_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.admin_pin, "admin123");
        assert!(!config.admin_pin_configured);
        assert!(!config.simulate_latency);
    }

    #[test]
    fn port_falls_back_to_generic_port_variable() {
        assert_eq!(config(&[("PORT", "8080")]).server_port, 8080);
        assert_eq!(
            config(&[("SERVER_PORT", "9000"), ("PORT", "8080")]).server_port,
            9000
        );
    }

    #[test]
    fn unparseable_numbers_use_defaults() {
        let config = config(&[
            ("SERVER_PORT", "eighty"),
            ("YOUTUBE_MAX_RESULTS", "-3"),
            ("FEED_CACHE_TTL_SECS", "soon"),
        ]);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.youtube.max_results, 10);
        assert_eq!(config.feed_cache_ttl, DEFAULT_FRESHNESS_WINDOW);
    }

    #[test]
    fn reads_feed_and_admin_settings() {
        let config = config(&[
            ("STORE_BACKEND", "Memory"),
            ("YOUTUBE_API_KEY", "key-123"),
            ("YOUTUBE_CHANNEL_ID", "chan"),
            ("FEED_CACHE_TTL_SECS", "60"),
            ("ADMIN_PIN", "2468"),
            ("SIMULATE_LATENCY", "true"),
        ]);
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.youtube.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.youtube.channel_id, "chan");
        assert_eq!(config.feed_cache_ttl, Duration::from_secs(60));
        assert_eq!(config.admin_pin, "2468");
        assert!(config.admin_pin_configured);
        assert!(config.simulate_latency);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[("YOUTUBE_API_KEY", "  "), ("ADMIN_PIN", "")]);
        assert_eq!(config.youtube.api_key, None);
        assert_eq!(config.admin_pin, "admin123");
    }

    #[test]
    fn unknown_backend_falls_back_to_sqlite() {
        assert_eq!(
            config(&[("STORE_BACKEND", "redis")]).store_backend,
            StoreBackend::Sqlite
        );
    }
}
