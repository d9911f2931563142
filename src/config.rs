//! Server configuration from environment variables.
//!
//! HOST (default 0.0.0.0), PORT (8080), INACTIVITY_TIMEOUT_HOURS (12),
//! CLEANUP_INTERVAL_MINUTES (30). Values that do not parse fall back to the default.

use std::time::Duration;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

const DEFAULT_INACTIVITY_HOURS: u64 = 12;
const DEFAULT_CLEANUP_MINUTES: u64 = 30;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tournaments not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    pub cleanup_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(default_host),
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or_else(default_port),
            inactivity_timeout: Duration::from_secs(
                parsed("INACTIVITY_TIMEOUT_HOURS").unwrap_or(DEFAULT_INACTIVITY_HOURS) * 3600,
            ),
            cleanup_interval: Duration::from_secs(
                parsed("CLEANUP_INTERVAL_MINUTES")
                    .filter(|&m| m > 0)
                    .unwrap_or(DEFAULT_CLEANUP_MINUTES)
                    * 60,
            ),
        }
    }
}
