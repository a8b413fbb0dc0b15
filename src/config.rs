//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://reqres.in";
const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://localhost,https://www.memoglobal.com,https://www.google.com";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the upstream user API
    pub upstream_base_url: String,
    /// Timeout in seconds for a single upstream call
    pub upstream_timeout: u64,
    /// Total weight the record cache may hold
    pub cache_capacity: u64,
    /// Weight charged per cached record
    pub entry_weight: u64,
    /// Lifetime in seconds of a cached record
    pub cache_ttl: u64,
    /// Background sweep interval in seconds, 0 disables the sweeper
    pub cleanup_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Origins allowed by the CORS policy
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `UPSTREAM_BASE_URL` - Upstream API base (default: https://reqres.in)
    /// - `UPSTREAM_TIMEOUT` - Upstream call timeout in seconds (default: 10)
    /// - `CACHE_CAPACITY` - Cache capacity in weight units (default: 1024)
    /// - `ENTRY_WEIGHT` - Weight per cached record (default: 10)
    /// - `CACHE_TTL` - Record lifetime in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds, 0 = off (default: 0)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `ALLOWED_ORIGINS` - Comma separated CORS origins
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            cache_capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.cache_capacity),
            entry_weight: parse_var("ENTRY_WEIGHT").unwrap_or(defaults.entry_weight),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| split_origins(&v))
                .unwrap_or(defaults.allowed_origins),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: 10,
            cache_capacity: 1024,
            entry_weight: 10,
            cache_ttl: 3600,
            cleanup_interval: 0,
            server_port: 3000,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
