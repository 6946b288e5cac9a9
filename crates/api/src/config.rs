use std::str::FromStr;

use vendora_core::catalog::DEFAULT_MAX_DEPTH;

/// Runtime settings for the catalog API, read once at startup.
///
/// | Env Var                 | Field                   | Default                 |
/// |-------------------------|-------------------------|-------------------------|
/// | `HOST`                  | `host`                  | `0.0.0.0`               |
/// | `PORT`                  | `port`                  | `3000`                  |
/// | `CORS_ORIGINS`          | `cors_origins`          | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS`  | `request_timeout_secs`  | `30`                    |
/// | `SHUTDOWN_TIMEOUT_SECS` | `shutdown_timeout_secs` | `30`                    |
/// | `CATALOG_MAX_DEPTH`     | `max_tree_depth`        | `64`                    |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Comma-separated in the environment; blank entries are dropped.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Bound on levels walked by tree and path operations. Always >= 1.
    /// Response serialization recurses per level, so keep this modest.
    pub max_tree_depth: usize,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    ///
    /// Panics on malformed values so a bad deployment fails at boot rather
    /// than on the first request.
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let max_tree_depth: usize = env_or("CATALOG_MAX_DEPTH", DEFAULT_MAX_DEPTH);
        assert!(max_tree_depth > 0, "CATALOG_MAX_DEPTH must be at least 1");

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("PORT", 3000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            max_tree_depth,
        }
    }
}

/// Parse `key` from the environment, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}
