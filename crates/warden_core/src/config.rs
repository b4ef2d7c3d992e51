//! Runtime configuration.
//!
//! Loaded from an optional `warden.toml`, with environment variables taking
//! precedence for deployment-sensitive values (the shared envelope key in
//! particular should never live in a checked-in file).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable carrying the shared envelope key.
pub const ENV_SHARED_KEY: &str = "WARDEN_SHARED_KEY";
/// Environment variable overriding the bind address.
pub const ENV_BIND_ADDR: &str = "WARDEN_BIND_ADDR";

/// Default public code-search endpoint for the leak check.
pub const DEFAULT_LEAK_SEARCH_URL: &str = "https://grep.app/api/search";

fn default_bind_addr() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    30
}

fn default_execute_timeout_cap_ms() -> u64 {
    30_000
}

fn default_leak_search_url() -> String {
    DEFAULT_LEAK_SEARCH_URL.to_string()
}

/// Sliding fixed-window rate limit settings for the execute endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in milliseconds.
    #[serde(default = "RateLimitConfig::default_window_ms")]
    pub window_ms: u64,
    /// Maximum requests per client identity within one window.
    #[serde(default = "RateLimitConfig::default_max_requests")]
    pub max_requests: u32,
}

impl RateLimitConfig {
    fn default_window_ms() -> u64 {
        60_000
    }

    fn default_max_requests() -> u32 {
        20
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: Self::default_window_ms(),
            max_requests: Self::default_max_requests(),
        }
    }
}

/// Top-level configuration for the server and CLI.
///
/// All fields are optional in the file and default to local-development
/// values; environment variables override the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Shared symmetric key for the transport envelope.
    #[serde(default)]
    pub shared_key: Option<String>,

    /// Timeout in seconds for each outbound provider call.
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Hard cap in milliseconds on the execute endpoint's per-request timeout.
    #[serde(default = "default_execute_timeout_cap_ms")]
    pub execute_timeout_cap_ms: u64,

    /// Base URL of the public code-search API used by the leak check.
    #[serde(default = "default_leak_search_url")]
    pub leak_search_url: String,

    /// Rate limit applied to the execute endpoint.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for WardenConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            shared_key: None,
            provider_timeout_secs: default_provider_timeout_secs(),
            execute_timeout_cap_ms: default_execute_timeout_cap_ms(),
            leak_search_url: default_leak_search_url(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl WardenConfig {
    /// Loads configuration from a TOML file, then applies environment
    /// overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.apply_env();
        Ok(config)
    }

    /// Returns defaults with environment overrides applied, for deployments
    /// that carry no config file at all.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(ENV_SHARED_KEY)
            && !key.is_empty()
        {
            self.shared_key = Some(key);
        }
        if let Ok(addr) = std::env::var(ENV_BIND_ADDR)
            && !addr.is_empty()
        {
            self.bind_addr = addr;
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests unwrap for clearer failure messages")]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn defaults_are_local_development_values() {
        let config = WardenConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8787");
        assert_eq!(config.provider_timeout_secs, 30);
        assert!(config.shared_key.is_none());
    }

    #[test]
    fn loads_partial_toml_with_defaults_for_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:9000\"").unwrap();
        writeln!(file, "[rate_limit]").unwrap();
        writeln!(file, "max_requests = 5").unwrap();

        let config = WardenConfig::load(file.path()).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.execute_timeout_cap_ms, 30_000);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WardenConfig::load(Path::new("/nonexistent/warden.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = [not valid").unwrap();
        let err = WardenConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
