//! Probe configuration and constants.
//!
//! Loads the probe target from environment variables with fallback defaults.
//! `ProbeConfig` is constructed once at startup and passed by reference into
//! the probe; no environment lookups happen inside the request logic.

use std::time::Duration;

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable naming the target host
pub const ENV_HOST: &str = "HEALTH_CHECK_HOST";

/// Environment variable naming the target port
pub const ENV_PORT: &str = "PORT";

/// Environment variable naming the request path
pub const ENV_PATH: &str = "HEALTH_CHECK_PATH";

/// Environment variable naming the request timeout in milliseconds
pub const ENV_TIMEOUT: &str = "HEALTH_CHECK_TIMEOUT";

// =============================================================================
// Defaults and Constants
// =============================================================================

/// Default target host when `HEALTH_CHECK_HOST` is not set
pub const DEFAULT_HOST: &str = "localhost";

/// Default target port when `PORT` is not set
pub const DEFAULT_PORT: u16 = 3000;

/// Default request path when `HEALTH_CHECK_PATH` is not set
pub const DEFAULT_PATH: &str = "/health";

/// Default request timeout in milliseconds when `HEALTH_CHECK_TIMEOUT` is not set
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// User-Agent header sent with every probe request
pub const USER_AGENT: &str = "Docker-Healthcheck/1.0";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "healthprobe=warn";

/// Probe target configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Hostname of the endpoint to probe
    pub host: String,
    /// TCP port of the endpoint to probe
    pub port: u16,
    /// Request path, including the leading slash
    pub path: String,
    /// Total request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProbeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup function.
    ///
    /// Absent variables fall back to defaults. A present but malformed numeric
    /// value is a startup error rather than a silent fallback, so the probe
    /// never runs against a target it was not asked to check.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let path = lookup(ENV_PATH).unwrap_or_else(|| DEFAULT_PATH.to_string());

        let port = match lookup(ENV_PORT) {
            Some(raw) => parse_number(ENV_PORT, &raw)?,
            None => DEFAULT_PORT,
        };

        let timeout_ms = match lookup(ENV_TIMEOUT) {
            Some(raw) => parse_number(ENV_TIMEOUT, &raw)?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            host,
            port,
            path,
            timeout_ms,
        })
    }

    /// Full probe URL: `http://{host}:{port}{path}`
    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.host, self.port, self.path)
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} is not a valid number")]
    InvalidNumber { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ProbeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3000);
        assert_eq!(config.path, "/health");
        assert_eq!(config.timeout_ms, 3000);
    }

    #[test]
    fn environment_values_override_defaults() {
        let config = ProbeConfig::from_lookup(|name| match name {
            ENV_HOST => Some("app".to_string()),
            ENV_PORT => Some("8080".to_string()),
            ENV_PATH => Some("/healthz".to_string()),
            ENV_TIMEOUT => Some("500".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.host, "app");
        assert_eq!(config.port, 8080);
        assert_eq!(config.path, "/healthz");
        assert_eq!(config.timeout_ms, 500);
    }

    #[test]
    fn malformed_port_is_a_startup_error() {
        let result = ProbeConfig::from_lookup(|name| match name {
            ENV_PORT => Some("not-a-port".to_string()),
            _ => None,
        });

        match result {
            Err(ConfigError::InvalidNumber { name, value }) => {
                assert_eq!(name, ENV_PORT);
                assert_eq!(value, "not-a-port");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn malformed_timeout_is_a_startup_error() {
        let result = ProbeConfig::from_lookup(|name| match name {
            ENV_TIMEOUT => Some("3s".to_string()),
            _ => None,
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber {
                name: ENV_TIMEOUT,
                ..
            })
        ));
    }

    #[test]
    fn numeric_values_tolerate_surrounding_whitespace() {
        let config = ProbeConfig::from_lookup(|name| match name {
            ENV_TIMEOUT => Some(" 1500 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.timeout_ms, 1500);
    }

    #[test]
    fn url_joins_host_port_and_path() {
        let config = ProbeConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
            path: "/status".to_string(),
            timeout_ms: 1000,
        };
        assert_eq!(config.url(), "http://127.0.0.1:9090/status");
    }
}
