//! Configuration loading.
//!
//! [`ConfigLoader`] optionally preloads a `.env` file with `dotenv`, then builds
//! a [`CrmConfig`] from `CRM_*` environment variables. Every variable has a
//! default.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },

    #[error("Failed to load env file {path}: {source}")]
    EnvFileLoad {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq)]
pub struct CrmConfig {
    pub bind_addr: SocketAddr,
    /// Endpoint jobs call when run out of process.
    pub api_url: String,
    pub log_dir: PathBuf,
    pub http_timeout: Duration,
    pub heartbeat_interval: Duration,
    pub low_stock_interval: Duration,
    pub reminder_interval: Duration,
    pub report_interval: Duration,
    /// Channel capacity of each record store.
    pub store_buffer: usize,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            api_url: "http://localhost:8000/graphql".to_string(),
            log_dir: PathBuf::from("/tmp"),
            http_timeout: Duration::from_secs(5),
            heartbeat_interval: Duration::from_secs(300),
            low_stock_interval: Duration::from_secs(12 * 60 * 60),
            reminder_interval: Duration::from_secs(24 * 60 * 60),
            report_interval: Duration::from_secs(7 * 24 * 60 * 60),
            store_buffer: 32,
        }
    }
}

impl CrmConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let config = Self {
            bind_addr: parse_or(&get, "CRM_BIND_ADDR", defaults.bind_addr)?,
            api_url: get("CRM_API_URL").unwrap_or(defaults.api_url),
            log_dir: get("CRM_LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            http_timeout: secs_or(&get, "CRM_HTTP_TIMEOUT_SECS", defaults.http_timeout)?,
            heartbeat_interval: secs_or(&get, "CRM_HEARTBEAT_INTERVAL_SECS", defaults.heartbeat_interval)?,
            low_stock_interval: secs_or(&get, "CRM_LOW_STOCK_INTERVAL_SECS", defaults.low_stock_interval)?,
            reminder_interval: secs_or(&get, "CRM_REMINDER_INTERVAL_SECS", defaults.reminder_interval)?,
            report_interval: secs_or(&get, "CRM_REPORT_INTERVAL_SECS", defaults.report_interval)?,
            store_buffer: parse_or(&get, "CRM_STORE_BUFFER", defaults.store_buffer)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_buffer == 0 {
            return Err(ConfigError::Validation("CRM_STORE_BUFFER must be at least 1".into()));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "CRM_API_URL must be an http(s) URL, got {}",
                self.api_url
            )));
        }
        let intervals = [
            ("CRM_HTTP_TIMEOUT_SECS", self.http_timeout),
            ("CRM_HEARTBEAT_INTERVAL_SECS", self.heartbeat_interval),
            ("CRM_LOW_STOCK_INTERVAL_SECS", self.low_stock_interval),
            ("CRM_REMINDER_INTERVAL_SECS", self.reminder_interval),
            ("CRM_REPORT_INTERVAL_SECS", self.report_interval),
        ];
        if let Some((var, _)) = intervals.iter().find(|(_, d)| d.is_zero()) {
            return Err(ConfigError::Validation(format!("{var} must be positive")));
        }
        Ok(())
    }
}

fn parse_or<T: FromStr>(get: &impl Fn(&str) -> Option<String>, var: &str, default: T) -> Result<T> {
    match get(var) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn secs_or(get: &impl Fn(&str) -> Option<String>, var: &str, default: Duration) -> Result<Duration> {
    parse_or(get, var, default.as_secs()).map(Duration::from_secs)
}

/// Loads [`CrmConfig`], with values from an optional `.env` file taking effect first.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    env_file_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(env_file_path: Option<PathBuf>) -> Self {
        Self { env_file_path }
    }

    pub fn load(&self) -> Result<CrmConfig> {
        if let Some(path) = &self.env_file_path {
            load_env_file(path)?;
        }
        CrmConfig::from_env()
    }
}

fn load_env_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ConfigError::EnvFileLoad {
            path: path.to_path_buf(),
            source: dotenv::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )),
        });
    }
    dotenv::from_path(path).map_err(|e| ConfigError::EnvFileLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = CrmConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CrmConfig::default());
        assert_eq!(config.log_dir, PathBuf::from("/tmp"));
        assert_eq!(config.heartbeat_interval, Duration::from_secs(300));
    }

    #[test]
    fn values_override_defaults() {
        let config = CrmConfig::from_lookup(lookup(&[
            ("CRM_BIND_ADDR", "0.0.0.0:9000"),
            ("CRM_LOG_DIR", "/var/log/crm"),
            ("CRM_REPORT_INTERVAL_SECS", "60"),
            ("CRM_STORE_BUFFER", " 8 "),
            ("CRM_API_URL", ""),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.log_dir, PathBuf::from("/var/log/crm"));
        assert_eq!(config.report_interval, Duration::from_secs(60));
        assert_eq!(config.store_buffer, 8);
        assert_eq!(config.api_url, "http://localhost:8000/graphql");
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = CrmConfig::from_lookup(lookup(&[("CRM_HTTP_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, value } if var == "CRM_HTTP_TIMEOUT_SECS" && value == "soon"));

        let err = CrmConfig::from_lookup(lookup(&[("CRM_STORE_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = CrmConfig::from_lookup(lookup(&[("CRM_HEARTBEAT_INTERVAL_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(msg) if msg.contains("HEARTBEAT")));
    }

    #[test]
    fn missing_env_file_is_an_error() {
        let loader = ConfigLoader::new(Some(PathBuf::from("/nonexistent/crm.env")));
        assert!(matches!(loader.load(), Err(ConfigError::EnvFileLoad { .. })));
    }
}
