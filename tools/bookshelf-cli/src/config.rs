//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Shopper settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_json = path.extension().is_some_and(|ext| ext == "json");
        Self::parse(&content, is_json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse config text as JSON or TOML.
    pub fn parse(content: &str, is_json: bool) -> Result<Self> {
        if is_json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }
}

/// Where the storefront API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root; endpoint paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Shopper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// User the checkout is made for.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    "1".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("", false).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.session.user_id, "1");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_toml_sections() {
        let config = CliConfig::parse(
            r#"
[api]
base_url = "https://books.example.com/api"
timeout_ms = 2500

[session]
user_id = "42"

[logging]
level = "debug"
format = "json"
"#,
            false,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://books.example.com/api");
        assert_eq!(config.api.timeout(), Duration::from_millis(2500));
        assert_eq!(config.session.user_id, "42");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_json_partial() {
        let config = CliConfig::parse(r#"{"session": {"user_id": "7"}}"#, true).unwrap();
        assert_eq!(config.session.user_id, "7");
        assert_eq!(config.api.timeout_ms, 10_000);
    }

    #[test]
    fn test_bad_format_is_rejected() {
        assert!(CliConfig::parse("[logging]\nformat = \"xml\"\n", false).is_err());
    }
}
