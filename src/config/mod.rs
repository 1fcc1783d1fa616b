//! Configuration management for the trendlab collector
//!
//! This module handles loading and validating configuration from
//! environment variables and TOML files, plus loading keyword group
//! definitions from their own TOML file.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::collector::Credentials;
use crate::models::KeywordGroup;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// API endpoint and credentials
    pub api: ApiConfig,

    /// Collector pacing and timeout
    pub collector: CollectorConfig,

    /// Output location
    pub output: OutputConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Service origin
    pub endpoint: String,

    /// Client ID; falls back to the NAVER_CLIENT_ID environment variable
    pub client_id: String,

    /// Client secret; falls back to the NAVER_CLIENT_SECRET environment variable
    pub client_secret: String,
}

/// Collector-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Pacing between consecutive fetches (requests per second)
    pub requests_per_second: u32,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Base directory for relative output paths
    pub dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let requests_per_second = std::env::var("TRENDLAB_RATE_LIMIT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let request_timeout_secs = std::env::var("TRENDLAB_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let endpoint = std::env::var("TRENDLAB_ENDPOINT")
            .unwrap_or_else(|_| crate::collector::fetcher::DATALAB_ENDPOINT.to_string());

        let output_dir = std::env::var("TRENDLAB_OUTPUT_DIR")
            .unwrap_or_else(|_| String::from("."))
            .into();

        let log_level =
            std::env::var("TRENDLAB_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));
        let log_format =
            std::env::var("TRENDLAB_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            api: ApiConfig {
                endpoint,
                client_id: env_client_id(),
                client_secret: env_client_secret(),
            },
            collector: CollectorConfig {
                requests_per_second,
                request_timeout_secs,
            },
            output: OutputConfig { dir: output_dir },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a TOML file
    ///
    /// Missing fields fall back to the same defaults `from_env` uses, so a
    /// partial file is fine; credentials absent from the file still come
    /// from the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.collector.requests_per_second == 0 {
            bail!("requests_per_second must be greater than 0");
        }

        if self.collector.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.collector.request_timeout_secs)
    }
}

impl ApiConfig {
    /// Credentials for the fetcher, failing if either half is missing
    pub fn credentials(&self) -> Result<Credentials> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            bail!("API credentials missing: set NAVER_CLIENT_ID and NAVER_CLIENT_SECRET");
        }

        Ok(Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        })
    }
}

impl OutputConfig {
    /// Resolve an output path against the configured base directory
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: crate::collector::fetcher::DATALAB_ENDPOINT.to_string(),
            client_id: env_client_id(),
            client_secret: env_client_secret(),
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10,
            request_timeout_secs: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_client_id() -> String {
    std::env::var("NAVER_CLIENT_ID").unwrap_or_default()
}

fn env_client_secret() -> String {
    std::env::var("NAVER_CLIENT_SECRET").unwrap_or_default()
}

/// Keyword groups file: `[[group]]` entries with a name and keywords
#[derive(Debug, Deserialize)]
struct GroupsFile {
    #[serde(default)]
    group: Vec<KeywordGroup>,
}

/// Parse keyword group definitions from TOML content
pub fn parse_keyword_groups(content: &str) -> Result<Vec<KeywordGroup>> {
    let file: GroupsFile = toml::from_str(content).context("Failed to parse groups file")?;
    Ok(file.group)
}

/// Load keyword group definitions from a TOML file
pub fn load_keyword_groups(path: &Path) -> Result<Vec<KeywordGroup>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read groups file: {}", path.display()))?;
    parse_keyword_groups(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rate_limit() {
        let mut config = Config::default();
        config.collector.requests_per_second = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [collector]
            requests_per_second = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.collector.requests_per_second, 5);
        assert_eq!(config.collector.request_timeout_secs, 30);
        assert!(config.api.endpoint.starts_with("https://openapi.naver.com"));
    }

    #[test]
    fn test_output_resolve() {
        let output = OutputConfig {
            dir: PathBuf::from("/data"),
        };
        assert_eq!(
            output.resolve(Path::new("trends.csv")),
            PathBuf::from("/data/trends.csv")
        );
        assert_eq!(
            output.resolve(Path::new("/tmp/trends.csv")),
            PathBuf::from("/tmp/trends.csv")
        );
    }

    #[test]
    fn test_parse_keyword_groups() {
        let groups = parse_keyword_groups(
            r#"
            [[group]]
            name = "museum"
            keywords = ["국립중앙박물관", "국중박"]

            [[group]]
            name = "goods"
            keywords = ["뮷즈"]
            "#,
        )
        .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "museum");
        assert_eq!(groups[0].keywords.len(), 2);
        assert_eq!(groups[1].keywords, ["뮷즈"]);
    }

    #[test]
    fn test_empty_groups_file() {
        assert!(parse_keyword_groups("").unwrap().is_empty());
    }
}
