//! Tap configuration
//!
//! The configuration is a flat JSON (or YAML) document supplied by the
//! orchestrating process. Only `auth_token` is required.

use crate::error::{Error, Result, ResultExt};
use crate::types::OptionStringExt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Subdomain used when none is configured
pub const DEFAULT_SUBDOMAIN: &str = "demo";

/// User-Agent sent when none is configured; Syncro asks integrations to identify themselves
pub const DEFAULT_USER_AGENT: &str = "hotglue (support@hotglue.xyz)";

/// Request timeout used when none is configured
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Runtime configuration for an extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// API token placed in the `Authorization` header
    #[serde(default)]
    pub auth_token: String,

    /// Account subdomain (`https://<subdomain>.syncromsp.com`)
    #[serde(default)]
    pub subdomain: Option<String>,

    /// Full API root, overriding the subdomain-derived URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Initial `per_page` value; unset means the API default
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Client-side request rate cap; unset disables it
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl TapConfig {
    /// Create a config with only a token set
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            subdomain: None,
            base_url: None,
            user_agent: None,
            page_size: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            requests_per_second: None,
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// Check required fields and value ranges
    pub fn validate(&self) -> Result<()> {
        if self.auth_token.trim().is_empty() {
            return Err(Error::missing_field("auth_token"));
        }
        if self.page_size == Some(0) {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        if self.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be at least 1",
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::invalid_value(
                "request_timeout_secs",
                "must be at least 1",
            ));
        }
        if let Some(subdomain) = &self.subdomain {
            if subdomain.contains(['/', ':', ' ']) {
                return Err(Error::invalid_value(
                    "subdomain",
                    format!("'{subdomain}' is not a bare subdomain"),
                ));
            }
        }
        Ok(())
    }

    /// API root all resource paths are joined onto
    pub fn api_base_url(&self) -> String {
        if let Some(base) = self.base_url.clone().none_if_empty() {
            return base;
        }
        let subdomain = self
            .subdomain
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| DEFAULT_SUBDOMAIN.to_string());
        format!("https://{subdomain}.syncromsp.com/api/v1")
    }

    /// User-Agent header value
    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
