//! Provider configuration
//!
//! Connection settings for the Cloud Foundry API. Values come from a JSON
//! file, the environment, or explicit overrides, in increasing priority.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CfError, CfResult};

pub const ENV_API_ENDPOINT: &str = "CF_API_ENDPOINT";
pub const ENV_ACCESS_TOKEN: &str = "CF_ACCESS_TOKEN";
pub const ENV_REQUEST_TIMEOUT: &str = "CF_REQUEST_TIMEOUT";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("carina-provider-cloudfoundry/{}", env!("CARGO_PKG_VERSION"))
}

/// Settings needed to talk to a Cloud Foundry API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the API, e.g. `https://api.example.com`
    #[serde(default)]
    pub api_endpoint: String,
    /// OAuth access token, sent as a bearer token
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_endpoint: String::new(),
            access_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn new(api_endpoint: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Load from a JSON file
    pub fn from_file(path: &Path) -> CfResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CfError::configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            CfError::configuration(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load from the process environment
    pub fn from_env() -> CfResult<Self> {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from an environment lookup onto this config
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> CfResult<Self> {
        if let Some(endpoint) = lookup(ENV_API_ENDPOINT) {
            self.api_endpoint = endpoint;
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = timeout.trim().parse().map_err(|_| {
                CfError::configuration(format!(
                    "{} must be a number of seconds, got '{}'",
                    ENV_REQUEST_TIMEOUT, timeout
                ))
            })?;
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The access token without any `bearer ` prefix copied from `cf oauth-token`
    pub fn bearer_token(&self) -> Option<&str> {
        let token = self.access_token.as_deref()?.trim();
        let token = token
            .strip_prefix("bearer ")
            .or_else(|| token.strip_prefix("Bearer "))
            .unwrap_or(token);
        (!token.is_empty()).then_some(token)
    }

    /// Check the endpoint and return it without a trailing slash
    pub fn validated_endpoint(&self) -> CfResult<String> {
        let endpoint = self.api_endpoint.trim();
        if endpoint.is_empty() {
            return Err(CfError::configuration(format!(
                "API endpoint is not set (use {} or --endpoint)",
                ENV_API_ENDPOINT
            )));
        }

        let parsed = url::Url::parse(endpoint).map_err(|e| {
            CfError::configuration(format!("Invalid API endpoint '{}': {}", endpoint, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CfError::configuration(format!(
                "API endpoint must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(endpoint.trim_end_matches('/').to_string())
    }
}
