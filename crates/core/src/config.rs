use crate::error::{HealthError, HealthResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration shared by the stdio and HTTP binaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    #[serde(default)]
    pub upstream: UpstreamConfig,

    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://www.ha.org.hk".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("hk-health-mcp/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// How a feed reports a failed fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Return `{"type": "Error", "error": ...}` in the normal result channel
    #[default]
    Envelope,
    /// Surface the failure as an error to the host
    Propagate,
}

/// Per-feed error policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub aed: ErrorPolicy,

    #[serde(default)]
    pub specialist: ErrorPolicy,

    #[serde(default)]
    pub gopc_quota: ErrorPolicy,
}

impl HealthConfig {
    pub fn load(config_path: &Path) -> HealthResult<Self> {
        // Load config file if it exists, otherwise use defaults
        let config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)?
        } else {
            tracing::info!(
                path = %config_path.display(),
                "Configuration file not found, using defaults"
            );
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> HealthResult<Self> {
        toml::from_str(content)
            .map_err(|e| HealthError::Config(format!("Failed to parse configuration: {e}")))
    }

    pub fn validate(&self) -> HealthResult<()> {
        let base = url::Url::parse(&self.upstream.base_url).map_err(|e| {
            HealthError::Config(format!("Invalid base_url {:?}: {e}", self.upstream.base_url))
        })?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(HealthError::Config(format!(
                "base_url must be http or https, got: {}",
                base.scheme()
            )));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(HealthError::Config("timeout_secs must be positive".to_string()));
        }

        Ok(())
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.upstream.base_url.trim_end_matches('/')
    }
}
