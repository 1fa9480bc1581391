// JSON fetcher for the upstream open-data endpoints

use crate::config::UpstreamConfig;
use crate::error::{HealthError, HealthResult};
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of one upstream fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    Success(serde_json::Value),
    Failure(String),
}

impl FetchResult {
    /// Wrap parsed JSON, treating a sentinel `{"error": ...}` object as a failure.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value.get("error") {
            Some(serde_json::Value::String(message)) => Self::Failure(message.clone()),
            Some(other) if value.is_object() => Self::Failure(other.to_string()),
            _ => Self::Success(value),
        }
    }

    pub fn into_result(self) -> Result<serde_json::Value, String> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(message) => Err(message),
        }
    }
}

impl From<HealthError> for FetchResult {
    fn from(err: HealthError) -> Self {
        Self::Failure(err.to_string())
    }
}

/// Anything that can turn a URL into parsed JSON.
#[async_trait::async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str) -> FetchResult;
}

/// Fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpJsonFetcher {
    client: reqwest::Client,
}

impl HttpJsonFetcher {
    pub fn new(config: &UpstreamConfig) -> HealthResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> HealthResult<serde_json::Value> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HealthError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| HealthError::Json {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl JsonFetcher for HttpJsonFetcher {
    async fn fetch_json(&self, url: &str) -> FetchResult {
        debug!(url = %url, "GET upstream feed");

        match self.get(url).await {
            Ok(value) => FetchResult::from_json(value),
            Err(e) => {
                warn!(url = %url, error = %e, "Upstream fetch failed");
                e.into()
            }
        }
    }
}
