// Hospital Authority open-data feeds
//
// Each feed builds its URL from a language code, fetches it once and wraps
// the payload in an envelope. No state survives between calls.

pub mod aed;
pub mod gopc_quota;
pub mod specialist;

pub use aed::AedWaitingTimes;
pub use gopc_quota::GopcAvgQuota;
pub use specialist::SpecialistWaitingTimes;

use crate::clock::{Clock, LocalClock};
use crate::config::{ErrorPolicy, HealthConfig};
use crate::envelope::{ErrorEnvelope, ToolResponse};
use crate::error::{HealthError, HealthResult};
use crate::fetcher::{FetchResult, HttpJsonFetcher, JsonFetcher};
use crate::language::Language;
use std::sync::Arc;

/// Collaborators shared by every feed.
#[derive(Clone)]
pub struct FeedContext {
    fetcher: Arc<dyn JsonFetcher>,
    clock: Arc<dyn Clock>,
    base_url: String,
}

impl FeedContext {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        clock: Arc<dyn Clock>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            clock,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Substitute `{lang}` into a path template. No escaping is applied.
    pub fn url(&self, template: &str, lang: &Language) -> String {
        if !lang.is_known() {
            tracing::warn!(lang = %lang, "Language code outside en/tc/sc, passing through");
        }
        format!("{}{}", self.base_url, template.replace("{lang}", lang.as_str()))
    }

    pub async fn fetch(&self, url: &str) -> FetchResult {
        self.fetcher.fetch_json(url).await
    }

    pub fn timestamp(&self) -> String {
        self.clock.timestamp()
    }
}

/// Turn a fetch failure into the response dictated by the feed's policy.
pub(crate) fn fail(policy: ErrorPolicy, message: String) -> HealthResult<ToolResponse> {
    match policy {
        ErrorPolicy::Envelope => Ok(ErrorEnvelope::new(message).into()),
        ErrorPolicy::Propagate => Err(HealthError::Upstream(message)),
    }
}

/// The three feeds, wired to one fetcher and clock.
#[derive(Clone)]
pub struct HealthFeeds {
    pub aed: AedWaitingTimes,
    pub specialist: SpecialistWaitingTimes,
    pub gopc_quota: GopcAvgQuota,
}

impl HealthFeeds {
    pub fn new(config: &HealthConfig, fetcher: Arc<dyn JsonFetcher>, clock: Arc<dyn Clock>) -> Self {
        let context = FeedContext::new(fetcher, clock, config.base_url());

        Self {
            aed: AedWaitingTimes::new(context.clone()).with_error_policy(config.policy.aed),
            specialist: SpecialistWaitingTimes::new(context.clone())
                .with_error_policy(config.policy.specialist),
            gopc_quota: GopcAvgQuota::new(context).with_error_policy(config.policy.gopc_quota),
        }
    }

    /// Production wiring: reqwest fetcher and the local wall clock.
    pub fn from_config(config: &HealthConfig) -> HealthResult<Self> {
        let fetcher = Arc::new(HttpJsonFetcher::new(&config.upstream)?);
        Ok(Self::new(config, fetcher, Arc::new(LocalClock)))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    pub const NOW: &str = "2025-07-14T10:00:00";

    /// Fetcher returning a canned result and remembering requested URLs.
    pub struct StubFetcher {
        result: FetchResult,
        pub urls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        pub fn new(result: FetchResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                urls: Mutex::new(Vec::new()),
            })
        }

        pub fn json(value: serde_json::Value) -> Arc<Self> {
            Self::new(FetchResult::from_json(value))
        }

        pub fn requested(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl JsonFetcher for StubFetcher {
        async fn fetch_json(&self, url: &str) -> FetchResult {
            self.urls.lock().unwrap().push(url.to_string());
            self.result.clone()
        }
    }

    pub fn context(fetcher: Arc<StubFetcher>) -> FeedContext {
        let now = NaiveDate::from_ymd_opt(2025, 7, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        FeedContext::new(fetcher, Arc::new(FixedClock(now)), "https://www.ha.org.hk")
    }
}
