pub mod aed;
pub mod gopc_quota;
pub mod specialist;
mod registry;

pub use aed::AedWaitingTimesTool;
pub use gopc_quota::GopcAvgQuotaTool;
pub use specialist::SpecialistWaitingTimesTool;
pub use registry::{
    json_schema_enum, json_schema_object, json_schema_string, parse_arguments, Tool, ToolRegistry,
};

use crate::protocol::CallToolResult;
use hk_health_core::{HealthFeeds, HealthResult, Language, ToolResponse};

const LANG_DESCRIPTION: &str =
    "Language (en/tc/sc) English, Traditional Chinese, Simplified Chinese. Default English";

/// Schema for the `lang` parameter shared by every feed tool.
pub(crate) fn lang_schema() -> serde_json::Value {
    json_schema_enum(LANG_DESCRIPTION, &Language::KNOWN, Language::En.as_str())
}

/// Wrap a feed response for MCP. Propagated faults stay errors for the dispatcher.
pub(crate) fn into_call_result(response: HealthResult<ToolResponse>) -> anyhow::Result<CallToolResult> {
    Ok(CallToolResult::json(response?.to_value()))
}

/// Register all three feed tools. Binds metadata only, no network I/O.
pub fn register_all(registry: &mut ToolRegistry, feeds: &HealthFeeds) {
    aed::register(registry, feeds);
    specialist::register(registry, feeds);
    gopc_quota::register(registry, feeds);
}

#[cfg(test)]
pub(crate) mod testing {
    use chrono::NaiveDate;
    use hk_health_core::{FetchResult, FixedClock, HealthConfig, HealthFeeds, JsonFetcher};
    use std::sync::{Arc, Mutex};

    pub const NOW: &str = "2025-07-14T10:00:00";

    /// Fetcher returning one canned payload and recording URLs.
    pub struct CannedFetcher {
        result: FetchResult,
        urls: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        pub fn new(value: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                result: FetchResult::from_json(value),
                urls: Mutex::new(Vec::new()),
            })
        }

        pub fn requested(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl JsonFetcher for CannedFetcher {
        async fn fetch_json(&self, url: &str) -> FetchResult {
            self.urls.lock().unwrap().push(url.to_string());
            self.result.clone()
        }
    }

    pub fn feeds(fetcher: Arc<CannedFetcher>) -> HealthFeeds {
        feeds_with_config(&HealthConfig::default(), fetcher)
    }

    pub fn feeds_with_config(config: &HealthConfig, fetcher: Arc<CannedFetcher>) -> HealthFeeds {
        let now = NaiveDate::from_ymd_opt(2025, 7, 14)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        HealthFeeds::new(config, fetcher, Arc::new(FixedClock(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_all_binds_three_tools() {
        let mut registry = ToolRegistry::new();
        register_all(&mut registry, &feeds(CannedFetcher::new(json!([]))));

        let names: Vec<String> = registry.list_schemas().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "get_aed_waiting_times",
                "get_pas_gopc_avg_quota",
                "get_specialist_waiting_times"
            ]
        );
    }

    #[test]
    fn test_register_all_twice_does_not_duplicate() {
        let fetcher = CannedFetcher::new(json!([]));
        let feeds = feeds(fetcher.clone());
        let mut registry = ToolRegistry::new();

        register_all(&mut registry, &feeds);
        register_all(&mut registry, &feeds);

        assert_eq!(registry.len(), 3);
        assert!(fetcher.requested().is_empty(), "registration must not fetch");
    }

    #[test]
    fn test_every_schema_documented() {
        let mut registry = ToolRegistry::new();
        register_all(&mut registry, &feeds(CannedFetcher::new(json!([]))));

        for schema in registry.list_schemas() {
            assert!(!schema.description.is_empty(), "{} has no description", schema.name);
            let lang = &schema.input_schema["properties"]["lang"];
            assert_eq!(lang["default"], "en");
            assert_eq!(lang["enum"], json!(["en", "tc", "sc"]));
            assert_eq!(schema.input_schema["required"], json!([]));
            assert!(schema.annotations.as_ref().is_some_and(|a| a.read_only_hint));
        }
    }
}
