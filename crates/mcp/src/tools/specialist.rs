// Specialist outpatient waiting times tool

use super::{into_call_result, json_schema_object, lang_schema, parse_arguments, Tool, ToolRegistry};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use anyhow::Result;
use hk_health_core::{HealthFeeds, Language, SpecialistWaitingTimes};
use serde::Deserialize;
use std::sync::Arc;

pub const NAME: &str = "get_specialist_waiting_times";

pub struct SpecialistWaitingTimesTool {
    feed: SpecialistWaitingTimes,
}

impl SpecialistWaitingTimesTool {
    pub fn new(feed: SpecialistWaitingTimes) -> Self {
        Self { feed }
    }
}

#[derive(Debug, Deserialize)]
struct SpecialistArgs {
    #[serde(default)]
    lang: Language,
}

#[async_trait::async_trait]
impl Tool for SpecialistWaitingTimesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get current waiting times for new case bookings for specialist outpatient services by specialty and cluster in Hong Kong".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "lang": lang_schema()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only_remote("Specialist Outpatient Waiting Times")),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SpecialistArgs = parse_arguments(NAME, arguments)?;
        into_call_result(self.feed.fetch(&args.lang).await)
    }
}

pub fn register(registry: &mut ToolRegistry, feeds: &HealthFeeds) {
    registry.register(Arc::new(SpecialistWaitingTimesTool::new(feeds.specialist.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_error_envelope_is_normal_result() {
        let tool = SpecialistWaitingTimesTool::new(
            feeds(CannedFetcher::new(json!({ "error": "Network error" }))).specialist,
        );

        let result = tool.execute(serde_json::Value::Null).await.unwrap();

        assert_eq!(
            result.structured_content,
            Some(json!({ "type": "Error", "error": "Network error" }))
        );
        assert!(result.is_error.is_none());
    }

    #[tokio::test]
    async fn test_records_passed_through() {
        let records = json!([{
            "cluster": "New Territories West Cluster",
            "specialty": "Orthopaedics & Traumatology",
            "category": "Stable",
            "description": "Median waiting time",
            "value": "52 weeks"
        }]);
        let fetcher = CannedFetcher::new(records.clone());
        let tool = SpecialistWaitingTimesTool::new(feeds(fetcher.clone()).specialist);

        let result = tool.execute(json!({ "lang": "sc" })).await.unwrap();

        assert_eq!(
            fetcher.requested(),
            vec!["https://www.ha.org.hk/opendata/sop/sop-waiting-time-sc.json"]
        );
        assert_eq!(
            result.structured_content,
            Some(json!({ "data": records, "last_updated": NOW }))
        );
    }
}
