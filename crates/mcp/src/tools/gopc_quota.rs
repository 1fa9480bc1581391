// General outpatient clinic quota tool

use super::{
    into_call_result, json_schema_object, json_schema_string, lang_schema, parse_arguments, Tool,
    ToolRegistry,
};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use anyhow::Result;
use hk_health_core::{GopcAvgQuota, HealthFeeds, Language};
use serde::Deserialize;
use std::sync::Arc;

pub const NAME: &str = "get_pas_gopc_avg_quota";

/// Tool exposing average GOPC quotas, optionally for one district
pub struct GopcAvgQuotaTool {
    feed: GopcAvgQuota,
}

impl GopcAvgQuotaTool {
    pub fn new(feed: GopcAvgQuota) -> Self {
        Self { feed }
    }
}

#[derive(Debug, Deserialize)]
struct GopcQuotaArgs {
    #[serde(default)]
    lang: Language,
    #[serde(default)]
    district: Option<String>,
}

#[async_trait::async_trait]
impl Tool for GopcAvgQuotaTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Get average number of general outpatient clinic quotas for the preceding 4 weeks across 18 districts in Hong Kong".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "lang": lang_schema(),
                    "district": json_schema_string(
                        "Optional: Filter by district name (e.g., 'Tuen Mun'). If not provided, data for all districts will be returned.",
                        "",
                    )
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only_remote("General Outpatient Clinic Quotas")),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GopcQuotaArgs = parse_arguments(NAME, arguments)?;
        let district = args.district.unwrap_or_default();
        into_call_result(self.feed.fetch(&args.lang, &district).await)
    }
}

pub fn register(registry: &mut ToolRegistry, feeds: &HealthFeeds) {
    registry.register(Arc::new(GopcAvgQuotaTool::new(feeds.gopc_quota.clone())));
}
