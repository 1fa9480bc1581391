// AED waiting times tool

use super::{into_call_result, json_schema_object, lang_schema, parse_arguments, Tool, ToolRegistry};
use crate::protocol::{CallToolResult, ToolAnnotations, ToolSchema};
use anyhow::Result;
use hk_health_core::{AedWaitingTimes, HealthFeeds, Language};
use serde::Deserialize;
use std::sync::Arc;

pub const NAME: &str = "get_aed_waiting_times";

/// Tool exposing current Accident and Emergency Department waiting times
pub struct AedWaitingTimesTool {
    feed: AedWaitingTimes,
}

impl AedWaitingTimesTool {
    pub fn new(feed: AedWaitingTimes) -> Self {
        Self { feed }
    }
}

#[derive(Debug, Deserialize)]
struct AedArgs {
    #[serde(default)]
    lang: Language,
}

#[async_trait::async_trait]
impl Tool for AedWaitingTimesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description:
                "Get current Accident and Emergency Department waiting times by hospital in Hong Kong"
                    .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "lang": lang_schema()
                }),
                vec![],
            ),
            annotations: Some(ToolAnnotations::read_only_remote("AED Waiting Times")),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: AedArgs = parse_arguments(NAME, arguments)?;
        into_call_result(self.feed.fetch(&args.lang).await)
    }
}

pub fn register(registry: &mut ToolRegistry, feeds: &HealthFeeds) {
    registry.register(Arc::new(AedWaitingTimesTool::new(feeds.aed.clone())));
}
