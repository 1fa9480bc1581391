// Response envelopes returned by the feed pipelines

use serde::{Deserialize, Serialize};

/// Successful tool payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Upstream JSON, untouched apart from optional filtering
    pub data: serde_json::Value,
    /// Wall-clock time the response was built (not an upstream field)
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResultEnvelope {
    pub fn new(data: serde_json::Value, last_updated: impl Into<String>) -> Self {
        Self {
            data,
            last_updated: last_updated.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Failure payload, serialized as `{"type": "Error", "error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Error")]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// What a feed tool hands back to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Error(ErrorEnvelope),
    Result(ResultEnvelope),
}

impl ToolResponse {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Plain strings and JSON values only, serialization cannot fail
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl From<ResultEnvelope> for ToolResponse {
    fn from(envelope: ResultEnvelope) -> Self {
        Self::Result(envelope)
    }
}

impl From<ErrorEnvelope> for ToolResponse {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self::Error(envelope)
    }
}
