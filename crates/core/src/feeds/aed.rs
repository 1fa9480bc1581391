// Accident & Emergency Department waiting times

use super::{fail, FeedContext};
use crate::config::ErrorPolicy;
use crate::envelope::{ResultEnvelope, ToolResponse};
use crate::error::HealthResult;
use crate::language::Language;

pub const AED_PATH: &str = "/opendata/aed/aedwtdata-{lang}.json";

/// Current AED waiting times by hospital.
///
/// The upstream object (`waitTime` array plus `updateTime`) is returned as
/// `data` without renaming any field.
#[derive(Clone)]
pub struct AedWaitingTimes {
    context: FeedContext,
    policy: ErrorPolicy,
}

impl AedWaitingTimes {
    pub fn new(context: FeedContext) -> Self {
        Self {
            context,
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn url(&self, lang: &Language) -> String {
        self.context.url(AED_PATH, lang)
    }

    pub async fn fetch(&self, lang: &Language) -> HealthResult<ToolResponse> {
        match self.context.fetch(&self.url(lang)).await.into_result() {
            Ok(data) => Ok(ResultEnvelope::new(data, self.context.timestamp()).into()),
            Err(message) => fail(self.policy, message),
        }
    }
}
