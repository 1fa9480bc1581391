// Specialist outpatient waiting times for new case bookings

use super::{fail, FeedContext};
use crate::config::ErrorPolicy;
use crate::envelope::{ResultEnvelope, ToolResponse};
use crate::error::HealthResult;
use crate::language::Language;

pub const SPECIALIST_PATH: &str = "/opendata/sop/sop-waiting-time-{lang}.json";

/// Waiting times by specialty and cluster.
#[derive(Clone)]
pub struct SpecialistWaitingTimes {
    context: FeedContext,
    policy: ErrorPolicy,
}

impl SpecialistWaitingTimes {
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
        self.context.url(SPECIALIST_PATH, lang)
    }

    pub async fn fetch(&self, lang: &Language) -> HealthResult<ToolResponse> {
        match self.context.fetch(&self.url(lang)).await.into_result() {
            Ok(data) => Ok(ResultEnvelope::new(data, self.context.timestamp()).into()),
            Err(message) => fail(self.policy, message),
        }
    }
}
