// General outpatient clinic average quotas for the preceding 4 weeks

use super::{fail, FeedContext};
use crate::config::ErrorPolicy;
use crate::envelope::{ResultEnvelope, ToolResponse};
use crate::error::HealthResult;
use crate::language::Language;

pub const GOPC_QUOTA_PATH: &str = "/pas_gopc/pas_gopc_avg_quota_pdf/g0_9uo7a_p-{lang}.json";

/// Field the district filter matches against.
const DISTRICT_FIELD: &str = "District";

/// Clinic quotas across the 18 districts, optionally narrowed to one.
#[derive(Clone)]
pub struct GopcAvgQuota {
    context: FeedContext,
    policy: ErrorPolicy,
}

impl GopcAvgQuota {
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
        self.context.url(GOPC_QUOTA_PATH, lang)
    }

    /// Fetch quotas. An empty `district` returns every clinic.
    pub async fn fetch(&self, lang: &Language, district: &str) -> HealthResult<ToolResponse> {
        let records = match self.context.fetch(&self.url(lang)).await.into_result() {
            Ok(serde_json::Value::Array(records)) => records,
            Ok(_) => {
                return fail(
                    self.policy,
                    "Unexpected GOPC quota payload: expected an array of clinic records"
                        .to_string(),
                );
            }
            Err(message) => return fail(self.policy, message),
        };

        let records = filter_by_district(records, district);
        let message = summary(records.len(), district);
        tracing::debug!(clinics = records.len(), district = %district, "GOPC quota filtered");

        Ok(ResultEnvelope::new(records.into(), self.context.timestamp())
            .with_message(message)
            .into())
    }
}

/// Keep records whose district matches case-insensitively, in order.
pub fn filter_by_district(records: Vec<serde_json::Value>, district: &str) -> Vec<serde_json::Value> {
    if district.is_empty() {
        return records;
    }

    let wanted = district.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            record
                .get(DISTRICT_FIELD)
                .and_then(|d| d.as_str())
                .is_some_and(|d| d.to_lowercase() == wanted)
        })
        .collect()
}

fn summary(count: usize, district: &str) -> String {
    if district.is_empty() {
        format!("Retrieved data for {count} clinics")
    } else {
        format!("Retrieved data for {count} clinics in {district}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ErrorEnvelope;
    use crate::error::HealthError;
    use crate::feeds::testing::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!([
            { "District": "Central & Western", "Clinic": "Central District Health Centre", "AvgQuota": "100" },
            { "District": "Tuen Mun", "Clinic": "Tuen Mun Clinic", "AvgQuota": "150" },
            { "District": "Sha Tin", "Clinic": "Lek Yuen Health Centre", "AvgQuota": "80" },
            { "District": "Tuen Mun", "Clinic": "Siu Lam Clinic", "AvgQuota": "50" }
        ])
    }

    fn envelope(response: ToolResponse) -> ResultEnvelope {
        match response {
            ToolResponse::Result(envelope) => envelope,
            other => panic!("Expected result envelope, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_all_districts() {
        let fetcher = StubFetcher::json(sample());
        let feed = GopcAvgQuota::new(context(fetcher.clone()));

        let result = envelope(feed.fetch(&Language::En, "").await.unwrap());

        assert_eq!(
            fetcher.requested(),
            vec!["https://www.ha.org.hk/pas_gopc/pas_gopc_avg_quota_pdf/g0_9uo7a_p-en.json"]
        );
        assert_eq!(result.data, sample());
        assert_eq!(result.last_updated, NOW);
        assert_eq!(result.message.as_deref(), Some("Retrieved data for 4 clinics"));
    }

    #[tokio::test]
    async fn test_filtered_by_district_keeps_order() {
        let feed = GopcAvgQuota::new(context(StubFetcher::json(sample())));

        let result = envelope(feed.fetch(&Language::En, "Tuen Mun").await.unwrap());

        let clinics: Vec<&str> = result
            .data
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["Clinic"].as_str().unwrap())
            .collect();
        assert_eq!(clinics, vec!["Tuen Mun Clinic", "Siu Lam Clinic"]);
        assert_eq!(
            result.message.as_deref(),
            Some("Retrieved data for 2 clinics in Tuen Mun")
        );
    }

    #[tokio::test]
    async fn test_district_match_is_case_insensitive() {
        let feed = GopcAvgQuota::new(context(StubFetcher::json(sample())));

        let upper = envelope(feed.fetch(&Language::En, "TUEN MUN").await.unwrap());
        let lower = envelope(feed.fetch(&Language::En, "tuen mun").await.unwrap());

        assert_eq!(upper.data, lower.data);
        assert_eq!(upper.data.as_array().unwrap().len(), 2);
        assert_eq!(upper.message.as_deref(), Some("Retrieved data for 2 clinics in TUEN MUN"));
    }

    #[tokio::test]
    async fn test_no_matches_is_success() {
        let feed = GopcAvgQuota::new(context(StubFetcher::json(sample())));

        let result = envelope(feed.fetch(&Language::En, "Islands").await.unwrap());
        assert_eq!(result.data, json!([]));
        assert_eq!(
            result.message.as_deref(),
            Some("Retrieved data for 0 clinics in Islands")
        );
    }

    #[tokio::test]
    async fn test_sentinel_skips_filtering() {
        let feed = GopcAvgQuota::new(context(StubFetcher::json(json!({ "error": "Network error" }))));

        let response = feed.fetch(&Language::En, "Tuen Mun").await.unwrap();
        assert_eq!(response, ToolResponse::Error(ErrorEnvelope::new("Network error")));
    }

    #[tokio::test]
    async fn test_non_array_payload() {
        let feed = GopcAvgQuota::new(context(StubFetcher::json(json!({ "District": "Tuen Mun" }))));

        let response = feed.fetch(&Language::En, "").await.unwrap();
        assert!(response.is_error());

        let feed = GopcAvgQuota::new(context(StubFetcher::json(json!("oops"))))
            .with_error_policy(ErrorPolicy::Propagate);
        let err = feed.fetch(&Language::En, "").await.unwrap_err();
        assert!(matches!(err, HealthError::Upstream(_)));
    }

    #[test]
    fn test_records_without_district_never_match() {
        let records = vec![json!({ "Clinic": "Mobile" }), json!({ "District": 7 }), json!("x")];
        assert!(filter_by_district(records.clone(), "Tuen Mun").is_empty());
        assert_eq!(filter_by_district(records, "").len(), 3);
    }
}
