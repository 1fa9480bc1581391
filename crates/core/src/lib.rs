// Core feeds and types for the HK health MCP server

pub mod clock;
pub mod config;
pub mod envelope;
pub mod error;
pub mod feeds;
pub mod fetcher;
pub mod language;

pub use clock::{Clock, FixedClock, LocalClock};
pub use config::{ErrorPolicy, HealthConfig, PolicyConfig, UpstreamConfig};
pub use envelope::{ErrorEnvelope, ResultEnvelope, ToolResponse};
pub use error::{HealthError, HealthResult};
pub use feeds::{AedWaitingTimes, FeedContext, GopcAvgQuota, HealthFeeds, SpecialistWaitingTimes};
pub use fetcher::{FetchResult, HttpJsonFetcher, JsonFetcher};
pub use language::Language;
