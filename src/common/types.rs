use crate::common::constants::FETCH_WINDOW_DAYS;
use crate::common::error::ProviderResult;
use crate::domain::{CanonicalEvent, EventSource};
use chrono::{DateTime, Duration, Utc};

/// Raw event data as returned from external provider APIs
pub type RawEventData = serde_json::Value;

/// The time range a fetch cycle asks providers for. Built once per cycle so
/// every provider derives its query parameters from the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FetchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FetchWindow {
    /// Window from now through the standard lookahead.
    pub fn starting_now() -> Self {
        let start = Utc::now();
        Self {
            start,
            end: start + Duration::days(FETCH_WINDOW_DAYS),
        }
    }

    /// `YYYY-MM-DD` bounds, for providers filtering on calendar days.
    pub fn as_days(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d").to_string(),
            self.end.format("%Y-%m-%d").to_string(),
        )
    }

    /// Zulu-suffixed instants, second precision.
    pub fn as_utc_instants(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            self.end.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        )
    }

    /// Naive local-style instants without zone designator.
    pub fn as_naive_instants(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            self.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
        )
    }

    /// Unix timestamps in seconds.
    pub fn as_unix_range(&self) -> (i64, i64) {
        (self.start.timestamp(), self.end.timestamp())
    }
}

/// Core trait that all event providers implement
#[async_trait::async_trait]
pub trait EventProvider: Send + Sync {
    /// Stable identifier for this provider (CLI name, log field, credential key)
    fn name(&self) -> &'static str;

    /// The source tag stamped onto every event this provider emits
    fn source(&self) -> EventSource;

    /// Fetch one window of events, already normalized to the canonical shape.
    /// Implementations never panic on upstream input; every failure comes
    /// back as a `ProviderError` for the aggregator to absorb.
    async fn fetch_events(&self) -> ProviderResult<Vec<CanonicalEvent>>;
}
