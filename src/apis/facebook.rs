use crate::apis::{fetch_json, non_empty, require_credential};
use crate::common::constants::{
    DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE, DEFAULT_LOCATION, FACEBOOK_PROVIDER,
};
use crate::common::error::ProviderResult;
use crate::common::types::{EventProvider, FetchWindow, RawEventData};
use crate::config::AppConfig;
use crate::domain::{CanonicalEvent, EventSource};
use crate::normalize::{compose_location, map_category, normalize_coordinates, parse_coordinate, parse_instant};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const SEARCH_URL: &str = "https://graph.facebook.com/v16.0/search";

/// Facebook Graph API event search client.
pub struct FacebookClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl FacebookClient {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Map one Graph API response page into canonical events.
    pub fn map_events(&self, payload: &RawEventData) -> Vec<CanonicalEvent> {
        let events = match payload["data"].as_array() {
            Some(events) => events,
            None => return Vec::new(),
        };
        events.iter().filter_map(|raw| self.map_event(raw)).collect()
    }

    fn map_event(&self, raw: &Value) -> Option<CanonicalEvent> {
        let title = non_empty(&raw["name"])?;
        // start_time carries a numeric zone offset, e.g. +0200.
        let date = non_empty(&raw["start_time"]).and_then(parse_instant)?;
        let end_date = non_empty(&raw["end_time"]).and_then(parse_instant);

        let place = &raw["place"];
        let location_data = &place["location"];
        let location = compose_location(&[
            non_empty(&location_data["street"]),
            non_empty(&location_data["city"]),
            non_empty(&location_data["country"]),
        ]);
        let coordinates = match (
            parse_coordinate(&location_data["latitude"]),
            parse_coordinate(&location_data["longitude"]),
        ) {
            (Some(lat), Some(lng)) => Some(normalize_coordinates(lat, lng)),
            _ => None,
        };
        let (longitude, latitude) =
            coordinates.unwrap_or((DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE));

        let category = map_category(non_empty(&raw["category"]).unwrap_or(""));
        let description = non_empty(&raw["description"]);

        // Graph search results have no stable listing URL of their own; the
        // event id reconstructs one.
        let source_url = non_empty(&raw["id"])
            .map(|id| format!("https://facebook.com/events/{id}"));

        // Attendance counts drive visibility.
        let featured = raw["attending_count"].as_i64().unwrap_or(0) > 50
            || raw["interested_count"].as_i64().unwrap_or(0) > 100;

        Some(CanonicalEvent {
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            long_description: description.map(String::from),
            date,
            end_date,
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            venue: non_empty(&place["name"]).map(String::from),
            category,
            image_url: non_empty(&raw["cover"]["source"]).unwrap_or_default().to_string(),
            organizer: non_empty(&raw["owner"]["name"])
                .unwrap_or("Facebook Event")
                .to_string(),
            organizer_image_url: None,
            source: EventSource::Facebook,
            source_url,
            latitude,
            longitude,
            featured,
            city: None,
        })
    }
}

#[async_trait::async_trait]
impl EventProvider for FacebookClient {
    fn name(&self) -> &'static str {
        FACEBOOK_PROVIDER
    }

    fn source(&self) -> EventSource {
        EventSource::Facebook
    }

    #[instrument(skip(self))]
    async fn fetch_events(&self) -> ProviderResult<Vec<CanonicalEvent>> {
        let access_token = require_credential(&self.config, FACEBOOK_PROVIDER)?;
        let window = FetchWindow::starting_now();
        let (since, until) = window.as_unix_range();

        debug!("Searching Facebook events between {} and {}", since, until);
        let request = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("access_token", access_token),
                ("type", "event"),
                ("q", "brussels"),
                ("limit", "50"),
                ("since", since.to_string().as_str()),
                ("until", until.to_string().as_str()),
            ])
            .timeout(self.config.http_timeout());
        let payload = fetch_json(request).await?;

        let events = self.map_events(&payload);
        if non_empty(&payload["paging"]["next"]).is_some() {
            warn!("Facebook has more pages for this window; only the first page was ingested");
        }
        info!("Successfully fetched {} events from Facebook", events.len());
        Ok(events)
    }
}
