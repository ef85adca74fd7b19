use crate::apis::{fetch_json, non_empty, require_credential};
use crate::common::constants::{
    DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE, DEFAULT_LOCAL_TIME, DEFAULT_LOCATION,
    MEETUP_PROVIDER,
};
use crate::common::error::ProviderResult;
use crate::common::types::{EventProvider, FetchWindow, RawEventData};
use crate::config::AppConfig;
use crate::domain::{CanonicalEvent, EventSource};
use crate::normalize::{
    compose_location, instant_from_day_time, map_category, normalize_coordinates,
    parse_coordinate,
};
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const UPCOMING_EVENTS_URL: &str = "https://api.meetup.com/find/upcoming_events";

/// Page size requested from the upcoming-events endpoint.
const PAGE_SIZE: usize = 50;

/// Meetup find/upcoming_events API client.
pub struct MeetupClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl MeetupClient {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Map one response page into canonical events.
    pub fn map_events(&self, payload: &RawEventData) -> Vec<CanonicalEvent> {
        let events = match payload["events"].as_array() {
            Some(events) => events,
            None => return Vec::new(),
        };
        events.iter().filter_map(|raw| self.map_event(raw)).collect()
    }

    fn map_event(&self, raw: &Value) -> Option<CanonicalEvent> {
        let title = non_empty(&raw["name"])?;

        // Meetup gives a local calendar day plus an optional clock time.
        let day = non_empty(&raw["local_date"])?;
        let time = non_empty(&raw["local_time"]).unwrap_or(DEFAULT_LOCAL_TIME);
        let date = instant_from_day_time(day, time)?;
        let end_date = raw["duration"]
            .as_i64()
            .map(|millis| date + Duration::milliseconds(millis));

        let venue_data = &raw["venue"];
        let location = compose_location(&[
            non_empty(&venue_data["address_1"]),
            non_empty(&venue_data["city"]),
            non_empty(&venue_data["state"]),
            non_empty(&venue_data["country"]),
        ]);
        let coordinates = match (
            parse_coordinate(&venue_data["lat"]),
            parse_coordinate(&venue_data["lon"]),
        ) {
            (Some(lat), Some(lng)) => Some(normalize_coordinates(lat, lng)),
            _ => None,
        };
        let (longitude, latitude) =
            coordinates.unwrap_or((DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE));

        let category = map_category(non_empty(&raw["group"]["category"]["name"]).unwrap_or(""));

        let image_url = non_empty(&raw["featured_photo"]["highres_link"])
            .or_else(|| non_empty(&raw["featured_photo"]["photo_link"]))
            .unwrap_or_default()
            .to_string();

        let description = non_empty(&raw["description"]);

        // Well-attended meetups get surfaced.
        let featured = raw["yes_rsvp_count"].as_i64().unwrap_or(0) > 20;

        Some(CanonicalEvent {
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            long_description: description.map(String::from),
            date,
            end_date,
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            venue: non_empty(&venue_data["name"]).map(String::from),
            category,
            image_url,
            organizer: non_empty(&raw["group"]["name"])
                .unwrap_or("Meetup Group")
                .to_string(),
            organizer_image_url: None,
            source: EventSource::Meetup,
            source_url: non_empty(&raw["link"]).map(String::from),
            latitude,
            longitude,
            featured,
            city: None,
        })
    }
}

#[async_trait::async_trait]
impl EventProvider for MeetupClient {
    fn name(&self) -> &'static str {
        MEETUP_PROVIDER
    }

    fn source(&self) -> EventSource {
        EventSource::Meetup
    }

    #[instrument(skip(self))]
    async fn fetch_events(&self) -> ProviderResult<Vec<CanonicalEvent>> {
        let api_key = require_credential(&self.config, MEETUP_PROVIDER)?;
        let region = self.config.region_center();
        let window = FetchWindow::starting_now();
        let (_, range_end) = window.as_naive_instants();

        debug!(
            "Fetching Meetup events around ({}, {})",
            region.latitude, region.longitude
        );
        let request = self
            .client
            .get(UPCOMING_EVENTS_URL)
            .query(&[
                ("key", api_key),
                ("sign", "true"),
                ("photo-host", "public"),
                ("lat", region.latitude.to_string().as_str()),
                ("lon", region.longitude.to_string().as_str()),
                ("page", PAGE_SIZE.to_string().as_str()),
                ("end_date_range", range_end.as_str()),
            ])
            .timeout(self.config.http_timeout());
        let payload = fetch_json(request).await?;

        let events = self.map_events(&payload);
        if events.len() >= PAGE_SIZE {
            warn!("Meetup returned a full page; further events in this window were not fetched");
        }
        info!("Successfully fetched {} events from Meetup", events.len());
        Ok(events)
    }
}
