use crate::apis::{fetch_json, non_empty, require_credential};
use crate::common::constants::{
    DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE, DEFAULT_LOCATION, EVENTBRITE_PROVIDER,
};
use crate::common::error::ProviderResult;
use crate::common::types::{EventProvider, FetchWindow, RawEventData};
use crate::config::AppConfig;
use crate::domain::{CanonicalEvent, EventSource};
use crate::normalize::{compose_location, map_category, normalize_coordinates, parse_coordinate, parse_instant};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const SEARCH_URL: &str = "https://www.eventbriteapi.com/v3/events/search/";

/// Eventbrite search API client.
pub struct EventbriteClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl EventbriteClient {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Map one search response page into canonical events.
    pub fn map_events(&self, payload: &RawEventData) -> Vec<CanonicalEvent> {
        let events = match payload["events"].as_array() {
            Some(events) => events,
            None => return Vec::new(),
        };
        events.iter().filter_map(|raw| self.map_event(raw)).collect()
    }

    fn map_event(&self, raw: &Value) -> Option<CanonicalEvent> {
        let title = non_empty(&raw["name"]["text"])?;
        let date = non_empty(&raw["start"]["utc"]).and_then(parse_instant)?;
        let end_date = non_empty(&raw["end"]["utc"]).and_then(parse_instant);

        let venue_data = &raw["venue"];
        let address = &venue_data["address"];
        let location = compose_location(&[
            non_empty(&address["address_1"]),
            non_empty(&address["city"]),
            non_empty(&address["postal_code"]),
            non_empty(&address["region"]),
            non_empty(&address["country"]),
        ]);
        // Venue coordinates arrive as decimal strings.
        let coordinates = match (
            parse_coordinate(&venue_data["latitude"]),
            parse_coordinate(&venue_data["longitude"]),
        ) {
            (Some(lat), Some(lng)) => Some(normalize_coordinates(lat, lng)),
            _ => None,
        };
        let (longitude, latitude) =
            coordinates.unwrap_or((DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE));

        let mut category_parts = Vec::new();
        if let Some(name) = non_empty(&raw["category"]["name"]) {
            category_parts.push(name);
        }
        if let Some(name) = non_empty(&raw["subcategory"]["name"]) {
            category_parts.push(name);
        }
        let category = map_category(&category_parts.join(", "));

        let description = non_empty(&raw["description"]["text"]);

        // Paid or publicly listed events get surfaced.
        let featured = !raw["is_free"].as_bool().unwrap_or(false)
            || raw["listed"].as_bool().unwrap_or(false);

        Some(CanonicalEvent {
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            long_description: description.map(String::from),
            date,
            end_date,
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            venue: non_empty(&venue_data["name"]).map(String::from),
            category,
            image_url: non_empty(&raw["logo"]["url"]).unwrap_or_default().to_string(),
            organizer: non_empty(&raw["organizer"]["name"])
                .unwrap_or("Eventbrite Event")
                .to_string(),
            organizer_image_url: non_empty(&raw["organizer"]["logo"]["url"]).map(String::from),
            source: EventSource::Eventbrite,
            source_url: non_empty(&raw["url"]).map(String::from),
            latitude,
            longitude,
            featured,
            city: None,
        })
    }
}

#[async_trait::async_trait]
impl EventProvider for EventbriteClient {
    fn name(&self) -> &'static str {
        EVENTBRITE_PROVIDER
    }

    fn source(&self) -> EventSource {
        EventSource::Eventbrite
    }

    #[instrument(skip(self))]
    async fn fetch_events(&self) -> ProviderResult<Vec<CanonicalEvent>> {
        let token = require_credential(&self.config, EVENTBRITE_PROVIDER)?;
        let region = self.config.region_center();
        let window = FetchWindow::starting_now();
        let (range_start, range_end) = window.as_naive_instants();

        debug!(
            "Searching Eventbrite around ({}, {}) within {}km",
            region.latitude, region.longitude, region.radius_km
        );
        let request = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("token", token),
                ("location.latitude", region.latitude.to_string().as_str()),
                ("location.longitude", region.longitude.to_string().as_str()),
                ("location.within", format!("{}km", region.radius_km).as_str()),
                ("expand", "venue,organizer"),
                ("start_date.range_start", range_start.as_str()),
                ("start_date.range_end", range_end.as_str()),
            ])
            .timeout(self.config.http_timeout());
        let payload = fetch_json(request).await?;

        let events = self.map_events(&payload);
        if payload["pagination"]["has_more_items"].as_bool().unwrap_or(false) {
            warn!("Eventbrite reports more pages for this window; only the first page was ingested");
        }
        info!("Successfully fetched {} events from Eventbrite", events.len());
        Ok(events)
    }
}
