use crate::apis::{fetch_json, non_empty, require_credential};
use crate::common::constants::{
    DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE, DEFAULT_LOCAL_TIME, DEFAULT_LOCATION,
    TICKETMASTER_PROVIDER,
};
use crate::common::error::ProviderResult;
use crate::common::types::{EventProvider, FetchWindow, RawEventData};
use crate::config::AppConfig;
use crate::domain::{CanonicalEvent, EventSource};
use crate::normalize::{
    compose_location, instant_from_day_time, map_category, normalize_coordinates,
    parse_coordinate, parse_instant,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const EVENTS_URL: &str = "https://app.ticketmaster.com/discovery/v2/events.json";

/// Ticketmaster Discovery API client.
pub struct TicketmasterClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl TicketmasterClient {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Map one Discovery API page into canonical events.
    pub fn map_events(&self, payload: &RawEventData) -> Vec<CanonicalEvent> {
        let events = match payload["_embedded"]["events"].as_array() {
            Some(events) => events,
            None => return Vec::new(),
        };
        events.iter().filter_map(|raw| self.map_event(raw)).collect()
    }

    fn map_event(&self, raw: &Value) -> Option<CanonicalEvent> {
        let title = non_empty(&raw["name"])?;
        let date = start_instant(raw)?;

        let mut venue = None;
        let mut location = None;
        let mut coordinates = None;
        if let Some(venue_data) = raw["_embedded"]["venues"].as_array().and_then(|v| v.first()) {
            venue = non_empty(&venue_data["name"]).map(String::from);
            location = compose_location(&[
                non_empty(&venue_data["address"]["line1"]),
                non_empty(&venue_data["city"]["name"]),
                non_empty(&venue_data["state"]["name"]),
                non_empty(&venue_data["country"]["name"]),
            ]);
            // The Discovery feed delivers coordinates as decimal strings.
            if let (Some(lat), Some(lng)) = (
                parse_coordinate(&venue_data["location"]["latitude"]),
                parse_coordinate(&venue_data["location"]["longitude"]),
            ) {
                coordinates = Some(normalize_coordinates(lat, lng));
            }
        }
        let (longitude, latitude) =
            coordinates.unwrap_or((DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE));

        // Segment, genre and sub-genre names combine into one string for the
        // category mapper.
        let mut category_parts = Vec::new();
        if let Some(classification) = raw["classifications"].as_array().and_then(|c| c.first()) {
            for field in ["segment", "genre", "subGenre"] {
                if let Some(name) = non_empty(&classification[field]["name"]) {
                    category_parts.push(name);
                }
            }
        }
        let category = map_category(&category_parts.join(", "));

        let image_url = best_image(raw).unwrap_or_default();
        let description = non_empty(&raw["info"]).or_else(|| non_empty(&raw["pleaseNote"]));

        let featured = raw["dates"]["status"]["code"].as_str() == Some("onsale")
            || raw["rank"].as_f64().map_or(false, |rank| rank > 0.0);

        Some(CanonicalEvent {
            title: title.to_string(),
            description: description.unwrap_or_default().to_string(),
            long_description: description.map(String::from),
            date,
            end_date: None,
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            venue,
            category,
            image_url,
            organizer: non_empty(&raw["promoter"]["name"])
                .unwrap_or("Ticketmaster Event")
                .to_string(),
            organizer_image_url: None,
            source: EventSource::Ticketmaster,
            source_url: non_empty(&raw["url"]).map(String::from),
            latitude,
            longitude,
            featured,
            city: None,
        })
    }
}

/// Full start instant when the feed has one, otherwise local date plus the
/// default evening time. No start signal at all drops the record.
fn start_instant(raw: &Value) -> Option<DateTime<Utc>> {
    let start = &raw["dates"]["start"];
    if let Some(instant) = non_empty(&start["dateTime"]).and_then(parse_instant) {
        return Some(instant);
    }
    let day = non_empty(&start["localDate"])?;
    let time = non_empty(&start["localTime"]).unwrap_or(DEFAULT_LOCAL_TIME);
    instant_from_day_time(day, time)
}

/// Prefer a 16:9 asset, fall back to the first image.
fn best_image(raw: &Value) -> Option<String> {
    let images = raw["images"].as_array()?;
    images
        .iter()
        .find(|image| image["ratio"].as_str() == Some("16_9"))
        .or_else(|| images.first())
        .and_then(|image| non_empty(&image["url"]))
        .map(String::from)
}

#[async_trait::async_trait]
impl EventProvider for TicketmasterClient {
    fn name(&self) -> &'static str {
        TICKETMASTER_PROVIDER
    }

    fn source(&self) -> EventSource {
        EventSource::Ticketmaster
    }

    #[instrument(skip(self))]
    async fn fetch_events(&self) -> ProviderResult<Vec<CanonicalEvent>> {
        let api_key = require_credential(&self.config, TICKETMASTER_PROVIDER)?;
        let window = FetchWindow::starting_now();
        let (start, end) = window.as_utc_instants();

        debug!("Fetching Ticketmaster events between {} and {}", start, end);
        let request = self
            .client
            .get(EVENTS_URL)
            .query(&[
                ("apikey", api_key),
                ("city", "Brussels"),
                ("countryCode", "BE"),
                ("size", "100"),
                ("startDateTime", start.as_str()),
                ("endDateTime", end.as_str()),
            ])
            .timeout(self.config.http_timeout());
        let payload = fetch_json(request).await?;

        let events = self.map_events(&payload);
        if payload["page"]["totalPages"].as_i64().unwrap_or(0) > 1 {
            warn!("Ticketmaster has more pages for this window; only the first page was ingested");
        }
        info!("Successfully fetched {} events from Ticketmaster", events.len());
        Ok(events)
    }
}
