use crate::apis::{fetch_json, non_empty};
use crate::common::constants::{
    DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE, DEFAULT_LOCATION,
    BRUSSELS_OPEN_DATA_PROVIDER,
};
use crate::common::error::ProviderResult;
use crate::common::types::{EventProvider, FetchWindow, RawEventData};
use crate::config::AppConfig;
use crate::domain::{CanonicalEvent, EventSource};
use crate::normalize::{compose_location, map_category, normalize_coordinates, parse_coordinate, parse_instant};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

const RECORDS_URL: &str =
    "https://opendata.brussels.be/api/v2/catalog/datasets/cultural-events/records";
const RECORD_PERMALINK_BASE: &str =
    "https://opendata.brussels.be/explore/dataset/cultural-events/record";

/// Brussels Open Data portal client. The portal serves anonymous requests;
/// an API key only raises rate limits, so a missing credential never skips
/// the fetch.
pub struct BrusselsOpenDataClient {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl BrusselsOpenDataClient {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Map one records response into canonical events.
    pub fn map_events(&self, payload: &RawEventData) -> Vec<CanonicalEvent> {
        let records = match payload["records"].as_array() {
            Some(records) => records,
            None => return Vec::new(),
        };
        records.iter().filter_map(|record| self.map_record(record)).collect()
    }

    fn map_record(&self, record: &Value) -> Option<CanonicalEvent> {
        let fields = &record["fields"];
        let title = non_empty(&fields["title"])?;
        let date = non_empty(&fields["start_date"]).and_then(parse_instant)?;
        let end_date = non_empty(&fields["end_date"]).and_then(parse_instant);

        let location = compose_location(&[
            non_empty(&fields["address"]),
            non_empty(&fields["municipality"]),
            non_empty(&fields["zip_code"]),
        ]);
        let (longitude, latitude) = coordinates(fields)
            .unwrap_or((DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE));

        // Event type and theme combine into one string for the mapper.
        let mut category_parts = Vec::new();
        if let Some(event_type) = non_empty(&fields["event_type"]) {
            category_parts.push(event_type);
        }
        if let Some(theme) = non_empty(&fields["theme"]) {
            category_parts.push(theme);
        }
        let category = map_category(&category_parts.join(", "));

        let source_url = non_empty(&fields["url"]).map(String::from).or_else(|| {
            non_empty(&record["record_id"])
                .map(|id| format!("{RECORD_PERMALINK_BASE}/{id}"))
        });

        let featured = fields["featured"].as_bool().unwrap_or(false)
            || fields["highlight"].as_bool().unwrap_or(false);

        Some(CanonicalEvent {
            title: title.to_string(),
            description: non_empty(&fields["description"]).unwrap_or_default().to_string(),
            long_description: non_empty(&fields["long_description"])
                .or_else(|| non_empty(&fields["description"]))
                .map(String::from),
            date,
            end_date,
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            venue: non_empty(&fields["location_name"]).map(String::from),
            category,
            image_url: non_empty(&fields["image_url"])
                .or_else(|| non_empty(&fields["thumbnail_url"]))
                .unwrap_or_default()
                .to_string(),
            organizer: non_empty(&fields["organizer"])
                .unwrap_or("Brussels Open Data")
                .to_string(),
            organizer_image_url: None,
            source: EventSource::BrusselsOpenData,
            source_url,
            latitude,
            longitude,
            featured,
            city: None,
        })
    }
}

/// geo_point_2d pairs arrive in inconsistent orientation across datasets;
/// route them through the orientation correction. Separate latitude and
/// longitude fields are trusted as labeled.
fn coordinates(fields: &Value) -> Option<(f64, f64)> {
    if let Some(point) = fields["geo_point_2d"].as_array() {
        if point.len() == 2 {
            if let (Some(first), Some(second)) =
                (parse_coordinate(&point[0]), parse_coordinate(&point[1]))
            {
                return Some(normalize_coordinates(first, second));
            }
        }
    }
    match (
        parse_coordinate(&fields["latitude"]),
        parse_coordinate(&fields["longitude"]),
    ) {
        (Some(lat), Some(lng)) => Some(normalize_coordinates(lat, lng)),
        _ => None,
    }
}

#[async_trait::async_trait]
impl EventProvider for BrusselsOpenDataClient {
    fn name(&self) -> &'static str {
        BRUSSELS_OPEN_DATA_PROVIDER
    }

    fn source(&self) -> EventSource {
        EventSource::BrusselsOpenData
    }

    #[instrument(skip(self))]
    async fn fetch_events(&self) -> ProviderResult<Vec<CanonicalEvent>> {
        let window = FetchWindow::starting_now();
        let (from_day, to_day) = window.as_days();

        let mut params = vec![
            (
                "where",
                format!("start_date >= '{from_day}' AND start_date <= '{to_day}'"),
            ),
            ("limit", "100".to_string()),
            ("timezone", "Europe/Brussels".to_string()),
        ];
        match self.config.credential(BRUSSELS_OPEN_DATA_PROVIDER) {
            Some(api_key) => params.push(("apikey", api_key.to_string())),
            None => info!("No Brussels Open Data API key configured, querying anonymously"),
        }

        debug!("Fetching Brussels Open Data events between {} and {}", from_day, to_day);
        let request = self
            .client
            .get(RECORDS_URL)
            .query(&params)
            .timeout(self.config.http_timeout());
        let payload = fetch_json(request).await?;

        let fetched = payload["records"].as_array().map_or(0, |records| records.len());
        let events = self.map_events(&payload);
        let total_count = payload["total_count"].as_i64().unwrap_or(0);
        if total_count > fetched as i64 {
            warn!(
                "Brussels Open Data has {} records in this window; only {} were fetched",
                total_count, fetched
            );
        }
        info!("Successfully fetched {} events from Brussels Open Data", events.len());
        Ok(events)
    }
}
