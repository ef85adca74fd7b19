use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use crate::common::constants::{DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE};
use crate::domain::EventCategory;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Ordered trigger table for category mapping. Order is contractual: the
/// first group containing a matching trigger wins, so inputs like "party"
/// land on Art (the "art" substring fires before the nightlife group is
/// reached). Triggers match by substring on the lowercased input.
const CATEGORY_RULES: &[(&[&str], EventCategory)] = &[
    (
        &[
            "music", "concert", "festival", "performance", "gig", "dj", "jazz", "rock", "pop",
            "classical", "opera",
        ],
        EventCategory::Music,
    ),
    (
        &[
            "art", "exhibition", "gallery", "museum", "visual", "painting", "sculpture",
        ],
        EventCategory::Art,
    ),
    (
        &[
            "food", "drink", "dinner", "tasting", "restaurant", "cuisine", "gastronomy",
            "culinary",
        ],
        EventCategory::Food,
    ),
    (
        &[
            "sports", "sport", "fitness", "match", "game", "running", "race", "athletic",
        ],
        EventCategory::Sports,
    ),
    (
        &["nightlife", "party", "club", "bar", "pub", "disco"],
        EventCategory::Nightlife,
    ),
    (
        &[
            "cultural", "heritage", "history", "tour", "workshop", "lecture", "talk",
        ],
        EventCategory::Cultural,
    ),
    (
        &[
            "theater", "theatre", "play", "drama", "comedy", "acting", "performance art", "stage",
        ],
        EventCategory::Theater,
    ),
];

/// Map a free-form provider category string into the closed category set.
/// Total: anything unmatched (including empty input) becomes Cultural.
pub fn map_category(raw: &str) -> EventCategory {
    let normalized = raw.trim().to_lowercase();
    for (triggers, category) in CATEGORY_RULES {
        if triggers.iter().any(|trigger| normalized.contains(trigger)) {
            return *category;
        }
    }
    EventCategory::Cultural
}

/// Validate and orient a coordinate pair, returning `(longitude, latitude)`.
///
/// Providers around Brussels sometimes deliver the pair in lng/lat order.
/// A pair whose first component sits in 0..=10 while the second has a
/// magnitude above 40 cannot be a lat/lng point in the service region, so
/// it is swapped. Non-finite or out-of-range values collapse to the central
/// Brussels fallback point; the result is always finite and in range.
pub fn normalize_coordinates(latitude: f64, longitude: f64) -> (f64, f64) {
    if !latitude.is_finite() || !longitude.is_finite() {
        return (DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE);
    }

    let looks_reversed = (0.0..=10.0).contains(&latitude) && longitude.abs() > 40.0;
    let (latitude, longitude) = if looks_reversed {
        (longitude, latitude)
    } else {
        (latitude, longitude)
    };

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return (DEFAULT_EVENT_LONGITUDE, DEFAULT_EVENT_LATITUDE);
    }

    (longitude, latitude)
}

/// Read a coordinate that providers deliver either as a JSON number or as a
/// numeric string.
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Join address parts with ", ", skipping absent or blank ones. Callers pass
/// parts in the fixed street, city, postal code, region, country order.
pub fn compose_location(parts: &[Option<&str>]) -> Option<String> {
    let present: Vec<&str> = parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if present.is_empty() {
        None
    } else {
        Some(present.join(", "))
    }
}

/// Parse the timestamp spellings seen across the provider feeds: RFC 3339,
/// offset without colon, zone-less date-time (taken as UTC) and bare dates.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

/// Compose a calendar day and a clock time into a UTC instant. Accepts both
/// `HH:MM:SS` and `HH:MM` times.
pub fn instant_from_day_time(day: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(day.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Great-circle distance in kilometers (haversine). The intermediate is
/// clamped into [0, 1] so antipodal pairs stay finite and identical points
/// come out as exactly zero.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_phi = (lat2 - lat1).to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
