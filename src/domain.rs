use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::common::constants::{
    BRUSSELS_OPEN_DATA_PROVIDER, EVENTBRITE_PROVIDER, FACEBOOK_PROVIDER, MEETUP_PROVIDER,
    TICKETMASTER_PROVIDER,
};

/// One event in the canonical shape every provider maps into.
/// Serialized field names follow the consumer-facing JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEvent {
    pub title: String,
    pub description: String,
    pub long_description: Option<String>,
    pub date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: String,
    pub venue: Option<String>,
    pub category: EventCategory,
    pub image_url: String,
    pub organizer: String,
    pub organizer_image_url: Option<String>,
    pub source: EventSource,
    pub source_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub featured: bool,
    pub city: Option<City>,
}

/// A stored event: surrogate id plus the canonical fields, flattened so the
/// wire shape is one flat object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEvent {
    pub id: Uuid,
    #[serde(flatten)]
    pub event: CanonicalEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Music,
    Art,
    Food,
    Sports,
    Nightlife,
    Cultural,
    Theater,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Music => "music",
            EventCategory::Art => "art",
            EventCategory::Food => "food",
            EventCategory::Sports => "sports",
            EventCategory::Nightlife => "nightlife",
            EventCategory::Cultural => "cultural",
            EventCategory::Theater => "theater",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "music" => Ok(EventCategory::Music),
            "art" => Ok(EventCategory::Art),
            "food" => Ok(EventCategory::Food),
            "sports" => Ok(EventCategory::Sports),
            "nightlife" => Ok(EventCategory::Nightlife),
            "cultural" => Ok(EventCategory::Cultural),
            "theater" => Ok(EventCategory::Theater),
            other => Err(format!(
                "unknown category '{other}' (expected music, art, food, sports, nightlife, cultural or theater)"
            )),
        }
    }
}

/// Where an event came from. Serialized identifiers double as provider
/// names in the CLI and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    Facebook,
    Eventbrite,
    Meetup,
    BrusselsOpenData,
    Ticketmaster,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::Facebook => FACEBOOK_PROVIDER,
            EventSource::Eventbrite => EVENTBRITE_PROVIDER,
            EventSource::Meetup => MEETUP_PROVIDER,
            EventSource::BrusselsOpenData => BRUSSELS_OPEN_DATA_PROVIDER,
            EventSource::Ticketmaster => TICKETMASTER_PROVIDER,
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Belgian cities an event can be tagged with. Provider feeds leave this
/// unset; manual submissions may carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Brussels,
    Antwerp,
    Ghent,
    Bruges,
    Leuven,
    #[serde(rename = "Liège")]
    Liege,
    Namur,
    Charleroi,
    Mons,
    Ostend,
}

/// Presentation-level filter applied after ingestion. Never affects what
/// gets fetched or stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub date: Option<DateWindow>,
}

impl EventFilter {
    pub fn matches(&self, event: &CanonicalEvent, today: NaiveDate) -> bool {
        if let Some(category) = self.category {
            if event.category != category {
                return false;
            }
        }
        if let Some(window) = self.date {
            let event_day = event.date.with_timezone(&Local).date_naive();
            let (from, to) = window.bounds(today);
            if event_day < from || event_day > to {
                return false;
            }
        }
        true
    }
}

/// Relative date windows offered by the list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    Today,
    Tomorrow,
    Weekend,
    NextWeek,
}

impl DateWindow {
    /// Inclusive calendar bounds of the window, relative to `today`.
    ///
    /// Weekend and next-week keep the historical day arithmetic: weekend is
    /// anchored on `today + (5 - weekday)` with Sunday counted as day zero,
    /// so on a Saturday the window starts on the Friday just passed, and on
    /// a Sunday it jumps to the upcoming weekend. Next-week starts on the
    /// coming Monday, which on a Monday is today.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            DateWindow::Today => (today, today),
            DateWindow::Tomorrow => {
                let day = today + Duration::days(1);
                (day, day)
            }
            DateWindow::Weekend => {
                let dow = today.weekday().num_days_from_sunday() as i64;
                let friday = today + Duration::days(5 - dow);
                (friday, friday + Duration::days(2))
            }
            DateWindow::NextWeek => {
                let dow = today.weekday().num_days_from_sunday() as i64;
                let monday = today + Duration::days((8 - dow) % 7);
                (monday, monday + Duration::days(6))
            }
        }
    }
}

impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(DateWindow::Today),
            "tomorrow" => Ok(DateWindow::Tomorrow),
            "weekend" => Ok(DateWindow::Weekend),
            "next-week" | "next_week" => Ok(DateWindow::NextWeek),
            other => Err(format!(
                "unknown date window '{other}' (expected today, tomorrow, weekend or next-week)"
            )),
        }
    }
}
