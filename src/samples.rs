use crate::common::constants::DEFAULT_LOCATION;
use crate::domain::{CanonicalEvent, City, EventCategory, EventSource};
use chrono::{Duration, Utc};

/// A handful of plausible Brussels events for demos and an empty local
/// store. Dates are relative to now so the listing always has upcoming
/// entries.
pub fn sample_events() -> Vec<CanonicalEvent> {
    let now = Utc::now();
    vec![
        CanonicalEvent {
            title: "Jazz at the Grand Place".to_string(),
            description: "Open-air jazz evening in the heart of the city.".to_string(),
            long_description: Some(
                "Local quartets play two sets under the guild houses, with a late jam session."
                    .to_string(),
            ),
            date: now + Duration::days(1),
            end_date: Some(now + Duration::days(1) + Duration::hours(4)),
            location: "Grand Place, Brussels, 1000, Belgium".to_string(),
            venue: Some("Grand Place".to_string()),
            category: EventCategory::Music,
            image_url: String::new(),
            organizer: "Brussels Jazz Collective".to_string(),
            organizer_image_url: None,
            source: EventSource::BrusselsOpenData,
            source_url: None,
            latitude: 50.8467,
            longitude: 4.3525,
            featured: true,
            city: Some(City::Brussels),
        },
        CanonicalEvent {
            title: "Magritte Retrospective".to_string(),
            description: "Surrealist paintings from private collections.".to_string(),
            long_description: None,
            date: now + Duration::days(2),
            end_date: None,
            location: "Rue de la Régence 3, Brussels, 1000, Belgium".to_string(),
            venue: Some("Musée Magritte".to_string()),
            category: EventCategory::Art,
            image_url: String::new(),
            organizer: "Musées royaux des Beaux-Arts".to_string(),
            organizer_image_url: None,
            source: EventSource::BrusselsOpenData,
            source_url: None,
            latitude: 50.8447,
            longitude: 4.3571,
            featured: false,
            city: Some(City::Brussels),
        },
        CanonicalEvent {
            title: "Street Food Market at Flagey".to_string(),
            description: "Food trucks and local producers on the square.".to_string(),
            long_description: None,
            date: now + Duration::days(3),
            end_date: Some(now + Duration::days(3) + Duration::hours(6)),
            location: "Place Flagey, Ixelles, 1050, Belgium".to_string(),
            venue: Some("Place Flagey".to_string()),
            category: EventCategory::Food,
            image_url: String::new(),
            organizer: "Flagey Market".to_string(),
            organizer_image_url: None,
            source: EventSource::Facebook,
            source_url: None,
            latitude: 50.8275,
            longitude: 4.3722,
            featured: false,
            city: Some(City::Brussels),
        },
        CanonicalEvent {
            title: "20km de Bruxelles Training Run".to_string(),
            description: "Guided training run through the Bois de la Cambre.".to_string(),
            long_description: None,
            date: now + Duration::days(5),
            end_date: None,
            location: "Bois de la Cambre, Brussels, 1000, Belgium".to_string(),
            venue: None,
            category: EventCategory::Sports,
            image_url: String::new(),
            organizer: "Brussels Runners".to_string(),
            organizer_image_url: None,
            source: EventSource::Meetup,
            source_url: None,
            latitude: 50.8119,
            longitude: 4.3781,
            featured: false,
            city: Some(City::Brussels),
        },
        CanonicalEvent {
            title: "Improv Night at Théâtre de Toone".to_string(),
            description: "Short-form improv in the puppet theatre's cellar bar.".to_string(),
            long_description: None,
            date: now + Duration::days(6),
            end_date: None,
            location: DEFAULT_LOCATION.to_string(),
            venue: Some("Théâtre de Toone".to_string()),
            category: EventCategory::Theater,
            image_url: String::new(),
            organizer: "Toone".to_string(),
            organizer_image_url: None,
            source: EventSource::Eventbrite,
            source_url: None,
            latitude: 50.8480,
            longitude: 4.3547,
            featured: false,
            city: Some(City::Brussels),
        },
    ]
}
