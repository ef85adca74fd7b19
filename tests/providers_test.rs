#[cfg(test)]
mod tests {
    use bxl_agenda::apis::brussels_open_data::BrusselsOpenDataClient;
    use bxl_agenda::apis::eventbrite::EventbriteClient;
    use bxl_agenda::apis::facebook::FacebookClient;
    use bxl_agenda::apis::meetup::MeetupClient;
    use bxl_agenda::apis::ticketmaster::TicketmasterClient;
    use bxl_agenda::common::constants::{
        DEFAULT_EVENT_LATITUDE, DEFAULT_EVENT_LONGITUDE, DEFAULT_LOCATION,
    };
    use bxl_agenda::config::AppConfig;
    use bxl_agenda::domain::{EventCategory, EventSource};
    use serde_json::json;
    use std::sync::Arc;

    fn test_config() -> Arc<AppConfig> {
        Arc::new(AppConfig::for_tests(&[]))
    }

    #[test]
    fn test_ticketmaster_maps_complete_event() {
        let client = TicketmasterClient::new(test_config());

        let payload = json!({
            "_embedded": {
                "events": [{
                    "name": "Arctic Monkeys",
                    "url": "https://www.ticketmaster.be/event/arctic-monkeys-tickets/12345",
                    "info": "Doors open at 19:00.",
                    "dates": {
                        "start": { "dateTime": "2025-09-12T19:30:00Z" },
                        "status": { "code": "onsale" }
                    },
                    "classifications": [{
                        "segment": { "name": "Music" },
                        "genre": { "name": "Rock" },
                        "subGenre": { "name": "Indie" }
                    }],
                    "images": [
                        { "ratio": "3_2", "url": "https://img.tm/narrow.jpg" },
                        { "ratio": "16_9", "url": "https://img.tm/wide.jpg" }
                    ],
                    "promoter": { "name": "Live Nation" },
                    "_embedded": {
                        "venues": [{
                            "name": "Ancienne Belgique",
                            "address": { "line1": "Boulevard Anspach 110" },
                            "city": { "name": "Brussels" },
                            "country": { "name": "Belgium" },
                            "location": { "latitude": "50.8480", "longitude": "4.3480" }
                        }]
                    }
                }]
            }
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title, "Arctic Monkeys");
        assert_eq!(event.date.to_rfc3339(), "2025-09-12T19:30:00+00:00");
        assert_eq!(event.location, "Boulevard Anspach 110, Brussels, Belgium");
        assert_eq!(event.venue.as_deref(), Some("Ancienne Belgique"));
        assert_eq!(event.category, EventCategory::Music);
        // 16:9 wins over the first listed image
        assert_eq!(event.image_url, "https://img.tm/wide.jpg");
        assert_eq!(event.organizer, "Live Nation");
        assert_eq!(event.source, EventSource::Ticketmaster);
        assert_eq!(
            event.source_url.as_deref(),
            Some("https://www.ticketmaster.be/event/arctic-monkeys-tickets/12345")
        );
        assert_eq!(event.latitude, 50.8480);
        assert_eq!(event.longitude, 4.3480);
        assert!(event.featured);
    }

    #[test]
    fn test_ticketmaster_falls_back_to_local_date_and_evening_time() {
        let client = TicketmasterClient::new(test_config());

        let payload = json!({
            "_embedded": {
                "events": [{
                    "name": "Jazz Brunch",
                    "dates": { "start": { "localDate": "2025-09-14" } }
                }]
            }
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date.to_rfc3339(), "2025-09-14T19:00:00+00:00");
    }

    #[test]
    fn test_ticketmaster_drops_unusable_records() {
        let client = TicketmasterClient::new(test_config());

        let payload = json!({
            "_embedded": {
                "events": [
                    { "dates": { "start": { "dateTime": "2025-09-12T19:30:00Z" } } },
                    { "name": "No Start Signal At All" },
                    { "name": "   ", "dates": { "start": { "dateTime": "2025-09-12T19:30:00Z" } } },
                    { "name": "Keeper", "dates": { "start": { "localDate": "2025-09-13" } } }
                ]
            }
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Keeper");
    }

    #[test]
    fn test_ticketmaster_without_wide_image_takes_first() {
        let client = TicketmasterClient::new(test_config());

        let payload = json!({
            "_embedded": {
                "events": [{
                    "name": "Print Fair",
                    "dates": { "start": { "dateTime": "2025-09-12T10:00:00Z" } },
                    "images": [
                        { "ratio": "3_2", "url": "https://img.tm/first.jpg" },
                        { "ratio": "4_3", "url": "https://img.tm/second.jpg" }
                    ]
                }]
            }
        });

        let events = client.map_events(&payload);
        assert_eq!(events[0].image_url, "https://img.tm/first.jpg");
    }

    #[test]
    fn test_ticketmaster_without_images_leaves_url_empty() {
        let client = TicketmasterClient::new(test_config());

        let payload = json!({
            "_embedded": {
                "events": [{
                    "name": "Unlisted Show",
                    "dates": { "start": { "dateTime": "2025-09-12T20:00:00Z" } }
                }]
            }
        });

        let events = client.map_events(&payload);
        assert_eq!(events[0].image_url, "");
        assert_eq!(events[0].organizer, "Ticketmaster Event");
        assert_eq!(events[0].location, DEFAULT_LOCATION);
        assert_eq!(events[0].latitude, DEFAULT_EVENT_LATITUDE);
        assert_eq!(events[0].longitude, DEFAULT_EVENT_LONGITUDE);
    }

    #[test]
    fn test_eventbrite_maps_complete_event() {
        let client = EventbriteClient::new(test_config());

        let payload = json!({
            "events": [{
                "name": { "text": "Belgian Beer Tasting" },
                "description": { "text": "Six trappist beers, one evening." },
                "url": "https://www.eventbrite.be/e/belgian-beer-tasting-999",
                "start": { "utc": "2025-09-10T18:00:00Z" },
                "end": { "utc": "2025-09-10T21:00:00Z" },
                "is_free": false,
                "listed": true,
                "logo": { "url": "https://img.eb/logo.jpg" },
                "category": { "name": "Food & Drink" },
                "subcategory": { "name": "Beer" },
                "organizer": {
                    "name": "Brussels Beer Club",
                    "logo": { "url": "https://img.eb/org.jpg" }
                },
                "venue": {
                    "name": "Brasserie de la Senne",
                    "latitude": "50.8686",
                    "longitude": "4.3491",
                    "address": {
                        "address_1": "Drève Anna Boch 19",
                        "city": "Brussels",
                        "postal_code": "1000",
                        "region": "Brussels-Capital",
                        "country": "BE"
                    }
                }
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title, "Belgian Beer Tasting");
        assert_eq!(event.date.to_rfc3339(), "2025-09-10T18:00:00+00:00");
        assert_eq!(
            event.end_date.unwrap().to_rfc3339(),
            "2025-09-10T21:00:00+00:00"
        );
        // Street, city, postal code, region, country, in that order
        assert_eq!(
            event.location,
            "Drève Anna Boch 19, Brussels, 1000, Brussels-Capital, BE"
        );
        assert_eq!(event.venue.as_deref(), Some("Brasserie de la Senne"));
        assert_eq!(event.category, EventCategory::Food);
        assert_eq!(event.organizer, "Brussels Beer Club");
        assert_eq!(event.organizer_image_url.as_deref(), Some("https://img.eb/org.jpg"));
        assert_eq!(event.source, EventSource::Eventbrite);
        assert_eq!(event.latitude, 50.8686);
        assert_eq!(event.longitude, 4.3491);
        assert!(event.featured);
    }

    #[test]
    fn test_eventbrite_featured_tracks_paid_or_listed() {
        let client = EventbriteClient::new(test_config());

        let payload = json!({
            "events": [
                {
                    "name": { "text": "Free and unlisted" },
                    "start": { "utc": "2025-09-10T18:00:00Z" },
                    "is_free": true,
                    "listed": false
                },
                {
                    "name": { "text": "Free but listed" },
                    "start": { "utc": "2025-09-10T18:00:00Z" },
                    "is_free": true,
                    "listed": true
                },
                {
                    "name": { "text": "Paid" },
                    "start": { "utc": "2025-09-10T18:00:00Z" },
                    "is_free": false
                }
            ]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 3);
        assert!(!events[0].featured);
        assert!(events[1].featured);
        assert!(events[2].featured);
    }

    #[test]
    fn test_eventbrite_drops_records_without_title_or_start() {
        let client = EventbriteClient::new(test_config());

        let payload = json!({
            "events": [
                { "start": { "utc": "2025-09-10T18:00:00Z" } },
                { "name": { "text": "No start" } },
                { "name": { "text": "Valid" }, "start": { "utc": "2025-09-10T18:00:00Z" } }
            ]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Valid");
    }

    #[test]
    fn test_meetup_maps_complete_event() {
        let client = MeetupClient::new(test_config());

        let payload = json!({
            "events": [{
                "name": "Rust Brussels Monthly",
                "description": "Talks and hacking.",
                "link": "https://www.meetup.com/rust-brussels/events/304111/",
                "local_date": "2025-09-08",
                "local_time": "18:30",
                "duration": 7200000,
                "yes_rsvp_count": 42,
                "venue": {
                    "name": "BeCentral",
                    "address_1": "Cantersteen 12",
                    "city": "Brussels",
                    "country": "be",
                    "lat": 50.8455,
                    "lon": 4.3571
                },
                "group": {
                    "name": "Rust Brussels",
                    "category": { "name": "Tech" }
                },
                "featured_photo": {
                    "highres_link": "https://img.mu/highres.jpg",
                    "photo_link": "https://img.mu/photo.jpg"
                }
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title, "Rust Brussels Monthly");
        assert_eq!(event.date.to_rfc3339(), "2025-09-08T18:30:00+00:00");
        // duration is in milliseconds
        assert_eq!(
            event.end_date.unwrap().to_rfc3339(),
            "2025-09-08T20:30:00+00:00"
        );
        assert_eq!(event.location, "Cantersteen 12, Brussels, be");
        // "Tech" matches no trigger group
        assert_eq!(event.category, EventCategory::Cultural);
        assert_eq!(event.image_url, "https://img.mu/highres.jpg");
        assert_eq!(event.organizer, "Rust Brussels");
        assert_eq!(event.source, EventSource::Meetup);
        assert_eq!(event.latitude, 50.8455);
        assert_eq!(event.longitude, 4.3571);
        assert!(event.featured);
    }

    #[test]
    fn test_meetup_defaults_missing_time_to_evening() {
        let client = MeetupClient::new(test_config());

        let payload = json!({
            "events": [{
                "name": "Board Games Afternoon",
                "local_date": "2025-09-09",
                "yes_rsvp_count": 5
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date.to_rfc3339(), "2025-09-09T19:00:00+00:00");
        assert!(events[0].end_date.is_none());
        assert!(!events[0].featured);
        assert_eq!(events[0].organizer, "Meetup Group");
    }

    #[test]
    fn test_meetup_drops_records_without_local_date() {
        let client = MeetupClient::new(test_config());

        let payload = json!({
            "events": [
                { "name": "No date", "local_time": "19:00" },
                { "name": "Dated", "local_date": "2025-09-09" }
            ]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Dated");
    }

    #[test]
    fn test_facebook_maps_complete_event() {
        let client = FacebookClient::new(test_config());

        let payload = json!({
            "data": [{
                "id": "987654321",
                "name": "Open Air Cinema at Bois de la Cambre",
                "description": "Classics under the stars.",
                "category": "MUSIC_EVENT",
                "start_time": "2025-09-05T20:00:00+0200",
                "end_time": "2025-09-05T23:00:00+0200",
                "attending_count": 64,
                "interested_count": 20,
                "cover": { "source": "https://img.fb/cover.jpg" },
                "owner": { "name": "Cinéma en Plein Air" },
                "place": {
                    "name": "Bois de la Cambre",
                    "location": {
                        "street": "Avenue de Flore",
                        "city": "Brussels",
                        "country": "Belgium",
                        "latitude": 50.8021,
                        "longitude": 4.3782
                    }
                }
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title, "Open Air Cinema at Bois de la Cambre");
        // +0200 offsets normalize to UTC
        assert_eq!(event.date.to_rfc3339(), "2025-09-05T18:00:00+00:00");
        assert_eq!(
            event.end_date.unwrap().to_rfc3339(),
            "2025-09-05T21:00:00+00:00"
        );
        assert_eq!(event.location, "Avenue de Flore, Brussels, Belgium");
        assert_eq!(event.venue.as_deref(), Some("Bois de la Cambre"));
        assert_eq!(event.category, EventCategory::Music);
        assert_eq!(event.organizer, "Cinéma en Plein Air");
        assert_eq!(event.source, EventSource::Facebook);
        // Graph results carry no listing URL; the id rebuilds one
        assert_eq!(
            event.source_url.as_deref(),
            Some("https://facebook.com/events/987654321")
        );
        assert_eq!(event.latitude, 50.8021);
        assert_eq!(event.longitude, 4.3782);
        assert!(event.featured);
    }

    #[test]
    fn test_facebook_featured_needs_attendance_or_interest() {
        let client = FacebookClient::new(test_config());

        let payload = json!({
            "data": [
                {
                    "id": "1",
                    "name": "Quiet Gathering",
                    "start_time": "2025-09-05T20:00:00+0200",
                    "attending_count": 10,
                    "interested_count": 50
                },
                {
                    "id": "2",
                    "name": "Popular by Interest",
                    "start_time": "2025-09-05T20:00:00+0200",
                    "attending_count": 10,
                    "interested_count": 150
                }
            ]
        });

        let events = client.map_events(&payload);
        assert!(!events[0].featured);
        assert!(events[1].featured);
    }

    #[test]
    fn test_facebook_without_place_uses_fallbacks() {
        let client = FacebookClient::new(test_config());

        let payload = json!({
            "data": [{
                "id": "55",
                "name": "Somewhere in Town",
                "start_time": "2025-09-05T20:00:00+0200"
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(events[0].location, DEFAULT_LOCATION);
        assert_eq!(events[0].latitude, DEFAULT_EVENT_LATITUDE);
        assert_eq!(events[0].longitude, DEFAULT_EVENT_LONGITUDE);
        assert_eq!(events[0].organizer, "Facebook Event");
    }

    #[test]
    fn test_brussels_maps_complete_record() {
        let client = BrusselsOpenDataClient::new(test_config());

        let payload = json!({
            "records": [{
                "record_id": "9f3a2b",
                "fields": {
                    "title": "Nocturnes des Musées",
                    "description": "Late museum openings across the city.",
                    "start_date": "2025-09-03T20:00:00+02:00",
                    "end_date": "2025-09-03T23:00:00+02:00",
                    "address": "Rue de la Régence 3",
                    "municipality": "Brussels",
                    "zip_code": "1000",
                    "location_name": "Musées royaux des Beaux-Arts",
                    "event_type": "Exhibition",
                    "theme": "Contemporary",
                    "organizer": "Conseil bruxellois des Musées",
                    "url": "https://www.museumnightfever.be",
                    "highlight": true,
                    "geo_point_2d": [50.8427, 4.3570]
                }
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.title, "Nocturnes des Musées");
        assert_eq!(event.date.to_rfc3339(), "2025-09-03T18:00:00+00:00");
        assert_eq!(event.location, "Rue de la Régence 3, Brussels, 1000");
        assert_eq!(event.venue.as_deref(), Some("Musées royaux des Beaux-Arts"));
        // "Exhibition, Contemporary" lands in the art group
        assert_eq!(event.category, EventCategory::Art);
        assert_eq!(event.organizer, "Conseil bruxellois des Musées");
        assert_eq!(event.source, EventSource::BrusselsOpenData);
        assert_eq!(event.source_url.as_deref(), Some("https://www.museumnightfever.be"));
        assert_eq!(event.latitude, 50.8427);
        assert_eq!(event.longitude, 4.3570);
        assert!(event.featured);
    }

    #[test]
    fn test_brussels_reorients_swapped_geo_point() {
        let client = BrusselsOpenDataClient::new(test_config());

        // Same record twice, once lat-first and once lng-first
        let payload = json!({
            "records": [
                {
                    "fields": {
                        "title": "Flagey Market",
                        "start_date": "2025-09-06",
                        "geo_point_2d": [50.8270, 4.3724]
                    }
                },
                {
                    "fields": {
                        "title": "Flagey Market Reversed",
                        "start_date": "2025-09-06",
                        "geo_point_2d": [4.3724, 50.8270]
                    }
                }
            ]
        });

        let events = client.map_events(&payload);
        assert_eq!(events.len(), 2);
        for event in &events {
            assert_eq!(event.latitude, 50.8270);
            assert_eq!(event.longitude, 4.3724);
        }
    }

    #[test]
    fn test_brussels_builds_permalink_when_url_is_missing() {
        let client = BrusselsOpenDataClient::new(test_config());

        let payload = json!({
            "records": [{
                "record_id": "abc123",
                "fields": {
                    "title": "Archives Open Day",
                    "start_date": "2025-09-04"
                }
            }]
        });

        let events = client.map_events(&payload);
        assert_eq!(
            events[0].source_url.as_deref(),
            Some("https://opendata.brussels.be/explore/dataset/cultural-events/record/abc123")
        );
        // Bare dates are taken as midnight UTC
        assert_eq!(events[0].date.to_rfc3339(), "2025-09-04T00:00:00+00:00");
        assert_eq!(events[0].organizer, "Brussels Open Data");
        assert!(!events[0].featured);
    }

    #[test]
    fn test_brussels_falls_back_to_labeled_coordinate_fields() {
        let client = BrusselsOpenDataClient::new(test_config());

        let payload = json!({
            "records": [
                {
                    "fields": {
                        "title": "Labeled Fields",
                        "start_date": "2025-09-04",
                        "latitude": "50.8950",
                        "longitude": "4.3415"
                    }
                },
                {
                    "fields": {
                        "title": "No Coordinates",
                        "start_date": "2025-09-04"
                    }
                }
            ]
        });

        let events = client.map_events(&payload);
        assert_eq!(events[0].latitude, 50.8950);
        assert_eq!(events[0].longitude, 4.3415);
        assert_eq!(events[1].latitude, DEFAULT_EVENT_LATITUDE);
        assert_eq!(events[1].longitude, DEFAULT_EVENT_LONGITUDE);
    }

    #[test]
    fn test_empty_payloads_map_to_no_events() {
        let config = test_config();
        let empty = json!({});

        assert!(TicketmasterClient::new(config.clone()).map_events(&empty).is_empty());
        assert!(EventbriteClient::new(config.clone()).map_events(&empty).is_empty());
        assert!(MeetupClient::new(config.clone()).map_events(&empty).is_empty());
        assert!(FacebookClient::new(config.clone()).map_events(&empty).is_empty());
        assert!(BrusselsOpenDataClient::new(config).map_events(&empty).is_empty());
    }
}
