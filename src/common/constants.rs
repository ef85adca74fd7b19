/// Provider name constants to ensure consistency across the codebase.
/// These are the stable identifiers used by the CLI, the provider registry
/// and the credential lookup.
// Provider names (used in CLI and as serialized source identifiers)
pub const FACEBOOK_PROVIDER: &str = "facebook";
pub const EVENTBRITE_PROVIDER: &str = "eventbrite";
pub const MEETUP_PROVIDER: &str = "meetup";
pub const BRUSSELS_OPEN_DATA_PROVIDER: &str = "brussels_open_data";
pub const TICKETMASTER_PROVIDER: &str = "ticketmaster";

/// All providers in registry order. Aggregated output keeps this order.
pub const ALL_PROVIDERS: [&str; 5] = [
    FACEBOOK_PROVIDER,
    EVENTBRITE_PROVIDER,
    MEETUP_PROVIDER,
    BRUSSELS_OPEN_DATA_PROVIDER,
    TICKETMASTER_PROVIDER,
];

/// Environment variable holding the credential for a provider.
pub fn credential_env_key(provider: &str) -> Option<&'static str> {
    match provider {
        FACEBOOK_PROVIDER => Some("FACEBOOK_API_KEY"),
        EVENTBRITE_PROVIDER => Some("EVENTBRITE_API_KEY"),
        MEETUP_PROVIDER => Some("MEETUP_API_KEY"),
        BRUSSELS_OPEN_DATA_PROVIDER => Some("BRUSSELS_OPEN_DATA_API_KEY"),
        TICKETMASTER_PROVIDER => Some("TICKETMASTER_API_KEY"),
        _ => None,
    }
}

// Search region defaults (Grand Place, Brussels)
pub const DEFAULT_REGION_LATITUDE: f64 = 50.8476;
pub const DEFAULT_REGION_LONGITUDE: f64 = 4.3572;
pub const DEFAULT_REGION_RADIUS_KM: f64 = 10.0;

// Fallback point for events with missing or unusable coordinates,
// central Brussels so they still land on the map
pub const DEFAULT_EVENT_LATITUDE: f64 = 50.85045;
pub const DEFAULT_EVENT_LONGITUDE: f64 = 4.34878;

/// Location string used when a provider supplies no address parts at all.
pub const DEFAULT_LOCATION: &str = "Brussels, Belgium";

/// Clock time assumed when a provider gives a calendar day without one.
pub const DEFAULT_LOCAL_TIME: &str = "19:00:00";

/// How far ahead each fetch cycle looks.
pub const FETCH_WINDOW_DAYS: i64 = 7;

/// Per-request timeout for outbound provider calls, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;
