pub mod brussels_open_data;
pub mod eventbrite;
pub mod facebook;
pub mod meetup;
pub mod ticketmaster;

use serde_json::Value;
use std::sync::Arc;

use crate::apis::brussels_open_data::BrusselsOpenDataClient;
use crate::apis::eventbrite::EventbriteClient;
use crate::apis::facebook::FacebookClient;
use crate::apis::meetup::MeetupClient;
use crate::apis::ticketmaster::TicketmasterClient;
use crate::common::constants::{
    credential_env_key, ALL_PROVIDERS, BRUSSELS_OPEN_DATA_PROVIDER, EVENTBRITE_PROVIDER,
    FACEBOOK_PROVIDER, MEETUP_PROVIDER, TICKETMASTER_PROVIDER,
};
use crate::common::error::{ProviderError, ProviderResult};
use crate::common::types::EventProvider;
use crate::config::AppConfig;

/// Factory for a single provider client by name.
pub fn create_provider(name: &str, config: &Arc<AppConfig>) -> Option<Box<dyn EventProvider>> {
    match name {
        FACEBOOK_PROVIDER => Some(Box::new(FacebookClient::new(config.clone()))),
        EVENTBRITE_PROVIDER => Some(Box::new(EventbriteClient::new(config.clone()))),
        MEETUP_PROVIDER => Some(Box::new(MeetupClient::new(config.clone()))),
        BRUSSELS_OPEN_DATA_PROVIDER => {
            Some(Box::new(BrusselsOpenDataClient::new(config.clone())))
        }
        TICKETMASTER_PROVIDER => Some(Box::new(TicketmasterClient::new(config.clone()))),
        _ => None,
    }
}

/// All providers in registry order.
pub fn all_providers(config: &Arc<AppConfig>) -> Vec<Box<dyn EventProvider>> {
    ALL_PROVIDERS
        .iter()
        .filter_map(|name| create_provider(name, config))
        .collect()
}

/// Resolve a provider's credential or fail with the env key it was looked
/// up under.
pub(crate) fn require_credential<'a>(
    config: &'a AppConfig,
    provider: &str,
) -> ProviderResult<&'a str> {
    let key = credential_env_key(provider).unwrap_or("API key");
    config
        .credential(provider)
        .ok_or(ProviderError::NotConfigured(key))
}

/// Send a prepared GET request and parse the body as JSON. Non-2xx statuses
/// come back as `UpstreamStatus` with the response body attached.
pub(crate) async fn fetch_json(request: reqwest::RequestBuilder) -> ProviderResult<Value> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::UpstreamStatus {
            status: status.as_u16(),
            body,
        });
    }
    let body = response.text().await?;
    let value = serde_json::from_str(&body)?;
    Ok(value)
}

/// A string field that is present and non-blank, trimmed.
pub(crate) fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|text| !text.is_empty())
}
