use thiserror::Error;
use uuid::Uuid;

/// Failure of a single provider fetch cycle. These never cross the
/// aggregation boundary; the aggregator absorbs and logs them.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("credential {0} is not configured")]
    NotConfigured(&'static str),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload: {0}")]
    Payload(String),
}

impl ProviderError {
    /// A missing credential is an expected deployment state, not a fault.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, ProviderError::NotConfigured(_))
    }
}

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("invalid event: bad or missing {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    #[error("no event with id {0}")]
    NotFound(Uuid),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AgendaError>;
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
