use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::common::constants::{
    credential_env_key, ALL_PROVIDERS, DEFAULT_REGION_LATITUDE, DEFAULT_REGION_LONGITUDE,
    DEFAULT_REGION_RADIUS_KM, HTTP_TIMEOUT_SECS,
};
use crate::common::error::{AgendaError, Result};

/// Geographic center and radius of the search region providers query.
#[derive(Debug, Clone, Copy)]
pub struct RegionCenter {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl Default for RegionCenter {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_REGION_LATITUDE,
            longitude: DEFAULT_REGION_LONGITUDE,
            radius_km: DEFAULT_REGION_RADIUS_KM,
        }
    }
}

/// Runtime configuration: provider credentials from the environment plus
/// optional region and HTTP tuning from `config.toml`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    credentials: HashMap<String, String>,
    region: RegionCenter,
    http_timeout: Duration,
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    region: Option<RegionSection>,
    http: Option<HttpSection>,
}

#[derive(Debug, Deserialize)]
struct RegionSection {
    latitude: Option<f64>,
    longitude: Option<f64>,
    radius_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct HttpSection {
    timeout_seconds: Option<u64>,
}

impl AppConfig {
    /// Load from the environment and `config.toml` in the working directory.
    /// A missing file just means defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                AgendaError::Config(format!(
                    "failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            toml::from_str(&content)?
        } else {
            ConfigFile::default()
        };
        Ok(Self::from_parts(credentials_from_env(), file))
    }

    /// Environment only, no config file.
    pub fn from_env() -> Self {
        Self::from_parts(credentials_from_env(), ConfigFile::default())
    }

    /// Fixed credentials and default region, for tests.
    pub fn for_tests(credentials: &[(&str, &str)]) -> Self {
        let credentials = credentials
            .iter()
            .map(|(provider, value)| (provider.to_string(), value.to_string()))
            .collect();
        Self {
            credentials,
            region: RegionCenter::default(),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }

    fn from_parts(credentials: HashMap<String, String>, file: ConfigFile) -> Self {
        let defaults = RegionCenter::default();
        let region = match file.region {
            Some(section) => RegionCenter {
                latitude: section.latitude.unwrap_or(defaults.latitude),
                longitude: section.longitude.unwrap_or(defaults.longitude),
                radius_km: section.radius_km.unwrap_or(defaults.radius_km),
            },
            None => defaults,
        };
        let timeout_seconds = file
            .http
            .and_then(|section| section.timeout_seconds)
            .unwrap_or(HTTP_TIMEOUT_SECS);
        Self {
            credentials,
            region,
            http_timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Credential for a provider, or None when it is not configured.
    pub fn credential(&self, provider: &str) -> Option<&str> {
        self.credentials.get(provider).map(String::as_str)
    }

    pub fn region_center(&self) -> RegionCenter {
        self.region
    }

    pub fn http_timeout(&self) -> Duration {
        self.http_timeout
    }
}

fn credentials_from_env() -> HashMap<String, String> {
    let mut credentials = HashMap::new();
    for provider in ALL_PROVIDERS {
        if let Some(key) = credential_env_key(provider) {
            if let Ok(value) = std::env::var(key) {
                if !value.trim().is_empty() {
                    credentials.insert(provider.to_string(), value);
                }
            }
        }
    }
    credentials
}
