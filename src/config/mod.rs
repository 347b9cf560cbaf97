#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{validate_endpoint, validate_positive_number, validate_url, Validate};
use std::time::Duration;

pub const API_BASE_URL_ENV: &str = "ARRIVALS_API_BASE_URL";
pub const FLIGHT_ENDPOINT_ENV: &str = "ARRIVALS_FLIGHT_ENDPOINT";
pub const DEFAULT_LOOKUP_ENDPOINT: &str = "/search";

/// Settings the HTTP client reads on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub backend_domain: String,
    pub flight_endpoint: String,
    pub lookup_endpoint: String,
    pub timeout: Option<Duration>,
    pub notification_duration: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_domain: String::new(),
            flight_endpoint: String::new(),
            lookup_endpoint: DEFAULT_LOOKUP_ENDPOINT.to_string(),
            timeout: None,
            notification_duration: crate::domain::model::Notification::DEFAULT_DURATION,
        }
    }
}

impl ClientConfig {
    pub fn new(backend_domain: impl Into<String>) -> Self {
        Self {
            backend_domain: backend_domain.into(),
            ..Self::default()
        }
    }

    /// Reads the API base URL and flight endpoint from the environment once.
    pub fn from_env() -> Self {
        Self {
            backend_domain: std::env::var(API_BASE_URL_ENV).unwrap_or_default(),
            flight_endpoint: std::env::var(FLIGHT_ENDPOINT_ENV).unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn with_flight_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.flight_endpoint = endpoint.into();
        self
    }

    pub fn with_lookup_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.lookup_endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn set_backend_domain(&mut self, domain: impl Into<String>) {
        self.backend_domain = domain.into();
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.backend_domain, endpoint)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        if self.backend_domain.trim().is_empty() {
            return Err(SearchError::MissingConfigError {
                field: format!("backend.domain (or {})", API_BASE_URL_ENV),
            });
        }
        validate_url("backend.domain", &self.backend_domain)?;
        validate_endpoint("backend.flight_endpoint", &self.flight_endpoint)?;
        validate_endpoint("backend.lookup_endpoint", &self.lookup_endpoint)?;

        if let Some(timeout) = self.timeout {
            validate_positive_number("backend.timeout_seconds", timeout.as_secs(), 1)?;
        }

        Ok(())
    }
}
