use crate::config::ClientConfig;
use crate::domain::model::{Notification, AUTH_TOKEN_KEY};
use crate::domain::ports::{Notifier, TokenStore};
use crate::utils::error::{ErrorBody, Result, SearchError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Per-call extras. Headers are applied in order after the auth header, last write wins.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP wrapper shared by every request module.
///
/// Builds URLs from the configured backend domain, attaches the stored bearer token and,
/// when a call fails, logs it and raises exactly one notification before handing the
/// original error back to the caller.
pub struct ApiClient<S: TokenStore, N: Notifier> {
    config: ClientConfig,
    storage: S,
    notifier: N,
    client: Client,
}

impl<S: TokenStore, N: Notifier> ApiClient<S, N> {
    pub fn new(config: ClientConfig, storage: S, notifier: N) -> Self {
        Self {
            config,
            storage,
            notifier,
            client: Client::new(),
        }
    }

    /// Switches the backend domain when one is given; `None` keeps the current one.
    pub fn initialize(&mut self, backend_domain: Option<&str>) {
        if let Some(domain) = backend_domain.filter(|domain| !domain.is_empty()) {
            self.config.set_backend_domain(domain);
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        options: RequestOptions,
    ) -> Result<T> {
        match self.execute(method.clone(), endpoint, body, options).await {
            Ok(value) => Ok(value),
            Err(err) => {
                let message = err.user_message();
                tracing::error!("Request failed: {} {}: {}", method, endpoint, message);

                self.notifier.notify(&Notification::error(
                    message,
                    self.config.notification_duration,
                ));
                Err(err)
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request(Method::GET, endpoint, None, RequestOptions::default())
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        self.request(Method::POST, endpoint, Some(body), RequestOptions::default())
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&serde_json::Value>,
        options: RequestOptions,
    ) -> Result<T> {
        let url = self.config.url_for(endpoint);
        let headers = self.build_headers(&options).await?;

        let mut request = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = options.timeout.or(self.config.timeout) {
            request = request.timeout(timeout);
        }

        tracing::debug!("📡 {} {}", method, url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Response status: {}", status);

        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body = serde_json::from_slice::<ErrorBody>(&bytes).ok();
            return Err(SearchError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        serde_json::from_slice(payload).map_err(|e| SearchError::DecodeError {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    async fn build_headers(&self, options: &RequestOptions) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        if let Some(token) = self.storage.get_item(AUTH_TOKEN_KEY).await? {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", token))?);
        }

        for (name, value) in &options.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SearchError::ValidationError {
                    message: format!("Invalid header name '{}': {}", name, e),
                }
            })?;
            headers.insert(name, header_value(value)?);
        }

        Ok(headers)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| SearchError::ValidationError {
        message: format!("Invalid header value: {}", e),
    })
}
