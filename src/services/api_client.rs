use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Envelope, ErrorBody};

/// Shared HTTP client for the tracker backend.
///
/// Requests are sent once; failures are surfaced to the caller without retry.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base_url = config.api_base();
        debug!(base_url = %base_url, "Created API client");

        Ok(Self { http, base_url })
    }

    /// Start a request for `path` (relative to `/api`), attaching the bearer
    /// token when one is held.
    pub fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and unwrap the response envelope.
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<Envelope<T>> {
        let (client, request) = builder.build_split();
        let request = request.map_err(|e| AppError::Network(e.to_string()))?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        debug!(method = %method, path = %path, "Sending request");

        let response = client.execute(request).await.map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Request did not complete");
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Failed to read response body");
            AppError::Network(e.to_string())
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!(
                method = %method,
                path = %path,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "Request failed"
            );
            return Err(AppError::from_status(status, message));
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            warn!(method = %method, path = %path, error = %e, "Failed to decode response");
            AppError::Decode(e.to_string())
        })?;

        debug!(method = %method, path = %path, status = status.as_u16(), "Request succeeded");
        envelope.check(status.as_u16())
    }
}
