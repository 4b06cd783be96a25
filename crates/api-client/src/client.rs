//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::CatalogApi;
use crate::error::{ApiError, ApiResult};
use crate::middleware::RateLimiter;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header
const API_KEY_HEADER: &str = "X-Api-Key";

/// Gudang API client
///
/// Wraps `reqwest` and adds:
/// - Rate limiting to avoid throttling
/// - Request correlation IDs for tracing
///
/// Requests are single-attempt on purpose: the suggestion engine treats a
/// failed lookup as expendable and the next keystroke re-triggers it, so a
/// retry layer here would only duplicate work behind the engine's back.
#[derive(Clone)]
pub struct GudangClient {
    inner: Client,
    config: Arc<ClientConfig>,
    rate_limiter: Arc<RateLimiter>,
}

impl GudangClient {
    /// Create a new client with default configuration from environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static("gudang-api-client/1.0"),
        );

        // Add API key header if available
        if let Some(ref key) = config.api_key {
            if let Ok(value) = HeaderValue::from_str(key) {
                default_headers.insert(API_KEY_HEADER, value);
            }
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            rate_limiter,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Reset rate limits for a specific endpoint
    pub fn reset_rate_limit(&self, endpoint: &str) {
        self.rate_limiter.reset(endpoint);
    }

    /// Access catalogue endpoints
    #[must_use]
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.clone())
    }

    /// Perform a GET request
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.execute(Method::GET, path, &[]).await
    }

    /// Perform a GET request with query parameters (URL-encoded by reqwest)
    #[instrument(skip(self, query), fields(request_id))]
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        self.execute(Method::GET, path, query).await
    }

    /// Execute a single request with rate limiting and correlation
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let request_id = Uuid::new_v4().to_string();
        let rate_limit_key = rate_limit_key(path);

        if !self.rate_limiter.try_acquire(rate_limit_key) {
            warn!(
                request_id = %request_id,
                url = %url,
                "Rate limited"
            );
            return Err(ApiError::RateLimited);
        }

        let mut request = self
            .inner
            .request(method, &url)
            .header(X_REQUEST_ID, &request_id);
        if !query.is_empty() {
            request = request.query(query);
        }

        let start = Instant::now();
        let response = request.send().await?;
        debug!(
            request_id = %request_id,
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );

        self.handle_response(response).await
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(ApiError::Request)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}

/// Rate-limit bucket key for a request path (its first segment)
fn rate_limit_key(path: &str) -> &str {
    let path = path.trim_start_matches('/');
    path.split(['/', '?'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("default")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_key() {
        assert_eq!(rate_limit_key("catalog/search?q=kompor"), "catalog");
        assert_eq!(rate_limit_key("/catalog/items"), "catalog");
        assert_eq!(rate_limit_key("health"), "health");
        assert_eq!(rate_limit_key(""), "default");
    }

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::development();
        let client = GudangClient::with_config(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ClientConfig::default().with_base_url("not-a-url");
        assert!(GudangClient::with_config(config).is_err());
    }
}
