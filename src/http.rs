//! JSON-over-HTTP client shared by the provider adapters

use crate::config::HttpConfig;
use crate::error::{ApiError, ExtrasError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const BASE_DELAY_MS: u64 = 100;
const MAX_DELAY_MS: u64 = 30_000;

/// Authenticated client for one provider
#[derive(Debug, Clone)]
pub struct ApiClient {
    provider: &'static str,
    http_client: Client,
    max_retries: u32,
}

impl ApiClient {
    /// Build a client sending `Authorization: Bearer <token>` plus any configured headers
    pub fn new(provider: &'static str, bearer_token: &str, config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ExtrasError::Config(format!("Invalid header name {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ExtrasError::Config(format!("Invalid header value for {}: {}", name, e)))?;
            headers.insert(name, value);
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", bearer_token))
            .map_err(|_| ExtrasError::Config(format!("Invalid {} API key", provider)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(ApiError::Network)?;

        info!(provider, timeout_secs = config.timeout_secs, "Initialized API client");

        Ok(Self {
            provider,
            http_client,
            max_retries: config.max_retries,
        })
    }

    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// POST `body` as JSON and decode the JSON response, retrying transient failures
    pub async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match self.try_post(url, body).await {
                Ok(response) => {
                    debug!(provider = self.provider, attempt, "Request succeeded");
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempt <= self.max_retries => {
                    warn!(provider = self.provider, attempt, "Request failed: {}", e);
                    let delay = backoff_delay(attempt);
                    debug!("Retrying after {}ms", delay.as_millis());
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    async fn try_post<B, R>(&self, url: &str, body: &B) -> std::result::Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!(provider = self.provider, url, "Making API request");

        let response = self.http_client
            .post(url)
            .json(body)
            .send()
            .await?;

        let status = response.status();

        match status {
            s if s.is_success() => {
                let bytes = response.bytes().await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!(provider = self.provider, "Authentication failed");
                Err(ApiError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(provider = self.provider, "Rate limit exceeded");
                Err(ApiError::RateLimitExceeded)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                error!(provider = self.provider, "API request failed with status {}: {}", status, body);
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

/// Exponential backoff capped at 30s with ±25% jitter
fn backoff_delay(attempt: u32) -> Duration {
    let base = BASE_DELAY_MS.saturating_mul(2_u64.saturating_pow(attempt.saturating_sub(1)));
    let delay = base.min(MAX_DELAY_MS);
    let jitter = delay as f64 * 0.25 * (rand::random::<f64>() * 2.0 - 1.0);
    Duration::from_millis((delay as f64 + jitter).max(0.0) as u64)
}
