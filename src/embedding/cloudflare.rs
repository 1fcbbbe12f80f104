//! Cloudflare Workers AI embeddings
//!
//! Models: <https://developers.cloudflare.com/workers-ai/models/embedding/>

use super::{ensure_count, ensure_not_empty, Embedding, EmbeddingFunction};
use crate::config::{validation::validate_cloudflare_config, CloudflareConfig};
use crate::error::{ApiError, EmbeddingError, Result};
use crate::http::ApiClient;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4/accounts";

#[derive(Debug, Serialize)]
struct CloudflareRequest<'a> {
    text: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CloudflareResponse {
    #[serde(default)]
    result: Option<CloudflareResult>,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CloudflareResult {
    #[serde(default)]
    data: Option<Vec<Embedding>>,
}

/// Embeddings from Cloudflare Workers AI, directly or through an AI Gateway
pub struct CloudflareWorkersAiEmbeddings {
    client: ApiClient,
    api_url: String,
    max_batch_size: usize,
}

impl CloudflareWorkersAiEmbeddings {
    pub fn new(config: CloudflareConfig) -> Result<Self> {
        validate_cloudflare_config(&config)?;

        let api_url = match (&config.gateway_endpoint, &config.account_id) {
            (Some(gateway), _) => {
                let separator = if gateway.ends_with('/') { "" } else { "/" };
                format!("{}{}{}", gateway, separator, config.model_name)
            }
            (None, account) => format!(
                "{}/{}/ai/run/{}",
                CLOUDFLARE_API_BASE,
                account.as_deref().unwrap_or_default(),
                config.model_name
            ),
        };

        let client = ApiClient::new("cloudflare", config.api_token.expose_secret(), &config.http)?;

        Ok(Self {
            client,
            api_url,
            max_batch_size: config.max_batch_size,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl EmbeddingFunction for CloudflareWorkersAiEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        ensure_not_empty(texts)?;

        // the endpoint schema caps batches; splitting is left to the caller
        if texts.len() > self.max_batch_size {
            return Err(EmbeddingError::BatchTooLarge {
                size: texts.len(),
                max: self.max_batch_size,
            }
            .into());
        }

        debug!(url = %self.api_url, count = texts.len(), "Requesting Cloudflare embeddings");

        let response: CloudflareResponse = self.client
            .post_json(&self.api_url, &CloudflareRequest { text: texts })
            .await?;

        let embeddings = response
            .result
            .and_then(|r| r.data)
            .ok_or_else(|| {
                ApiError::UnexpectedResponse(format!(
                    "Error calling Cloudflare Workers AI: {}",
                    serde_json::Value::Array(response.errors)
                ))
            })?;

        ensure_count("Cloudflare", texts.len(), &embeddings)?;
        Ok(embeddings)
    }
}
