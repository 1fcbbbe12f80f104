//! Together AI embeddings
//!
//! See <https://docs.together.ai/docs/embeddings-overview> for available models.

use super::{ensure_count, ensure_not_empty, models::*, Embedding, EmbeddingFunction};
use crate::config::TogetherConfig;
use crate::error::Result;
use crate::http::ApiClient;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::debug;

/// Embeddings from the Together `/embeddings` endpoint
pub struct TogetherEmbeddings {
    client: ApiClient,
    api_url: String,
    model_name: String,
}

impl TogetherEmbeddings {
    pub fn new(config: TogetherConfig) -> Result<Self> {
        let client = ApiClient::new("together", config.api_key.expose_secret(), &config.http)?;
        Ok(Self {
            client,
            api_url: format!("{}/embeddings", config.base_url.trim_end_matches('/')),
            model_name: config.embedding_model,
        })
    }

    /// Build from `TOGETHER_API_KEY` with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(TogetherConfig::from_env()?)
    }
}

#[async_trait]
impl EmbeddingFunction for TogetherEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        ensure_not_empty(texts)?;
        debug!(model = %self.model_name, count = texts.len(), "Requesting Together embeddings");

        let request = EmbeddingRequest::new(self.model_name.as_str(), texts);
        let response: EmbeddingResponse = self.client.post_json(&self.api_url, &request).await?;
        let embeddings = response.into_embeddings();

        ensure_count("Together", texts.len(), &embeddings)?;
        Ok(embeddings)
    }
}
