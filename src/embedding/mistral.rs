//! Mistral AI embeddings

use super::{ensure_count, ensure_not_empty, models::*, Embedding, EmbeddingFunction};
use crate::config::MistralConfig;
use crate::error::Result;
use crate::http::ApiClient;
use async_trait::async_trait;
use secrecy::ExposeSecret;

/// Embeddings from the Mistral `/v1/embeddings` endpoint
pub struct MistralEmbeddings {
    client: ApiClient,
    api_url: String,
    model_name: String,
}

impl MistralEmbeddings {
    pub fn new(config: MistralConfig) -> Result<Self> {
        let client = ApiClient::new("mistral", config.api_key.expose_secret(), &config.http)?;
        Ok(Self {
            client,
            api_url: config.api_url,
            model_name: config.model_name,
        })
    }

    /// Build from `MISTRAL_API_KEY` with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(MistralConfig::from_env()?)
    }
}

#[async_trait]
impl EmbeddingFunction for MistralEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        ensure_not_empty(texts)?;

        let request = EmbeddingRequest::new(self.model_name.as_str(), texts);
        let response: EmbeddingResponse = self.client.post_json(&self.api_url, &request).await?;
        let embeddings = response.into_embeddings();

        ensure_count("Mistral", texts.len(), &embeddings)?;
        Ok(embeddings)
    }
}
