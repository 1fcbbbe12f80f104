//! Nomic Atlas text embeddings
//!
//! API reference: <https://docs.nomic.ai/reference/api/embed-text-v-1-embedding-text-post>

use super::{ensure_count, ensure_not_empty, Embedding, EmbeddingFunction};
use crate::config::{LongTextMode, NomicConfig, TaskType};
use crate::error::{EmbeddingError, Result};
use crate::http::ApiClient;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct NomicRequest<'a> {
    model: &'a str,
    texts: &'a [String],
    task_type: Option<TaskType>,
    dimensionality: Option<usize>,
    long_text_mode: Option<LongTextMode>,
    max_tokens_per_text: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct NomicResponse {
    #[serde(default)]
    embeddings: Option<Vec<Embedding>>,
}

/// Embeddings from the Nomic `/v1/embedding/text` endpoint
pub struct NomicEmbeddings {
    client: ApiClient,
    config: NomicConfig,
}

impl NomicEmbeddings {
    pub fn new(config: NomicConfig) -> Result<Self> {
        let client = ApiClient::new("nomic", config.api_key.expose_secret(), &config.http)?;
        Ok(Self { client, config })
    }

    /// Build from `NOMIC_API_KEY` with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(NomicConfig::from_env()?)
    }
}

#[async_trait]
impl EmbeddingFunction for NomicEmbeddings {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        ensure_not_empty(texts)?;

        let request = NomicRequest {
            model: &self.config.model_name,
            texts,
            task_type: self.config.task_type,
            dimensionality: self.config.dimensionality,
            long_text_mode: self.config.long_text_mode,
            max_tokens_per_text: self.config.max_tokens_per_text,
        };

        let response: NomicResponse = self.client.post_json(&self.config.api_url, &request).await?;
        let embeddings = response.embeddings.ok_or_else(|| {
            EmbeddingError::MissingEmbeddings("Nomic API did not return embeddings".to_string())
        })?;

        ensure_count("Nomic", texts.len(), &embeddings)?;
        Ok(embeddings)
    }

    fn embedding_dimension(&self) -> Option<usize> {
        self.config.dimensionality
    }
}
