//! Embedding adapters normalizing provider output to `Vec<Vec<f32>>`

pub mod cache;
pub mod cloudflare;
pub mod mistral;
pub mod models;
pub mod nomic;
pub mod together;

pub use cache::{CacheStats, CachedEmbeddingFunction, EmbeddingCache};
pub use cloudflare::CloudflareWorkersAiEmbeddings;
pub use mistral::MistralEmbeddings;
pub use models::{EmbeddingData, EmbeddingRequest, EmbeddingResponse};
pub use nomic::NomicEmbeddings;
pub use together::TogetherEmbeddings;

use crate::error::{EmbeddingError, Result};
use async_trait::async_trait;

/// A single embedding vector
pub type Embedding = Vec<f32>;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingFunction: Send + Sync {
    /// Generate embeddings for multiple texts, one vector per text in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Generate embedding for a single text
    async fn embed_single(&self, text: &str) -> Result<Embedding> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| EmbeddingError::MissingEmbeddings("empty response".to_string()).into())
    }

    /// Dimension of the produced vectors, when fixed by configuration
    fn embedding_dimension(&self) -> Option<usize> {
        None
    }
}

/// Reject an empty batch before any request is made
pub(crate) fn ensure_not_empty(texts: &[String]) -> Result<()> {
    if texts.is_empty() {
        return Err(EmbeddingError::InvalidInput("Texts cannot be empty".to_string()).into());
    }
    Ok(())
}

/// Check the provider returned one embedding per input text
pub(crate) fn ensure_count(provider: &str, expected: usize, embeddings: &[Embedding]) -> Result<()> {
    if embeddings.len() != expected {
        return Err(EmbeddingError::MissingEmbeddings(format!(
            "{} returned {} embeddings for {} texts",
            provider,
            embeddings.len(),
            expected
        ))
        .into());
    }
    Ok(())
}
