//! Caching layer for embeddings using moka

use super::{Embedding, EmbeddingFunction};
use crate::error::Result;
use async_trait::async_trait;
use moka::future::Cache;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info};

/// Statistics about cache contents
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub size: u64,
    pub max_size: u64,
}

/// Async TTL cache for embeddings keyed by text hash
pub struct EmbeddingCache {
    cache: Cache<String, Embedding>,
    max_size: u64,
}

impl EmbeddingCache {
    /// Create a new cache with specified capacity and TTL
    pub fn new(max_size: u64, ttl: Duration) -> Self {
        info!("Initializing embedding cache with max_size={}, ttl={:?}", max_size, ttl);

        let cache = Cache::builder()
            .max_capacity(max_size)
            .time_to_live(ttl)
            .build();

        Self { cache, max_size }
    }

    /// Cache key for a text
    pub fn key(text: &str) -> String {
        format!("emb_{}", hex::encode(Sha256::digest(text.as_bytes())))
    }

    pub async fn get(&self, text: &str) -> Option<Embedding> {
        self.cache.get(&Self::key(text)).await
    }

    pub async fn put(&self, text: &str, embedding: Embedding) {
        self.cache.insert(Self::key(text), embedding).await;
    }

    pub async fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    pub async fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks().await;
        CacheStats {
            size: self.cache.entry_count(),
            max_size: self.max_size,
        }
    }
}

/// Wraps an embedding function so repeated texts are served from cache
pub struct CachedEmbeddingFunction<E> {
    inner: E,
    cache: EmbeddingCache,
}

impl<E: EmbeddingFunction> CachedEmbeddingFunction<E> {
    pub fn new(inner: E, max_size: u64, ttl: Duration) -> Self {
        Self {
            inner,
            cache: EmbeddingCache::new(max_size, ttl),
        }
    }

    pub fn cache(&self) -> &EmbeddingCache {
        &self.cache
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: EmbeddingFunction> EmbeddingFunction for CachedEmbeddingFunction<E> {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        let mut results: Vec<Option<Embedding>> = Vec::with_capacity(texts.len());
        let mut uncached_indices = Vec::new();
        let mut uncached_texts = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            match self.cache.get(text).await {
                Some(embedding) => results.push(Some(embedding)),
                None => {
                    results.push(None);
                    uncached_indices.push(i);
                    uncached_texts.push(text.clone());
                }
            }
        }

        if !uncached_texts.is_empty() {
            debug!("Fetching {} uncached embeddings", uncached_texts.len());
            let fetched = self.inner.embed_batch(&uncached_texts).await?;
            super::ensure_count("cached provider", uncached_texts.len(), &fetched)?;

            for ((index, text), embedding) in uncached_indices.into_iter().zip(&uncached_texts).zip(fetched) {
                self.cache.put(text, embedding.clone()).await;
                results[index] = Some(embedding);
            }
        } else {
            debug!("All {} embeddings served from cache", texts.len());
        }

        Ok(results.into_iter().flatten().collect())
    }

    fn embedding_dimension(&self) -> Option<usize> {
        self.inner.embedding_dimension()
    }
}
