//! Data models for OpenAI-style embedding requests and responses

use serde::{Deserialize, Serialize};

/// Request body shared by Mistral and Together
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Model name
    pub model: String,

    /// Input texts to embed
    pub input: Vec<String>,
}

/// Response from embedding generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Generated embeddings
    pub data: Vec<EmbeddingData>,

    /// Model used for generation
    #[serde(default)]
    pub model: Option<String>,
}

/// Individual embedding data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Embedding vector
    pub embedding: Vec<f32>,

    /// Index in the batch
    #[serde(default)]
    pub index: Option<usize>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: &[String]) -> Self {
        Self {
            model: model.into(),
            input: input.to_vec(),
        }
    }
}

impl EmbeddingResponse {
    /// Embeddings in input order; entries without an index keep their position
    pub fn into_embeddings(mut self) -> Vec<Vec<f32>> {
        if self.data.iter().all(|d| d.index.is_some()) {
            self.data.sort_by_key(|d| d.index);
        }
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}
