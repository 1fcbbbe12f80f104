//! Cohere rerank
//!
//! API reference: <https://docs.cohere.com/reference/rerank>

use super::{RelevanceScore, RerankerId, RerankingFunction};
use crate::config::CohereConfig;
use crate::error::Result;
use crate::http::ApiClient;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct CohereRerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens_per_doc: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CohereRerankResponse {
    results: Vec<RelevanceScore>,
}

/// Reranker backed by the Cohere `/v2/rerank` endpoint
pub struct CohereReranker {
    client: ApiClient,
    config: CohereConfig,
}

impl CohereReranker {
    pub fn new(config: CohereConfig) -> Result<Self> {
        let client = ApiClient::new("cohere", config.api_key.expose_secret(), &config.http)?;
        Ok(Self { client, config })
    }

    /// Build from `COHERE_API_KEY` with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(CohereConfig::from_env()?)
    }
}

#[async_trait]
impl RerankingFunction for CohereReranker {
    fn id(&self) -> RerankerId {
        "cohere".to_string()
    }

    fn raw_scores(&self) -> bool {
        self.config.raw_scores
    }

    async fn score(&self, query: &str, documents: &[String]) -> Result<Vec<RelevanceScore>> {
        let request = CohereRerankRequest {
            model: &self.config.model_name,
            query,
            documents,
            top_n: self.config.top_n.unwrap_or(documents.len()),
            max_tokens_per_doc: self.config.max_tokens_per_document,
        };
        debug!(model = %self.config.model_name, documents = documents.len(), "Requesting Cohere rerank");

        let response: CohereRerankResponse = self.client.post_json(&self.config.api_url, &request).await?;
        Ok(response.results)
    }
}
