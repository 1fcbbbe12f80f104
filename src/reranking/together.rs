//! Together AI rerank
//!
//! See <https://docs.together.ai/reference/rerank-1> for the endpoint and models.

use super::{RelevanceScore, RerankerId, RerankingFunction};
use crate::config::TogetherConfig;
use crate::error::Result;
use crate::http::ApiClient;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Serialize)]
struct TogetherRerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Debug, Deserialize)]
struct TogetherRerankResponse {
    results: Vec<RelevanceScore>,
}

/// Reranker backed by the Together `/rerank` endpoint
pub struct TogetherReranker {
    client: ApiClient,
    api_url: String,
    model_name: String,
    top_n: Option<usize>,
    raw_scores: bool,
}

impl TogetherReranker {
    pub fn new(config: TogetherConfig) -> Result<Self> {
        let client = ApiClient::new("together", config.api_key.expose_secret(), &config.http)?;
        Ok(Self {
            client,
            api_url: format!("{}/rerank", config.base_url.trim_end_matches('/')),
            model_name: config.rerank_model,
            top_n: config.top_n,
            raw_scores: config.raw_scores,
        })
    }

    /// Build from `TOGETHER_API_KEY` with default settings
    pub fn from_env() -> Result<Self> {
        Self::new(TogetherConfig::from_env()?)
    }
}

#[async_trait]
impl RerankingFunction for TogetherReranker {
    fn id(&self) -> RerankerId {
        "together".to_string()
    }

    fn raw_scores(&self) -> bool {
        self.raw_scores
    }

    async fn score(&self, query: &str, documents: &[String]) -> Result<Vec<RelevanceScore>> {
        let request = TogetherRerankRequest {
            model: &self.model_name,
            query,
            documents,
            top_n: self.top_n.unwrap_or(documents.len()),
        };
        debug!(model = %self.model_name, documents = documents.len(), "Requesting Together rerank");

        let response: TogetherRerankResponse = self.client.post_json(&self.api_url, &request).await?;
        Ok(response.results)
    }
}
