//! Reranking adapters
//!
//! A reranker scores documents against a query through an external API and records
//! the result as distances (`1 - relevance` by default) next to the original
//! documents or query result.

pub mod cohere;
pub mod models;
pub mod together;
pub mod utils;

pub use cohere::CohereReranker;
pub use models::{
    Distances, Queries, RankedResults, Rerankable, RelevanceScore, RerankedDocuments,
    RerankedQueryResult, RerankerId,
};
pub use together::TogetherReranker;
pub use utils::{combine_reranked_results, query_document_pairs, validate_rerankables};

use crate::error::Result;
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::debug;

/// Trait for reranking providers
#[async_trait]
pub trait RerankingFunction: Send + Sync {
    /// Key under which distances are stored
    fn id(&self) -> RerankerId;

    /// Whether to keep raw relevance scores instead of converting to distances
    fn raw_scores(&self) -> bool {
        false
    }

    /// Score `documents` against `query`
    async fn score(&self, query: &str, documents: &[String]) -> Result<Vec<RelevanceScore>>;

    /// Validate inputs, score every query/document pair and merge the scores
    async fn rerank(&self, queries: &Queries, rerankables: &Rerankable) -> Result<RankedResults> {
        let pairs = query_document_pairs(queries, rerankables)?;
        debug!(reranker = %self.id(), pairs = pairs.len(), "Reranking");

        let scores = try_join_all(
            pairs
                .into_iter()
                .map(|(query, documents)| self.score(query, documents)),
        )
        .await?;

        Ok(combine_reranked_results(self.id(), rerankables, scores, self.raw_scores()))
    }
}
