//! Inputs and outputs of reranking

use crate::query::QueryResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name a reranker stores its distances under
pub type RerankerId = String;

/// Distance per document; `None` where the provider returned no score
pub type Distances = Vec<Option<f64>>;

/// One query or a list of queries (one per query-result row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Queries {
    Single(String),
    Batch(Vec<String>),
}

impl Queries {
    pub fn is_empty(&self) -> bool {
        match self {
            Queries::Single(q) => q.is_empty(),
            Queries::Batch(qs) => qs.is_empty(),
        }
    }
}

impl From<&str> for Queries {
    fn from(query: &str) -> Self {
        Queries::Single(query.to_string())
    }
}

impl From<String> for Queries {
    fn from(query: String) -> Self {
        Queries::Single(query)
    }
}

impl From<Vec<String>> for Queries {
    fn from(queries: Vec<String>) -> Self {
        Queries::Batch(queries)
    }
}

impl From<Vec<&str>> for Queries {
    fn from(queries: Vec<&str>) -> Self {
        Queries::Batch(queries.into_iter().map(str::to_string).collect())
    }
}

/// Something that can be reranked: bare documents or a query result
#[derive(Debug, Clone, PartialEq)]
pub enum Rerankable {
    Documents(Vec<String>),
    QueryResult(QueryResult),
}

impl From<Vec<String>> for Rerankable {
    fn from(documents: Vec<String>) -> Self {
        Rerankable::Documents(documents)
    }
}

impl From<Vec<&str>> for Rerankable {
    fn from(documents: Vec<&str>) -> Self {
        Rerankable::Documents(documents.into_iter().map(str::to_string).collect())
    }
}

impl From<QueryResult> for Rerankable {
    fn from(result: QueryResult) -> Self {
        Rerankable::QueryResult(result)
    }
}

/// A relevance score for the document at `index` in the submitted list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelevanceScore {
    pub index: usize,
    pub relevance_score: f64,
}

/// Reranked bare documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankedDocuments {
    pub documents: Vec<String>,
    pub ranked_distances: HashMap<RerankerId, Distances>,
}

/// A query result with per-query reranked distances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankedQueryResult {
    #[serde(flatten)]
    pub result: QueryResult,

    /// One distance list per query, aligned with `result.documents[i]`
    pub ranked_distances: HashMap<RerankerId, Vec<Distances>>,
}

/// Output of [`super::RerankingFunction::rerank`]
#[derive(Debug, Clone, PartialEq)]
pub enum RankedResults {
    Documents(RerankedDocuments),
    QueryResult(RerankedQueryResult),
}

impl RankedResults {
    pub fn as_documents(&self) -> Option<&RerankedDocuments> {
        match self {
            RankedResults::Documents(d) => Some(d),
            RankedResults::QueryResult(_) => None,
        }
    }

    pub fn as_query_result(&self) -> Option<&RerankedQueryResult> {
        match self {
            RankedResults::QueryResult(r) => Some(r),
            RankedResults::Documents(_) => None,
        }
    }
}
