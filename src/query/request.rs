//! Query request body and builder

use super::filters::{Where, WhereDocument};
use serde::{Deserialize, Serialize};

/// Fields the query API can return
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Include {
    Documents,
    Embeddings,
    Metadatas,
    Distances,
    Uris,
    Data,
}

impl Include {
    /// What the query API returns when `include` is not given
    pub fn defaults() -> Vec<Include> {
        vec![Include::Metadatas, Include::Documents, Include::Distances]
    }
}

/// Body of a collection query
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_embeddings: Option<Vec<Vec<f32>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_texts: Option<Vec<String>>,

    pub n_results: usize,

    /// Metadata filter
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Where>,

    /// Document text filter
    #[serde(rename = "where_document", skip_serializing_if = "Option::is_none")]
    pub document_filter: Option<WhereDocument>,

    pub include: Vec<Include>,
}

impl QueryRequest {
    pub fn builder(query_embeddings: Vec<Vec<f32>>) -> QueryRequestBuilder {
        QueryRequestBuilder::new(QueryInput::Embeddings(query_embeddings))
    }

    pub fn from_texts<I, S>(texts: I) -> QueryRequestBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryRequestBuilder::new(QueryInput::Texts(texts.into_iter().map(Into::into).collect()))
    }
}

enum QueryInput {
    Embeddings(Vec<Vec<f32>>),
    Texts(Vec<String>),
}

/// Builder for constructing query requests
pub struct QueryRequestBuilder {
    input: QueryInput,
    n_results: usize,
    filter: Option<Where>,
    document_filter: Option<WhereDocument>,
    include: Vec<Include>,
}

impl QueryRequestBuilder {
    fn new(input: QueryInput) -> Self {
        Self {
            input,
            n_results: 10,
            filter: None,
            document_filter: None,
            include: Include::defaults(),
        }
    }

    pub fn n_results(mut self, n_results: usize) -> Self {
        self.n_results = n_results;
        self
    }

    pub fn filter(mut self, filter: Where) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn document_filter(mut self, filter: WhereDocument) -> Self {
        self.document_filter = Some(filter);
        self
    }

    pub fn include(mut self, include: Vec<Include>) -> Self {
        self.include = include;
        self
    }

    pub fn build(self) -> QueryRequest {
        let (query_embeddings, query_texts) = match self.input {
            QueryInput::Embeddings(e) => (Some(e), None),
            QueryInput::Texts(t) => (None, Some(t)),
        };
        QueryRequest {
            query_embeddings,
            query_texts,
            n_results: self.n_results,
            filter: self.filter,
            document_filter: self.document_filter,
            include: self.include,
        }
    }
}
