//! Error types for the chroma extras library

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, ExtrasError>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum ExtrasError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Reranking error: {0}")]
    Rerank(#[from] RerankError),

    #[error("ID generation error: {0}")]
    Id(#[from] IdError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised while talking to a provider HTTP API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ApiError {
    /// Whether a fresh attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Network(_) | ApiError::RateLimitExceeded => true,
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Errors related to embedding generation
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Batch too large {size} > {max} (maximum batch size)")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Provider returned no embeddings: {0}")]
    MissingEmbeddings(String),
}

/// Errors related to reranking inputs
#[derive(Error, Debug)]
pub enum RerankError {
    #[error("Queries must not be empty")]
    EmptyQueries,

    #[error("Rerankables must not be empty")]
    EmptyRerankables,

    #[error("You can only rerank a single query at a time with documents")]
    SingleQueryRequired,

    #[error("A query result can only be reranked with a list of queries")]
    QueryListRequired,

    #[error("Query result must have documents to rerank")]
    MissingDocuments,

    #[error("Number of queries ({queries}) and document lists ({results}) must be the same")]
    QueryCountMismatch { queries: usize, results: usize },
}

/// Errors related to identifier generation
#[derive(Error, Debug)]
pub enum IdError {
    #[error("ID source exhausted: expected {expected} IDs, got {produced}")]
    SourceExhausted { expected: usize, produced: usize },

    #[error("Alphabet must not be empty")]
    EmptyAlphabet,

    #[error("Invalid ID size: {0}")]
    InvalidSize(usize),
}

impl From<config::ConfigError> for ExtrasError {
    fn from(err: config::ConfigError) -> Self {
        ExtrasError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for ExtrasError {
    fn from(err: reqwest::Error) -> Self {
        ExtrasError::Api(ApiError::Network(err))
    }
}
