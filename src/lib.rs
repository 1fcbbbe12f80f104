//! Chroma Extras - filter builders, ID generators, embeddings and reranking for Chroma
//!
//! This library provides the pieces that sit around a Chroma collection query:
//! composable `where` / `where_document` filter expressions, ID generators for new
//! records, embedding functions for hosted providers, and rerankers that score query
//! results against the original question.
//!
//! ## Features
//!
//! - **Filter Expressions**: Typed builders serializing to Chroma's filter JSON
//! - **ID Generators**: UUIDv4, ULID, SHA-256 and NanoID sources
//! - **Embeddings**: Cloudflare Workers AI, Mistral, Together and Nomic with optional caching
//! - **Reranking**: Cohere and Together rerankers producing per-reranker distances
//! - **Retries**: Exponential backoff with jitter for transient API failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chroma_extras::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let filter = where_(eq("category", "science") & gt("year", 2020));
//!     let request = QueryRequest::from_texts(vec!["black holes".to_string()])
//!         .n_results(5)
//!         .filter(filter)
//!         .build();
//!     println!("{:?}", request);
//!
//!     let ids = IdGenerator::ulid(3);
//!     assert_eq!(ids.len(), 3);
//!
//!     let reranker = CohereReranker::from_env()?;
//!     let ranked = reranker
//!         .rerank(&"What is a black hole?".into(), &vec!["A region of spacetime"].into())
//!         .await?;
//!     println!("{:?}", ranked);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod http;
pub mod ids;
pub mod observability;
pub mod query;
pub mod reranking;

pub use config::Config;
pub use error::{ExtrasError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::embedding::{
        CachedEmbeddingFunction, CloudflareWorkersAiEmbeddings, EmbeddingFunction, MistralEmbeddings,
        NomicEmbeddings, TogetherEmbeddings,
    };
    pub use crate::error::{ExtrasError, Result};
    pub use crate::ids::IdGenerator;
    pub use crate::query::{
        and, contains, eq, gt, gte, in_, lt, lte, ne, nin, not_contains, or, where_, where_document,
        Expression, QueryRequest, QueryResult, Where, WhereDocument,
    };
    pub use crate::reranking::{CohereReranker, Queries, RankedResults, Rerankable, RerankingFunction, TogetherReranker};
}
