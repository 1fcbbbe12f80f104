//! Integration tests for the provider adapters
//!
//! Every test runs against a local mockito server; no API keys or network access needed.

use chroma_extras::{
    config::{CloudflareConfig, CohereConfig, MistralConfig, NomicConfig, TogetherConfig},
    embedding::{
        CachedEmbeddingFunction, CloudflareWorkersAiEmbeddings, EmbeddingFunction, MistralEmbeddings,
        NomicEmbeddings, TogetherEmbeddings,
    },
    error::{ApiError, EmbeddingError, ExtrasError},
    query::QueryResult,
    reranking::{CohereReranker, Queries, Rerankable, RerankingFunction, TogetherReranker},
};
use mockito::Matcher;
use serde_json::json;
use std::time::Duration;

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn mistral_config(server: &mockito::ServerGuard) -> MistralConfig {
    let mut config = MistralConfig::new("test-key");
    config.api_url = format!("{}/v1/embeddings", server.url());
    config.http.max_retries = 0;
    config
}

#[tokio::test]
async fn test_mistral_embeddings() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/embeddings")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "mistral-embed",
            "input": ["hello", "world"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "model": "mistral-embed",
            "data": [
                {"index": 1, "embedding": [0.5, 0.5]},
                {"index": 0, "embedding": [1.0, 0.0]}
            ]
        }"#,
        )
        .create_async()
        .await;

    let embeddings = MistralEmbeddings::new(mistral_config(&server)).unwrap();
    let result = embeddings.embed_batch(&texts(&["hello", "world"])).await.unwrap();

    assert_eq!(result, vec![vec![1.0, 0.0], vec![0.5, 0.5]]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_together_embed_single() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"index": 0, "embedding": [0.25, 0.75]}]}"#)
        .create_async()
        .await;

    let mut config = TogetherConfig::new("test-key");
    config.base_url = format!("{}/v1", server.url());
    config.http.max_retries = 0;

    let embeddings = TogetherEmbeddings::new(config).unwrap();
    let result = embeddings.embed_single("hello").await.unwrap();

    assert_eq!(result, vec![0.25, 0.75]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nomic_embeddings() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/embedding/text")
        .match_body(Matcher::PartialJson(json!({
            "model": "nomic-embed-text-v1.5",
            "texts": ["hello"],
            "task_type": "search_document",
            "dimensionality": 768
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"embeddings": [[0.1, 0.2, 0.3]], "usage": {"total_tokens": 1}}"#)
        .create_async()
        .await;

    let mut config = NomicConfig::new("test-key");
    config.api_url = format!("{}/v1/embedding/text", server.url());
    config.http.max_retries = 0;

    let embeddings = NomicEmbeddings::new(config).unwrap();
    assert_eq!(embeddings.embedding_dimension(), Some(768));

    let result = embeddings.embed_batch(&texts(&["hello"])).await.unwrap();
    assert_eq!(result, vec![vec![0.1, 0.2, 0.3]]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cloudflare_through_gateway() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/gateway/workers-ai/bge")
        .match_body(Matcher::Json(json!({"text": ["hello"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": {"shape": [1, 2], "data": [[0.5, 0.25]]}, "success": true, "errors": []}"#)
        .create_async()
        .await;

    let mut config = CloudflareConfig::with_gateway("test-token", format!("{}/gateway/workers-ai", server.url()));
    config.model_name = "bge".to_string();
    config.http.max_retries = 0;

    let embeddings = CloudflareWorkersAiEmbeddings::new(config).unwrap();
    let result = embeddings.embed_batch(&texts(&["hello"])).await.unwrap();

    assert_eq!(result, vec![vec![0.5, 0.25]]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cloudflare_batch_limit_checked_before_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let mut config = CloudflareConfig::with_gateway("test-token", server.url());
    config.max_batch_size = 1;

    let embeddings = CloudflareWorkersAiEmbeddings::new(config).unwrap();
    let err = embeddings.embed_batch(&texts(&["a", "b"])).await.unwrap_err();

    assert!(matches!(
        err,
        ExtrasError::Embedding(EmbeddingError::BatchTooLarge { size: 2, max: 1 })
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cached_embeddings_hit_api_once() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": [{"index": 0, "embedding": [1.0]}]}"#)
        .expect(1)
        .create_async()
        .await;

    let inner = MistralEmbeddings::new(mistral_config(&server)).unwrap();
    let cached = CachedEmbeddingFunction::new(inner, 100, Duration::from_secs(60));

    let first = cached.embed_single("hello").await.unwrap();
    let second = cached.embed_single("hello").await.unwrap();

    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_authentication_failure() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/v1/embeddings")
        .with_status(401)
        .with_body(r#"{"message": "Unauthorized"}"#)
        .create_async()
        .await;

    let embeddings = MistralEmbeddings::new(mistral_config(&server)).unwrap();
    let err = embeddings.embed_batch(&texts(&["hello"])).await.unwrap_err();

    assert!(matches!(err, ExtrasError::Api(ApiError::AuthenticationFailed)));
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/embeddings")
        .with_status(503)
        .with_body("unavailable")
        .expect(3)
        .create_async()
        .await;

    let mut config = mistral_config(&server);
    config.http.max_retries = 2;

    let embeddings = MistralEmbeddings::new(config).unwrap();
    let err = embeddings.embed_batch(&texts(&["hello"])).await.unwrap_err();

    assert!(matches!(err, ExtrasError::Api(ApiError::Status { status: 503, .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cohere_rerank_documents() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v2/rerank")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "rerank-v3.5",
            "query": "What is the capital of the United States?",
            "documents": ["New York", "Washington, D.C."],
            "top_n": 2
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "id": "abc",
            "results": [
                {"index": 1, "relevance_score": 0.75},
                {"index": 0, "relevance_score": 0.25}
            ]
        }"#,
        )
        .create_async()
        .await;

    let mut config = CohereConfig::new("test-key");
    config.api_url = format!("{}/v2/rerank", server.url());
    config.http.max_retries = 0;

    let reranker = CohereReranker::new(config).unwrap();
    let queries = Queries::from("What is the capital of the United States?");
    let rerankables = Rerankable::from(vec!["New York", "Washington, D.C."]);

    let ranked = reranker.rerank(&queries, &rerankables).await.unwrap();
    let documents = ranked.as_documents().unwrap();

    assert_eq!(documents.documents, texts(&["New York", "Washington, D.C."]));
    assert_eq!(documents.ranked_distances["cohere"], vec![Some(0.75), Some(0.25)]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_together_rerank_query_result() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/rerank")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "object": "rerank",
            "results": [
                {"index": 0, "relevance_score": 0.5, "document": {"text": null}},
                {"index": 1, "relevance_score": 0.25, "document": {"text": null}}
            ]
        }"#,
        )
        .expect(2)
        .create_async()
        .await;

    let mut config = TogetherConfig::new("test-key");
    config.base_url = format!("{}/v1", server.url());
    config.raw_scores = true;
    config.http.max_retries = 0;

    let result = QueryResult {
        ids: vec![texts(&["a", "b"]), texts(&["c", "d"])],
        documents: Some(vec![texts(&["alpha", "beta"]), texts(&["gamma", "delta"])]),
        ..Default::default()
    };

    let reranker = TogetherReranker::new(config).unwrap();
    let queries = Queries::from(vec!["first", "second"]);
    let ranked = reranker.rerank(&queries, &Rerankable::from(result.clone())).await.unwrap();
    let reranked = ranked.as_query_result().unwrap();

    assert_eq!(reranked.result, result);
    assert_eq!(
        reranked.ranked_distances["together"],
        vec![vec![Some(0.5), Some(0.25)], vec![Some(0.5), Some(0.25)]]
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rerank_validation_happens_before_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let mut config = CohereConfig::new("test-key");
    config.api_url = format!("{}/v2/rerank", server.url());

    let reranker = CohereReranker::new(config).unwrap();
    let err = reranker
        .rerank(&Queries::from(vec!["a", "b"]), &Rerankable::from(vec!["doc"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ExtrasError::Rerank(_)));
    mock.assert_async().await;
}
