//! Basic usage example for chroma-extras

use chroma_extras::prelude::*;
use chroma_extras::query::Include;

#[tokio::main]
async fn main() -> Result<()> {
    chroma_extras::observability::init_observability("info", "pretty");

    println!("=== Chroma Extras Basic Usage Example ===\n");

    println!("1. Building filters...");

    let metadata_filter = where_(
        eq("category", "science")
            & (gte("year", 2020) | in_("author", ["Curie", "Hawking"]))
            & nin("status", ["draft", "retracted"]),
    );
    println!("   where: {}", metadata_filter.as_value());

    let document_filter = where_document(contains(["black hole", "event horizon"]) | not_contains(["fiction"]));
    println!("   where_document: {}\n", document_filter.as_value());

    let request = QueryRequest::from_texts(["What happens at the event horizon?"])
        .n_results(3)
        .filter(metadata_filter)
        .document_filter(document_filter)
        .include(vec![Include::Documents, Include::Distances])
        .build();
    println!("   request: {}\n", serde_json::to_string_pretty(&request).unwrap_or_default());

    println!("2. Generating IDs...");
    let documents = ["A region of spacetime", "Gravity so strong that nothing escapes"];
    for (name, ids) in [
        ("uuid", IdGenerator::uuid(2)),
        ("ulid", IdGenerator::ulid(2)),
        ("sha256(doc)", IdGenerator::document_sha256(&documents)),
        ("nanoid", IdGenerator::nano_id(2, None, None)?),
    ] {
        println!("   {:<12} {:?}", name, ids.into_inner());
    }
    println!();

    if std::env::var("COHERE_API_KEY").is_err() {
        println!("Set COHERE_API_KEY to run the reranking step.");
        return Ok(());
    }

    println!("3. Reranking with Cohere...");
    let reranker = CohereReranker::from_env()?;
    let ranked = reranker
        .rerank(&"What is a black hole?".into(), &documents.to_vec().into())
        .await?;

    if let Some(reranked) = ranked.as_documents() {
        for (document, distance) in reranked.documents.iter().zip(&reranked.ranked_distances["cohere"]) {
            println!("   {:?} -> {}", distance, document);
        }
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
