//! Validation, query/document pairing and score merging

use super::models::*;
use crate::error::{RerankError, Result};
use std::collections::HashMap;
use tracing::warn;

/// Check that `queries` and `rerankables` can be reranked together
pub fn validate_rerankables(queries: &Queries, rerankables: &Rerankable) -> Result<()> {
    if queries.is_empty() {
        return Err(RerankError::EmptyQueries.into());
    }

    match rerankables {
        Rerankable::Documents(documents) => {
            if documents.is_empty() {
                return Err(RerankError::EmptyRerankables.into());
            }
            if matches!(queries, Queries::Batch(_)) {
                return Err(RerankError::SingleQueryRequired.into());
            }
        }
        Rerankable::QueryResult(result) => {
            let documents = match &result.documents {
                Some(documents) if !documents.is_empty() => documents,
                _ => return Err(RerankError::MissingDocuments.into()),
            };
            let Queries::Batch(queries) = queries else {
                return Err(RerankError::QueryListRequired.into());
            };
            if queries.len() != documents.len() {
                return Err(RerankError::QueryCountMismatch {
                    queries: queries.len(),
                    results: documents.len(),
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Pair every query with the documents it should rerank
pub fn query_document_pairs<'a>(
    queries: &'a Queries,
    rerankables: &'a Rerankable,
) -> Result<Vec<(&'a str, &'a [String])>> {
    validate_rerankables(queries, rerankables)?;

    match (queries, rerankables) {
        (Queries::Single(query), Rerankable::Documents(documents)) => {
            Ok(vec![(query.as_str(), documents.as_slice())])
        }
        (Queries::Batch(queries), Rerankable::QueryResult(result)) => {
            let documents = result.documents.as_deref().unwrap_or_default();
            Ok(queries
                .iter()
                .map(String::as_str)
                .zip(documents.iter().map(Vec::as_slice))
                .collect())
        }
        // every other combination is rejected by validation
        (Queries::Batch(_), Rerankable::Documents(_)) => Err(RerankError::SingleQueryRequired.into()),
        (Queries::Single(_), Rerankable::QueryResult(_)) => Err(RerankError::QueryListRequired.into()),
    }
}

/// Place each score at its document index, converting to `1 - score` unless `raw_scores`
pub fn scores_to_distances(scores: &[RelevanceScore], document_count: usize, raw_scores: bool) -> Distances {
    let mut distances = vec![None; document_count];
    for score in scores {
        match distances.get_mut(score.index) {
            Some(slot) => {
                *slot = Some(if raw_scores {
                    score.relevance_score
                } else {
                    1.0 - score.relevance_score
                });
            }
            None => warn!(
                index = score.index,
                document_count, "Reranker returned a score for an unknown document"
            ),
        }
    }
    distances
}

/// Attach per-pair scores to the original rerankables
pub fn combine_reranked_results(
    reranker_id: RerankerId,
    rerankables: &Rerankable,
    scores: Vec<Vec<RelevanceScore>>,
    raw_scores: bool,
) -> RankedResults {
    match rerankables {
        Rerankable::Documents(documents) => {
            let all: Vec<RelevanceScore> = scores.into_iter().flatten().collect();
            let distances = scores_to_distances(&all, documents.len(), raw_scores);
            RankedResults::Documents(RerankedDocuments {
                documents: documents.clone(),
                ranked_distances: HashMap::from([(reranker_id, distances)]),
            })
        }
        Rerankable::QueryResult(result) => {
            let documents = result.documents.as_deref().unwrap_or_default();
            let per_query = documents
                .iter()
                .zip(scores.iter().map(Vec::as_slice).chain(std::iter::repeat::<&[RelevanceScore]>(&[])))
                .map(|(docs, query_scores)| scores_to_distances(query_scores, docs.len(), raw_scores))
                .collect();
            RankedResults::QueryResult(RerankedQueryResult {
                result: result.clone(),
                ranked_distances: HashMap::from([(reranker_id, per_query)]),
            })
        }
    }
}
