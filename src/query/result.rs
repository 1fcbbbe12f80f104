//! Query response model

use super::request::Include;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Metadata attached to a record
pub type Metadata = Map<String, Value>;

/// Column-oriented query response; the outer list has one entry per query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub ids: Vec<Vec<String>>,

    #[serde(default)]
    pub embeddings: Option<Vec<Vec<Vec<f32>>>>,

    #[serde(default)]
    pub documents: Option<Vec<Vec<String>>>,

    #[serde(default)]
    pub uris: Option<Vec<Vec<String>>>,

    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub metadatas: Option<Vec<Vec<Option<Metadata>>>>,

    #[serde(default)]
    pub distances: Option<Vec<Vec<f32>>>,

    #[serde(default)]
    pub included: Vec<Include>,
}

impl QueryResult {
    /// Number of queries this result answers
    pub fn query_count(&self) -> usize {
        self.ids.len()
    }
}
