use serde::{Deserialize, Serialize};

use super::Metric;
use crate::types::CourseMetadata;

/// the (id, vector, metadata) triple persisted in the index
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IndexEntry {
    pub id: String,
    pub values: Vec<f64>,
    pub metadata: CourseMetadata,
}

#[derive(Debug, Serialize)]
pub struct CreateIndexRequest {
    pub name: String,
    pub dimension: u32,
    pub metric: Metric,
    pub spec: IndexSpec,
}

#[derive(Debug, Serialize)]
pub struct IndexSpec {
    pub serverless: ServerlessSpec,
}

#[derive(Debug, Serialize)]
pub struct ServerlessSpec {
    pub cloud: String,
    pub region: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    pub dimension: u32,
    pub metric: Metric,
    pub host: String,
    #[serde(default)]
    pub status: IndexStatus,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct IndexStatus {
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct ListIndexesResponse {
    #[serde(default)]
    pub indexes: Vec<IndexDescription>,
}

#[derive(Debug, Serialize)]
pub struct UpsertRequest<'a> {
    pub vectors: &'a [IndexEntry],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResponse {
    #[serde(default)]
    pub upserted_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub vector: Vec<f64>,
    pub top_k: usize,
    pub include_metadata: bool,
    pub include_values: bool,
}

#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<SearchMatch>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchMatch {
    pub id: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub metadata: Option<CourseMetadata>,
}
