use log::info;
use reqwest::Client;

use super::types::{
    CreateIndexRequest, IndexDescription, IndexEntry, IndexSpec, ListIndexesResponse, QueryRequest,
    QueryResponse, SearchMatch, ServerlessSpec, UpsertRequest, UpsertResponse,
};
use super::Metric;
use crate::errors::CoursevecError;
use crate::transformers::http_handler::handle_response;

pub const PINECONE_BASE_URL: &str = "https://api.pinecone.io";

const API_VERSION: &str = "2024-07";

pub struct PineconeClient {
    pub url: String,
    pub api_key: String,
    client: Client,
}

impl PineconeClient {
    pub fn new(url: Option<String>, api_key: String) -> Self {
        let final_url = match url {
            Some(url) => url,
            None => PINECONE_BASE_URL.to_string(),
        };
        PineconeClient {
            url: final_url,
            api_key,
            client: Client::new(),
        }
    }

    pub async fn list_indexes(&self) -> Result<Vec<IndexDescription>, CoursevecError> {
        let response = self
            .client
            .get(format!("{}/indexes", self.url))
            .header("Accept", "application/json")
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await?;
        let listing = handle_response::<ListIndexesResponse>(response, "list_indexes").await?;
        Ok(listing.indexes)
    }

    pub async fn create_index(
        &self,
        name: &str,
        dimension: u32,
        metric: Metric,
        cloud: &str,
        region: &str,
    ) -> Result<IndexDescription, CoursevecError> {
        let body = CreateIndexRequest {
            name: name.to_string(),
            dimension,
            metric,
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: cloud.to_string(),
                    region: region.to_string(),
                },
            },
        };
        let response = self
            .client
            .post(format!("{}/indexes", self.url))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        handle_response::<IndexDescription>(response, "create_index").await
    }

    pub async fn describe_index(&self, name: &str) -> Result<IndexDescription, CoursevecError> {
        let response = self
            .client
            .get(format!("{}/indexes/{}", self.url, name))
            .header("Accept", "application/json")
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await?;
        handle_response::<IndexDescription>(response, "describe_index").await
    }

    /// ensure the named index exists. never recreates or alters an index
    /// that is already present; a dimension mismatch with an existing index
    /// surfaces as a write error downstream
    pub async fn ensure_index(
        &self,
        name: &str,
        dimension: u32,
        metric: Metric,
        cloud: &str,
        region: &str,
    ) -> Result<IndexDescription, CoursevecError> {
        let existing = self.list_indexes().await?;
        if let Some(found) = find_index(existing, name) {
            return Ok(found);
        }
        info!("creating index {name} (dimension={dimension}, metric={metric})");
        self.create_index(name, dimension, metric, cloud, region)
            .await
    }

    pub async fn upsert(
        &self,
        host: &str,
        entries: &[IndexEntry],
    ) -> Result<u64, CoursevecError> {
        let body = UpsertRequest { vectors: entries };
        let response = self
            .client
            .post(format!("{}/vectors/upsert", data_url(host)))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let upserted = handle_response::<UpsertResponse>(response, "upsert").await?;
        Ok(upserted.upserted_count)
    }

    pub async fn query(
        &self,
        host: &str,
        vector: &[f64],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<SearchMatch>, CoursevecError> {
        let body = QueryRequest {
            vector: vector.to_vec(),
            top_k,
            include_metadata,
            include_values: false,
        };
        let response = self
            .client
            .post(format!("{}/query", data_url(host)))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;
        let results = handle_response::<QueryResponse>(response, "query").await?;
        Ok(results.matches)
    }
}

fn find_index(indexes: Vec<IndexDescription>, name: &str) -> Option<IndexDescription> {
    indexes.into_iter().find(|index| index.name == name)
}

// index descriptions report the data-plane host without a scheme
fn data_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{}", host.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::IndexStatus;

    fn description(name: &str) -> IndexDescription {
        IndexDescription {
            name: name.to_string(),
            dimension: 1536,
            metric: Metric::Cosine,
            host: format!("{name}-abc123.svc.pinecone.io"),
            status: IndexStatus::default(),
        }
    }

    #[test]
    fn test_find_index_present() {
        let indexes = vec![description("courses"), description("other")];
        let found = find_index(indexes, "courses").unwrap();
        assert_eq!(found.name, "courses");
    }

    #[test]
    fn test_find_index_absent() {
        let indexes = vec![description("other")];
        assert!(find_index(indexes, "courses").is_none());
    }

    #[test]
    fn test_data_url_adds_scheme() {
        assert_eq!(
            data_url("courses-abc.svc.pinecone.io"),
            "https://courses-abc.svc.pinecone.io"
        );
        assert_eq!(data_url("http://localhost:5080/"), "http://localhost:5080");
    }
}
