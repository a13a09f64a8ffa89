//! Elasticsearch Wire Protocol
//!
//! Endpoint paths and the subset of the Elasticsearch REST responses the
//! backend reads. Request bodies are built as `serde_json::Value` by
//! [`super::elastic`]; only responses need typed structures.

use crate::search::types::CourseDocument;
use serde::{Deserialize, Serialize};

// --- API Endpoints (relative to the index URL) ---

/// Query endpoint.
pub const ENDPOINT_SEARCH: &str = "/_search";
/// Document count endpoint.
pub const ENDPOINT_COUNT: &str = "/_count";
/// Bulk indexing endpoint. `refresh` makes the documents searchable immediately.
pub const ENDPOINT_BULK: &str = "/_bulk?refresh=true";

// --- Data Transfer Objects ---

/// Top level of a `_search` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct EsSearchResponse {
    pub hits: EsHits,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EsHits {
    /// Absent when total tracking was not requested.
    pub total: Option<EsTotal>,
    #[serde(default)]
    pub hits: Vec<EsHit>,
}

/// Hit count. `relation` is `"eq"` when the count is exact and `"gte"` when
/// the cluster stopped counting early.
#[derive(Debug, Serialize, Deserialize)]
pub struct EsTotal {
    pub value: u64,
    pub relation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EsHit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source")]
    pub source: CourseDocument,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EsCountResponse {
    pub count: u64,
}

/// `_bulk` acknowledgment. `errors` is true if at least one item failed.
#[derive(Debug, Serialize, Deserialize)]
pub struct EsBulkResponse {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}
