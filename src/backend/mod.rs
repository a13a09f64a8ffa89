//! Search Backend Module
//!
//! The document store the search service queries. Everything above this module
//! sees only the [`SearchBackend`] trait: a [`SearchRequest`] goes in, an exact
//! total plus one page of documents comes out.
//!
//! ## Implementations
//! - **`elastic`**: Talks to an Elasticsearch cluster over its REST API.
//! - **`memory`**: Holds documents in a concurrent map and evaluates queries locally.
//!   Used for development runs without a cluster and throughout the test suite.
//!
//! ## Submodules
//! - **`protocol`**: Elasticsearch endpoint paths and response DTOs.

pub mod elastic;
pub mod memory;
pub mod protocol;


use crate::search::query::SearchRequest;
use crate::search::types::CourseDocument;
use async_trait::async_trait;

/// Total match count and the requested page of documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHits {
    pub total: u64,
    pub documents: Vec<CourseDocument>,
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed backend response: {0}")]
    Decode(String),
}

/// Query-in/hits-out contract of a course index.
///
/// Implementations are shared across concurrent requests and must not require
/// external locking.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute one query and return its exact total and page of hits.
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, BackendError>;

    /// Number of documents currently indexed.
    async fn count(&self) -> Result<u64, BackendError>;

    /// Add documents to the index. Returns how many were stored.
    async fn index_documents(&self, documents: &[CourseDocument]) -> Result<usize, BackendError>;

    /// Create the index if it does not exist yet. Returns `true` if it was created.
    async fn ensure_index(&self) -> Result<bool, BackendError> {
        Ok(false)
    }
}
