use super::builder::{build_contains, build_fuzzy, build_primary};
use super::criteria::normalize;
use super::query::SearchRequest;
use super::types::{SearchCriteria, SearchResult};
use crate::backend::{BackendError, SearchBackend, SearchHits};
use std::fmt;
use std::sync::Arc;

/// Which escalation stage issued a backend query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Primary,
    Fuzzy,
    Contains,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Primary => write!(f, "primary"),
            Stage::Fuzzy => write!(f, "fuzzy"),
            Stage::Contains => write!(f, "contains"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{stage} query failed: {source}")]
    Backend {
        stage: Stage,
        #[source]
        source: BackendError,
    },
}

/// Course search with staged fallback.
///
/// Runs the strict primary query first. Only when fuzzy mode is requested, free
/// text is present and the primary query matched nothing does it retry with a
/// text-only fuzzy query and then a substring query carrying every filter.
/// The first stage with hits wins; otherwise the primary (empty) result is
/// returned.
pub struct CourseSearchService {
    backend: Arc<dyn SearchBackend>,
}

impl CourseSearchService {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    pub async fn search_courses(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<SearchResult, SearchError> {
        tracing::debug!("Searching courses with criteria: {:?}", criteria);

        let page = normalize(criteria);

        let primary = self.run(Stage::Primary, build_primary(criteria, page)).await?;
        if primary.total > 0 || !criteria.fuzzy {
            return Ok(into_result(primary));
        }
        let Some(text) = criteria.text() else {
            return Ok(into_result(primary));
        };

        tracing::debug!("Fuzzy fallback engaged for query: {}", text);

        let fuzzy = self.run(Stage::Fuzzy, build_fuzzy(criteria, page)).await?;
        if fuzzy.total > 0 {
            tracing::debug!("Fuzzy stage matched {} courses", fuzzy.total);
            return Ok(into_result(fuzzy));
        }

        let contains = self.run(Stage::Contains, build_contains(criteria, page)).await?;
        if contains.total > 0 {
            tracing::debug!("Contains stage matched {} courses", contains.total);
            return Ok(into_result(contains));
        }

        tracing::debug!("No fallback stage matched query: {}", text);
        Ok(into_result(primary))
    }

    async fn run(&self, stage: Stage, request: SearchRequest) -> Result<SearchHits, SearchError> {
        self.backend
            .search(&request)
            .await
            .map_err(|source| SearchError::Backend { stage, source })
    }
}

fn into_result(hits: SearchHits) -> SearchResult {
    SearchResult {
        total: hits.total,
        courses: hits.documents,
    }
}
