use super::protocol::*;
use super::{BackendError, SearchBackend, SearchHits};
use crate::search::query::{Condition, Criterion, FieldValue, Operator, QueryExpr, SearchRequest};
use crate::search::types::CourseDocument;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;

/// Course index stored in an Elasticsearch cluster, reached over its REST API.
pub struct ElasticsearchBackend {
    http_client: reqwest::Client,
    index_url: String,
}

impl ElasticsearchBackend {
    pub fn new(base_url: &str, index: &str, timeout: Duration) -> Result<Self, BackendError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        let index_url = format!("{}/{}", base_url.trim_end_matches('/'), index);

        Ok(Self {
            http_client,
            index_url,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.index_url, endpoint)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status { status, body })
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, BackendError> {
        let body = search_body(request);
        tracing::trace!("Elasticsearch query: {}", body);

        let response = self
            .http_client
            .post(self.url(ENDPOINT_SEARCH))
            .json(&body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let parsed: EsSearchResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        into_hits(parsed)
    }

    async fn count(&self) -> Result<u64, BackendError> {
        let response = self.http_client.get(self.url(ENDPOINT_COUNT)).send().await?;
        let response = Self::check_status(response).await?;

        let parsed: EsCountResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(parsed.count)
    }

    async fn index_documents(&self, documents: &[CourseDocument]) -> Result<usize, BackendError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let mut payload = String::new();
        for doc in documents {
            let action = json!({ "index": { "_id": doc.id } });
            let source =
                serde_json::to_string(doc).map_err(|e| BackendError::Decode(e.to_string()))?;
            payload.push_str(&action.to_string());
            payload.push('\n');
            payload.push_str(&source);
            payload.push('\n');
        }

        let response = self
            .http_client
            .post(self.url(ENDPOINT_BULK))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(payload)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let parsed: EsBulkResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        if parsed.errors {
            return Err(BackendError::Decode(format!(
                "bulk indexing reported failures in {} items",
                parsed.items.len()
            )));
        }

        Ok(documents.len())
    }

    async fn ensure_index(&self) -> Result<bool, BackendError> {
        let response = self.http_client.head(&self.index_url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(false),
            StatusCode::NOT_FOUND => {
                let response = self
                    .http_client
                    .put(&self.index_url)
                    .json(&index_mapping())
                    .send()
                    .await?;
                Self::check_status(response).await?;
                tracing::info!("Created index {} with mappings", self.index_url);
                Ok(true)
            }
            status => Err(BackendError::Status {
                status: status.as_u16(),
                body: String::new(),
            }),
        }
    }
}

/// Every request tracks total hits, so a response without a total is malformed.
pub(crate) fn into_hits(response: EsSearchResponse) -> Result<SearchHits, BackendError> {
    let total = response
        .hits
        .total
        .map(|t| t.value)
        .ok_or_else(|| BackendError::Decode("search response has no hit total".to_string()))?;

    let documents: Vec<CourseDocument> = response
        .hits
        .hits
        .into_iter()
        .map(|hit| {
            let mut doc = hit.source;
            if doc.id.is_empty() {
                doc.id = hit.id;
            }
            doc
        })
        .collect();

    Ok(SearchHits { total, documents })
}

/// Translates a [`SearchRequest`] into an Elasticsearch `_search` body.
pub fn search_body(request: &SearchRequest) -> Value {
    let query = match &request.query {
        QueryExpr::Filter(criterion) => criterion_dsl(criterion),
        QueryExpr::FuzzyMultiMatch { text, fields, .. } => json!({
            "multi_match": {
                "query": text,
                "fields": fields.iter().map(|f| f.as_str()).collect::<Vec<_>>(),
                "fuzziness": "AUTO",
            }
        }),
    };

    let page = &request.page;
    json!({
        "query": query,
        "from": page.offset(),
        "size": page.size,
        "sort": [ { page.sort.field.as_str(): { "order": page.sort.direction.as_str() } } ],
        "track_total_hits": request.track_total_hits,
    })
}

fn criterion_dsl(criterion: &Criterion) -> Value {
    match criterion {
        Criterion::MatchAll => json!({ "match_all": {} }),
        Criterion::And(clauses) => json!({
            "bool": { "must": clauses.iter().map(criterion_dsl).collect::<Vec<_>>() }
        }),
        Criterion::Or(clauses) => json!({
            "bool": {
                "should": clauses.iter().map(criterion_dsl).collect::<Vec<_>>(),
                "minimum_should_match": 1,
            }
        }),
        Criterion::Field(condition) => condition_dsl(condition),
    }
}

fn condition_dsl(condition: &Condition) -> Value {
    let field = condition.field.as_str();
    let value = value_json(&condition.value);

    match condition.op {
        Operator::Matches => json!({ "match": { field: { "query": value } } }),
        Operator::Contains => {
            let text = match &condition.value {
                FieldValue::Text(text) => escape_query_string(text),
                other => escape_query_string(&value_json(other).to_string()),
            };
            json!({
                "query_string": {
                    "query": format!("*{}*", text),
                    "fields": [field],
                    "analyze_wildcard": true,
                }
            })
        }
        Operator::Is => json!({ "term": { field: value } }),
        Operator::GreaterThanEqual => json!({ "range": { field: { "gte": value } } }),
        Operator::LessThanEqual => json!({ "range": { field: { "lte": value } } }),
    }
}

fn value_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => json!(text),
        FieldValue::Integer(n) => json!(n),
        FieldValue::Number(n) => json!(n),
        FieldValue::Timestamp(ts) => json!(ts.to_rfc3339()),
    }
}

/// Backslash-escapes query_string syntax so the text is taken literally.
pub fn escape_query_string(text: &str) -> String {
    const RESERVED: &str = r#"+-=&|><!(){}[]^"~*?:\/ "#;

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Explicit mappings for the course index.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "title": { "type": "text" },
                "description": { "type": "text" },
                "category": { "type": "keyword" },
                "type": { "type": "keyword" },
                "minAge": { "type": "integer" },
                "maxAge": { "type": "integer" },
                "price": { "type": "double" },
                "nextSessionDate": { "type": "date" },
            }
        }
    })
}
