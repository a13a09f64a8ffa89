use super::engine::{CourseSearchService, SearchError};
use super::types::{
    CourseType, DEFAULT_PAGE, DEFAULT_SIZE, DEFAULT_SORT, SearchCriteria, SearchResult,
};
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

pub const ENDPOINT_SEARCH: &str = "/api/search";
pub const ENDPOINT_HEALTH: &str = "/api/health";

pub const HEALTH_MESSAGE: &str = "Course Search API is running!";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub course_type: Option<CourseType>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_start_date")]
    pub start_date: Option<DateTime<Utc>>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub fuzzy: Option<bool>,
}

/// Accepts an ISO date-time with or without offset. Offset-less values are UTC.
fn deserialize_start_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_date_time(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid startDate: {raw}")))
}

pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|local| local.and_utc())
}

impl From<SearchParams> for SearchCriteria {
    fn from(params: SearchParams) -> Self {
        SearchCriteria {
            query: params.q,
            category: params.category,
            course_type: params.course_type,
            min_age: params.min_age,
            max_age: params.max_age,
            min_price: params.min_price,
            max_price: params.max_price,
            start_date: params.start_date,
            sort: params.sort.unwrap_or_else(|| DEFAULT_SORT.to_string()),
            page: params.page.unwrap_or(DEFAULT_PAGE),
            size: params.size.unwrap_or(DEFAULT_SIZE),
            fuzzy: params.fuzzy.unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        tracing::error!("Search failed: {}", self);
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Routes for the public search API.
pub fn router(service: Arc<CourseSearchService>) -> Router {
    Router::new()
        .route(ENDPOINT_SEARCH, get(handle_search))
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(service))
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(service): Extension<Arc<CourseSearchService>>,
) -> Result<Json<SearchResult>, SearchError> {
    tracing::info!(
        "Search request - q: {:?}, category: {:?}, type: {:?}, page: {:?}, size: {:?}",
        params.q,
        params.category,
        params.course_type,
        params.page,
        params.size
    );

    let criteria = SearchCriteria::from(params);
    let result = service.search_courses(&criteria).await?;

    tracing::info!(
        "Search completed - found {} total courses, returning {} on page {}",
        result.total,
        result.courses.len(),
        criteria.page
    );

    Ok(Json(result))
}

pub async fn handle_health() -> &'static str {
    HEALTH_MESSAGE
}
