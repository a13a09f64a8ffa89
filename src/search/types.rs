use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of course offering. Stored and filtered by its canonical upper-case name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseType {
    OneTime,
    Course,
    Club,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::OneTime => "ONE_TIME",
            CourseType::Course => "COURSE",
            CourseType::Club => "CLUB",
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course as stored in the search backend.
///
/// The search service never inspects or mutates these beyond passing them
/// back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseDocument {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub min_age: i32,
    pub max_age: i32,
    pub price: f64,
    pub next_session_date: DateTime<Utc>,
}

/// All filters, paging and sort directives for one search request.
///
/// `None` on a filter means the dimension is not filtered at all.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub category: Option<String>,
    pub course_type: Option<CourseType>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub sort: String,
    pub page: i64,
    pub size: i64,
    pub fuzzy: bool,
}

pub const DEFAULT_SORT: &str = "upcoming";
pub const DEFAULT_PAGE: i64 = 0;
pub const DEFAULT_SIZE: i64 = 10;

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            course_type: None,
            min_age: None,
            max_age: None,
            min_price: None,
            max_price: None,
            start_date: None,
            sort: DEFAULT_SORT.to_string(),
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
            fuzzy: false,
        }
    }
}

impl SearchCriteria {
    /// The free-text query, if it has any non-whitespace content.
    pub fn text(&self) -> Option<&str> {
        non_blank(self.query.as_deref())
    }

    /// The category filter, if it has any non-whitespace content.
    pub fn category_filter(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// One page of courses plus the total match count of the query that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub total: u64,
    pub courses: Vec<CourseDocument>,
}

impl SearchResult {
    pub fn empty() -> Self {
        Self {
            total: 0,
            courses: Vec::new(),
        }
    }
}
