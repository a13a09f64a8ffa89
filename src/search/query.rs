//! Backend-Neutral Query Model
//!
//! The only shape in which the search service talks to a backend. A
//! [`SearchRequest`] carries either a filter-expression tree ([`Criterion`])
//! or a multi-field fuzzy match, plus paging, sort and total-hit tracking.
//! Backends translate this into their own query language.

use super::criteria::PageRequest;
use chrono::{DateTime, Utc};

/// Fields of a course document that queries can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    Title,
    Description,
    Category,
    Type,
    Price,
    MinAge,
    MaxAge,
    NextSessionDate,
}

impl CourseField {
    /// Field name as stored in the index.
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseField::Title => "title",
            CourseField::Description => "description",
            CourseField::Category => "category",
            CourseField::Type => "type",
            CourseField::Price => "price",
            CourseField::MinAge => "minAge",
            CourseField::MaxAge => "maxAge",
            CourseField::NextSessionDate => "nextSessionDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Analyzed full-text match.
    Matches,
    /// Raw substring containment, no analysis.
    Contains,
    /// Exact equality.
    Is,
    GreaterThanEqual,
    LessThanEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: CourseField,
    pub op: Operator,
    pub value: FieldValue,
}

/// Conjunction/disjunction tree over field conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    MatchAll,
    And(Vec<Criterion>),
    Or(Vec<Criterion>),
    Field(Condition),
}

impl Criterion {
    pub fn field(field: CourseField, op: Operator, value: FieldValue) -> Self {
        Criterion::Field(Condition { field, op, value })
    }

    pub fn text(field: CourseField, op: Operator, text: &str) -> Self {
        Self::field(field, op, FieldValue::Text(text.to_string()))
    }
}

/// Edit-distance tolerance for fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Scales with term length: 0 edits up to 2 chars, 1 up to 5, 2 beyond.
    Auto,
}

impl Fuzziness {
    pub fn max_edits(&self, term: &str) -> usize {
        match self {
            Fuzziness::Auto => match term.chars().count() {
                0..=2 => 0,
                3..=5 => 1,
                _ => 2,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    Filter(Criterion),
    FuzzyMultiMatch {
        text: String,
        fields: Vec<CourseField>,
        fuzziness: Fuzziness,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: QueryExpr,
    pub page: PageRequest,
    pub track_total_hits: bool,
}
