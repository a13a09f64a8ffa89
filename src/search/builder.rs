//! Query builders for the three escalation stages.
//!
//! Primary and containment queries share the same non-text filters; they only
//! differ in how the free text is matched. The fuzzy query carries
//! the text alone.

use super::criteria::PageRequest;
use super::query::{CourseField, Criterion, FieldValue, Fuzziness, Operator, QueryExpr, SearchRequest};
use super::types::SearchCriteria;

const TEXT_FIELDS: [CourseField; 2] = [CourseField::Title, CourseField::Description];

/// Strict query: analyzed text match plus every present filter.
pub fn build_primary(criteria: &SearchCriteria, page: PageRequest) -> SearchRequest {
    build_conjunction(criteria, page, Operator::Matches)
}

/// Text-only multi-field fuzzy match over title and description.
pub fn build_fuzzy(criteria: &SearchCriteria, page: PageRequest) -> SearchRequest {
    SearchRequest {
        query: QueryExpr::FuzzyMultiMatch {
            text: criteria.text().unwrap_or_default().to_string(),
            fields: TEXT_FIELDS.to_vec(),
            fuzziness: Fuzziness::Auto,
        },
        page,
        track_total_hits: true,
    }
}

/// Same conjunction as [`build_primary`], with substring containment on the text.
pub fn build_contains(criteria: &SearchCriteria, page: PageRequest) -> SearchRequest {
    build_conjunction(criteria, page, Operator::Contains)
}

fn build_conjunction(
    criteria: &SearchCriteria,
    page: PageRequest,
    text_op: Operator,
) -> SearchRequest {
    let mut clauses = Vec::new();

    if let Some(text) = criteria.text() {
        clauses.push(Criterion::Or(
            TEXT_FIELDS
                .iter()
                .map(|field| Criterion::text(*field, text_op, text))
                .collect(),
        ));
    }
    clauses.extend(filter_clauses(criteria));

    let root = if clauses.is_empty() {
        Criterion::MatchAll
    } else {
        Criterion::And(clauses)
    };

    SearchRequest {
        query: QueryExpr::Filter(root),
        page,
        track_total_hits: true,
    }
}

/// Every non-text filter present on the criteria, in a fixed order.
fn filter_clauses(criteria: &SearchCriteria) -> Vec<Criterion> {
    let mut clauses = Vec::new();

    if let Some(category) = criteria.category_filter() {
        clauses.push(Criterion::text(CourseField::Category, Operator::Is, category));
    }
    if let Some(course_type) = criteria.course_type {
        clauses.push(Criterion::text(CourseField::Type, Operator::Is, course_type.as_str()));
    }

    if let Some(min_price) = criteria.min_price {
        clauses.push(Criterion::field(
            CourseField::Price,
            Operator::GreaterThanEqual,
            FieldValue::Number(min_price),
        ));
    }
    if let Some(max_price) = criteria.max_price {
        clauses.push(Criterion::field(
            CourseField::Price,
            Operator::LessThanEqual,
            FieldValue::Number(max_price),
        ));
    }

    // Age ranges overlap: the course's ceiling must reach the requested floor
    // and its floor must not exceed the requested ceiling.
    if let Some(min_age) = criteria.min_age {
        clauses.push(Criterion::field(
            CourseField::MaxAge,
            Operator::GreaterThanEqual,
            FieldValue::Integer(min_age.into()),
        ));
    }
    if let Some(max_age) = criteria.max_age {
        clauses.push(Criterion::field(
            CourseField::MinAge,
            Operator::LessThanEqual,
            FieldValue::Integer(max_age.into()),
        ));
    }

    if let Some(start_date) = criteria.start_date {
        clauses.push(Criterion::field(
            CourseField::NextSessionDate,
            Operator::GreaterThanEqual,
            FieldValue::Timestamp(start_date),
        ));
    }

    clauses
}
