use super::{BackendError, SearchBackend, SearchHits};
use crate::search::criteria::{SortDirection, SortSpec};
use crate::search::query::{
    Condition, CourseField, Criterion, FieldValue, Operator, QueryExpr, SearchRequest,
};
use crate::search::tokenizer::{contains_ignore_case, fuzzy_matches_any_term, matches_any_term};
use crate::search::types::CourseDocument;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::cmp::Ordering;
use std::sync::Arc;

/// Course index held entirely in process memory.
///
/// Evaluates the same query tree the Elasticsearch backend translates, with
/// exact total counts and deterministic ordering (ties broken by id).
#[derive(Clone, Default)]
pub struct MemoryBackend {
    documents: Arc<DashMap<String, CourseDocument>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: impl IntoIterator<Item = CourseDocument>) -> Self {
        let backend = Self::new();
        for doc in documents {
            backend.store_local(doc);
        }
        backend
    }

    pub fn store_local(&self, document: CourseDocument) {
        self.documents.insert(document.id.clone(), document);
    }

    pub fn get_local(&self, id: &str) -> Option<CourseDocument> {
        self.documents.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl SearchBackend for MemoryBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchHits, BackendError> {
        let mut matched: Vec<CourseDocument> = self
            .documents
            .iter()
            .filter(|entry| matches_query(&request.query, entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        matched.sort_by(|a, b| {
            compare_by(&request.page.sort, a, b).then_with(|| a.id.cmp(&b.id))
        });

        let total = matched.len() as u64;
        let documents = matched
            .into_iter()
            .skip(request.page.offset())
            .take(request.page.size)
            .collect();

        Ok(SearchHits { total, documents })
    }

    async fn count(&self) -> Result<u64, BackendError> {
        Ok(self.documents.len() as u64)
    }

    async fn index_documents(&self, documents: &[CourseDocument]) -> Result<usize, BackendError> {
        for doc in documents {
            self.store_local(doc.clone());
        }
        Ok(documents.len())
    }
}

fn matches_query(query: &QueryExpr, doc: &CourseDocument) -> bool {
    match query {
        QueryExpr::Filter(criterion) => evaluate(criterion, doc),
        QueryExpr::FuzzyMultiMatch {
            text,
            fields,
            fuzziness,
        } => fields.iter().any(|field| match field_ref(doc, *field) {
            FieldRef::Text(value) => fuzzy_matches_any_term(value, text, *fuzziness),
            _ => false,
        }),
    }
}

fn evaluate(criterion: &Criterion, doc: &CourseDocument) -> bool {
    match criterion {
        Criterion::MatchAll => true,
        Criterion::And(clauses) => clauses.iter().all(|c| evaluate(c, doc)),
        Criterion::Or(clauses) => clauses.iter().any(|c| evaluate(c, doc)),
        Criterion::Field(condition) => condition_holds(condition, doc),
    }
}

enum FieldRef<'a> {
    Text(&'a str),
    Number(f64),
    Timestamp(DateTime<Utc>),
}

fn field_ref(doc: &CourseDocument, field: CourseField) -> FieldRef<'_> {
    match field {
        CourseField::Title => FieldRef::Text(&doc.title),
        CourseField::Description => FieldRef::Text(&doc.description),
        CourseField::Category => FieldRef::Text(&doc.category),
        CourseField::Type => FieldRef::Text(doc.course_type.as_str()),
        CourseField::Price => FieldRef::Number(doc.price),
        CourseField::MinAge => FieldRef::Number(doc.min_age.into()),
        CourseField::MaxAge => FieldRef::Number(doc.max_age.into()),
        CourseField::NextSessionDate => FieldRef::Timestamp(doc.next_session_date),
    }
}

fn condition_holds(condition: &Condition, doc: &CourseDocument) -> bool {
    let actual = field_ref(doc, condition.field);

    match (condition.op, &actual, &condition.value) {
        (Operator::Matches, FieldRef::Text(text), FieldValue::Text(query)) => {
            matches_any_term(text, query)
        }
        (Operator::Contains, FieldRef::Text(text), FieldValue::Text(needle)) => {
            contains_ignore_case(text, needle)
        }
        (Operator::Is, FieldRef::Text(text), FieldValue::Text(expected)) => {
            *text == expected.as_str()
        }
        (op, _, expected) => match compare_value(&actual, expected) {
            Some(ordering) => match op {
                Operator::Is => ordering == Ordering::Equal,
                Operator::GreaterThanEqual => ordering != Ordering::Less,
                Operator::LessThanEqual => ordering != Ordering::Greater,
                Operator::Matches | Operator::Contains => false,
            },
            None => false,
        },
    }
}

fn compare_value(actual: &FieldRef<'_>, expected: &FieldValue) -> Option<Ordering> {
    match (actual, expected) {
        (FieldRef::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
        (FieldRef::Number(a), FieldValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (FieldRef::Timestamp(a), FieldValue::Timestamp(b)) => Some(a.cmp(b)),
        (FieldRef::Text(a), FieldValue::Text(b)) => Some((*a).cmp(b.as_str())),
        _ => None,
    }
}

fn compare_by(sort: &SortSpec, a: &CourseDocument, b: &CourseDocument) -> Ordering {
    let ordering = match (field_ref(a, sort.field), field_ref(b, sort.field)) {
        (FieldRef::Number(x), FieldRef::Number(y)) => x.total_cmp(&y),
        (FieldRef::Timestamp(x), FieldRef::Timestamp(y)) => x.cmp(&y),
        (FieldRef::Text(x), FieldRef::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    };

    match sort.direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
