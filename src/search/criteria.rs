//! Criteria Normalizer
//!
//! Coerces the paging and sort directives of a [`SearchCriteria`] into values
//! every query variant can use as-is. Never fails: out-of-range input is clamped
//! and unknown sort keys fall back to the "upcoming" order.

use super::query::CourseField;
use super::types::SearchCriteria;

pub const MIN_PAGE_SIZE: i64 = 1;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: CourseField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const UPCOMING: SortSpec = SortSpec {
        field: CourseField::NextSessionDate,
        direction: SortDirection::Asc,
    };
    pub const PRICE_ASC: SortSpec = SortSpec {
        field: CourseField::Price,
        direction: SortDirection::Asc,
    };
    pub const PRICE_DESC: SortSpec = SortSpec {
        field: CourseField::Price,
        direction: SortDirection::Desc,
    };
}

/// Zero-based page index, clamped page size and resolved sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: SortSpec,
}

impl PageRequest {
    /// Number of documents to skip before this page starts.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

pub fn normalize(criteria: &SearchCriteria) -> PageRequest {
    let size = criteria.size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE) as usize;
    let page = usize::try_from(criteria.page.max(0)).unwrap_or(usize::MAX);

    PageRequest {
        page,
        size,
        sort: resolve_sort(&criteria.sort),
    }
}

pub fn resolve_sort(sort: &str) -> SortSpec {
    match sort.to_lowercase().as_str() {
        "priceasc" => SortSpec::PRICE_ASC,
        "pricedesc" => SortSpec::PRICE_DESC,
        _ => SortSpec::UPCOMING,
    }
}
