//! Course Search Module
//!
//! Turns a request's filters into backend queries and decides which query's
//! hits are returned.
//!
//! ## Pipeline
//! 1. **Normalize**: Paging and sort directives are clamped into a `PageRequest`.
//! 2. **Primary**: Every present filter is ANDed into one strict query.
//! 3. **Escalate**: For fuzzy free-text requests with no primary hits, a text-only
//!    fuzzy query runs, then a substring query with all filters reapplied.
//!
//! ## Submodules
//! - **`types`**: Criteria, course documents and results.
//! - **`criteria`**: The criteria normalizer (page bounds, sort resolution).
//! - **`query`**: Backend-neutral filter-expression tree sent to a `SearchBackend`.
//! - **`builder`**: Builds the primary, fuzzy and containment queries.
//! - **`engine`**: `CourseSearchService`, the escalation logic.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`tokenizer`**: Text analysis used by the in-memory backend.

pub mod builder;
pub mod criteria;
pub mod engine;
pub mod handlers;
pub mod query;
pub mod tokenizer;
pub mod types;
