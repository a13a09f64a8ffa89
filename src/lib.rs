//! Course Search Service Library
//!
//! This library crate defines the modules that make up the course search service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`search`**: The core query logic. Normalizes paging and sort, builds the
//!   primary query from the request filters and escalates through fuzzy and
//!   substring fallbacks for free-text requests. Also hosts the HTTP handlers.
//! - **`backend`**: The search backend contract (`SearchBackend`) with an
//!   Elasticsearch implementation and an in-memory one.
//! - **`catalog`**: Startup loading of sample course data.
//! - **`config`**: Layered configuration (defaults, file, environment).

pub mod backend;
pub mod catalog;
pub mod config;
pub mod search;

#[cfg(test)]
pub(crate) mod fixtures;
