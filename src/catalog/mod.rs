//! Catalog Module
//!
//! Seeds the course index with sample data when the service starts.
//!
//! ## Workflow
//! 1. **Index**: Makes sure the backend index exists, creating it with mappings if needed.
//! 2. **Check**: Leaves an index that already holds courses untouched.
//! 3. **Read**: Parses the sample file (a JSON array of courses).
//! 4. **Store**: Assigns ids to courses without one and bulk indexes them.

pub mod loader;
