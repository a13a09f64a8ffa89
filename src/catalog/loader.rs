use crate::backend::SearchBackend;
use crate::search::types::CourseDocument;
use anyhow::{Context, Result};
use std::path::Path;

/// What a startup load did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The index already held this many courses; nothing was read.
    Skipped { existing: u64 },
    /// This many courses were indexed from the sample file.
    Loaded { indexed: usize },
}

pub async fn load_sample_data(backend: &dyn SearchBackend, path: &Path) -> Result<LoadOutcome> {
    tracing::info!("Starting sample data loading...");

    if backend.ensure_index().await? {
        tracing::info!("Created course index");
    }

    let existing = backend.count().await?;
    if existing > 0 {
        tracing::info!("Found {} existing courses, skipping data load", existing);
        return Ok(LoadOutcome::Skipped { existing });
    }

    let courses = read_courses(path)?;
    let indexed = backend
        .index_documents(&courses)
        .await
        .context("Could not index sample data")?;

    tracing::info!("Successfully indexed {} courses", indexed);
    Ok(LoadOutcome::Loaded { indexed })
}

/// Parse a JSON array of courses, giving every course without an id a fresh one.
pub fn read_courses(path: &Path) -> Result<Vec<CourseDocument>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read sample data from {}", path.display()))?;

    let mut courses: Vec<CourseDocument> = serde_json::from_str(&raw)
        .with_context(|| format!("Could not parse sample data in {}", path.display()))?;

    for course in courses.iter_mut().filter(|c| c.id.is_empty()) {
        course.id = uuid::Uuid::new_v4().to_string();
    }

    Ok(courses)
}
