//! Project filtering functionality.
//!
//! The list endpoint already receives the filter's types as a hint, but the
//! API is free to ignore it, so the fetched list is always filtered again
//! locally with the classifier.

use tracing::debug;

use crate::config::ProjectFilter;
use crate::project::Project;

/// Keep only the projects whose type passes `filter`, preserving order.
#[must_use]
pub fn filter_projects(projects: Vec<Project>, filter: &ProjectFilter) -> Vec<Project> {
    let before = projects.len();

    let matching: Vec<Project> = projects
        .into_iter()
        .filter(|project| filter.matches(&project.project_type))
        .collect();

    debug!(
        %filter,
        fetched = before,
        matching = matching.len(),
        "filtered projects"
    );

    matching
}
